//! Error types for the Order actor.

use crate::model::{DataValidationError, InvalidTransition, ItemId, OrderId};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order with id '{0}' was not found.")]
    NotFound(String),

    /// The item does not exist, or belongs to a different order.
    #[error("Item with id '{item_id}' was not found in order '{order_id}'.")]
    ItemNotFound { order_id: OrderId, item_id: ItemId },

    /// The order data provided is invalid.
    #[error(transparent)]
    Validation(#[from] DataValidationError),

    /// The requested status change is not allowed from the current status.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    /// The order tables could not be read or written.
    #[error("Database error: {0}")]
    Database(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<sqlx::Error> for OrderError {
    fn from(e: sqlx::Error) -> Self {
        OrderError::Database(e.to_string())
    }
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
