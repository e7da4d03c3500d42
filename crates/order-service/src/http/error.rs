//! # HTTP Errors
//!
//! Every failure leaves the service as a JSON body:
//!
//! ```json
//! {"status": 404, "error": "Not Found", "message": "Order with id '7' was not found."}
//! ```

use crate::model::DataValidationError;
use crate::order_actor::OrderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The body or query string could not be parsed.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    /// No route, or a path segment that is not an identifier.
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    MethodNotAllowed(String),
}

impl From<DataValidationError> for ApiError {
    fn from(e: DataValidationError) -> Self {
        ApiError::Order(e.into())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Order(e) => match e {
                OrderError::Validation(_) | OrderError::InvalidTransition(_) => {
                    StatusCode::BAD_REQUEST
                }
                OrderError::NotFound(_) | OrderError::ItemNotFound { .. } => StatusCode::NOT_FOUND,
                OrderError::Database(_) | OrderError::ActorCommunicationError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), %message, "Request rejected");
        }

        let body = json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Unknown"),
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}
