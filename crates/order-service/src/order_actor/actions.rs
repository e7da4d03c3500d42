//! Custom actions for the Order actor.
//!
//! Item management and cancellation run inside the actor as actions, so each one reads and
//! writes the order in a single step. They are handled by
//! [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action).

use crate::model::{Item, ItemId, Order};

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Attaches a drafted item. The database assigns its id, and the order's id replaces any
    /// `order_id` the draft carried.
    AddItem(Item),
    /// Detaches the item with the given id, if the order owns it.
    RemoveItem(ItemId),
    /// Moves the order to `Cancelled`.
    ///
    /// # Errors
    /// Fails with `InvalidTransition` for completed or returned orders.
    Cancel,
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    /// The item as stored.
    ItemAdded(Item),
    /// The removed item, or `None` when the order had no such item.
    ItemRemoved(Option<Item>),
    /// The order after cancellation.
    Cancelled(Order),
}

/// Filters accepted by the Order actor's `List` request.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderFilter {
    /// Orders placed by this customer.
    ByCustomer(i64),
    /// Orders holding at least one item with exactly this name.
    ByItemName(String),
}
