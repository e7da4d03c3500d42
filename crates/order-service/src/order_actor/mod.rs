//! # Order Actor
//!
//! The Order resource actor: orders, the items they own, and the cancel rule.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`actions`] - [`OrderAction`], [`OrderActionResult`] and [`OrderFilter`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use order_service::db::OrderDb;
//! use order_service::model::{Item, Order};
//! use order_service::order_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = OrderDb::connect("sqlite::memory:").await?;
//!     let (actor, client) = order_actor::new(32);
//!     tokio::spawn(actor.run(db));
//!
//!     let order = client.create_order(Order::new(7, "1 Main St")).await?;
//!     let order_id = order.id.ok_or("the database assigns ids")?;
//!
//!     let item = client.add_item(order_id, Item::new("Widget", Some(2), 2.99)).await?;
//!     assert_eq!(item.order_id, Some(order_id));
//!
//!     let cancelled = client.cancel_order(order_id).await?;
//!     assert_eq!(cancelled.status.as_str(), "Cancelled");
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
