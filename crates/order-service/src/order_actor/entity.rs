//! ActorEntity trait implementation for the Order domain type.
//!
//! Orders are kept in the [`OrderDb`] the actor runs with. Order and item identifiers come
//! from the database, so item ids stay unique across every order.

use super::actions::{OrderAction, OrderActionResult, OrderFilter};
use super::error::OrderError;
use crate::db::OrderDb;
use crate::model::{Order, OrderId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::debug;

impl Order {
    fn stored_id(&self) -> Result<OrderId, OrderError> {
        self.id
            .ok_or_else(|| OrderError::NotFound("<unsaved>".to_string()))
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = Order;
    type Update = Order;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Filter = OrderFilter;
    type Context = OrderDb;
    type Error = OrderError;

    /// Takes the draft as is. Ids are assigned when it is inserted.
    fn from_create_params(draft: Order) -> Result<Self, Self::Error> {
        Ok(Self { id: None, ..draft })
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        match filter {
            OrderFilter::ByCustomer(customer_id) => self.customer_id == *customer_id,
            OrderFilter::ByItemName(name) => self.has_item_named(name),
        }
    }

    /// Replaces every field except the id. Replacement items get fresh ids on save.
    async fn on_update(&mut self, replacement: Order, _db: &OrderDb) -> Result<(), Self::Error> {
        debug!(order_id = ?self.id, status = %replacement.status, "Replacing order");
        self.customer_id = replacement.customer_id;
        self.address = replacement.address;
        self.status = replacement.status;
        self.items = replacement
            .items
            .into_iter()
            .map(|mut item| {
                item.id = None;
                item
            })
            .collect();
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        db: &OrderDb,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::AddItem(item) => {
                let item = db.add_item(self.stored_id()?, item).await?;
                self.items.push(item.clone());
                Ok(OrderActionResult::ItemAdded(item))
            }
            OrderAction::RemoveItem(item_id) => {
                let removed = self
                    .items
                    .iter()
                    .position(|item| item.id == Some(item_id))
                    .map(|index| self.items.remove(index));
                Ok(OrderActionResult::ItemRemoved(removed))
            }
            OrderAction::Cancel => {
                self.cancel()?;
                Ok(OrderActionResult::Cancelled(self.clone()))
            }
        }
    }

    async fn load(id: &OrderId, db: &OrderDb) -> Result<Option<Self>, Self::Error> {
        Ok(db.fetch_order(*id).await?)
    }

    async fn load_all(db: &OrderDb) -> Result<Vec<Self>, Self::Error> {
        Ok(db.fetch_orders().await?)
    }

    async fn insert(&mut self, db: &OrderDb) -> Result<OrderId, Self::Error> {
        Ok(db.insert_order(self).await?)
    }

    async fn save(&mut self, db: &OrderDb) -> Result<(), Self::Error> {
        let id = self.stored_id()?;
        Ok(db.update_order(id, self).await?)
    }

    async fn remove(&self, db: &OrderDb) -> Result<(), Self::Error> {
        Ok(db.delete_order(self.stored_id()?).await?)
    }
}
