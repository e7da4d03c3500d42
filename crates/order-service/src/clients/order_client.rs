//! # Order Client
//!
//! Provides a high-level API for interacting with the `Order` actor.
//! It wraps a `ResourceClient<Order>`, unpacks action results and turns framework errors back
//! into [`OrderError`]s.
use crate::model::{Item, ItemId, Order, OrderId};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError, OrderFilter};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Order actor.
///
/// This is the data-access handle for the service. Clones share the same actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores a drafted order and its items, returning it with identifiers assigned.
    #[instrument(skip(self, draft))]
    pub async fn create_order(&self, draft: Order) -> Result<Order, OrderError> {
        debug!(?draft, "create_order called");
        let order = self.inner.create(draft).await.map_err(Self::map_error)?;
        info!(order_id = ?order.id, items = order.items.len(), "Order created");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn find_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// All orders in creation order, optionally narrowed by `filter`.
    pub async fn list_orders(&self, filter: Option<OrderFilter>) -> Result<Vec<Order>, OrderError> {
        self.list(filter).await
    }

    /// Replaces the fields and items of an existing order. The id is kept.
    #[instrument(skip(self, replacement))]
    pub async fn update_order(&self, id: OrderId, replacement: Order) -> Result<Order, OrderError> {
        debug!(?replacement, "update_order called");
        self.inner
            .update(id, replacement)
            .await
            .map_err(Self::map_error)
    }

    /// Removes an order together with its items. Deleting an unknown order succeeds.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), OrderError> {
        match self.delete(id).await {
            Err(OrderError::NotFound(_)) => {
                debug!("Order already absent");
                Ok(())
            }
            result => result,
        }
    }

    #[instrument(skip(self, item))]
    pub async fn add_item(&self, order_id: OrderId, item: Item) -> Result<Item, OrderError> {
        match self.act(order_id, OrderAction::AddItem(item)).await? {
            OrderActionResult::ItemAdded(item) => Ok(item),
            other => Err(unexpected(other)),
        }
    }

    /// Looks up an item through the order that owns it.
    #[instrument(skip(self))]
    pub async fn find_item(&self, order_id: OrderId, item_id: ItemId) -> Result<Item, OrderError> {
        let order = self.find_order(order_id).await?;
        order
            .item(item_id)
            .cloned()
            .ok_or(OrderError::ItemNotFound { order_id, item_id })
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, order_id: OrderId, item_id: ItemId) -> Result<Item, OrderError> {
        match self.act(order_id, OrderAction::RemoveItem(item_id)).await? {
            OrderActionResult::ItemRemoved(Some(item)) => Ok(item),
            OrderActionResult::ItemRemoved(None) => {
                warn!("Item is not part of this order");
                Err(OrderError::ItemNotFound { order_id, item_id })
            }
            other => Err(unexpected(other)),
        }
    }

    /// Cancels an order. See [`Order::cancel`] for the rules.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<Order, OrderError> {
        match self.act(id, OrderAction::Cancel).await? {
            OrderActionResult::Cancelled(order) => Ok(order),
            other => Err(unexpected(other)),
        }
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: OrderActionResult) -> OrderError {
    OrderError::ActorCommunicationError(format!("Unexpected action result: {result:?}"))
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(error) => *error,
                Err(other) => OrderError::ActorCommunicationError(other.to_string()),
            },
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InvalidTransition, OrderStatus};
    use actor_framework::mock::MockClient;

    fn stored_order(id: i64) -> Order {
        let mut order = Order::new(1, "1 Main St");
        order.id = Some(OrderId(id));
        order
    }

    #[tokio::test]
    async fn test_find_order_maps_missing_to_not_found() {
        let mut mock = MockClient::<Order>::new();
        let client = OrderClient::new(mock.client());

        mock.expect_get(OrderId(4)).return_ok(None);

        let err = client.find_order(OrderId(4)).await.unwrap_err();
        assert_eq!(err, OrderError::NotFound("4".into()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_entity_errors_are_downcast() {
        let mut mock = MockClient::<Order>::new();
        let client = OrderClient::new(mock.client());

        let refusal = OrderError::InvalidTransition(InvalidTransition {
            from: OrderStatus::Completed,
            to: OrderStatus::Cancelled,
        });
        mock.expect_action(OrderId(1))
            .return_err(FrameworkError::EntityError(Box::new(refusal.clone())));

        let err = client.cancel_order(OrderId(1)).await.unwrap_err();
        assert_eq!(err, refusal);
        mock.verify();
    }

    #[tokio::test]
    async fn test_transport_errors_become_communication_errors() {
        let mut mock = MockClient::<Order>::new();
        let client = OrderClient::new(mock.client());

        mock.expect_list().return_err(FrameworkError::ActorClosed);

        let err = client.list_orders(None).await.unwrap_err();
        assert!(matches!(err, OrderError::ActorCommunicationError(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_delete_order_ignores_missing_order() {
        let mut mock = MockClient::<Order>::new();
        let client = OrderClient::new(mock.client());

        mock.expect_delete(OrderId(8))
            .return_err(FrameworkError::NotFound("8".into()));

        assert!(client.delete_order(OrderId(8)).await.is_ok());
        mock.verify();
    }

    #[tokio::test]
    async fn test_remove_item_reports_foreign_item() {
        let mut mock = MockClient::<Order>::new();
        let client = OrderClient::new(mock.client());

        mock.expect_action(OrderId(2))
            .return_ok(OrderActionResult::ItemRemoved(None));

        let err = client.remove_item(OrderId(2), ItemId(5)).await.unwrap_err();
        assert_eq!(
            err,
            OrderError::ItemNotFound {
                order_id: OrderId(2),
                item_id: ItemId(5)
            }
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_find_item_requires_ownership() {
        let mut mock = MockClient::<Order>::new();
        let client = OrderClient::new(mock.client());

        let mut item = Item::new("Foo", Some(1), 3.0);
        item.id = Some(ItemId(9));
        item.order_id = Some(OrderId(1));
        mock.expect_get(OrderId(1))
            .return_ok(Some(stored_order(1).with_item(item.clone())));
        mock.expect_get(OrderId(2)).return_ok(Some(stored_order(2)));

        assert_eq!(client.find_item(OrderId(1), ItemId(9)).await.unwrap(), item);
        assert!(matches!(
            client.find_item(OrderId(2), ItemId(9)).await,
            Err(OrderError::ItemNotFound { .. })
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_action_result_is_an_error() {
        let mut mock = MockClient::<Order>::new();
        let client = OrderClient::new(mock.client());

        mock.expect_action(OrderId(3))
            .return_ok(OrderActionResult::Cancelled(stored_order(3)));

        let err = client
            .add_item(OrderId(3), Item::new("Foo", None, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::ActorCommunicationError(_)));
        mock.verify();
    }
}
