use crate::model::record::{DataValidationError, Fields, Record};
use crate::model::{validate_transition, InvalidTransition, Item, ItemId, OrderStatus};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a customer order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation and replacement payloads (both are draft `Order`s)
/// - Item actions ([`OrderAction`](crate::order_actor::OrderAction))
/// - List filters ([`OrderFilter`](crate::order_actor::OrderFilter))
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub id: Option<OrderId>,
    pub customer_id: i64,
    pub address: String,
    pub status: OrderStatus,
    pub items: Vec<Item>,
}

impl Order {
    /// Creates a draft order in the `Received` state with no items.
    pub fn new(customer_id: i64, address: impl Into<String>) -> Self {
        Self {
            customer_id,
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn item(&self, item_id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == Some(item_id))
    }

    pub fn has_item_named(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.item_name == name)
    }

    /// Moves the order to `Cancelled`.
    ///
    /// Cancelling an already cancelled order is a no-op. Completed and returned orders are
    /// refused and keep their status.
    pub fn cancel(&mut self) -> Result<(), InvalidTransition> {
        validate_transition(self.status, OrderStatus::Cancelled)?;
        self.status = OrderStatus::Cancelled;
        Ok(())
    }
}

impl Record for Order {
    const KIND: &'static str = "Order";

    fn serialize(&self) -> Value {
        let items: Vec<Value> = self.items.iter().map(|item| item.serialize()).collect();
        json!({
            "id": self.id,
            "customer_id": self.customer_id,
            "address": self.address,
            "status": self.status,
            "items": items,
        })
    }

    fn deserialize(&mut self, data: &Value) -> Result<&mut Self, DataValidationError> {
        let fields = Fields::of(Self::KIND, data)?;
        let customer_id: i64 = fields.required("customer_id")?;
        let address: String = fields.required("address")?;
        let status: Option<OrderStatus> = fields.optional("status")?;
        let items = match fields.raw("items") {
            None => None,
            Some(Value::Array(entries)) => Some(
                entries
                    .iter()
                    .map(Item::from_value)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Some(_) => return Err(fields.invalid("items", "expected a list of items")),
        };

        self.customer_id = customer_id;
        self.address = address;
        if let Some(status) = status {
            self.status = status;
        }
        self.items = items.unwrap_or_default();
        Ok(self)
    }
}
