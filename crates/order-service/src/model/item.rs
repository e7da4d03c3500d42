use crate::model::record::{DataValidationError, Fields, Record};
use crate::model::OrderId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::Display;

/// Type-safe identifier for Items. Unique across all orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub i64);

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A line item owned by exactly one [`Order`](crate::model::Order).
///
/// `id` and `order_id` stay `None` on a draft and are filled in when the owning order is
/// stored.
#[derive(Debug, Clone, Default)]
pub struct Item {
    pub id: Option<ItemId>,
    pub order_id: Option<OrderId>,
    pub quantity: Option<i64>,
    /// Stored as a float even when the payload sends an integer, so `1` reads back as `1.0`.
    pub price: f64,
    pub item_name: String,
}

impl Item {
    pub fn new(item_name: impl Into<String>, quantity: Option<i64>, price: f64) -> Self {
        Self {
            id: None,
            order_id: None,
            quantity,
            price,
            item_name: item_name.into(),
        }
    }
}

/// Items with identifiers compare by identifier. Drafts compare by content.
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => {
                self.item_name == other.item_name
                    && self.order_id == other.order_id
                    && self.quantity == other.quantity
                    && self.price == other.price
            }
        }
    }
}

impl Record for Item {
    const KIND: &'static str = "Item";

    fn serialize(&self) -> Value {
        json!({
            "item_id": self.id,
            "order_id": self.order_id,
            "quantity": self.quantity,
            "price": self.price,
            "item_name": self.item_name,
        })
    }

    fn deserialize(&mut self, data: &Value) -> Result<&mut Self, DataValidationError> {
        let fields = Fields::of(Self::KIND, data)?;
        let order_id: OrderId = fields.required("order_id")?;
        let quantity: Option<i64> = fields.optional("quantity")?;
        let price: f64 = fields.required("price")?;
        let item_name: String = fields.required("item_name")?;

        self.order_id = Some(order_id);
        if quantity.is_some() {
            self.quantity = quantity;
        }
        self.price = price;
        self.item_name = item_name;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> Value {
        json!({"order_id": 4, "quantity": 2, "price": 2.99, "item_name": "Widget"})
    }

    #[test]
    fn test_serialize_shape() {
        let item = Item {
            id: Some(ItemId(7)),
            order_id: Some(OrderId(3)),
            quantity: None,
            price: 10.0,
            item_name: "Bolt".into(),
        };
        assert_eq!(
            item.serialize(),
            json!({"item_id": 7, "order_id": 3, "quantity": null, "price": 10.0, "item_name": "Bolt"})
        );
    }

    #[test]
    fn test_deserialize_reads_fields_and_ignores_item_id() {
        let mut data = sample_data();
        data["item_id"] = json!(99);
        data["colour"] = json!("red");

        let item = Item::from_value(&data).unwrap();
        assert_eq!(item.id, None);
        assert_eq!(item.order_id, Some(OrderId(4)));
        assert_eq!(item.quantity, Some(2));
        assert_eq!(item.price, 2.99);
        assert_eq!(item.item_name, "Widget");
    }

    #[test]
    fn test_round_trip() {
        let item = Item::from_value(&sample_data()).unwrap();
        let again = Item::from_value(&item.serialize()).unwrap();
        assert_eq!(again, item);
    }

    #[test]
    fn test_quantity_is_optional() {
        let item = Item::from_value(&json!({"order_id": 1, "price": 1, "item_name": "Nut"})).unwrap();
        assert_eq!(item.quantity, None);
        assert_eq!(item.price, 1.0);
    }

    #[test]
    fn test_integer_price_serializes_as_float() {
        let item = Item::from_value(&json!({"order_id": 1, "price": 1, "item_name": "Nut"})).unwrap();
        assert_eq!(item.serialize()["price"], json!(1.0));
        assert!(item.serialize()["price"].is_f64());
    }

    #[test]
    fn test_each_required_key_is_reported() {
        for key in ["order_id", "price", "item_name"] {
            let mut data = sample_data();
            data.as_object_mut().unwrap().remove(key);
            let err = Item::from_value(&data).unwrap_err();
            assert_eq!(
                err,
                DataValidationError::MissingField {
                    entity: "Item",
                    field: key
                }
            );
        }
    }

    #[test]
    fn test_bad_type_leaves_item_untouched() {
        let mut item = Item::new("Keep", Some(1), 5.0);
        let err = item
            .deserialize(&json!({"order_id": 1, "price": "cheap", "item_name": "Drop"}))
            .unwrap_err();
        assert_eq!(err.field(), Some("price"));
        assert_eq!(item.item_name, "Keep");
        assert_eq!(item.order_id, None);
    }

    #[test]
    fn test_non_mapping_is_rejected() {
        let err = Item::from_value(&json!("Not a dictionary")).unwrap_err();
        assert_eq!(err, DataValidationError::NotAMapping { entity: "Item" });
    }

    #[test]
    fn test_equality_prefers_identifiers() {
        let mut a = Item::new("Foo", Some(1), 1.0);
        let mut b = Item::new("Bar", Some(9), 2.0);
        assert_ne!(a, b);

        a.id = Some(ItemId(5));
        b.id = Some(ItemId(5));
        assert_eq!(a, b);

        b.id = Some(ItemId(6));
        assert_ne!(a, b);

        let draft = Item { id: None, ..a.clone() };
        assert_eq!(draft, a);
    }
}
