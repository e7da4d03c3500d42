//! Queries against the `orders` and `items` tables.

use super::OrderDb;
use crate::model::{Item, ItemId, Order, OrderId, OrderStatus};
use sqlx::{FromRow, SqliteConnection};
use std::collections::HashMap;

#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    customer_id: i64,
    address: String,
    status: String,
}

#[derive(Debug, FromRow)]
struct ItemRow {
    id: i64,
    order_id: i64,
    quantity: Option<i64>,
    price: f64,
    item_name: String,
}

impl OrderRow {
    fn into_order(self, items: Vec<Item>) -> Result<Order, sqlx::Error> {
        let status = OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == self.status)
            .ok_or_else(|| {
                sqlx::Error::Decode(format!("unknown order status '{}'", self.status).into())
            })?;
        Ok(Order {
            id: Some(OrderId(self.id)),
            customer_id: self.customer_id,
            address: self.address,
            status,
            items,
        })
    }
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: Some(ItemId(row.id)),
            order_id: Some(OrderId(row.order_id)),
            quantity: row.quantity,
            price: row.price,
            item_name: row.item_name,
        }
    }
}

const SELECT_ORDERS: &str = "SELECT id, customer_id, address, status FROM orders";
const SELECT_ITEMS: &str = "SELECT id, order_id, quantity, price, item_name FROM items";

impl OrderDb {
    pub async fn fetch_order(&self, id: OrderId) -> Result<Option<Order>, sqlx::Error> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDERS} WHERE id = ?"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, ItemRow>(&format!(
            "{SELECT_ITEMS} WHERE order_id = ? ORDER BY id"
        ))
        .bind(id.0)
        .fetch_all(&self.pool)
        .await?;
        row.into_order(items.into_iter().map(Item::from).collect())
            .map(Some)
    }

    /// Every order with its items, in id order.
    pub async fn fetch_orders(&self) -> Result<Vec<Order>, sqlx::Error> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDERS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        let mut items: HashMap<i64, Vec<Item>> = HashMap::new();
        let item_rows = sqlx::query_as::<_, ItemRow>(&format!("{SELECT_ITEMS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        for row in item_rows {
            items.entry(row.order_id).or_default().push(row.into());
        }

        rows.into_iter()
            .map(|row| {
                let owned = items.remove(&row.id).unwrap_or_default();
                row.into_order(owned)
            })
            .collect()
    }

    /// Writes the order and its items in one transaction, then fills in the ids the database
    /// assigned.
    pub async fn insert_order(&self, order: &mut Order) -> Result<OrderId, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query("INSERT INTO orders (customer_id, address, status) VALUES (?, ?, ?)")
            .bind(order.customer_id)
            .bind(&order.address)
            .bind(order.status.as_str())
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        let id = OrderId(id);

        for item in &mut order.items {
            insert_item(&mut tx, id, item).await?;
        }

        tx.commit().await?;
        order.id = Some(id);
        Ok(id)
    }

    /// Writes `order` over the stored row in one transaction.
    ///
    /// Items that still carry a stored id are updated in place, items without one are
    /// inserted, and stored items missing from `order.items` are deleted.
    pub async fn update_order(&self, id: OrderId, order: &mut Order) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE orders SET customer_id = ?, address = ?, status = ? WHERE id = ?")
            .bind(order.customer_id)
            .bind(&order.address)
            .bind(order.status.as_str())
            .bind(id.0)
            .execute(&mut *tx)
            .await?;

        let stored: Vec<i64> = sqlx::query_scalar("SELECT id FROM items WHERE order_id = ?")
            .bind(id.0)
            .fetch_all(&mut *tx)
            .await?;
        for stale in stored
            .iter()
            .filter(|stored_id| order.item(ItemId(**stored_id)).is_none())
        {
            sqlx::query("DELETE FROM items WHERE id = ?")
                .bind(*stale)
                .execute(&mut *tx)
                .await?;
        }

        for item in &mut order.items {
            match item.id {
                Some(item_id) if stored.contains(&item_id.0) => {
                    sqlx::query(
                        "UPDATE items SET quantity = ?, price = ?, item_name = ? WHERE id = ?",
                    )
                    .bind(item.quantity)
                    .bind(item.price)
                    .bind(&item.item_name)
                    .bind(item_id.0)
                    .execute(&mut *tx)
                    .await?;
                }
                _ => insert_item(&mut tx, id, item).await?,
            }
        }

        tx.commit().await
    }

    /// Stores one more item under `order_id` and returns it with its new id.
    pub async fn add_item(&self, order_id: OrderId, mut item: Item) -> Result<Item, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        insert_item(&mut conn, order_id, &mut item).await?;
        Ok(item)
    }

    /// Deletes the order. Its items go with it through the foreign key.
    pub async fn delete_order(&self, id: OrderId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: OrderId,
    item: &mut Item,
) -> Result<(), sqlx::Error> {
    let id = sqlx::query(
        "INSERT INTO items (order_id, quantity, price, item_name) VALUES (?, ?, ?, ?)",
    )
    .bind(order_id.0)
    .bind(item.quantity)
    .bind(item.price)
    .bind(&item.item_name)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    item.id = Some(ItemId(id));
    item.order_id = Some(order_id);
    Ok(())
}
