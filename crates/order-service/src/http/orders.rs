//! Handlers for `/orders` and the items nested under it.

use super::error::ApiError;
use super::extract::{ItemPath, JsonPayload, ListQuery, OrderPath};
use super::AppState;
use crate::model::{Item, Order, OrderId, Record};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use tracing::info;

fn order_location(id: Option<OrderId>) -> String {
    match id {
        Some(id) => format!("/orders/{id}"),
        None => "/orders".to_string(),
    }
}

pub async fn list_orders(
    State(state): State<AppState>,
    query: ListQuery,
) -> Result<Json<Value>, ApiError> {
    let filter = query.filter();
    info!(?filter, "Request to list orders");
    let orders = state.orders.list_orders(filter).await?;
    let body: Vec<Value> = orders.iter().map(|order| order.serialize()).collect();
    Ok(Json(Value::Array(body)))
}

pub async fn get_order(
    State(state): State<AppState>,
    OrderPath(id): OrderPath,
) -> Result<Json<Value>, ApiError> {
    info!(%id, "Request to get order");
    let order = state.orders.find_order(id).await?;
    Ok(Json(order.serialize()))
}

pub async fn create_order(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, ApiError> {
    info!("Request to create an order");
    let draft = Order::from_value(&body)?;
    let order = state.orders.create_order(draft).await?;
    let location = order_location(order.id);
    info!(%location, "Order created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(order.serialize()),
    ))
}

pub async fn update_order(
    State(state): State<AppState>,
    OrderPath(id): OrderPath,
    JsonPayload(body): JsonPayload,
) -> Result<Json<Value>, ApiError> {
    info!(%id, "Request to update order");
    let replacement = Order::from_value(&body)?;
    let order = state.orders.update_order(id, replacement).await?;
    Ok(Json(order.serialize()))
}

pub async fn delete_order(
    State(state): State<AppState>,
    OrderPath(id): OrderPath,
) -> Result<StatusCode, ApiError> {
    info!(%id, "Request to delete order");
    state.orders.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Adds an item. The order in the path wins over any `order_id` in the body.
pub async fn create_item(
    State(state): State<AppState>,
    OrderPath(order_id): OrderPath,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, ApiError> {
    info!(%order_id, "Request to add an item");
    let draft = Item::from_value(&body)?;
    let item = state.orders.add_item(order_id, draft).await?;
    let location = match item.id {
        Some(item_id) => format!("/orders/{order_id}/items/{item_id}"),
        None => order_location(Some(order_id)),
    };
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(item.serialize()),
    ))
}

pub async fn get_item(
    State(state): State<AppState>,
    ItemPath(order_id, item_id): ItemPath,
) -> Result<Json<Value>, ApiError> {
    info!(%order_id, %item_id, "Request to get item");
    let item = state.orders.find_item(order_id, item_id).await?;
    Ok(Json(item.serialize()))
}

pub async fn delete_item(
    State(state): State<AppState>,
    ItemPath(order_id, item_id): ItemPath,
) -> Result<StatusCode, ApiError> {
    info!(%order_id, %item_id, "Request to delete item");
    state.orders.remove_item(order_id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn cancel_order(
    State(state): State<AppState>,
    OrderPath(id): OrderPath,
) -> Result<Json<Value>, ApiError> {
    info!(%id, "Request to cancel order");
    let order = state.orders.cancel_order(id).await?;
    Ok(Json(order.serialize()))
}
