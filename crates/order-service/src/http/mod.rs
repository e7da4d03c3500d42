//! # HTTP Layer
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | service info |
//! | GET | `/health` | liveness |
//! | GET, POST | `/orders` | [`orders::list_orders`], [`orders::create_order`] |
//! | GET, PUT, DELETE | `/orders/{id}` | [`orders::get_order`], [`orders::update_order`], [`orders::delete_order`] |
//! | POST | `/orders/{id}/items` | [`orders::create_item`] |
//! | GET, DELETE | `/orders/{id}/items/{item_id}` | [`orders::get_item`], [`orders::delete_item`] |
//! | POST | `/orders/{id}/cancel` | [`orders::cancel_order`] |
//!
//! Errors are rendered by [`ApiError`].

pub mod error;
pub mod extract;
pub mod orders;

pub use error::ApiError;

use crate::clients::OrderClient;
use axum::http::{Method, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(
            "/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route(
            "/orders/{id}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/orders/{id}/items", post(orders::create_item))
        .route(
            "/orders/{id}/items/{item_id}",
            get(orders::get_item).delete(orders::delete_item),
        )
        .route("/orders/{id}/cancel", post(orders::cancel_order))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({
        "name": "Order REST API Service",
        "version": env!("CARGO_PKG_VERSION"),
        "paths": "/orders",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "OK"}))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{method} is not allowed on {}", uri.path()))
}
