//! Request extractors that reject with [`ApiError`] so every failure is a JSON body.

use super::error::ApiError;
use crate::model::{ItemId, OrderId};
use crate::order_actor::OrderFilter;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::Deserialize;
use serde_json::Value;

const JSON_MEDIA_TYPE: &str = "application/json";

/// A JSON request body sent with `Content-Type: application/json`.
///
/// Any other media type is rejected with 415 before the body is read. A body that is not
/// valid JSON is rejected with 400. Shape checks are left to the [`Record`](crate::model::Record)
/// the handler reads it into.
#[derive(Debug)]
pub struct JsonPayload(pub Value);

/// Accepts `application/json`, with or without parameters such as `charset`.
pub fn check_content_type(headers: &HeaderMap) -> Result<(), ApiError> {
    let media_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim);

    match media_type {
        Some(media_type) if media_type.eq_ignore_ascii_case(JSON_MEDIA_TYPE) => Ok(()),
        Some(other) => Err(ApiError::UnsupportedMediaType(format!(
            "Content-Type must be {JSON_MEDIA_TYPE}, got {other}"
        ))),
        None => Err(ApiError::UnsupportedMediaType(format!(
            "Content-Type must be {JSON_MEDIA_TYPE}"
        ))),
    }
}

impl<S: Send + Sync> FromRequest<S> for JsonPayload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        check_content_type(req.headers())?;
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        let value = serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Malformed JSON body: {e}")))?;
        Ok(Self(value))
    }
}

/// The `{id}` segment of `/orders/{id}/...`.
#[derive(Debug, Clone, Copy)]
pub struct OrderPath(pub OrderId);

impl<S: Send + Sync> FromRequestParts<S> for OrderPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::NotFound(e.body_text()))?;
        Ok(Self(OrderId(id)))
    }
}

/// The `{id}` and `{item_id}` segments of `/orders/{id}/items/{item_id}`.
#[derive(Debug, Clone, Copy)]
pub struct ItemPath(pub OrderId, pub ItemId);

impl<S: Send + Sync> FromRequestParts<S> for ItemPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((order_id, item_id)) = Path::<(i64, i64)>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::NotFound(e.body_text()))?;
        Ok(Self(OrderId(order_id), ItemId(item_id)))
    }
}

/// Query string of `GET /orders`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub customer_id: Option<i64>,
    pub item: Option<String>,
}

impl ListQuery {
    /// `customer_id` wins when both parameters are given.
    pub fn filter(self) -> Option<OrderFilter> {
        match (self.customer_id, self.item) {
            (Some(customer_id), _) => Some(OrderFilter::ByCustomer(customer_id)),
            (None, Some(name)) => Some(OrderFilter::ByItemName(name)),
            (None, None) => None,
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ListQuery {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ListQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(query)
    }
}
