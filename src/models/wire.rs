//! JSON wire helpers and request/response bodies.
//!
//! Request bodies are matched without regard to key case or `_`/`-`
//! separators, so `productId`, `ProductId` and `product_id` all land on the
//! same field. Keys are folded before deserialisation; the target types name
//! their fields in folded form.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{OrderStatus, ProductId};

/// Fold a JSON object key: lowercase, separators dropped.
pub fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Recursively fold every object key in `value`.
pub fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (fold_key(&k), fold_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

/// Deserialize JSON bytes, matching object keys case-insensitively.
pub fn from_slice_ignore_case<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    let value: Value = serde_json::from_slice(bytes)?;
    serde_json::from_value(fold_keys(value))
}

/// Body of `POST /api/inventory/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct CheckStockRequest {
    #[serde(rename(deserialize = "productid"))]
    pub product_id: ProductId,
    #[serde(rename(deserialize = "quantity"))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckStockResponse {
    pub is_in_stock: bool,
}

/// Body of the cart add and update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct CartLineRequest {
    #[serde(rename(deserialize = "productid"))]
    pub product_id: ProductId,
    #[serde(rename(deserialize = "quantity"))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct IssueCartIdResponse {
    #[serde(rename(deserialize = "cartid"))]
    pub cart_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ClearCartResponse {
    #[serde(rename(deserialize = "success"))]
    pub success: bool,
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct CheckoutRequest {
    #[serde(rename(deserialize = "cartid"))]
    pub cart_id: String,
    #[serde(rename(deserialize = "customername"))]
    pub customer_name: String,
    #[serde(rename(deserialize = "customeremail"))]
    pub customer_email: String,
    #[serde(rename(deserialize = "shippingaddress"))]
    pub shipping_address: String,
}

/// Body of `PUT /api/orders/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct CreateThreadResponse {
    #[serde(rename(deserialize = "threadid"))]
    pub thread_id: String,
}

/// Body of `POST /api/chat/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ChatMessageRequest {
    #[serde(rename(deserialize = "message"))]
    pub message: String,
    #[serde(rename(deserialize = "threadid"), default)]
    pub thread_id: Option<String>,
    #[serde(rename(deserialize = "cartid"), default)]
    pub cart_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ChatMessageResponse {
    #[serde(rename(deserialize = "threadid"))]
    pub thread_id: String,
    #[serde(rename(deserialize = "reply"))]
    pub reply: String,
}
