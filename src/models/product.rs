use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::ProductId;

/// A catalog entry.
///
/// `is_available` is false whenever `stock` is zero; it may also be cleared
/// on its own to withdraw a listed product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    pub stock: u32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// True when the product can be sold in the given quantity.
    ///
    /// Non-positive quantities are satisfied by any available product.
    pub fn can_supply(&self, quantity: i32) -> bool {
        self.is_available && i64::from(self.stock) >= i64::from(quantity)
    }
}
