//! Cart store and cart identifier issuance.
//!
//! Carts are created on first reference, so an unknown cart id is never an
//! error. Failed validations (unknown product, short stock) leave the cart
//! unchanged and return it as-is.

mod issuer;
mod memory;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::models::{Cart, ProductId};

pub use issuer::{CartIdIssuer, CART_ID_PREFIX};
pub use memory::InMemoryCartStore;

/// Per-identifier shopping carts.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// The cart for `cart_id`, created empty if it does not exist yet.
    async fn get_or_create(&self, cart_id: &str) -> Cart;

    /// Add `quantity` of a product, merging with an existing line.
    async fn add(&self, cart_id: &str, product_id: ProductId, quantity: i32) -> Cart;

    /// Set a line's quantity. Zero or less removes the line.
    async fn update(&self, cart_id: &str, product_id: ProductId, quantity: i32) -> Cart;

    /// Drop a line if present.
    async fn remove(&self, cart_id: &str, product_id: ProductId) -> Cart;

    /// Empty the cart.
    async fn clear(&self, cart_id: &str) -> bool;

    /// Empty the cart and return what it held, in one step. Two callers
    /// taking the same cart never both see its items.
    async fn take(&self, cart_id: &str) -> Cart;
}
