//! Inventory store: the product catalog and its stock levels.
//!
//! "Not found" is never an error here; lookups return `None` or an empty list.

mod catalog;
mod memory;


use async_trait::async_trait;

use crate::models::{Product, ProductId};

pub use catalog::{
    load_catalog, parse_catalog, CatalogEntry, CatalogError, CatalogFile, EMBEDDED_CATALOG,
};
pub use memory::InMemoryInventory;

/// Catalog queries and stock mutation.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All available products, in catalog order.
    async fn list_available(&self) -> Vec<Product>;

    /// The product with `id`, only if it exists and is available.
    async fn get(&self, id: ProductId) -> Option<Product>;

    /// Available products whose category matches, ignoring case.
    async fn list_by_category(&self, category: &str) -> Vec<Product>;

    /// Distinct categories of available products, in catalog order.
    async fn list_categories(&self) -> Vec<String>;

    /// True iff the product exists, is available and has `stock >= quantity`.
    async fn is_in_stock(&self, id: ProductId, quantity: i32) -> bool;

    /// Subtract `quantity` from stock. Fails without mutation when the product
    /// is unknown or short of stock; withdraws the product when stock hits zero.
    async fn decrement_stock(&self, id: ProductId, quantity: u32) -> bool;

    /// Withdraw or relist a product. Relisting a product with no stock is
    /// refused.
    async fn set_availability(&self, id: ProductId, available: bool) -> bool;
}
