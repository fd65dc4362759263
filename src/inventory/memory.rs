//! In-memory inventory.
//!
//! Each product sits behind its own mutex, so a stock check and the
//! decrement that follows it cannot interleave with another decrement of the
//! same product, while different products never contend.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::InventoryStore;
use crate::models::{Product, ProductId};

struct ProductSlot {
    id: ProductId,
    product: Mutex<Product>,
}

/// Inventory held in process memory, seeded once at startup.
pub struct InMemoryInventory {
    slots: Vec<ProductSlot>,
}

impl InMemoryInventory {
    pub fn new(products: Vec<Product>) -> Self {
        info!(products = products.len(), "inventory loaded");
        let slots = products
            .into_iter()
            .map(|product| ProductSlot {
                id: product.id,
                product: Mutex::new(product),
            })
            .collect();
        Self { slots }
    }

    fn slot(&self, id: ProductId) -> Option<&ProductSlot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    async fn available(&self) -> Vec<Product> {
        let mut products = Vec::new();
        for slot in &self.slots {
            let product = slot.product.lock().await;
            if product.is_available {
                products.push(product.clone());
            }
        }
        products
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventory {
    async fn list_available(&self) -> Vec<Product> {
        self.available().await
    }

    async fn get(&self, id: ProductId) -> Option<Product> {
        let slot = self.slot(id)?;
        let product = slot.product.lock().await;
        product.is_available.then(|| product.clone())
    }

    async fn list_by_category(&self, category: &str) -> Vec<Product> {
        let wanted = category.to_lowercase();
        self.available()
            .await
            .into_iter()
            .filter(|p| p.category.to_lowercase() == wanted)
            .collect()
    }

    async fn list_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for product in self.available().await {
            if !categories.contains(&product.category) {
                categories.push(product.category);
            }
        }
        categories
    }

    async fn is_in_stock(&self, id: ProductId, quantity: i32) -> bool {
        match self.slot(id) {
            Some(slot) => slot.product.lock().await.can_supply(quantity),
            None => false,
        }
    }

    async fn decrement_stock(&self, id: ProductId, quantity: u32) -> bool {
        let Some(slot) = self.slot(id) else {
            debug!(product_id = id, "decrement for unknown product");
            return false;
        };

        let mut product = slot.product.lock().await;
        if product.stock < quantity {
            debug!(
                product_id = id,
                stock = product.stock,
                requested = quantity,
                "insufficient stock"
            );
            return false;
        }

        product.stock -= quantity;
        if product.stock == 0 {
            product.is_available = false;
            info!(product_id = id, "product sold out");
        }
        true
    }

    async fn set_availability(&self, id: ProductId, available: bool) -> bool {
        let Some(slot) = self.slot(id) else {
            return false;
        };

        let mut product = slot.product.lock().await;
        if available && product.stock == 0 {
            debug!(product_id = id, "refusing to relist product without stock");
            return false;
        }
        product.is_available = available;
        info!(product_id = id, available, "product availability changed");
        true
    }
}
