//! In-memory cart store.
//!
//! Every cart has its own mutex; a mutation holds it across the inventory
//! checks it makes, so concurrent requests on one cart apply one at a time
//! while other carts proceed independently. Locks are always taken cart
//! first, then product.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::CartStore;
use crate::inventory::InventoryStore;
use crate::models::{Cart, CartItem, ProductId};

/// Carts held in process memory, validated against an inventory.
pub struct InMemoryCartStore {
    carts: RwLock<HashMap<String, Arc<Mutex<Cart>>>>,
    inventory: Arc<dyn InventoryStore>,
}

impl InMemoryCartStore {
    pub fn new(inventory: Arc<dyn InventoryStore>) -> Self {
        Self {
            carts: RwLock::new(HashMap::new()),
            inventory,
        }
    }

    /// Resolve the cart entry, inserting an empty cart on first reference.
    async fn entry(&self, cart_id: &str) -> Arc<Mutex<Cart>> {
        if let Some(cart) = self.carts.read().await.get(cart_id) {
            return Arc::clone(cart);
        }

        let mut carts = self.carts.write().await;
        let cart = carts.entry(cart_id.to_string()).or_insert_with(|| {
            info!(cart_id = %cart_id, "cart created");
            Arc::new(Mutex::new(Cart::new(cart_id)))
        });
        Arc::clone(cart)
    }

    /// Number of carts created so far.
    pub async fn len(&self) -> usize {
        self.carts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.carts.read().await.is_empty()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get_or_create(&self, cart_id: &str) -> Cart {
        self.entry(cart_id).await.lock().await.clone()
    }

    async fn add(&self, cart_id: &str, product_id: ProductId, quantity: i32) -> Cart {
        let entry = self.entry(cart_id).await;
        let mut cart = entry.lock().await;

        if quantity <= 0 {
            debug!(cart_id = %cart_id, product_id, quantity, "non-positive add ignored");
            return cart.clone();
        }

        let Some(product) = self.inventory.get(product_id).await else {
            debug!(cart_id = %cart_id, product_id, "add of unknown product ignored");
            return cart.clone();
        };
        if !self.inventory.is_in_stock(product_id, quantity).await {
            debug!(cart_id = %cart_id, product_id, quantity, "add exceeds stock");
            return cart.clone();
        }

        match cart.item(product_id).map(|item| item.quantity) {
            Some(current) => {
                let new_quantity = i64::from(current) + i64::from(quantity);
                let in_stock = match i32::try_from(new_quantity) {
                    Ok(total) => self.inventory.is_in_stock(product_id, total).await,
                    Err(_) => false,
                };
                if !in_stock {
                    debug!(
                        cart_id = %cart_id,
                        product_id,
                        new_quantity,
                        "merged quantity exceeds stock"
                    );
                    return cart.clone();
                }
                if let (Some(item), Ok(new_quantity)) =
                    (cart.item_mut(product_id), u32::try_from(new_quantity))
                {
                    item.quantity = new_quantity;
                }
            }
            None => cart
                .items
                .push(CartItem::from_product(&product, quantity.unsigned_abs())),
        }

        cart.touch();
        debug!(cart_id = %cart_id, product_id, quantity, "added to cart");
        cart.clone()
    }

    async fn update(&self, cart_id: &str, product_id: ProductId, quantity: i32) -> Cart {
        let entry = self.entry(cart_id).await;
        let mut cart = entry.lock().await;

        if cart.item(product_id).is_none() {
            return cart.clone();
        }

        if quantity <= 0 {
            cart.remove_item(product_id);
            cart.touch();
            return cart.clone();
        }

        if !self.inventory.is_in_stock(product_id, quantity).await {
            debug!(cart_id = %cart_id, product_id, quantity, "update exceeds stock");
            return cart.clone();
        }

        if let Some(item) = cart.item_mut(product_id) {
            // quantity > 0 was checked above
            item.quantity = quantity.unsigned_abs();
        }
        cart.touch();
        cart.clone()
    }

    async fn remove(&self, cart_id: &str, product_id: ProductId) -> Cart {
        let entry = self.entry(cart_id).await;
        let mut cart = entry.lock().await;

        if cart.remove_item(product_id) {
            cart.touch();
        }
        cart.clone()
    }

    async fn clear(&self, cart_id: &str) -> bool {
        let entry = self.entry(cart_id).await;
        let mut cart = entry.lock().await;

        cart.items.clear();
        cart.touch();
        true
    }

    async fn take(&self, cart_id: &str) -> Cart {
        let entry = self.entry(cart_id).await;
        let mut cart = entry.lock().await;

        let snapshot = cart.clone();
        if !snapshot.is_empty() {
            cart.items.clear();
            cart.touch();
            debug!(cart_id = %cart_id, lines = snapshot.items.len(), "cart taken");
        }
        snapshot
    }
}
