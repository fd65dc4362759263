//! Checkout: turn a cart into an order.
//!
//! Stock is not reserved while items sit in a cart, so a line may have sold
//! out by the time it is checked out. The order is still recorded; the failed
//! decrement is logged.
//!
//! The cart is emptied as it is read, so concurrent checkouts of one cart
//! produce a single order.

use std::sync::Arc;

use tracing::{info, warn};

use super::OrderRecorder;
use crate::cart::CartStore;
use crate::inventory::InventoryStore;
use crate::models::Order;

/// Checkout errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("Cart {0} is empty")]
    EmptyCart(String),

    #[error("Missing customer field: {0}")]
    MissingField(&'static str),
}

/// Who the order is for and where it ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub shipping_address: String,
}

impl CustomerDetails {
    fn validate(&self) -> Result<(), CheckoutError> {
        if self.name.trim().is_empty() {
            return Err(CheckoutError::MissingField("customerName"));
        }
        if self.email.trim().is_empty() {
            return Err(CheckoutError::MissingField("customerEmail"));
        }
        if self.shipping_address.trim().is_empty() {
            return Err(CheckoutError::MissingField("shippingAddress"));
        }
        Ok(())
    }
}

/// Coordinates the cart, inventory and order recorder at checkout.
#[derive(Clone)]
pub struct CheckoutService {
    carts: Arc<dyn CartStore>,
    inventory: Arc<dyn InventoryStore>,
    orders: Arc<dyn OrderRecorder>,
}

impl CheckoutService {
    pub fn new(
        carts: Arc<dyn CartStore>,
        inventory: Arc<dyn InventoryStore>,
        orders: Arc<dyn OrderRecorder>,
    ) -> Self {
        Self {
            carts,
            inventory,
            orders,
        }
    }

    /// Empty the cart, record an order from what it held and take those
    /// items out of stock.
    pub async fn checkout(
        &self,
        cart_id: &str,
        customer: &CustomerDetails,
    ) -> Result<Order, CheckoutError> {
        customer.validate()?;

        let cart = self.carts.take(cart_id).await;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart(cart_id.to_string()));
        }

        let order = self
            .orders
            .create_order(
                &cart,
                &customer.name,
                &customer.email,
                &customer.shipping_address,
            )
            .await;

        for item in &order.items {
            if !self
                .inventory
                .decrement_stock(item.product_id, item.quantity)
                .await
            {
                warn!(
                    order_id = order.id,
                    product_id = item.product_id,
                    quantity = item.quantity,
                    "stock could not be decremented at checkout"
                );
            }
        }

        info!(order_id = order.id, cart_id = %cart_id, "checkout complete");
        Ok(order)
    }
}
