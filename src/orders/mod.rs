//! Order recording and checkout.
//!
//! Orders are append-only snapshots of a cart. Status changes are driven
//! from outside; the recorder only enforces the allowed transitions.

mod checkout;
mod memory;
mod seed;


use async_trait::async_trait;

use crate::models::{Cart, Order, OrderId, OrderStatus};

pub use checkout::{CheckoutError, CheckoutService, CustomerDetails};
pub use memory::InMemoryOrderRecorder;
pub use seed::sample_history;

/// Order errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("Order {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
}

/// Append-only order history.
#[async_trait]
pub trait OrderRecorder: Send + Sync {
    /// Record a new pending order from a snapshot of `cart`.
    async fn create_order(
        &self,
        cart: &Cart,
        customer_name: &str,
        customer_email: &str,
        shipping_address: &str,
    ) -> Order;

    /// All orders, most recent first.
    async fn history(&self) -> Vec<Order>;

    async fn get(&self, id: OrderId) -> Option<Order>;

    /// Move an order to `status`. Reaching `Delivered` stamps `completed_at`.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError>;
}
