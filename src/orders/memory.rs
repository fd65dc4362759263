//! In-memory order recorder.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use super::{OrderError, OrderRecorder};
use crate::models::{order_number, Cart, Order, OrderId, OrderItem, OrderStatus};

/// Orders held in process memory.
pub struct InMemoryOrderRecorder {
    orders: RwLock<Vec<Order>>,
    next_id: AtomicI32,
}

impl Default for InMemoryOrderRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOrderRecorder {
    pub fn new() -> Self {
        Self::with_history(Vec::new())
    }

    /// Start from existing orders; new ids continue after the highest one.
    pub fn with_history(orders: Vec<Order>) -> Self {
        let next_id = orders.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        Self {
            orders: RwLock::new(orders),
            next_id: AtomicI32::new(next_id),
        }
    }
}

#[async_trait]
impl OrderRecorder for InMemoryOrderRecorder {
    async fn create_order(
        &self,
        cart: &Cart,
        customer_name: &str,
        customer_email: &str,
        shipping_address: &str,
    ) -> Order {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created_at = Utc::now();

        let order = Order {
            id,
            order_number: order_number(created_at, id),
            customer_name: customer_name.to_string(),
            customer_email: customer_email.to_string(),
            shipping_address: shipping_address.to_string(),
            items: cart.items.iter().map(OrderItem::from).collect(),
            total_amount: cart.total_amount(),
            status: OrderStatus::Pending,
            created_at,
            completed_at: None,
        };

        self.orders.write().await.push(order.clone());
        info!(
            order_id = id,
            order_number = %order.order_number,
            cart_id = %cart.cart_id,
            total = %order.total_amount,
            "order recorded"
        );
        order
    }

    async fn history(&self) -> Vec<Order> {
        let mut orders = self.orders.read().await.clone();
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        orders
    }

    async fn get(&self, id: OrderId) -> Option<Order> {
        self.orders.read().await.iter().find(|o| o.id == id).cloned()
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(OrderError::NotFound(id))?;

        if !order.status.can_transition_to(status) {
            return Err(OrderError::InvalidTransition {
                id,
                from: order.status,
                to: status,
            });
        }

        let from = order.status;
        order.status = status;
        if status == OrderStatus::Delivered {
            order.completed_at = Some(Utc::now());
        }
        info!(order_id = id, %from, to = %status, "order status changed");
        Ok(order.clone())
    }
}
