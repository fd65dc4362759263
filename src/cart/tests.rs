use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use super::*;
use crate::inventory::{InMemoryInventory, InventoryStore};
use crate::models::Product;

fn product(id: ProductId, price: i64, stock: u32) -> Product {
    Product {
        id,
        name: format!("product {}", id),
        description: String::new(),
        price: Decimal::from(price),
        image_url: format!("/images/{:03}.png", id),
        category: "test".to_string(),
        stock,
        is_available: stock > 0,
        created_at: Utc::now(),
    }
}

fn stores() -> (Arc<InMemoryInventory>, InMemoryCartStore) {
    let inventory = Arc::new(InMemoryInventory::new(vec![
        product(1, 1000, 5),
        product(2, 500, 10),
        product(3, 200, 2),
    ]));
    let carts = InMemoryCartStore::new(inventory.clone());
    (inventory, carts)
}

#[tokio::test]
async fn test_get_or_create_unknown_id_yields_empty_cart() {
    let (_, carts) = stores();
    let cart = carts.get_or_create("never-issued").await;
    assert_eq!(cart.cart_id, "never-issued");
    assert!(cart.is_empty());
    assert_eq!(carts.len().await, 1);

    // Second reference returns the same cart
    let again = carts.get_or_create("never-issued").await;
    assert_eq!(again.created_at, cart.created_at);
    assert_eq!(carts.len().await, 1);
}

#[tokio::test]
async fn test_add_creates_single_line() {
    let (_, carts) = stores();
    let cart = carts.add("c1", 1, 3).await;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);
    assert_eq!(cart.items[0].product_name, "product 1");
    assert_eq!(cart.items[0].price, Decimal::from(1000));
    assert_eq!(cart.items[0].image_url, "/images/001.png");
}

#[tokio::test]
async fn test_add_merge_beyond_stock_is_noop() {
    let (_, carts) = stores();
    carts.add("c1", 1, 3).await;
    let cart = carts.add("c1", 1, 3).await;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);
}

#[tokio::test]
async fn test_add_merge_within_stock() {
    let (_, carts) = stores();
    carts.add("c1", 2, 3).await;
    let cart = carts.add("c1", 2, 3).await;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 6);
}

#[tokio::test]
async fn test_add_unknown_or_short_product_is_noop() {
    let (_, carts) = stores();
    let before = carts.add("c1", 2, 1).await;

    let cart = carts.add("c1", 99, 1).await;
    assert_eq!(cart, before);

    let cart = carts.add("c1", 3, 3).await;
    assert_eq!(cart, before);
}

#[tokio::test]
async fn test_add_non_positive_quantity_is_noop() {
    let (_, carts) = stores();
    carts.add("c1", 2, 4).await;
    let cart = carts.add("c1", 2, -2).await;
    assert_eq!(cart.items[0].quantity, 4);
    let cart = carts.add("c1", 1, 0).await;
    assert_eq!(cart.items.len(), 1);
}

#[tokio::test]
async fn test_noop_keeps_updated_at() {
    let (_, carts) = stores();
    let before = carts.add("c1", 1, 1).await;
    let after = carts.add("c1", 99, 1).await;
    assert_eq!(before.updated_at, after.updated_at);
}

#[tokio::test]
async fn test_add_withdrawn_product_is_noop() {
    let (inventory, carts) = stores();
    inventory.set_availability(2, false).await;
    assert!(carts.add("c1", 2, 1).await.is_empty());
}

#[tokio::test]
async fn test_line_keeps_captured_fields_after_withdrawal() {
    let (inventory, carts) = stores();
    carts.add("c1", 1, 1).await;
    inventory.set_availability(1, false).await;

    let cart = carts.get_or_create("c1").await;
    assert_eq!(cart.items[0].product_name, "product 1");
    assert_eq!(cart.total_amount(), Decimal::from(1000));
}

#[tokio::test]
async fn test_update_sets_absolute_quantity() {
    let (_, carts) = stores();
    carts.add("c1", 2, 3).await;
    let cart = carts.update("c1", 2, 7).await;
    assert_eq!(cart.items[0].quantity, 7);
    let cart = carts.update("c1", 2, 1).await;
    assert_eq!(cart.items[0].quantity, 1);
}

#[tokio::test]
async fn test_update_zero_removes_line() {
    let (_, carts) = stores();
    carts.add("c1", 1, 2).await;
    let cart = carts.update("c1", 1, 0).await;
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_update_beyond_stock_keeps_quantity() {
    let (_, carts) = stores();
    carts.add("c1", 1, 2).await;
    let cart = carts.update("c1", 1, 6).await;
    assert_eq!(cart.items[0].quantity, 2);
}

#[tokio::test]
async fn test_update_missing_line_is_noop() {
    let (_, carts) = stores();
    let cart = carts.update("c1", 1, 2).await;
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_remove() {
    let (_, carts) = stores();
    carts.add("c1", 1, 1).await;
    carts.add("c1", 2, 1).await;

    let cart = carts.remove("c1", 1).await;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].product_id, 2);

    let cart = carts.remove("c1", 1).await;
    assert_eq!(cart.items.len(), 1);
}

#[tokio::test]
async fn test_clear_then_get_is_empty() {
    let (_, carts) = stores();
    carts.add("c1", 1, 2).await;
    carts.add("c1", 2, 1).await;

    assert!(carts.clear("c1").await);
    let cart = carts.get_or_create("c1").await;
    assert_eq!(cart.items.len(), 0);
    assert_eq!(cart.total_amount(), Decimal::ZERO);
}

#[tokio::test]
async fn test_clear_unknown_cart_succeeds() {
    let (_, carts) = stores();
    assert!(carts.clear("fresh").await);
}

#[tokio::test]
async fn test_take_returns_items_and_empties() {
    let (_, carts) = stores();
    carts.add("c1", 1, 2).await;
    carts.add("c1", 2, 1).await;

    let taken = carts.take("c1").await;
    assert_eq!(taken.items.len(), 2);
    assert_eq!(taken.total_items(), 3);
    assert!(carts.get_or_create("c1").await.is_empty());
    assert!(carts.take("c1").await.is_empty());
}

#[tokio::test]
async fn test_take_empty_keeps_updated_at() {
    let (_, carts) = stores();
    let before = carts.get_or_create("c1").await.updated_at;
    assert!(carts.take("c1").await.is_empty());
    assert_eq!(carts.get_or_create("c1").await.updated_at, before);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_takes_see_items_once() {
    let (_, carts) = stores();
    let carts = Arc::new(carts);
    carts.add("c1", 1, 3).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let carts = Arc::clone(&carts);
        handles.push(tokio::spawn(async move { carts.take("c1").await }));
    }
    let mut taken = 0;
    for handle in handles {
        taken += handle.await.unwrap().total_items();
    }
    assert_eq!(taken, 3);
}

#[tokio::test]
async fn test_totals() {
    let (_, carts) = stores();
    carts.add("c1", 1, 2).await;
    let cart = carts.add("c1", 2, 1).await;
    assert_eq!(cart.total_amount(), Decimal::from(2500));
    assert_eq!(cart.total_items(), 3);
}

#[tokio::test]
async fn test_carts_are_isolated() {
    let (_, carts) = stores();
    carts.add("a", 1, 1).await;
    assert!(carts.get_or_create("b").await.is_empty());
}

#[tokio::test]
async fn test_concurrent_adds_to_one_cart_respect_stock() {
    let (_, carts) = stores();
    let carts = Arc::new(carts);

    let mut handles = Vec::new();
    for _ in 0..10 {
        let carts = Arc::clone(&carts);
        handles.push(tokio::spawn(async move { carts.add("c1", 1, 1).await }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let cart = carts.get_or_create("c1").await;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 5);
}
