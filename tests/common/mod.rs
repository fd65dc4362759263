//! Shared helpers: small catalogs and servers on ephemeral ports.

use std::sync::Arc;

use axum::Router;
use chrono::Utc;
use rust_decimal::Decimal;

use gift_palette::api::{router, AppState};
use gift_palette::cart::{CartStore, InMemoryCartStore};
use gift_palette::chat::{CannedResponder, CartClient, ChatAssistant, LocalCartClient};
use gift_palette::inventory::{InMemoryInventory, InventoryStore};
use gift_palette::models::Product;
use gift_palette::orders::InMemoryOrderRecorder;

pub fn product(id: i32, name: &str, price: i64, stock: u32) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: String::new(),
        price: Decimal::from(price),
        image_url: format!("/images/products/{}.jpg", id),
        category: "雑貨".to_string(),
        stock,
        is_available: stock > 0,
        created_at: Utc::now(),
    }
}

pub fn inventory() -> Arc<dyn InventoryStore> {
    Arc::new(InMemoryInventory::new(vec![
        product(1, "可愛いピンクのマグカップ", 1980, 5),
        product(3, "アロマキャンドルセット", 3200, 10),
        product(6, "ユニコーンスリッパ", 2200, 2),
    ]))
}

/// State whose chat assistant uses `cart_client`, or the in-process cart when
/// `None`.
pub fn state_with(
    inventory: Arc<dyn InventoryStore>,
    cart_client: Option<Arc<dyn CartClient>>,
) -> AppState {
    let carts: Arc<dyn CartStore> = Arc::new(InMemoryCartStore::new(inventory.clone()));
    let cart_client =
        cart_client.unwrap_or_else(|| Arc::new(LocalCartClient::new(carts.clone())));
    let chat = ChatAssistant::new(None, cart_client, CannedResponder::default()).unwrap();
    AppState::new(
        inventory,
        carts,
        Arc::new(InMemoryOrderRecorder::new()),
        Arc::new(chat),
    )
}

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn spawn_api(state: AppState) -> String {
    spawn(router(state)).await
}
