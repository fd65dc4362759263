//! Route handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};

use super::extract::CaseInsensitiveJson;
use super::{ApiError, AppState};
use crate::chat::Conversation;
use crate::models::wire::{
    CartLineRequest, ChatMessageRequest, ChatMessageResponse, CheckStockRequest,
    CheckStockResponse, CheckoutRequest, ClearCartResponse, CreateThreadResponse,
    IssueCartIdResponse, UpdateOrderStatusRequest,
};
use crate::models::{Cart, Order, OrderId, Product, ProductId};
use crate::orders::CustomerDetails;

pub(super) async fn health() -> StatusCode {
    StatusCode::OK
}

// ============================================================================
// Catalog
// ============================================================================

pub(super) async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.inventory.list_available().await)
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, ApiError> {
    state
        .inventory
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Product not found: {}", id)))
}

pub(super) async fn products_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<Product>> {
    Json(state.inventory.list_by_category(&category).await)
}

pub(super) async fn list_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.inventory.list_categories().await)
}

pub(super) async fn check_stock(
    State(state): State<AppState>,
    CaseInsensitiveJson(req): CaseInsensitiveJson<CheckStockRequest>,
) -> Json<CheckStockResponse> {
    let is_in_stock = state.inventory.is_in_stock(req.product_id, req.quantity).await;
    Json(CheckStockResponse { is_in_stock })
}

// ============================================================================
// Cart
// ============================================================================

pub(super) async fn issue_cart_id(State(state): State<AppState>) -> Json<IssueCartIdResponse> {
    let cart_id = state.issuer.issue();
    state.carts.get_or_create(&cart_id).await;
    info!(cart_id = %cart_id, "cart id issued");
    Json(IssueCartIdResponse { cart_id })
}

pub(super) async fn get_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> Json<Cart> {
    Json(state.carts.get_or_create(&cart_id).await)
}

pub(super) async fn add_to_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    CaseInsensitiveJson(req): CaseInsensitiveJson<CartLineRequest>,
) -> Json<Cart> {
    Json(state.carts.add(&cart_id, req.product_id, req.quantity).await)
}

pub(super) async fn update_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    CaseInsensitiveJson(req): CaseInsensitiveJson<CartLineRequest>,
) -> Json<Cart> {
    Json(
        state
            .carts
            .update(&cart_id, req.product_id, req.quantity)
            .await,
    )
}

pub(super) async fn remove_from_cart(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(String, ProductId)>,
) -> Json<Cart> {
    Json(state.carts.remove(&cart_id, product_id).await)
}

pub(super) async fn clear_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> Json<ClearCartResponse> {
    let success = state.carts.clear(&cart_id).await;
    Json(ClearCartResponse { success })
}

// ============================================================================
// Orders
// ============================================================================

pub(super) async fn create_order(
    State(state): State<AppState>,
    CaseInsensitiveJson(req): CaseInsensitiveJson<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let customer = CustomerDetails {
        name: req.customer_name,
        email: req.customer_email,
        shipping_address: req.shipping_address,
    };
    let order = state.checkout.checkout(&req.cart_id, &customer).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub(super) async fn order_history(State(state): State<AppState>) -> Json<Vec<Order>> {
    Json(state.orders.history().await)
}

pub(super) async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>, ApiError> {
    state
        .orders
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Order not found: {}", id)))
}

pub(super) async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    CaseInsensitiveJson(req): CaseInsensitiveJson<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let order = state.orders.update_status(id, req.status).await?;
    info!(order_id = id, status = %order.status, "order status updated");
    Ok(Json(order))
}

// ============================================================================
// Chat
// ============================================================================

pub(super) async fn create_thread(State(state): State<AppState>) -> Json<CreateThreadResponse> {
    let thread_id = state.chat.create_thread().await;
    Json(CreateThreadResponse { thread_id })
}

pub(super) async fn send_chat_message(
    State(state): State<AppState>,
    CaseInsensitiveJson(req): CaseInsensitiveJson<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, ApiError> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message must not be empty".to_string()));
    }

    let mut conversation = Conversation::resume(state.chat.clone(), req.thread_id, req.cart_id);
    let reply = conversation.send(&req.message).await;
    let thread_id = conversation.thread_id().unwrap_or_default().to_string();
    debug!(thread_id = %thread_id, "chat reply sent");

    Ok(Json(ChatMessageResponse { thread_id, reply }))
}
