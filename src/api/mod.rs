//! HTTP API.
//!
//! Endpoints:
//! - health: `GET /api/health`
//! - catalog: `GET /api/products`, `GET /api/products/:id`,
//!   `GET /api/products/category/:category`, `GET /api/categories`
//! - stock check: `POST /api/inventory/check`
//! - new cart id: `GET /api/cart/issue`
//! - cart: `GET /api/cart/:cart_id`, `POST /api/cart/:cart_id/add`,
//!   `PUT /api/cart/:cart_id/update`, `DELETE /api/cart/:cart_id/remove/:product_id`,
//!   `DELETE /api/cart/:cart_id/clear`
//! - checkout and order history: `POST /api/orders`, `GET /api/orders`,
//!   `GET /api/orders/:id`, `PUT /api/orders/:id/status`
//! - chat assistant: `POST /api/chat/threads`, `POST /api/chat/messages`

mod error;
mod extract;
mod handlers;
mod state;


use std::net::SocketAddr;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;
pub use extract::CaseInsensitiveJson;
pub use state::{AppState, StateError};

use crate::utils::bootstrap::shutdown_signal;

/// Start the API server on `addr` and run until Ctrl-C.
///
/// When the port is 0, the OS assigns an ephemeral port. The actual bound
/// address is always logged.
pub async fn serve(
    state: AppState,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    info!(address = %local_addr, "gift palette API listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Build the axum router (separated for testing).
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/:id", get(handlers::get_product))
        .route(
            "/api/products/category/:category",
            get(handlers::products_by_category),
        )
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/inventory/check", post(handlers::check_stock))
        .route("/api/cart/issue", get(handlers::issue_cart_id))
        .route("/api/cart/:cart_id", get(handlers::get_cart))
        .route("/api/cart/:cart_id/add", post(handlers::add_to_cart))
        .route("/api/cart/:cart_id/update", put(handlers::update_cart))
        .route(
            "/api/cart/:cart_id/remove/:product_id",
            delete(handlers::remove_from_cart),
        )
        .route("/api/cart/:cart_id/clear", delete(handlers::clear_cart))
        .route(
            "/api/orders",
            post(handlers::create_order).get(handlers::order_history),
        )
        .route("/api/orders/:id", get(handlers::get_order))
        .route("/api/orders/:id/status", put(handlers::update_order_status))
        .route("/api/chat/threads", post(handlers::create_thread))
        .route("/api/chat/messages", post(handlers::send_chat_message))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
