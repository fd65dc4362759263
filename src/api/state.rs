//! Shared state for the API handlers.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::cart::{CartIdIssuer, CartStore, InMemoryCartStore};
use crate::chat::{
    AgentBackend, CannedResponder, CartClient, ChatAssistant, ChatError, HttpAgentClient,
    HttpCartClient, LocalCartClient,
};
use crate::config::Config;
use crate::inventory::{load_catalog, CatalogError, InMemoryInventory, InventoryStore};
use crate::orders::{sample_history, CheckoutService, InMemoryOrderRecorder, OrderRecorder};

/// Errors assembling the application at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Chat(#[from] ChatError),
}

/// Stores and services shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<dyn InventoryStore>,
    pub carts: Arc<dyn CartStore>,
    pub issuer: CartIdIssuer,
    pub orders: Arc<dyn OrderRecorder>,
    pub checkout: CheckoutService,
    pub chat: Arc<ChatAssistant>,
}

impl AppState {
    pub fn new(
        inventory: Arc<dyn InventoryStore>,
        carts: Arc<dyn CartStore>,
        orders: Arc<dyn OrderRecorder>,
        chat: Arc<ChatAssistant>,
    ) -> Self {
        let checkout = CheckoutService::new(carts.clone(), inventory.clone(), orders.clone());
        Self {
            inventory,
            carts,
            issuer: CartIdIssuer::new(),
            orders,
            checkout,
            chat,
        }
    }

    /// Construct every store and the chat assistant from configuration.
    pub fn from_config(config: &Config) -> Result<Self, StateError> {
        let products = load_catalog(config.catalog.path.as_deref())?;
        info!(products = products.len(), "catalog loaded");

        let inventory: Arc<dyn InventoryStore> = Arc::new(InMemoryInventory::new(products));
        let carts: Arc<dyn CartStore> = Arc::new(InMemoryCartStore::new(inventory.clone()));

        let orders: Arc<dyn OrderRecorder> = if config.orders.seed_sample_history {
            Arc::new(InMemoryOrderRecorder::with_history(sample_history(
                Utc::now(),
            )))
        } else {
            Arc::new(InMemoryOrderRecorder::new())
        };

        let agent_config = config.chat.agent();
        let agent: Option<Arc<dyn AgentBackend>> = if agent_config.is_configured() {
            info!(endpoint = %agent_config.endpoint, "chat agent configured");
            Some(Arc::new(HttpAgentClient::new(agent_config)?))
        } else {
            info!("no chat agent configured, using canned replies");
            None
        };

        let cart_client: Arc<dyn CartClient> = match config
            .chat
            .cart_api_base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
        {
            Some(base_url) => {
                info!(base_url = %base_url, "chat reaches the cart over HTTP");
                Arc::new(HttpCartClient::new(
                    base_url,
                    config.chat.cart_api_timeout(),
                )?)
            }
            None => Arc::new(LocalCartClient::new(carts.clone())),
        };

        let chat = ChatAssistant::new(
            agent,
            cart_client,
            CannedResponder::new(config.chat.simulated_latency()),
        )?;

        Ok(Self::new(inventory, carts, orders, Arc::new(chat)))
    }
}
