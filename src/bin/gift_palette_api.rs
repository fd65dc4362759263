//! gift-palette-api: catalog, cart, order and chat HTTP service
//!
//! ## Architecture
//! ```text
//! [Browser / UI] -> [REST API :5080] -> [Inventory | Cart | Orders]
//!                          |
//!                          v
//!                   [Chat Assistant] -> [Agent service] (optional)
//! ```
//!
//! ## Configuration
//! - GIFT_PALETTE_CONFIG: YAML config file (optional, `config.yaml` is read if present)
//! - GIFT_PALETTE__SERVER__PORT: REST API port (default: 5080)
//! - GIFT_PALETTE__CHAT__AGENT_ENDPOINT / GIFT_PALETTE__CHAT__AGENT_ID: agent service
//! - GIFT_PALETTE_LOG: log filter (default: info)

use tracing::info;

use gift_palette::api::{self, AppState};
use gift_palette::config::Config;
use gift_palette::utils::bootstrap::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let config = Config::load(None)?;
    let addr = config.server.bind_addr()?;
    let state = AppState::from_config(&config)?;

    info!(
        agent = state.chat.has_agent(),
        sample_history = config.orders.seed_sample_history,
        "gift palette starting"
    );

    api::serve(state, addr).await?;

    info!("gift palette stopped");
    Ok(())
}
