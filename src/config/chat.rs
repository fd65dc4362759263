//! Chat assistant configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::chat::HttpAgentConfig;

/// Agent connection and cart access for the chat assistant.
///
/// Without both `agent_endpoint` and `agent_id` the assistant answers with
/// canned replies. Without `cart_api_base_url` it reaches the cart store
/// in-process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub agent_endpoint: Option<String>,
    pub agent_id: Option<String>,
    pub agent_timeout_secs: u64,
    pub cart_api_base_url: Option<String>,
    pub cart_api_timeout_secs: u64,
    /// Delay before canned replies.
    pub simulated_latency_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            agent_endpoint: None,
            agent_id: None,
            agent_timeout_secs: 30,
            cart_api_base_url: None,
            cart_api_timeout_secs: 10,
            simulated_latency_ms: 0,
        }
    }
}

impl ChatConfig {
    pub fn agent(&self) -> HttpAgentConfig {
        HttpAgentConfig {
            endpoint: self.agent_endpoint.clone().unwrap_or_default(),
            agent_id: self.agent_id.clone().unwrap_or_default(),
            timeout: Duration::from_secs(self.agent_timeout_secs),
            ..HttpAgentConfig::default()
        }
    }

    pub fn cart_api_timeout(&self) -> Duration {
        Duration::from_secs(self.cart_api_timeout_secs)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}
