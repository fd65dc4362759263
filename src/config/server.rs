//! Server, catalog and order-history configuration types.

use std::net::SocketAddr;

use serde::Deserialize;

use super::ConfigError;

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// IP address to bind to.
    pub host: String,
    /// Port for the HTTP API.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5080,
        }
    }
}

impl ServerConfig {
    /// Socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| ConfigError::InvalidAddress(raw.clone()))
    }
}

/// Product catalog source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// YAML catalog file. The built-in catalog is used when unset.
    pub path: Option<String>,
}

/// Order history configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    /// Pre-populate the history with sample orders at startup.
    pub seed_sample_history: bool,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            seed_sample_history: true,
        }
    }
}
