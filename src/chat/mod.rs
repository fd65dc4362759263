//! Chat assistant.
//!
//! A message that names a cart action (add, show, remove, clear) is handled
//! against the cart directly. Anything else goes to the external agent when
//! one is configured, or to the canned responder. Failures reaching either
//! the agent or the cart end up as an apologetic reply, never as an error to
//! the caller.

mod agent;
mod assistant;
mod canned;
mod cart_client;
mod conversation;
mod intent;
mod summary;
mod visibility;


pub use agent::{AgentBackend, HttpAgentClient, HttpAgentConfig};
pub use assistant::{ChatAssistant, AGENT_FAILURE_REPLY, CART_FAILURE_REPLY};
pub use canned::{CannedResponder, CannedRule, CANNED_RULES};
pub use cart_client::{CartClient, HttpCartClient, LocalCartClient};
pub use conversation::{Conversation, ThreadState};
pub use intent::{CartIntent, IntentKind, IntentRecognizer, IntentRule, INTENT_RULES};
pub use summary::{format_yen, render_cart_summary};
pub use visibility::ChatVisibility;

use reqwest::Url;

/// Errors talking to the agent or the cart API.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The agent endpoint or id is missing.
    #[error("Agent not configured")]
    NotConfigured,

    /// A recognizer pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A base URL did not parse, or a path segment cannot be placed in one.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ChatError {
    /// Timeouts, connection failures, 429 and 5xx are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChatError::Http(err) => err.is_timeout() || err.is_connect(),
            ChatError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ChatError> {
    let url = Url::parse(raw.trim_end_matches('/'))
        .map_err(|e| ChatError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ChatError::InvalidUrl(format!("{}: not a base URL", raw)));
    }
    Ok(url)
}

/// Appends `segments` to `base`'s path, percent-encoding each one so ids
/// carrying `/`, `?` or `#` stay inside their own segment.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, ChatError> {
    if let Some(bad) = segments
        .iter()
        .find(|s| s.is_empty() || **s == "." || **s == "..")
    {
        return Err(ChatError::InvalidUrl(format!(
            "path segment {:?} is not allowed",
            bad
        )));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ChatError::InvalidUrl(format!("{}: not a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
