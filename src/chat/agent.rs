//! External generative agent.
//!
//! The agent is a black box reached over HTTP:
//! - `POST {endpoint}/threads` with `{agentId}` answers `{threadId}`
//! - `POST {endpoint}/threads/{threadId}/messages` with `{agentId, message}`
//!   answers `{reply}`
//!
//! Transient failures are retried a few times with backoff; each attempt is
//! bounded by the client timeout.

use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{join_segments, parse_base_url, ChatError};
use crate::models::wire::from_slice_ignore_case;

/// A generative chat backend.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Open a conversation thread.
    async fn create_thread(&self) -> Result<String, ChatError>;

    /// Post a message to a thread and return the agent's reply.
    async fn send_message(&self, thread_id: &str, message: &str) -> Result<String, ChatError>;
}

/// HTTP agent client configuration.
#[derive(Debug, Clone)]
pub struct HttpAgentConfig {
    /// Base URL of the agent service.
    pub endpoint: String,

    /// Agent to converse with.
    pub agent_id: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Attempts after the first one for retryable failures.
    pub max_retries: usize,
}

impl Default for HttpAgentConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            agent_id: String::new(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }
}

impl HttpAgentConfig {
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.agent_id.trim().is_empty()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateThreadBody<'a> {
    agent_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageBody<'a> {
    agent_id: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct ThreadCreated {
    #[serde(rename = "threadid")]
    thread_id: String,
}

#[derive(Deserialize)]
struct AgentReply {
    reply: String,
}

/// Agent reached over HTTP.
pub struct HttpAgentClient {
    client: Client,
    endpoint: Url,
    config: HttpAgentConfig,
}

impl HttpAgentClient {
    pub fn new(config: HttpAgentConfig) -> Result<Self, ChatError> {
        if !config.is_configured() {
            return Err(ChatError::NotConfigured);
        }

        let endpoint = parse_base_url(config.endpoint.trim())?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_secs(2))
            .with_max_times(self.config.max_retries)
            .with_jitter()
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ChatError> {
        let url = join_segments(&self.endpoint, segments)?;
        let send = || async {
            let response = self.client.post(url.clone()).json(body).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ChatError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
            Ok::<_, ChatError>(response.bytes().await?)
        };

        let bytes = send
            .retry(self.backoff())
            .when(ChatError::is_retryable)
            .notify(|err, delay| {
                warn!(url = %url, error = %err, ?delay, "agent call failed, retrying");
            })
            .await?;

        Ok(from_slice_ignore_case(&bytes)?)
    }
}

#[async_trait]
impl AgentBackend for HttpAgentClient {
    async fn create_thread(&self) -> Result<String, ChatError> {
        let created: ThreadCreated = self
            .post(
                &["threads"],
                &CreateThreadBody {
                    agent_id: &self.config.agent_id,
                },
            )
            .await?;
        debug!(thread_id = %created.thread_id, "agent thread created");
        Ok(created.thread_id)
    }

    async fn send_message(&self, thread_id: &str, message: &str) -> Result<String, ChatError> {
        let reply: AgentReply = self
            .post(
                &["threads", thread_id, "messages"],
                &MessageBody {
                    agent_id: &self.config.agent_id,
                    message,
                },
            )
            .await?;
        Ok(reply.reply)
    }
}
