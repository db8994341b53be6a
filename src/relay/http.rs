//! HTTP relay client implementation
//!
//! Posts the message list to the configured forwarding endpoint and parses
//! the chat completion out of the response body. One attempt per call; the
//! orchestrator's sequencing depends on a call either resolving or failing,
//! never on partial delivery.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{ChatCompletion, ChatMessage, ChatRequest, RelayClient, RelayError};
use crate::config::RelayConfig;

/// HTTP client for the LLM forwarding worker
pub struct HttpRelayClient {
    endpoint: String,
    http: Client,
}

impl HttpRelayClient {
    /// Create a new client from configuration
    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        debug!(endpoint = %config.endpoint, timeout_ms = config.timeout_ms, "from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);

        let http = Client::builder().timeout(timeout).build().map_err(RelayError::Network)?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            http,
        })
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatCompletion, RelayError> {
        debug!(message_count = messages.len(), "chat: called");
        let body = ChatRequest { messages };

        let response = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(RelayError::Network)?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "chat: relay returned error status");
            let text = response.text().await.unwrap_or_default();
            return Err(RelayError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        debug!("chat: success");
        let completion: ChatCompletion = response.json().await.map_err(RelayError::Network)?;
        Ok(completion)
    }
}
