//! RelayClient trait definition

use async_trait::async_trait;
#[allow(unused_imports)]
use tracing::debug;

use super::{ChatCompletion, ChatMessage, RelayError};

/// Stateless relay client - each call is independent
///
/// This is the boundary to the remote model. No conversation state is kept
/// between calls: the orchestrator threads context (the summary text) through
/// the message payloads itself, so every call carries everything the model
/// needs.
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Send one chat request and wait for the structured completion
    ///
    /// Message ordering is preserved on the wire. Calls are never retried;
    /// transport failures and malformed responses surface as [`RelayError`].
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatCompletion, RelayError>;
}
