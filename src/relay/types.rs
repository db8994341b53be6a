//! Relay request/response types
//!
//! These model the forwarding worker's chat-completion wire format: the
//! request is a bare message list, the response is OpenAI-shaped with a
//! `choices` array. Fields the orchestrator never reads are not modeled.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A role-tagged message in a relay request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        debug!("ChatMessage::system: called");
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        debug!("ChatMessage::user: called");
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for a relay call
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Response body of a relay call
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<Choice>,
}

impl ChatCompletion {
    /// Text content of the first choice, if the response carries one
    pub fn first_content(&self) -> Option<&str> {
        debug!(choices = self.choices.len(), "ChatCompletion::first_content: called");
        self.choices.first().map(|c| c.message.content.as_str())
    }

    /// Consume the completion, yielding the first choice's content
    pub fn into_content(self) -> Option<String> {
        debug!(choices = self.choices.len(), "ChatCompletion::into_content: called");
        self.choices.into_iter().next().map(|c| c.message.content)
    }
}

/// One completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

/// The message inside a completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}
