//! LLM relay client boundary
//!
//! The relay is the opaque request/response boundary to the remote model:
//! one POST of role-tagged messages, one structured chat completion back.
//! Everything above this module only depends on message ordering being
//! preserved and on a successful response carrying `choices[0].message.content`.

mod error;
mod http;
mod types;

pub mod client;

pub use client::RelayClient;
pub use error::RelayError;
pub use http::HttpRelayClient;
pub use types::{ChatCompletion, ChatMessage, ChatRequest, Choice, ChoiceMessage, Role};
