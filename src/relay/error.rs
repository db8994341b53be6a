//! Relay error types

use thiserror::Error;

/// Errors that can occur during a relay call
///
/// Relay calls are made exactly once; none of these are retried. A failure
/// mid-orchestration halts the remaining call sequence.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Relay error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
