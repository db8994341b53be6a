//! Cybertarot - three-card tarot readings interpreted by an LLM
//!
//! A reading walks one session through a fixed flow: the user poses a
//! question, three cards are drawn without replacement (each independently
//! upright or reversed), the cards are flipped one by one, and once all
//! three are revealed an interpretation is assembled from four sequential
//! relay calls - one overall summary, then one detail per card in spread
//! order.
//!
//! # Core Concepts
//!
//! - **Session-scoped state**: every reading owns its own [`session::ReadingSession`];
//!   nothing is process-global, so sessions are independent and testable
//! - **One draw per session**: the spread is fixed the moment the question is
//!   submitted and never reshuffled
//! - **Strictly sequential generation**: detail call i+1 is only issued after
//!   call i's text is appended, keeping the answer in card order
//!
//! # Modules
//!
//! - [`catalog`] - static card reference data (names, keywords, meanings)
//! - [`relay`] - the LLM request/response boundary
//! - [`session`] - draw engine, state machine, and interpretation orchestrator
//! - [`prompts`] - fixed system prompts and pure user-message templating
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod prompts;
pub mod relay;
pub mod session;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, CardEntry, Orientation, SideMeaning};
pub use config::{CatalogConfig, Config, DrawConfig, RelayConfig};
pub use prompts::{CardLine, PromptRenderer, SpreadContext};
pub use relay::{ChatCompletion, ChatMessage, HttpRelayClient, RelayClient, RelayError, Role};
pub use session::{DrawEngine, DrawnCard, Interpreter, Phase, ReadingSession, SPREAD_SIZE, SessionError};
