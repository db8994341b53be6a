//! Reading session core
//!
//! One reading session owns the full lifecycle of a three-card spread:
//! question entry, the draw, per-card flips, and interpretation generation.
//! Sessions are self-contained records - nothing here is process-global, so
//! independent sessions (and tests) never share state.
//!
//! - [`draw`] - randomized draw without replacement + orientation sampling
//! - [`state`] - the phase state machine and its invariants
//! - [`orchestrator`] - the four-call interpretation protocol

pub mod draw;
pub mod orchestrator;
pub mod state;

pub use draw::{DrawEngine, DrawnCard, SPREAD_SIZE};
pub use orchestrator::Interpreter;
pub use state::{Phase, ReadingSession, SessionError};
