//! Prompt template system
//!
//! The two reader personas (summary and per-card detail) are fixed system
//! prompts compiled into the binary from `.pmt` files. User messages are
//! rendered from serializable contexts with Handlebars; rendering is pure,
//! so identical session data always produces byte-identical request text and
//! relay calls stay reproducible under a stubbed client.

pub mod embedded;
mod templates;

pub use templates::{CardLine, PromptRenderer, SpreadContext};
