//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System prompt for the overall-reading summary call
pub const SUMMARY_SYSTEM: &str = include_str!("../../prompts/summary-system.pmt");

/// System prompt for the per-card detail calls
pub const DETAIL_SYSTEM: &str = include_str!("../../prompts/detail-system.pmt");

/// User-message template for the summary call
pub const SUMMARY_USER: &str = include_str!("../../prompts/summary-user.pmt");

/// User-message template for the detail calls
pub const DETAIL_USER: &str = include_str!("../../prompts/detail-user.pmt");

/// Get an embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "summary-system" => Some(SUMMARY_SYSTEM),
        "detail-system" => Some(DETAIL_SYSTEM),
        "summary-user" => Some(SUMMARY_USER),
        "detail-user" => Some(DETAIL_USER),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
