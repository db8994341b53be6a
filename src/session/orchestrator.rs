//! Interpretation orchestrator
//!
//! Drives the four-call protocol against the relay: one summary call, then
//! one detail call per card in spread order. Calls are strictly sequential -
//! call i+1 is only issued after call i's response has been appended -
//! because the answer is a single document whose sections must land in card
//! order 1-2-3. A failure at any call halts the remaining sequence without
//! retry or rollback; the session keeps its partial answer and stays in
//! Generating.

use std::sync::Arc;

use eyre::{Context, Result};
use tracing::{debug, info};

use super::draw::SPREAD_SIZE;
use super::state::{ReadingSession, SessionError};
use crate::catalog::Catalog;
use crate::prompts::{PromptRenderer, SpreadContext, embedded};
use crate::relay::{ChatMessage, RelayClient, RelayError};

/// Separator between the summary and each detail section of the answer
const SECTION_SEPARATOR: &str = "\n\n";

/// Orchestrates interpretation generation for a session
pub struct Interpreter {
    relay: Arc<dyn RelayClient>,
    renderer: PromptRenderer,
}

impl Interpreter {
    /// Create an interpreter over the given relay client
    pub fn new(relay: Arc<dyn RelayClient>) -> Result<Self> {
        debug!("Interpreter::new: called");
        let renderer = PromptRenderer::new().context("Failed to build prompt renderer")?;
        Ok(Self { relay, renderer })
    }

    /// Generate the interpretation for a session
    ///
    /// Claims the session's one-shot generation trigger; if it was already
    /// claimed (replayed trigger) or the session is not in Generating, this
    /// is a guarded no-op. On success the session transitions to Complete
    /// with the assembled answer; on failure the error propagates and the
    /// session is left in Generating with whatever text was appended before
    /// the failed call.
    pub async fn generate(&self, catalog: &Catalog, session: &mut ReadingSession) -> Result<()> {
        debug!(phase = ?session.phase(), "generate: called");
        if !session.begin_generation() {
            debug!("generate: trigger not claimable, ignoring");
            return Ok(());
        }

        let spread = SpreadContext::build(catalog, session.drawn_cards())?;
        let question = session.question().to_string();

        // Call 1: overall summary
        let summary_message = self.renderer.summary_user(&spread, &question)?;
        let summary = self
            .call_relay(embedded::SUMMARY_SYSTEM, summary_message)
            .await
            .context("Summary call failed")?;
        info!(summary_len = summary.len(), "Summary received");

        session.reset_answer();
        session.append_answer(&summary);

        // Calls 2-4: one detail per card, in spread order
        for index in 0..SPREAD_SIZE {
            let card = session.drawn_cards()[index].clone();
            let entry = catalog
                .get(&card.id)
                .ok_or_else(|| SessionError::UnknownCard { id: card.id.clone() })?;
            let reference = entry.side(card.orientation).full.clone();

            let detail_message =
                self.renderer
                    .detail_user(&spread, &question, index, card.orientation, &reference, &summary)?;
            let detail = self
                .call_relay(embedded::DETAIL_SYSTEM, detail_message)
                .await
                .with_context(|| format!("Detail call {} failed", index + 1))?;
            info!(index, detail_len = detail.len(), "Detail received");

            session.append_answer(SECTION_SEPARATOR);
            session.append_answer(&detail);
        }

        session.complete();
        Ok(())
    }

    /// Issue one relay call and extract the first choice's content
    async fn call_relay(&self, system_prompt: &str, user_message: String) -> Result<String, RelayError> {
        debug!(user_len = user_message.len(), "call_relay: called");
        let messages = vec![ChatMessage::system(system_prompt), ChatMessage::user(user_message)];

        let completion = self.relay.chat(messages).await?;
        completion
            .into_content()
            .ok_or_else(|| RelayError::InvalidResponse("Response contained no choices".to_string()))
    }
}
