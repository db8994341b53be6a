//! User-message rendering
//!
//! Builds the per-card listing and the summary/detail user messages from
//! session data. Construction has no side effects: rendering the same
//! context twice yields byte-identical strings.

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;
use crate::catalog::{Catalog, Orientation};
use crate::session::draw::DrawnCard;
use crate::session::state::SessionError;

/// One line of the spread listing shared by every call
#[derive(Debug, Clone, Serialize)]
pub struct CardLine {
    /// 1-based position in the spread
    pub number: usize,
    /// Display name from the catalog
    pub name: String,
    /// Orientation wire label ("upright"/"reversed")
    pub orientation: &'static str,
    /// Comma-joined keywords for this card's orientation
    pub keywords: String,
}

/// The resolved spread, ready for template rendering
///
/// Resolution (catalog lookups, keyword joining) happens once here so the
/// render methods themselves are pure string production.
#[derive(Debug, Clone, Serialize)]
pub struct SpreadContext {
    pub cards: Vec<CardLine>,
}

impl SpreadContext {
    /// Resolve drawn cards against the catalog
    pub fn build(catalog: &Catalog, drawn: &[DrawnCard]) -> Result<Self> {
        debug!(card_count = drawn.len(), "SpreadContext::build: called");
        let cards = drawn
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let entry = catalog
                    .get(&card.id)
                    .ok_or_else(|| SessionError::UnknownCard { id: card.id.clone() })?;
                let side = entry.side(card.orientation);
                Ok(CardLine {
                    number: index + 1,
                    name: entry.name.clone(),
                    orientation: card.orientation.as_str(),
                    keywords: side.keywords.join(","),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { cards })
    }
}

#[derive(Serialize)]
struct SummaryVars<'a> {
    cards: &'a [CardLine],
    question: &'a str,
}

#[derive(Serialize)]
struct DetailVars<'a> {
    cards: &'a [CardLine],
    question: &'a str,
    card_name: &'a str,
    orientation_label: &'a str,
    reference: &'a str,
    summary: &'a str,
}

/// Renders the summary and detail user messages
pub struct PromptRenderer {
    handlebars: Handlebars<'static>,
}

impl PromptRenderer {
    /// Create a renderer with the embedded templates registered
    pub fn new() -> Result<Self> {
        debug!("PromptRenderer::new: called");
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        // Prompts are plain text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_template_string("summary-user", embedded::SUMMARY_USER)?;
        handlebars.register_template_string("detail-user", embedded::DETAIL_USER)?;

        Ok(Self { handlebars })
    }

    /// Render the user message for the summary call
    pub fn summary_user(&self, spread: &SpreadContext, question: &str) -> Result<String> {
        debug!(%question, "summary_user: called");
        let vars = SummaryVars {
            cards: &spread.cards,
            question,
        };
        Ok(self.handlebars.render("summary-user", &vars)?)
    }

    /// Render the user message for the detail call at `index`
    ///
    /// Carries the shared spread listing and question, the current card's
    /// full reference text for its orientation, the summary produced by the
    /// first call, and the mandated opening-sentence instruction.
    pub fn detail_user(
        &self,
        spread: &SpreadContext,
        question: &str,
        index: usize,
        orientation: Orientation,
        reference: &str,
        summary: &str,
    ) -> Result<String> {
        debug!(index, ?orientation, "detail_user: called");
        let card = spread
            .cards
            .get(index)
            .ok_or_else(|| eyre!("Spread has no card at index {index}"))?;

        let vars = DetailVars {
            cards: &spread.cards,
            question,
            card_name: &card.name,
            orientation_label: orientation.label_cn(),
            reference,
            summary,
        };
        Ok(self.handlebars.render("detail-user", &vars)?)
    }
}
