//! Reading session state machine
//!
//! Phases advance one way: AwaitingQuestion -> CardsRevealed -> Generating
//! -> Complete. Validation rejections (empty question, re-flips, replayed
//! triggers) are guarded no-ops, not errors - the transition functions return
//! the resulting phase so callers can observe whether anything moved.

use thiserror::Error;
use tracing::{debug, info};

use super::draw::{DrawEngine, DrawnCard, SPREAD_SIZE};
use crate::catalog::Catalog;

/// Session-level errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Catalog has {have} cards, need at least {SPREAD_SIZE} to draw a spread")]
    InsufficientCatalog { have: usize },

    #[error("Card position {position} out of range (spread has {SPREAD_SIZE} slots)")]
    InvalidPosition { position: usize },

    #[error("Drawn card '{id}' is missing from the catalog")]
    UnknownCard { id: String },
}

/// Phase of the reading flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the user's question; cards not yet drawn
    AwaitingQuestion,
    /// Question frozen, spread drawn, cards being flipped
    CardsRevealed,
    /// All three cards flipped; interpretation in progress
    Generating,
    /// Interpretation finished; answer frozen
    Complete,
}

/// One reading session, from question entry to completed interpretation
///
/// Owns all mutable state for a single reading. Sessions are created fresh
/// per reading and discarded afterward; nothing is persisted.
#[derive(Debug)]
pub struct ReadingSession {
    phase: Phase,
    question: String,
    drawn: Vec<DrawnCard>,
    flipped: [bool; SPREAD_SIZE],
    flipped_count: usize,
    answer: String,
    generation_started: bool,
}

impl Default for ReadingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingSession {
    /// Create a fresh session awaiting a question
    pub fn new() -> Self {
        debug!("ReadingSession::new: called");
        Self {
            phase: Phase::AwaitingQuestion,
            question: String::new(),
            drawn: Vec::new(),
            flipped: [false; SPREAD_SIZE],
            flipped_count: 0,
            answer: String::new(),
            generation_started: false,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The frozen question text (empty until submitted)
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The drawn spread (empty until the question is submitted)
    pub fn drawn_cards(&self) -> &[DrawnCard] {
        &self.drawn
    }

    /// Whether the card at `position` has been flipped
    pub fn is_flipped(&self, position: usize) -> bool {
        self.flipped.get(position).copied().unwrap_or(false)
    }

    /// Number of flipped cards
    pub fn flipped_count(&self) -> usize {
        self.flipped_count
    }

    /// Accumulated interpretation text
    ///
    /// Only meaningful once the phase is Generating or Complete.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Submit the user's question and reveal the spread
    ///
    /// An empty or whitespace-only question is rejected silently (UI
    /// validation, not a fault): the phase does not advance and no draw
    /// happens. Outside AwaitingQuestion this is a guarded no-op, so the
    /// question is frozen by the first successful submission. The draw runs
    /// here exactly once per session.
    pub fn submit_question(
        &mut self,
        text: &str,
        engine: &mut DrawEngine,
        catalog: &Catalog,
    ) -> Result<Phase, SessionError> {
        debug!(text_len = text.len(), phase = ?self.phase, "submit_question: called");
        if self.phase != Phase::AwaitingQuestion {
            debug!("submit_question: not awaiting question, ignoring");
            return Ok(self.phase);
        }

        if text.trim().is_empty() {
            debug!("submit_question: empty question rejected");
            return Ok(self.phase);
        }

        if self.drawn.is_empty() {
            debug!("submit_question: drawing spread");
            self.drawn = engine.draw(catalog)?;
        } else {
            debug!("submit_question: spread already drawn, keeping existing cards");
        }

        self.question = text.to_string();
        self.phase = Phase::CardsRevealed;
        info!(question = %self.question, "Question submitted, cards revealed");
        Ok(self.phase)
    }

    /// Flip the card at `position`
    ///
    /// Re-flipping an already-flipped card is a no-op, as is flipping outside
    /// the CardsRevealed phase (a replayed flip event must not re-trigger
    /// generation). The flip that reveals the last card advances the phase to
    /// Generating.
    pub fn flip_card(&mut self, position: usize) -> Result<Phase, SessionError> {
        debug!(position, phase = ?self.phase, "flip_card: called");
        if position >= SPREAD_SIZE {
            debug!(position, "flip_card: position out of range");
            return Err(SessionError::InvalidPosition { position });
        }

        if self.phase != Phase::CardsRevealed {
            debug!("flip_card: not in CardsRevealed, ignoring");
            return Ok(self.phase);
        }

        if self.flipped[position] {
            debug!(position, "flip_card: already flipped, ignoring");
            return Ok(self.phase);
        }

        self.flipped[position] = true;
        self.flipped_count += 1;
        debug!(position, flipped_count = self.flipped_count, "flip_card: card flipped");

        if self.flipped_count == SPREAD_SIZE {
            self.phase = Phase::Generating;
            info!("All cards flipped, entering generation");
        }

        Ok(self.phase)
    }

    /// Claim the one-shot generation trigger
    ///
    /// Returns true exactly once per session: the first call while the phase
    /// is Generating. Every later call (replayed trigger, wrong phase)
    /// returns false, so the orchestration can never run twice.
    pub fn begin_generation(&mut self) -> bool {
        debug!(phase = ?self.phase, started = self.generation_started, "begin_generation: called");
        if self.phase != Phase::Generating || self.generation_started {
            debug!("begin_generation: trigger already claimed or wrong phase");
            return false;
        }
        self.generation_started = true;
        true
    }

    /// Clear the answer at the start of a generation cycle
    ///
    /// Only legal while Generating; called exactly once per cycle by the
    /// orchestrator before the summary text is appended.
    pub fn reset_answer(&mut self) {
        debug!(phase = ?self.phase, "reset_answer: called");
        if self.phase == Phase::Generating {
            self.answer.clear();
        }
    }

    /// Append a chunk of interpretation text
    ///
    /// Append-only within a generation cycle; ignored outside Generating so
    /// a completed answer can never be mutated.
    pub fn append_answer(&mut self, chunk: &str) {
        debug!(chunk_len = chunk.len(), phase = ?self.phase, "append_answer: called");
        if self.phase == Phase::Generating {
            self.answer.push_str(chunk);
        }
    }

    /// Mark the interpretation finished
    ///
    /// Generating -> Complete; no-op from any other phase. The answer is
    /// frozen afterward.
    pub fn complete(&mut self) {
        debug!(phase = ?self.phase, "complete: called");
        if self.phase == Phase::Generating {
            self.phase = Phase::Complete;
            info!(answer_len = self.answer.len(), "Reading complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::catalog_of;
    use crate::session::draw::DEFAULT_REVERSED_PROBABILITY;

    fn engine() -> DrawEngine {
        DrawEngine::seeded(11, DEFAULT_REVERSED_PROBABILITY)
    }

    fn revealed_session(catalog: &Catalog) -> ReadingSession {
        let mut session = ReadingSession::new();
        session.submit_question("我的职业", &mut engine(), catalog).unwrap();
        session
    }

    #[test]
    fn test_new_session_awaits_question() {
        let session = ReadingSession::new();
        assert_eq!(session.phase(), Phase::AwaitingQuestion);
        assert!(session.drawn_cards().is_empty());
        assert_eq!(session.flipped_count(), 0);
        assert_eq!(session.answer(), "");
    }

    #[test]
    fn test_empty_question_is_rejected_silently() {
        let catalog = catalog_of(5);
        let mut session = ReadingSession::new();

        let phase = session.submit_question("", &mut engine(), &catalog).unwrap();
        assert_eq!(phase, Phase::AwaitingQuestion);
        assert!(session.drawn_cards().is_empty());

        let phase = session.submit_question("   ", &mut engine(), &catalog).unwrap();
        assert_eq!(phase, Phase::AwaitingQuestion);
    }

    #[test]
    fn test_submit_question_freezes_text_and_draws() {
        let catalog = catalog_of(5);
        let mut session = ReadingSession::new();

        let phase = session.submit_question("我的职业", &mut engine(), &catalog).unwrap();
        assert_eq!(phase, Phase::CardsRevealed);
        assert_eq!(session.question(), "我的职业");
        assert_eq!(session.drawn_cards().len(), SPREAD_SIZE);
    }

    #[test]
    fn test_question_frozen_after_submission() {
        let catalog = catalog_of(5);
        let mut session = revealed_session(&catalog);
        let drawn_before = session.drawn_cards().to_vec();

        // A second submission must change neither the question nor the spread
        let phase = session.submit_question("换个问题", &mut engine(), &catalog).unwrap();
        assert_eq!(phase, Phase::CardsRevealed);
        assert_eq!(session.question(), "我的职业");
        assert_eq!(session.drawn_cards(), drawn_before.as_slice());
    }

    #[test]
    fn test_submit_question_propagates_insufficient_catalog() {
        let catalog = catalog_of(2);
        let mut session = ReadingSession::new();

        let result = session.submit_question("我的职业", &mut engine(), &catalog);
        assert!(matches!(result, Err(SessionError::InsufficientCatalog { have: 2 })));
        assert_eq!(session.phase(), Phase::AwaitingQuestion);
    }

    #[test]
    fn test_flip_before_question_is_noop() {
        let mut session = ReadingSession::new();

        let phase = session.flip_card(0).unwrap();
        assert_eq!(phase, Phase::AwaitingQuestion);
        assert_eq!(session.flipped_count(), 0);
    }

    #[test]
    fn test_double_flip_is_idempotent() {
        let catalog = catalog_of(5);
        let mut session = revealed_session(&catalog);

        session.flip_card(1).unwrap();
        assert_eq!(session.flipped_count(), 1);

        session.flip_card(1).unwrap();
        assert_eq!(session.flipped_count(), 1);
        assert_eq!(session.phase(), Phase::CardsRevealed);
    }

    #[test]
    fn test_flip_out_of_range_is_error() {
        let catalog = catalog_of(5);
        let mut session = revealed_session(&catalog);

        let result = session.flip_card(3);
        assert!(matches!(result, Err(SessionError::InvalidPosition { position: 3 })));
    }

    #[test]
    fn test_third_flip_enters_generating() {
        let catalog = catalog_of(5);
        let mut session = revealed_session(&catalog);

        assert_eq!(session.flip_card(0).unwrap(), Phase::CardsRevealed);
        assert_eq!(session.flip_card(1).unwrap(), Phase::CardsRevealed);
        assert_eq!(session.flip_card(2).unwrap(), Phase::Generating);
        assert_eq!(session.flipped_count(), SPREAD_SIZE);
    }

    #[test]
    fn test_replayed_flip_does_not_retrigger_generation() {
        let catalog = catalog_of(5);
        let mut session = revealed_session(&catalog);

        for i in 0..SPREAD_SIZE {
            session.flip_card(i).unwrap();
        }
        assert!(session.begin_generation());

        // Replay of the third flip event: phase must stay Generating and the
        // trigger must not be claimable again
        let phase = session.flip_card(2).unwrap();
        assert_eq!(phase, Phase::Generating);
        assert!(!session.begin_generation());
    }

    #[test]
    fn test_begin_generation_fires_exactly_once() {
        let catalog = catalog_of(5);
        let mut session = revealed_session(&catalog);
        for i in 0..SPREAD_SIZE {
            session.flip_card(i).unwrap();
        }

        assert!(session.begin_generation());
        assert!(!session.begin_generation());
        assert!(!session.begin_generation());
    }

    #[test]
    fn test_begin_generation_requires_generating_phase() {
        let catalog = catalog_of(5);
        let mut session = revealed_session(&catalog);

        assert!(!session.begin_generation());
    }

    #[test]
    fn test_answer_mutation_only_while_generating() {
        let catalog = catalog_of(5);
        let mut session = revealed_session(&catalog);

        // Not yet generating: appends are ignored
        session.append_answer("早了");
        assert_eq!(session.answer(), "");

        for i in 0..SPREAD_SIZE {
            session.flip_card(i).unwrap();
        }
        session.reset_answer();
        session.append_answer("总体解读");
        assert_eq!(session.answer(), "总体解读");

        session.complete();
        assert_eq!(session.phase(), Phase::Complete);

        // Frozen after completion
        session.append_answer("多余的");
        session.reset_answer();
        assert_eq!(session.answer(), "总体解读");
    }

    #[test]
    fn test_flipped_count_matches_flags() {
        let catalog = catalog_of(5);
        let mut session = revealed_session(&catalog);

        session.flip_card(2).unwrap();
        session.flip_card(0).unwrap();
        session.flip_card(0).unwrap();

        let flags = (0..SPREAD_SIZE).filter(|&i| session.is_flipped(i)).count();
        assert_eq!(session.flipped_count(), flags);
        assert_eq!(session.flipped_count(), 2);
    }
}
