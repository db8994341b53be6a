//! Draw engine - randomized card selection
//!
//! Draws three distinct cards by uniformly shuffling the full identifier set
//! (no rejection sampling, so duplicates are impossible by construction) and
//! assigns each card an orientation by an independent weighted coin flip.
//! The random source is injectable so draws are reproducible under test.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, info};

use super::state::SessionError;
use crate::catalog::{Catalog, Orientation};

/// Number of cards in a spread
pub const SPREAD_SIZE: usize = 3;

/// Default probability that a drawn card lands reversed
pub const DEFAULT_REVERSED_PROBABILITY: f64 = 0.3;

/// A card selected by the draw engine
///
/// Immutable once created; `id` is a key into the catalog the draw ran
/// against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnCard {
    pub id: String,
    pub orientation: Orientation,
}

/// Randomized draw engine
///
/// Runs at most once per session lifecycle - [`ReadingSession`] owns that
/// guarantee and never re-invokes the engine once cards exist.
///
/// [`ReadingSession`]: super::state::ReadingSession
pub struct DrawEngine {
    rng: Box<dyn RngCore>,
    reversed_probability: f64,
}

impl DrawEngine {
    /// Create an engine backed by the thread-local RNG
    pub fn new(reversed_probability: f64) -> Self {
        debug!(reversed_probability, "DrawEngine::new: called");
        Self {
            rng: Box::new(rand::rng()),
            reversed_probability,
        }
    }

    /// Create an engine with a deterministic seed (reproducible draws)
    pub fn seeded(seed: u64, reversed_probability: f64) -> Self {
        debug!(seed, reversed_probability, "DrawEngine::seeded: called");
        Self {
            rng: Box::new(StdRng::seed_from_u64(seed)),
            reversed_probability,
        }
    }

    /// Create an engine from any random source
    pub fn with_rng(rng: impl RngCore + 'static, reversed_probability: f64) -> Self {
        debug!(reversed_probability, "DrawEngine::with_rng: called");
        Self {
            rng: Box::new(rng),
            reversed_probability,
        }
    }

    /// Draw three distinct cards from the catalog
    ///
    /// The output order is the display order of the three card slots and is
    /// stable once produced. Fails with [`SessionError::InsufficientCatalog`]
    /// when fewer than three cards are available.
    pub fn draw(&mut self, catalog: &Catalog) -> Result<Vec<DrawnCard>, SessionError> {
        debug!(catalog_size = catalog.len(), "draw: called");
        if catalog.len() < SPREAD_SIZE {
            debug!("draw: catalog too small");
            return Err(SessionError::InsufficientCatalog { have: catalog.len() });
        }

        let mut ids: Vec<String> = catalog.ids().cloned().collect();
        ids.shuffle(&mut self.rng);

        let drawn: Vec<DrawnCard> = ids
            .into_iter()
            .take(SPREAD_SIZE)
            .map(|id| {
                let epsilon: f64 = self.rng.random();
                let orientation = if epsilon < self.reversed_probability {
                    Orientation::Reversed
                } else {
                    Orientation::Upright
                };
                debug!(%id, ?orientation, "draw: card selected");
                DrawnCard { id, orientation }
            })
            .collect();

        info!(
            cards = ?drawn.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            "Spread drawn"
        );
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::catalog_of;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_draw_returns_three_distinct_cards() {
        let catalog = catalog_of(22);

        for trial in 0..1000 {
            let mut engine = DrawEngine::seeded(trial, DEFAULT_REVERSED_PROBABILITY);
            let drawn = engine.draw(&catalog).unwrap();

            assert_eq!(drawn.len(), SPREAD_SIZE);
            let ids: HashSet<&str> = drawn.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids.len(), SPREAD_SIZE, "duplicate card in trial {trial}");
        }
    }

    #[test]
    fn test_draw_fails_on_small_catalog() {
        let catalog = catalog_of(2);
        let mut engine = DrawEngine::seeded(1, DEFAULT_REVERSED_PROBABILITY);

        let result = engine.draw(&catalog);
        assert!(matches!(result, Err(SessionError::InsufficientCatalog { have: 2 })));
    }

    #[test]
    fn test_draw_accepts_exactly_three_cards() {
        let catalog = catalog_of(3);
        let mut engine = DrawEngine::seeded(1, DEFAULT_REVERSED_PROBABILITY);

        let drawn = engine.draw(&catalog).unwrap();
        let ids: HashSet<&str> = drawn.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_orientation_split_approximates_thirty_percent() {
        let catalog = catalog_of(22);
        let mut engine = DrawEngine::seeded(42, DEFAULT_REVERSED_PROBABILITY);

        // 4000 draws x 3 cards = 12000 orientation samples
        let mut reversed = 0usize;
        let mut total = 0usize;
        for _ in 0..4000 {
            for card in engine.draw(&catalog).unwrap() {
                total += 1;
                if card.orientation == Orientation::Reversed {
                    reversed += 1;
                }
            }
        }

        assert_eq!(total, 12000);
        let ratio = reversed as f64 / total as f64;
        assert!(
            (0.27..=0.33).contains(&ratio),
            "reversed ratio {ratio} outside tolerance"
        );
    }

    #[test]
    fn test_seeded_draws_are_reproducible() {
        let catalog = catalog_of(22);

        let first = DrawEngine::seeded(7, DEFAULT_REVERSED_PROBABILITY).draw(&catalog).unwrap();
        let second = DrawEngine::seeded(7, DEFAULT_REVERSED_PROBABILITY).draw(&catalog).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_probability_never_reverses() {
        let catalog = catalog_of(22);
        let mut engine = DrawEngine::seeded(9, 0.0);

        for _ in 0..200 {
            for card in engine.draw(&catalog).unwrap() {
                assert_eq!(card.orientation, Orientation::Upright);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_draw_never_duplicates(seed in any::<u64>(), size in 3usize..40) {
            let catalog = catalog_of(size);
            let mut engine = DrawEngine::seeded(seed, DEFAULT_REVERSED_PROBABILITY);

            let drawn = engine.draw(&catalog).unwrap();
            let ids: HashSet<&str> = drawn.iter().map(|c| c.id.as_str()).collect();
            prop_assert_eq!(ids.len(), SPREAD_SIZE);
        }
    }
}
