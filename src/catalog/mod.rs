//! Card catalog - static tarot reference data
//!
//! The catalog maps a card identifier (e.g. "fool") to its display name and
//! the meanings of both orientations. It is loaded once from a JSON document
//! at startup and is read-only afterward; every draw, flip, and generation
//! action requires a loaded catalog.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Orientation of a drawn card
///
/// Selects which [`SideMeaning`] of a card applies to a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Upright,
    Reversed,
}

impl Orientation {
    /// Wire/template label ("upright" or "reversed")
    pub fn as_str(&self) -> &'static str {
        debug!(?self, "Orientation::as_str: called");
        match self {
            Orientation::Upright => "upright",
            Orientation::Reversed => "reversed",
        }
    }

    /// Chinese position label used in prompts and card captions
    pub fn label_cn(&self) -> &'static str {
        debug!(?self, "Orientation::label_cn: called");
        match self {
            Orientation::Upright => "正位",
            Orientation::Reversed => "逆位",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Meaning of one side (orientation) of a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideMeaning {
    /// Ordered keyword list for the summary prompt
    pub keywords: Vec<String>,

    /// Long-form reference text for the detail prompt
    pub full: String,
}

/// A single catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardEntry {
    /// Display name (e.g. "愚者")
    pub name: String,

    /// Upright meaning
    pub upright: SideMeaning,

    /// Reversed meaning
    pub reversed: SideMeaning,
}

impl CardEntry {
    /// Get the meaning for the given orientation
    pub fn side(&self, orientation: Orientation) -> &SideMeaning {
        debug!(card = %self.name, ?orientation, "CardEntry::side: called");
        match orientation {
            Orientation::Upright => &self.upright,
            Orientation::Reversed => &self.reversed,
        }
    }
}

/// The loaded card catalog
///
/// Backed by a BTreeMap so listings iterate in a stable order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    cards: BTreeMap<String, CardEntry>,
}

impl Catalog {
    /// Load the catalog from a JSON file
    ///
    /// The document is a mapping from card identifier to entry, the same
    /// shape the web app fetches at startup.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        debug!(path = %path.as_ref().display(), "Catalog::load: called");
        let content = std::fs::read_to_string(&path)?;
        let catalog = Self::from_json(&content)?;
        info!(
            cards = catalog.len(),
            path = %path.as_ref().display(),
            "Card catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        debug!(json_len = json.len(), "Catalog::from_json: called");
        let cards: BTreeMap<String, CardEntry> = serde_json::from_str(json)?;
        Ok(Self { cards })
    }

    /// Build a catalog from already-parsed entries (tests, fixtures)
    pub fn from_entries(entries: impl IntoIterator<Item = (String, CardEntry)>) -> Self {
        debug!("Catalog::from_entries: called");
        Self {
            cards: entries.into_iter().collect(),
        }
    }

    /// Look up a card by identifier
    pub fn get(&self, id: &str) -> Option<&CardEntry> {
        debug!(%id, "Catalog::get: called");
        self.cards.get(id)
    }

    /// Number of cards in the catalog
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over card identifiers in stable order
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.cards.keys()
    }

    /// Iterate over (identifier, entry) pairs in stable order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CardEntry)> {
        self.cards.iter()
    }
}
