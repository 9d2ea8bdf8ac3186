//! Startup payload and its decoding policy.
//!
//! # Invariants
//! - Absent cards start the app with an empty set.
//! - Cards that fail to decode start the app with an empty set; the stored
//!   text is dropped, never repaired.
//! - Decoding never fails the startup.

use crate::model::card_set::CardSet;
use crate::snapshot::decode_cards;
use serde::{Deserialize, Serialize};

/// One-time startup data handed from the host to the core.
///
/// `cards` is the stored snapshot text, passed through verbatim. Hosts built
/// before persistence existed send only `timestamp`; that shape deserializes
/// with `cards = None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitPayload {
    /// Unix epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub cards: Option<String>,
}

impl InitPayload {
    pub fn new(timestamp: i64, cards: Option<String>) -> Self {
        Self { timestamp, cards }
    }

    /// Payload of a host without persistence.
    pub fn timestamp_only(timestamp: i64) -> Self {
        Self {
            timestamp,
            cards: None,
        }
    }
}

/// Which startup branch was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// No stored cards.
    Absent,
    /// Stored cards could not be decoded and were discarded.
    Malformed { kind: &'static str, reason: String },
    /// Stored cards were restored.
    Restored { count: usize },
}

impl InitOutcome {
    /// Short stable label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Malformed { .. } => "fallback",
            Self::Restored { .. } => "restored",
        }
    }
}

/// Decodes the startup card set, falling back to the default on any failure.
pub fn decode_init(payload: &InitPayload) -> (CardSet, InitOutcome) {
    let Some(text) = payload.cards.as_deref() else {
        return (default_cards(), InitOutcome::Absent);
    };

    match decode_cards(text) {
        Ok(cards) => {
            let count = cards.len();
            (cards, InitOutcome::Restored { count })
        }
        Err(err) => (
            default_cards(),
            InitOutcome::Malformed {
                kind: err.kind(),
                reason: err.to_string(),
            },
        ),
    }
}

/// Card set used when nothing usable was stored.
pub fn default_cards() -> CardSet {
    CardSet::new()
}
