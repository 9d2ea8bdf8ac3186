//! Full in-memory application state.

use crate::model::card::{Card, CardId};
use crate::model::card_set::CardSet;
use serde::{Deserialize, Serialize};

/// Which screen the user is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Browse,
    Study,
}

/// Card editor contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraft {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CardDraft {
    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.back.is_empty() && self.tags.is_empty()
    }
}

/// Transient view state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub mode: Mode,
    pub selected: Option<CardId>,
    pub answer_revealed: bool,
    pub draft: CardDraft,
    /// Normalized tag that `Model::visible_cards` filters on.
    pub tag_filter: Option<String>,
}

/// Application model owned by `App`.
///
/// Only `cards` is persisted; `now_ms` is seeded from the init payload and
/// advanced by ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub cards: CardSet,
    pub now_ms: i64,
    pub ui: UiState,
}

impl Model {
    pub fn new(cards: CardSet, now_ms: i64) -> Self {
        Self {
            cards,
            now_ms,
            ui: UiState::default(),
        }
    }

    /// Number of cards due at the current model time.
    pub fn due_count(&self) -> usize {
        self.cards.due_cards(self.now_ms).count()
    }

    /// Cards shown by browse views: those carrying `ui.tag_filter`, or every
    /// card when no filter is set. Set order is kept.
    pub fn visible_cards(&self) -> impl Iterator<Item = &Card> + '_ {
        let filter = self.ui.tag_filter.as_deref();
        self.cards
            .iter()
            .filter(move |card| filter.map_or(true, |tag| card.has_tag(tag)))
    }

    /// First due card in set order, used as the study cursor.
    pub fn next_due(&self) -> Option<CardId> {
        self.cards.due_cards(self.now_ms).next().map(|card| card.id)
    }
}
