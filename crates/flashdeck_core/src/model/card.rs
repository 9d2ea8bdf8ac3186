//! Card domain model.
//!
//! # Responsibility
//! - Define the flashcard record that is persisted inside a card set.
//! - Validate card shape on construction and on deserialization.
//!
//! # Invariants
//! - `id` is stable, never nil and never reused for another card.
//! - `front` is never blank.
//! - `ease_permille` is never below `MIN_EASE_PERMILLE`.
//! - A deserialized `Card` has passed `Card::validate()`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a card.
pub type CardId = Uuid;

/// SM-2 ease factor for fresh cards, in thousandths (2.5).
pub const DEFAULT_EASE_PERMILLE: u32 = 2500;
/// SM-2 lower bound for the ease factor, in thousandths (1.3).
pub const MIN_EASE_PERMILLE: u32 = 1300;

/// Learning stage of one card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    /// Never reviewed.
    #[default]
    New,
    /// Reviewed at least once, not yet graduated.
    Learning,
    /// Graduated to spaced review.
    Review,
    /// Failed after graduating.
    Relearning,
}

/// Validation failures for card values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    NilId,
    BlankFront,
    EaseTooLow { ease_permille: u32 },
}

impl Display for CardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "card id must not be nil"),
            Self::BlankFront => write!(f, "card front must not be blank"),
            Self::EaseTooLow { ease_permille } => write!(
                f,
                "card ease_permille ({ease_permille}) must be >= {MIN_EASE_PERMILLE}"
            ),
        }
    }
}

impl Error for CardValidationError {}

/// One flashcard with its review schedule.
///
/// Timestamps are Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CardRecord")]
pub struct Card {
    pub id: CardId,
    /// Prompt side.
    pub front: String,
    /// Answer side. May be empty.
    pub back: String,
    /// Lowercase, trimmed, deduplicated and sorted.
    pub tags: Vec<String>,
    pub created_at: i64,
    /// Card is due for study once the clock reaches this value.
    pub due_at: i64,
    pub interval_days: u32,
    pub ease_permille: u32,
    /// Consecutive successful reviews. Reset by a failed review.
    pub review_count: u32,
    /// Failed reviews after graduating.
    pub lapses: u32,
    pub status: CardStatus,
}

impl Card {
    /// Creates a new card with a generated id, due immediately.
    pub fn new(
        front: impl Into<String>,
        back: impl Into<String>,
        tags: &[String],
        now_ms: i64,
    ) -> Result<Self, CardValidationError> {
        Self::with_id(Uuid::new_v4(), front, back, tags, now_ms)
    }

    /// Creates a new card with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: CardId,
        front: impl Into<String>,
        back: impl Into<String>,
        tags: &[String],
        now_ms: i64,
    ) -> Result<Self, CardValidationError> {
        let card = Self {
            id,
            front: front.into(),
            back: back.into(),
            tags: normalize_tags(tags),
            created_at: now_ms,
            due_at: now_ms,
            interval_days: 0,
            ease_permille: DEFAULT_EASE_PERMILLE,
            review_count: 0,
            lapses: 0,
            status: CardStatus::New,
        };
        card.validate()?;
        Ok(card)
    }

    /// Checks the card invariants.
    pub fn validate(&self) -> Result<(), CardValidationError> {
        if self.id.is_nil() {
            return Err(CardValidationError::NilId);
        }
        if self.front.trim().is_empty() {
            return Err(CardValidationError::BlankFront);
        }
        if self.ease_permille < MIN_EASE_PERMILLE {
            return Err(CardValidationError::EaseTooLow {
                ease_permille: self.ease_permille,
            });
        }
        Ok(())
    }

    /// Returns whether the card should be studied at `now_ms`.
    pub fn is_due(&self, now_ms: i64) -> bool {
        self.due_at <= now_ms
    }

    /// Returns whether the card carries `tag` (compared after normalization).
    pub fn has_tag(&self, tag: &str) -> bool {
        match normalize_tag(tag) {
            Some(tag) => self.tags.iter().any(|value| *value == tag),
            None => false,
        }
    }

    /// Clears the review schedule so the card studies like a new one.
    pub fn reset_schedule(&mut self, now_ms: i64) {
        self.due_at = now_ms;
        self.interval_days = 0;
        self.ease_permille = DEFAULT_EASE_PERMILLE;
        self.review_count = 0;
        self.lapses = 0;
        self.status = CardStatus::New;
    }
}

/// Stored card shape.
///
/// Snapshots written before scheduling existed only carry `id`, `front` and
/// `back`; missing scheduling fields are filled with fresh-card defaults.
#[derive(Deserialize)]
struct CardRecord {
    id: CardId,
    front: String,
    #[serde(default)]
    back: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    created_at: i64,
    due_at: Option<i64>,
    #[serde(default)]
    interval_days: u32,
    #[serde(default = "default_ease_permille")]
    ease_permille: u32,
    #[serde(default)]
    review_count: u32,
    #[serde(default)]
    lapses: u32,
    #[serde(default)]
    status: CardStatus,
}

fn default_ease_permille() -> u32 {
    DEFAULT_EASE_PERMILLE
}

impl TryFrom<CardRecord> for Card {
    type Error = CardValidationError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        let card = Self {
            id: record.id,
            front: record.front,
            back: record.back,
            tags: normalize_tags(&record.tags),
            created_at: record.created_at,
            due_at: record.due_at.unwrap_or(record.created_at),
            interval_days: record.interval_days,
            ease_permille: record.ease_permille,
            review_count: record.review_count,
            lapses: record.lapses,
            status: record.status,
        };
        card.validate()?;
        Ok(card)
    }
}

/// Normalizes one tag value. Returns `None` for blank input.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes, deduplicates and sorts tag values.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut unique = BTreeSet::new();
    for tag in tags {
        if let Some(value) = normalize_tag(tag) {
            unique.insert(value);
        }
    }
    unique.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_tags, Card, CardStatus, CardValidationError, DEFAULT_EASE_PERMILLE};
    use uuid::Uuid;

    #[test]
    fn new_card_starts_due_with_default_schedule() {
        let card = Card::new("front", "back", &[], 1_000).unwrap();
        assert_eq!(card.due_at, 1_000);
        assert_eq!(card.created_at, 1_000);
        assert_eq!(card.ease_permille, DEFAULT_EASE_PERMILLE);
        assert_eq!(card.status, CardStatus::New);
        assert!(card.is_due(1_000));
        assert!(!card.is_due(999));
    }

    #[test]
    fn with_id_rejects_nil_id_and_blank_front() {
        let nil = Card::with_id(Uuid::nil(), "front", "", &[], 0).unwrap_err();
        assert_eq!(nil, CardValidationError::NilId);

        let blank = Card::new("   ", "back", &[], 0).unwrap_err();
        assert_eq!(blank, CardValidationError::BlankFront);
    }

    #[test]
    fn tags_are_normalized_on_construction() {
        let tags = vec![
            " Rust ".to_string(),
            "rust".to_string(),
            "".to_string(),
            "Borrowck".to_string(),
        ];
        assert_eq!(normalize_tags(&tags), vec!["borrowck", "rust"]);

        let card = Card::new("front", "back", &tags, 0).unwrap();
        assert_eq!(card.tags, vec!["borrowck", "rust"]);
        assert!(card.has_tag("RUST"));
        assert!(!card.has_tag("  "));
    }

    #[test]
    fn reset_schedule_restores_fresh_state() {
        let mut card = Card::new("front", "back", &[], 0).unwrap();
        card.interval_days = 12;
        card.review_count = 4;
        card.lapses = 2;
        card.ease_permille = 1_700;
        card.status = CardStatus::Review;

        card.reset_schedule(5_000);
        assert_eq!(card.due_at, 5_000);
        assert_eq!(card.interval_days, 0);
        assert_eq!(card.review_count, 0);
        assert_eq!(card.lapses, 0);
        assert_eq!(card.ease_permille, DEFAULT_EASE_PERMILLE);
        assert_eq!(card.status, CardStatus::New);
    }
}
