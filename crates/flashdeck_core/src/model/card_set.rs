//! Ordered card collection.
//!
//! # Responsibility
//! - Hold every card of the deck in display/study order.
//! - Guard identity uniqueness for inserts and for decoded data.
//!
//! # Invariants
//! - Order is significant and is preserved by serialization.
//! - No two cards share an id.

use crate::model::card::{Card, CardId};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Card set mutation/validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardSetError {
    DuplicateId(CardId),
    NotFound(CardId),
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for CardSetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate card id: {id}"),
            Self::NotFound(id) => write!(f, "card not found: {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "card index {index} out of range for {len} card(s)")
            }
        }
    }
}

impl Error for CardSetError {}

/// The persisted part of the application model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Card>")]
pub struct CardSet {
    cards: Vec<Card>,
}

impl CardSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from ordered cards, rejecting duplicate ids.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, CardSetError> {
        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !seen.insert(card.id) {
                return Err(CardSetError::DuplicateId(card.id));
            }
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Mutable lookup. Callers must not change `Card::id`.
    pub(crate) fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    /// Appends one card at the end of the set.
    pub fn push(&mut self, card: Card) -> Result<(), CardSetError> {
        if self.contains(card.id) {
            return Err(CardSetError::DuplicateId(card.id));
        }
        self.cards.push(card);
        Ok(())
    }

    /// Inserts one card at `index`, shifting later cards.
    pub fn insert_at(&mut self, index: usize, card: Card) -> Result<(), CardSetError> {
        if index > self.cards.len() {
            return Err(CardSetError::IndexOutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        if self.contains(card.id) {
            return Err(CardSetError::DuplicateId(card.id));
        }
        self.cards.insert(index, card);
        Ok(())
    }

    /// Removes one card, keeping the order of the rest.
    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        let index = self.position(id)?;
        Some(self.cards.remove(index))
    }

    /// Moves one card to `to_index`.
    ///
    /// Returns `Ok(false)` when the card already sits at `to_index`.
    pub fn move_to(&mut self, id: CardId, to_index: usize) -> Result<bool, CardSetError> {
        let from = self.position(id).ok_or(CardSetError::NotFound(id))?;
        if to_index >= self.cards.len() {
            return Err(CardSetError::IndexOutOfRange {
                index: to_index,
                len: self.cards.len(),
            });
        }
        if from == to_index {
            return Ok(false);
        }
        let card = self.cards.remove(from);
        self.cards.insert(to_index, card);
        Ok(true)
    }

    /// Cards due at `now_ms`, in set order.
    pub fn due_cards(&self, now_ms: i64) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter().filter(move |card| card.is_due(now_ms))
    }

    /// Cards carrying `tag`, in set order.
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards.iter().filter(move |card| card.has_tag(tag))
    }

    /// Every tag used in the set, sorted.
    pub fn tags(&self) -> BTreeSet<&str> {
        self.cards
            .iter()
            .flat_map(|card| card.tags.iter().map(String::as_str))
            .collect()
    }
}

impl TryFrom<Vec<Card>> for CardSet {
    type Error = CardSetError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Self::from_cards(cards)
    }
}

impl Serialize for CardSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cards.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a CardSet {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
