//! Card set text codec.
//!
//! # Responsibility
//! - Encode a `CardSet` (and only the card set) into snapshot text.
//! - Decode snapshot text back into a validated `CardSet`.
//!
//! # Invariants
//! - `decode_cards(encode_cards(set)) == set` for every set the app produces.
//! - Encoding is deterministic: equal sets produce byte-identical text.
//! - Decoding never repairs input; any structural or validation failure is
//!   returned as an error for the caller to route.

use crate::model::card_set::CardSet;
use serde_json::error::Category;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Text encoding of the card set, emitted on the outbound persistence port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedSnapshot(String);

impl SerializedSnapshot {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for SerializedSnapshot {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for SerializedSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot encode/decode failures.
#[derive(Debug)]
pub enum SnapshotError {
    /// Card set could not be written as text.
    Encode(serde_json::Error),
    /// Text is not well-formed (syntax error or truncated input).
    Malformed(serde_json::Error),
    /// Text is well-formed but does not describe a valid card set.
    Invalid(serde_json::Error),
}

impl SnapshotError {
    /// Short stable label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Encode(_) => "encode",
            Self::Malformed(_) => "malformed",
            Self::Invalid(_) => "invalid",
        }
    }
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode card set: {err}"),
            Self::Malformed(err) => write!(f, "malformed card snapshot: {err}"),
            Self::Invalid(err) => write!(f, "invalid card snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Malformed(err) | Self::Invalid(err) => Some(err),
        }
    }
}

/// Encodes the card set as a JSON array of card objects.
pub fn encode_cards(cards: &CardSet) -> Result<SerializedSnapshot, SnapshotError> {
    serde_json::to_string(cards)
        .map(SerializedSnapshot)
        .map_err(SnapshotError::Encode)
}

/// Decodes snapshot text into a card set.
pub fn decode_cards(text: &str) -> Result<CardSet, SnapshotError> {
    serde_json::from_str(text).map_err(|err| match err.classify() {
        Category::Data => SnapshotError::Invalid(err),
        Category::Syntax | Category::Eof | Category::Io => SnapshotError::Malformed(err),
    })
}
