//! Events accepted by the application core.

use crate::app::model::Mode;
use crate::model::card::CardId;
use serde::{Deserialize, Serialize};

/// One state-machine event.
///
/// Serialized with a `type` tag so hosts can send events as JSON, e.g.
/// `{"type":"add_card","front":"2+2","back":"4"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Msg {
    /// Advances the model clock.
    Tick { now_ms: i64 },
    SetDraft {
        front: String,
        back: String,
        #[serde(default)]
        tags: Vec<String>,
    },
    ClearDraft,
    /// Turns the current draft into a new card.
    SubmitDraft,
    AddCard {
        front: String,
        back: String,
        #[serde(default)]
        tags: Vec<String>,
    },
    /// Replaces the content of an existing card. Schedule is kept.
    EditCard {
        id: CardId,
        front: String,
        back: String,
        #[serde(default)]
        tags: Vec<String>,
    },
    RemoveCard { id: CardId },
    MoveCard { id: CardId, to_index: usize },
    /// Grades a card 0-5 and reschedules it.
    ReviewCard { id: CardId, grade: u8 },
    ResetProgress { id: CardId },
    Select { id: Option<CardId> },
    RevealAnswer,
    HideAnswer,
    SetMode { mode: Mode },
    SetTagFilter { tag: Option<String> },
}

impl Msg {
    /// Stable event name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tick { .. } => "tick",
            Self::SetDraft { .. } => "set_draft",
            Self::ClearDraft => "clear_draft",
            Self::SubmitDraft => "submit_draft",
            Self::AddCard { .. } => "add_card",
            Self::EditCard { .. } => "edit_card",
            Self::RemoveCard { .. } => "remove_card",
            Self::MoveCard { .. } => "move_card",
            Self::ReviewCard { .. } => "review_card",
            Self::ResetProgress { .. } => "reset_progress",
            Self::Select { .. } => "select",
            Self::RevealAnswer => "reveal_answer",
            Self::HideAnswer => "hide_answer",
            Self::SetMode { .. } => "set_mode",
            Self::SetTagFilter { .. } => "set_tag_filter",
        }
    }
}
