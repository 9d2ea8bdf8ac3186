//! Pure state transitions.
//!
//! # Invariants
//! - `update` returns `Effect::PersistCards` exactly when the card set changed.
//! - On `Err`, the model is left untouched.
//! - No I/O happens here; persistence is driven by the returned effect.

use crate::app::model::{CardDraft, Mode, Model};
use crate::app::msg::Msg;
use crate::model::card::{normalize_tag, normalize_tags, Card, CardId, CardValidationError};
use crate::model::card_set::CardSetError;
use crate::scheduler::{schedule_review, MAX_GRADE};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Follow-up work requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The card set changed and must be mirrored to storage.
    PersistCards,
}

/// Rejected transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    CardNotFound(CardId),
    DuplicateCard(CardId),
    InvalidCard(CardValidationError),
    IndexOutOfRange { index: usize, len: usize },
    InvalidGrade(u8),
}

impl Display for UpdateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CardNotFound(id) => write!(f, "card not found: {id}"),
            Self::DuplicateCard(id) => write!(f, "duplicate card id: {id}"),
            Self::InvalidCard(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "card index {index} out of range for {len} card(s)")
            }
            Self::InvalidGrade(grade) => {
                write!(f, "review grade {grade} out of range 0..={MAX_GRADE}")
            }
        }
    }
}

impl Error for UpdateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidCard(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CardValidationError> for UpdateError {
    fn from(value: CardValidationError) -> Self {
        Self::InvalidCard(value)
    }
}

impl From<CardSetError> for UpdateError {
    fn from(value: CardSetError) -> Self {
        match value {
            CardSetError::DuplicateId(id) => Self::DuplicateCard(id),
            CardSetError::NotFound(id) => Self::CardNotFound(id),
            CardSetError::IndexOutOfRange { index, len } => Self::IndexOutOfRange { index, len },
        }
    }
}

pub type UpdateResult = Result<Effect, UpdateError>;

/// Applies one event to the model.
pub fn update(model: &mut Model, msg: Msg) -> UpdateResult {
    match msg {
        Msg::Tick { now_ms } => {
            model.now_ms = now_ms;
            if model.ui.mode == Mode::Study && model.ui.selected.is_none() {
                model.ui.selected = model.next_due();
            }
            Ok(Effect::None)
        }
        Msg::SetDraft { front, back, tags } => {
            model.ui.draft = CardDraft { front, back, tags };
            Ok(Effect::None)
        }
        Msg::ClearDraft => {
            model.ui.draft = CardDraft::default();
            Ok(Effect::None)
        }
        Msg::SubmitDraft => {
            let draft = &model.ui.draft;
            let card = new_card(&draft.front, &draft.back, &draft.tags, model.now_ms)?;
            let id = card.id;
            model.cards.push(card)?;
            model.ui.draft = CardDraft::default();
            model.ui.selected = Some(id);
            model.ui.answer_revealed = false;
            Ok(Effect::PersistCards)
        }
        Msg::AddCard { front, back, tags } => {
            let card = new_card(&front, &back, &tags, model.now_ms)?;
            let id = card.id;
            model.cards.push(card)?;
            model.ui.selected = Some(id);
            model.ui.answer_revealed = false;
            Ok(Effect::PersistCards)
        }
        Msg::EditCard {
            id,
            front,
            back,
            tags,
        } => {
            let current = model.cards.get(id).ok_or(UpdateError::CardNotFound(id))?;
            let mut edited = current.clone();
            edited.front = front.trim().to_string();
            edited.back = back.trim().to_string();
            edited.tags = normalize_tags(&tags);
            edited.validate()?;
            replace_card(model, edited)
        }
        Msg::RemoveCard { id } => {
            model.cards.remove(id).ok_or(UpdateError::CardNotFound(id))?;
            if model.ui.selected == Some(id) {
                model.ui.answer_revealed = false;
                model.ui.selected = match model.ui.mode {
                    Mode::Study => model.next_due(),
                    Mode::Browse => None,
                };
            }
            Ok(Effect::PersistCards)
        }
        Msg::MoveCard { id, to_index } => {
            if model.cards.move_to(id, to_index)? {
                Ok(Effect::PersistCards)
            } else {
                Ok(Effect::None)
            }
        }
        Msg::ReviewCard { id, grade } => {
            if grade > MAX_GRADE {
                return Err(UpdateError::InvalidGrade(grade));
            }
            let current = model.cards.get(id).ok_or(UpdateError::CardNotFound(id))?;
            let mut reviewed = current.clone();
            schedule_review(current, grade, model.now_ms).apply_to(&mut reviewed);
            let effect = replace_card(model, reviewed)?;
            model.ui.answer_revealed = false;
            if model.ui.mode == Mode::Study {
                model.ui.selected = model.next_due();
            }
            Ok(effect)
        }
        Msg::ResetProgress { id } => {
            let current = model.cards.get(id).ok_or(UpdateError::CardNotFound(id))?;
            let mut reset = current.clone();
            reset.reset_schedule(model.now_ms);
            replace_card(model, reset)
        }
        Msg::Select { id } => {
            if let Some(id) = id {
                if !model.cards.contains(id) {
                    return Err(UpdateError::CardNotFound(id));
                }
            }
            model.ui.selected = id;
            model.ui.answer_revealed = false;
            Ok(Effect::None)
        }
        Msg::RevealAnswer => {
            model.ui.answer_revealed = true;
            Ok(Effect::None)
        }
        Msg::HideAnswer => {
            model.ui.answer_revealed = false;
            Ok(Effect::None)
        }
        Msg::SetMode { mode } => {
            model.ui.mode = mode;
            model.ui.answer_revealed = false;
            if mode == Mode::Study {
                model.ui.selected = model.next_due();
            }
            Ok(Effect::None)
        }
        Msg::SetTagFilter { tag } => {
            model.ui.tag_filter = tag.as_deref().and_then(normalize_tag);
            Ok(Effect::None)
        }
    }
}

fn new_card(front: &str, back: &str, tags: &[String], now_ms: i64) -> Result<Card, UpdateError> {
    Ok(Card::new(front.trim(), back.trim(), tags, now_ms)?)
}

/// Swaps in `card` for the card with the same id.
fn replace_card(model: &mut Model, card: Card) -> UpdateResult {
    let slot = model
        .cards
        .get_mut(card.id)
        .ok_or(UpdateError::CardNotFound(card.id))?;
    if *slot == card {
        return Ok(Effect::None);
    }
    *slot = card;
    Ok(Effect::PersistCards)
}

#[cfg(test)]
mod tests {
    use super::{update, Effect, UpdateError};
    use crate::app::model::{Mode, Model};
    use crate::app::msg::Msg;
    use crate::model::card::{CardStatus, CardValidationError};
    use crate::model::card_set::CardSet;

    fn add(model: &mut Model, front: &str) -> uuid::Uuid {
        update(
            model,
            Msg::AddCard {
                front: front.to_string(),
                back: format!("{front} back"),
                tags: vec![],
            },
        )
        .unwrap();
        model.cards.iter().last().unwrap().id
    }

    #[test]
    fn add_card_persists_and_selects() {
        let mut model = Model::new(CardSet::new(), 1_000);
        let effect = update(
            &mut model,
            Msg::AddCard {
                front: "  capital of France ".to_string(),
                back: "Paris".to_string(),
                tags: vec!["Geo".to_string()],
            },
        )
        .unwrap();

        assert_eq!(effect, Effect::PersistCards);
        let card = model.cards.iter().next().unwrap();
        assert_eq!(card.front, "capital of France");
        assert_eq!(card.tags, vec!["geo"]);
        assert_eq!(card.created_at, 1_000);
        assert_eq!(model.ui.selected, Some(card.id));
    }

    #[test]
    fn rejected_transition_leaves_model_untouched() {
        let mut model = Model::new(CardSet::new(), 0);
        add(&mut model, "a");
        let before = model.clone();

        let err = update(
            &mut model,
            Msg::AddCard {
                front: " ".to_string(),
                back: "x".to_string(),
                tags: vec![],
            },
        )
        .unwrap_err();
        assert_eq!(err, UpdateError::InvalidCard(CardValidationError::BlankFront));
        assert_eq!(model, before);

        let id = model.cards.iter().next().unwrap().id;
        let grade = update(&mut model, Msg::ReviewCard { id, grade: 6 }).unwrap_err();
        assert_eq!(grade, UpdateError::InvalidGrade(6));
        assert_eq!(model, before);
    }

    #[test]
    fn edit_with_identical_content_does_not_persist() {
        let mut model = Model::new(CardSet::new(), 0);
        let id = add(&mut model, "a");

        let unchanged = update(
            &mut model,
            Msg::EditCard {
                id,
                front: "a".to_string(),
                back: "a back".to_string(),
                tags: vec![],
            },
        )
        .unwrap();
        assert_eq!(unchanged, Effect::None);

        let changed = update(
            &mut model,
            Msg::EditCard {
                id,
                front: "a".to_string(),
                back: "new back".to_string(),
                tags: vec![],
            },
        )
        .unwrap();
        assert_eq!(changed, Effect::PersistCards);
        assert_eq!(model.cards.get(id).unwrap().back, "new back");
    }

    #[test]
    fn draft_flow_creates_card_and_clears_draft() {
        let mut model = Model::new(CardSet::new(), 0);
        let draft = update(
            &mut model,
            Msg::SetDraft {
                front: "q".to_string(),
                back: "a".to_string(),
                tags: vec![],
            },
        )
        .unwrap();
        assert_eq!(draft, Effect::None);
        assert!(model.cards.is_empty());

        let submitted = update(&mut model, Msg::SubmitDraft).unwrap();
        assert_eq!(submitted, Effect::PersistCards);
        assert_eq!(model.cards.len(), 1);
        assert!(model.ui.draft.is_empty());
    }

    #[test]
    fn study_mode_walks_due_cards_in_order() {
        let mut model = Model::new(CardSet::new(), 0);
        let first = add(&mut model, "a");
        let second = add(&mut model, "b");

        update(&mut model, Msg::SetMode { mode: Mode::Study }).unwrap();
        assert_eq!(model.ui.selected, Some(first));

        update(&mut model, Msg::RevealAnswer).unwrap();
        let effect = update(&mut model, Msg::ReviewCard { id: first, grade: 4 }).unwrap();
        assert_eq!(effect, Effect::PersistCards);
        assert!(!model.ui.answer_revealed);
        assert_eq!(model.ui.selected, Some(second));
        assert_eq!(model.cards.get(first).unwrap().status, CardStatus::Learning);
        assert_eq!(model.due_count(), 1);
    }

    #[test]
    fn move_to_same_index_does_not_persist() {
        let mut model = Model::new(CardSet::new(), 0);
        let a = add(&mut model, "a");
        add(&mut model, "b");

        assert_eq!(
            update(&mut model, Msg::MoveCard { id: a, to_index: 0 }).unwrap(),
            Effect::None
        );
        assert_eq!(
            update(&mut model, Msg::MoveCard { id: a, to_index: 1 }).unwrap(),
            Effect::PersistCards
        );
        assert_eq!(model.cards.position(a), Some(1));
    }

    #[test]
    fn remove_clears_selection_of_removed_card() {
        let mut model = Model::new(CardSet::new(), 0);
        let id = add(&mut model, "a");
        assert_eq!(model.ui.selected, Some(id));

        let effect = update(&mut model, Msg::RemoveCard { id }).unwrap();
        assert_eq!(effect, Effect::PersistCards);
        assert_eq!(model.ui.selected, None);

        let err = update(&mut model, Msg::RemoveCard { id }).unwrap_err();
        assert_eq!(err, UpdateError::CardNotFound(id));
    }

    #[test]
    fn tag_filter_is_normalized() {
        let mut model = Model::new(CardSet::new(), 0);
        update(
            &mut model,
            Msg::SetTagFilter {
                tag: Some("  Rust ".to_string()),
            },
        )
        .unwrap();
        assert_eq!(model.ui.tag_filter.as_deref(), Some("rust"));

        update(
            &mut model,
            Msg::SetTagFilter {
                tag: Some(" ".to_string()),
            },
        )
        .unwrap();
        assert_eq!(model.ui.tag_filter, None);
    }
}
