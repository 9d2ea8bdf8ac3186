//! Flashcard domain model.
//!
//! # Responsibility
//! - Define the card record and the ordered card set persisted by the app.
//!
//! # Invariants
//! - Every card is identified by a stable `CardId`.
//! - Card order inside a `CardSet` is display/study order.

pub mod card;
pub mod card_set;
