//! Core logic for Flashdeck.
//!
//! The app core is pure: it decodes startup flags into a model, applies
//! events, and sends card snapshots out through a port. The `host` module
//! wires that port and the startup read to a key-value store.

pub mod app;
pub mod db;
pub mod host;
pub mod logging;
pub mod model;
pub mod scheduler;
pub mod snapshot;
pub mod store;

pub use app::init::{decode_init, InitOutcome, InitPayload};
pub use app::model::{CardDraft, Mode, Model, UiState};
pub use app::msg::Msg;
pub use app::port::StoreCardsPort;
pub use app::update::{update, Effect, UpdateError};
pub use app::App;
pub use host::{bootstrap, Clock, FixedClock, Session, SystemClock, STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::card::{Card, CardId, CardStatus, CardValidationError};
pub use model::card_set::{CardSet, CardSetError};
pub use snapshot::{decode_cards, encode_cards, SerializedSnapshot, SnapshotError};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
