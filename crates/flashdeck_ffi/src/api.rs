//! FFI deck API for an embedding UI shell.
//!
//! # Responsibility
//! - Host one app session per process, backed by a SQLite key-value file.
//! - Accept events as JSON and return a flat view of the deck.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Errors come back as `ok = false` envelopes, never as panics.
//! - The session store path is fixed once the first session boots.

use flashdeck_core::{
    bootstrap, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, Card, CardStatus, Msg, Session, SqliteStore, SystemClock,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

const STORE_FILE_NAME: &str = "flashdeck_ffi.sqlite3";
const STORE_PATH_ENV: &str = "FLASHDECK_DB_PATH";

static STORE_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: Mutex<Option<Session<SqliteStore>>> = Mutex::new(None);

/// Minimal health-check API.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory for rolling logs.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Sets the store file used by the deck session.
///
/// # FFI contract
/// - Must be called before the first `deck_boot`/`deck_dispatch`.
/// - Returns empty string on success, an error message when a different path
///   is already in use.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "store path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = STORE_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "store path already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Flat card view for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckCard {
    pub id: String,
    pub front: String,
    pub back: String,
    pub tags: Vec<String>,
    /// Epoch milliseconds.
    pub due_at: i64,
    /// `new|learning|review|relearning`.
    pub status: String,
}

/// Deck response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckResponse {
    pub ok: bool,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
    /// Cards passing `tag_filter`, in deck order.
    pub cards: Vec<DeckCard>,
    /// Active tag filter set through a `set_tag_filter` event.
    pub tag_filter: Option<String>,
    pub due_count: u32,
    pub selected_id: Option<String>,
    pub answer_revealed: bool,
}

impl DeckResponse {
    fn from_session(session: &Session<SqliteStore>, message: impl Into<String>) -> Self {
        let model = session.model();
        Self {
            ok: true,
            message: message.into(),
            cards: model.visible_cards().map(to_deck_card).collect(),
            tag_filter: model.ui.tag_filter.clone(),
            due_count: u32::try_from(model.due_count()).unwrap_or(u32::MAX),
            selected_id: model.ui.selected.map(|id| id.to_string()),
            answer_revealed: model.ui.answer_revealed,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            cards: Vec::new(),
            tag_filter: None,
            due_count: 0,
            selected_id: None,
            answer_revealed: false,
        }
    }
}

/// Boots a fresh session from the store, replacing any running one.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - A corrupted stored deck boots as an empty deck with `ok = true`.
#[flutter_rust_bridge::frb(sync)]
pub fn deck_boot() -> DeckResponse {
    let mut guard = match lock_session() {
        Ok(guard) => guard,
        Err(message) => return DeckResponse::failure(message),
    };
    match boot_session() {
        Ok(session) => {
            let response =
                DeckResponse::from_session(&session, session.init_outcome().label().to_string());
            *guard = Some(session);
            response
        }
        Err(message) => DeckResponse::failure(message),
    }
}

/// Applies one JSON-encoded event, e.g. `{"type":"add_card","front":"q","back":"a"}`.
///
/// # FFI contract
/// - Sync call; boots the session on first use.
/// - Rejected events return `ok = false` and leave the deck unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn deck_dispatch(msg_json: String) -> DeckResponse {
    let msg: Msg = match serde_json::from_str(&msg_json) {
        Ok(msg) => msg,
        Err(err) => return DeckResponse::failure(format!("deck_dispatch invalid event: {err}")),
    };
    with_session(|session| {
        let name = msg.name();
        session
            .dispatch(msg)
            .map(|_| DeckResponse::from_session(session, name))
            .map_err(|err| format!("deck_dispatch {name} failed: {err}"))
    })
}

/// Returns the current deck without changing it.
#[flutter_rust_bridge::frb(sync)]
pub fn deck_cards() -> DeckResponse {
    with_session(|session| Ok(DeckResponse::from_session(session, "ok")))
}

fn with_session(
    f: impl FnOnce(&mut Session<SqliteStore>) -> Result<DeckResponse, String>,
) -> DeckResponse {
    let mut guard = match lock_session() {
        Ok(guard) => guard,
        Err(message) => return DeckResponse::failure(message),
    };
    if guard.is_none() {
        match boot_session() {
            Ok(session) => *guard = Some(session),
            Err(message) => return DeckResponse::failure(message),
        }
    }
    match guard.as_mut() {
        Some(session) => f(session).unwrap_or_else(DeckResponse::failure),
        None => DeckResponse::failure("deck session unavailable"),
    }
}

fn lock_session() -> Result<MutexGuard<'static, Option<Session<SqliteStore>>>, String> {
    SESSION.lock().map_err(|_| {
        warn!("event=ffi_session module=ffi status=error error=lock_poisoned");
        "deck session lock poisoned".to_string()
    })
}

fn boot_session() -> Result<Session<SqliteStore>, String> {
    let path = resolve_store_path();
    let store = SqliteStore::open(&path).map_err(|err| format!("deck store open failed: {err}"))?;
    Ok(bootstrap(Arc::new(store), &SystemClock))
}

fn resolve_store_path() -> PathBuf {
    STORE_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(STORE_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_FILE_NAME)
        })
        .clone()
}

fn to_deck_card(card: &Card) -> DeckCard {
    DeckCard {
        id: card.id.to_string(),
        front: card.front.clone(),
        back: card.back.clone(),
        tags: card.tags.clone(),
        due_at: card.due_at,
        status: status_label(card).to_string(),
    }
}

fn status_label(card: &Card) -> &'static str {
    match card.status {
        CardStatus::New => "new",
        CardStatus::Learning => "learning",
        CardStatus::Review => "review",
        CardStatus::Relearning => "relearning",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        configure_store_path, core_version, deck_cards, deck_dispatch, init_logging, ping,
    };
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tempfile::TempDir;

    static TEST_STORE_DIR: OnceLock<TempDir> = OnceLock::new();

    /// Points the process session at a store file private to this test run.
    fn use_test_store() {
        let dir = TEST_STORE_DIR.get_or_init(|| tempfile::tempdir().unwrap());
        let path = dir.path().join("deck.sqlite3");
        let error = configure_store_path(path.to_str().unwrap().to_string());
        assert!(error.is_empty(), "{error}");
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn deck_dispatch_adds_card_and_lists_it() {
        use_test_store();
        let token = unique_token("ffi-add");
        let msg = serde_json::json!({
            "type": "add_card",
            "front": token,
            "back": "answer",
            "tags": ["FFI"],
        });

        let response = deck_dispatch(msg.to_string());
        assert!(response.ok, "{}", response.message);
        let card = response
            .cards
            .iter()
            .find(|card| card.front == token)
            .expect("added card should be listed");
        assert_eq!(card.tags, vec!["ffi"]);
        assert_eq!(card.status, "new");

        let listed = deck_cards();
        assert!(listed.cards.iter().any(|card| card.front == token));
        assert_eq!(listed.tag_filter, None);

        let other_tag = format!("{token}-other");
        let filtered = deck_dispatch(
            serde_json::json!({"type": "set_tag_filter", "tag": other_tag}).to_string(),
        );
        assert!(filtered.ok, "{}", filtered.message);
        assert_eq!(filtered.tag_filter.as_deref(), Some(other_tag.as_str()));
        assert!(filtered.cards.is_empty());

        let cleared =
            deck_dispatch(serde_json::json!({"type": "set_tag_filter", "tag": null}).to_string());
        assert_eq!(cleared.tag_filter, None);
        assert!(cleared.cards.iter().any(|card| card.front == token));
    }

    #[test]
    fn deck_dispatch_rejects_malformed_event_json() {
        let response = deck_dispatch("{\"type\":\"launch_rocket\"}".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid event"));
    }

    #[test]
    fn deck_dispatch_reports_rejected_events() {
        use_test_store();
        let msg = serde_json::json!({
            "type": "remove_card",
            "id": "11111111-2222-4333-8444-555555555555",
        });
        let response = deck_dispatch(msg.to_string());
        assert!(!response.ok);
        assert!(response.message.contains("card not found"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
