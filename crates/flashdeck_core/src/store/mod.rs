//! Key-value string stores backing card persistence.
//!
//! # Responsibility
//! - Define the origin-scoped string store contract the host relies on.
//! - Provide in-memory and SQLite file implementations.
//!
//! # Invariants
//! - A missing key is `Ok(None)`, never an error.
//! - `set_item` overwrites any previous value for the key.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store access failures.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite open, query or migration failure.
    Sqlite(rusqlite::Error),
    /// Store file was written by a newer schema than this build knows.
    SchemaTooNew { found: u32, supported: u32 },
    /// Store cannot be used right now (e.g. poisoned lock, disabled storage).
    Unavailable(String),
    /// Write refused because the value does not fit the store quota.
    QuotaExceeded { needed: usize, quota: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite store error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "store schema version {found} is newer than supported {supported}"
            ),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
            Self::QuotaExceeded { needed, quota } => {
                write!(f, "store quota exceeded: needed {needed} bytes, quota {quota}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::Unavailable(_) | Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String key-value store, in the shape of browser local storage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes one key. Returns whether it existed.
    fn remove_item(&self, key: &str) -> StoreResult<bool>;
}
