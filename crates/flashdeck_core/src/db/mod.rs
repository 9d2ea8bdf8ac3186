//! SQLite bootstrap for the file-backed key-value store.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No key-value access happens before migrations succeed.
//! - Failures surface as `StoreError`; the store is the only caller.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
