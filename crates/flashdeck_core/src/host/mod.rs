//! Host side of the app: storage and clock wiring.
//!
//! # Responsibility
//! - Read stored cards and the clock once at startup.
//! - Relay outbound snapshots to the store.
//!
//! # Invariants
//! - No parsing or validation of stored text happens here.
//! - Store failures never reach the application core.

pub mod bootstrap;
pub mod clock;

pub use bootstrap::{bootstrap, Session, STORAGE_KEY};
pub use clock::{Clock, FixedClock, SystemClock};
