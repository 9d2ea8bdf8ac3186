//! Bootstrap adapter between the application core and a key-value store.
//!
//! # Responsibility
//! - Read the stored card snapshot and current time, build the init payload
//!   and start the app.
//! - Subscribe to the `store_cards` port and write every snapshot to the
//!   same key.
//!
//! # Invariants
//! - Exactly one store read happens per bootstrap.
//! - Exactly one store write happens per delivered snapshot; no retries.
//! - A read failure starts the app as if nothing was stored.
//! - A write failure is logged and counted, never propagated.

use crate::app::init::{InitOutcome, InitPayload};
use crate::app::model::Model;
use crate::app::msg::Msg;
use crate::app::update::{Effect, UpdateError};
use crate::app::App;
use crate::host::clock::Clock;
use crate::snapshot::SerializedSnapshot;
use crate::store::KeyValueStore;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Storage key holding the card snapshot.
pub const STORAGE_KEY: &str = "cards";

/// Running app wired to its store.
pub struct Session<S> {
    app: App,
    store: Arc<S>,
    write_failures: Arc<AtomicU64>,
}

impl<S> Session<S> {
    /// Forwards one event to the app.
    pub fn dispatch(&mut self, msg: Msg) -> Result<Effect, UpdateError> {
        self.app.dispatch(msg)
    }

    pub fn model(&self) -> &Model {
        self.app.model()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn init_outcome(&self) -> &InitOutcome {
        self.app.init_outcome()
    }

    /// Store handle shared with the persistence handler.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Writes that failed and were dropped since startup.
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }
}

/// Starts the app from `store` and `clock` and wires persistence.
pub fn bootstrap<S, C>(store: Arc<S>, clock: &C) -> Session<S>
where
    S: KeyValueStore + Send + Sync + 'static,
    C: Clock + ?Sized,
{
    let cards = load_cards(store.as_ref());
    let payload = InitPayload::new(clock.now_ms(), cards);
    let mut app = App::init(payload);

    let write_failures = Arc::new(AtomicU64::new(0));
    let handler_store = Arc::clone(&store);
    let handler_failures = Arc::clone(&write_failures);
    app.store_cards()
        .subscribe(move |snapshot: &SerializedSnapshot| {
            persist_snapshot(handler_store.as_ref(), snapshot, &handler_failures);
        });

    info!(
        "event=app_start module=host status=ok init={} cards={} now_ms={}",
        app.init_outcome().label(),
        app.model().cards.len(),
        app.model().now_ms
    );

    Session {
        app,
        store,
        write_failures,
    }
}

fn load_cards<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    match store.get_item(STORAGE_KEY) {
        Ok(Some(value)) => {
            info!(
                "event=cards_load module=host status=ok key={STORAGE_KEY} bytes={}",
                value.len()
            );
            Some(value)
        }
        Ok(None) => {
            info!("event=cards_load module=host status=absent key={STORAGE_KEY}");
            None
        }
        Err(err) => {
            warn!("event=cards_load module=host status=error key={STORAGE_KEY} error={err}");
            None
        }
    }
}

fn persist_snapshot<S: KeyValueStore + ?Sized>(
    store: &S,
    snapshot: &SerializedSnapshot,
    failures: &AtomicU64,
) {
    match store.set_item(STORAGE_KEY, snapshot.as_str()) {
        Ok(()) => {
            debug!(
                "event=cards_store module=host status=ok key={STORAGE_KEY} bytes={}",
                snapshot.len()
            );
        }
        Err(err) => {
            let total = failures.fetch_add(1, Ordering::Relaxed) + 1;
            warn!(
                "event=cards_store module=host status=error key={STORAGE_KEY} failures={total} error={err}"
            );
        }
    }
}
