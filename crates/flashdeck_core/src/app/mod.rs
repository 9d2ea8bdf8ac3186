//! Application core: decode flags in, evolve the model, send snapshots out.
//!
//! # Responsibility
//! - Build the starting model from an `InitPayload`.
//! - Apply events through the pure `update` function.
//! - Emit an encoded card set on the `store_cards` port after every
//!   transition that changed the card set.
//!
//! # Invariants
//! - `App` is the single owner and writer of `Model`.
//! - Initialization never fails; bad stored data means an empty start.
//! - Transitions that leave the card set unchanged emit nothing.
//! - The core never waits on, or hears back from, persistence.

pub mod init;
pub mod model;
pub mod msg;
pub mod port;
pub mod update;

use crate::snapshot::encode_cards;
use init::{decode_init, InitOutcome, InitPayload};
use log::{debug, error, info, warn};
use model::Model;
use msg::Msg;
use port::StoreCardsPort;
use update::{update, Effect, UpdateError};

/// Running application instance.
#[derive(Debug)]
pub struct App {
    model: Model,
    init_outcome: InitOutcome,
    store_cards: StoreCardsPort,
}

impl App {
    /// Consumes the startup payload and builds the running instance.
    pub fn init(payload: InitPayload) -> Self {
        let (cards, outcome) = decode_init(&payload);
        match &outcome {
            InitOutcome::Absent => {
                info!("event=cards_decode module=app status=absent");
            }
            InitOutcome::Restored { count } => {
                info!("event=cards_decode module=app status=restored count={count}");
            }
            InitOutcome::Malformed { kind, reason } => {
                warn!(
                    "event=cards_decode module=app status=fallback kind={kind} error={reason}"
                );
            }
        }

        Self {
            model: Model::new(cards, payload.timestamp),
            init_outcome: outcome,
            store_cards: StoreCardsPort::new(),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn init_outcome(&self) -> &InitOutcome {
        &self.init_outcome
    }

    /// Outbound persistence port. Hosts subscribe here.
    pub fn store_cards(&mut self) -> &mut StoreCardsPort {
        &mut self.store_cards
    }

    /// Applies one event and emits a snapshot if the card set changed.
    ///
    /// # Errors
    /// - Returns `UpdateError` for rejected events; the model is unchanged
    ///   and nothing is emitted.
    pub fn dispatch(&mut self, msg: Msg) -> Result<Effect, UpdateError> {
        let name = msg.name();
        let effect = match update(&mut self.model, msg) {
            Ok(effect) => effect,
            Err(err) => {
                debug!("event=dispatch module=app status=rejected msg={name} error={err}");
                return Err(err);
            }
        };

        if effect == Effect::PersistCards {
            match encode_cards(&self.model.cards) {
                Ok(snapshot) => {
                    debug!(
                        "event=store_cards_emit module=app status=ok msg={name} cards={} bytes={}",
                        self.model.cards.len(),
                        snapshot.len()
                    );
                    self.store_cards.send(snapshot);
                }
                Err(err) => {
                    error!(
                        "event=store_cards_emit module=app status=error msg={name} error={err}"
                    );
                }
            }
        }

        Ok(effect)
    }
}
