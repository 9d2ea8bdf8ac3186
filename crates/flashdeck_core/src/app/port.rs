//! Outbound persistence port.
//!
//! # Invariants
//! - At most one subscriber at a time.
//! - Every sent snapshot is delivered exactly once, in send order.
//! - Snapshots sent while nobody is subscribed are queued and flushed on the
//!   next `subscribe`.

use crate::snapshot::SerializedSnapshot;
use std::collections::VecDeque;
use std::fmt::{Debug, Formatter};

/// Handler invoked for each outbound snapshot.
pub type Subscriber = Box<dyn FnMut(&SerializedSnapshot) + Send>;

/// One-way channel carrying card snapshots from the core to the host.
#[derive(Default)]
pub struct StoreCardsPort {
    subscriber: Option<Subscriber>,
    pending: VecDeque<SerializedSnapshot>,
    delivered: u64,
}

impl StoreCardsPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler, replacing any previous one, and flushes the
    /// queued snapshots into it.
    pub fn subscribe(&mut self, handler: impl FnMut(&SerializedSnapshot) + Send + 'static) {
        let mut handler: Subscriber = Box::new(handler);
        while let Some(snapshot) = self.pending.pop_front() {
            handler(&snapshot);
            self.delivered += 1;
        }
        self.subscriber = Some(handler);
    }

    /// Detaches the handler. Returns whether one was attached.
    pub fn unsubscribe(&mut self) -> bool {
        self.subscriber.take().is_some()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscriber.is_some()
    }

    /// Snapshots waiting for a subscriber.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Snapshots handed to a subscriber so far.
    pub fn delivered_count(&self) -> u64 {
        self.delivered
    }

    pub(crate) fn send(&mut self, snapshot: SerializedSnapshot) {
        match self.subscriber.as_mut() {
            Some(handler) => {
                handler(&snapshot);
                self.delivered += 1;
            }
            None => self.pending.push_back(snapshot),
        }
    }
}

impl Debug for StoreCardsPort {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCardsPort")
            .field("subscribed", &self.subscriber.is_some())
            .field("pending", &self.pending.len())
            .field("delivered", &self.delivered)
            .finish()
    }
}
