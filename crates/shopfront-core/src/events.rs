//! # Action Notifier
//!
//! Typed events emitted by the cart store after a successful mutation.
//!
//! ## Delivery Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Notification Flow                                    │
//! │                                                                         │
//! │  remove_item(0) ──► Ok ──► CartEvent::ItemRemoved ──► every subscriber  │
//! │                                                        (exactly once)   │
//! │                                                                         │
//! │  remove_item(9) ──► Err(IndexOutOfRange) ──► nothing sent               │
//! │                                                                         │
//! │  set_quantity(..) ──► no event (quantity edits are silent)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Events are fire-and-forget. Sending with no subscriber is not an error,
//! and nothing in the core waits on a subscriber. The view decides how an
//! event is rendered (toast, banner, log line).

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;
use ts_rs::TS;

use crate::line_item::LineKey;
use crate::DEFAULT_EVENT_CAPACITY;

// =============================================================================
// Cart Event
// =============================================================================

/// An observable outcome of a successful cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum CartEvent {
    /// A line was removed. `index` is the position it held before removal.
    ItemRemoved {
        index: usize,
        key: LineKey,
    },
}

impl CartEvent {
    /// Short user-facing confirmation text for this event.
    pub fn message(&self) -> &'static str {
        match self {
            CartEvent::ItemRemoved { .. } => "Removed from Cart",
        }
    }
}

// =============================================================================
// Notifier
// =============================================================================

/// Broadcasts [`CartEvent`]s to any number of subscribers.
///
/// Slow subscribers that fall more than `capacity` events behind receive a
/// `Lagged` error on their next receive and skip ahead.
#[derive(Debug, Clone)]
pub struct CartNotifier {
    tx: broadcast::Sender<CartEvent>,
}

impl CartNotifier {
    /// Creates a notifier buffering up to `capacity` events per subscriber.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        CartNotifier { tx }
    }

    /// Returns a receiver for all events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.tx.subscribe()
    }

    /// Emits one event to every current subscriber.
    pub fn emit(&self, event: CartEvent) {
        // An Err only means nobody is listening right now
        let delivered = self.tx.send(event).unwrap_or(0);
        trace!(delivered, "cart event emitted");
    }
}

impl Default for CartNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
