//! # Cart State
//!
//! The session's cart, shared between the command surface and the listeners.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Session Lifecycle                             │
//! │                                                                         │
//! │  session start ───► CartState::start(config, snapshot)                  │
//! │        │                  │                                             │
//! │        │                  ▼                                             │
//! │        │            commands (get / add / update / remove)              │
//! │        │                  │                                             │
//! │        ▼                  ▼                                             │
//! │  checkout/logout ──► end_session() ──► cart cleared, subscribers kept   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>`. Every command runs its mutation
//! and builds its response under one lock, so a reader never sees a cart in
//! the middle of a removal.

use std::sync::{Arc, Mutex, PoisonError};

use shopfront_core::{CartEvent, CartNotifier, CartStore, CoreResult, NewLineItem};
use tokio::sync::broadcast;
use tracing::info;

use crate::config::CartSettings;

/// Session-owned cart state.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<CartStore>>,
}

impl CartState {
    /// Starts a session from settings and the snapshot handed over by the
    /// session store.
    pub fn start<I>(settings: &CartSettings, snapshot: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = NewLineItem>,
    {
        let store = CartStore::new()
            .with_policy(settings.quantity_policy)
            .with_max_lines(settings.max_lines)
            .with_notifier(CartNotifier::new(settings.event_capacity))
            .load_snapshot(snapshot)?;

        info!(
            lines = store.len(),
            policy = %store.policy(),
            "cart session started"
        );

        Ok(CartState::from_store(store))
    }

    /// Wraps an already-built store.
    pub fn from_store(store: CartStore) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        // Store mutations validate before touching `items`, so a poisoned
        // lock still guards a consistent cart.
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// Subscribes to cart notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.with_cart(|c| c.subscribe())
    }

    /// Ends the session: checkout or logout empties the cart.
    pub fn end_session(&self) {
        self.with_cart_mut(|c| {
            info!(lines = c.len(), "cart session ended");
            c.clear();
        });
    }
}

impl Default for CartState {
    fn default() -> Self {
        CartState::from_store(CartStore::new())
    }
}
