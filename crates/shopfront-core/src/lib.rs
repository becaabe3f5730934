//! # shopfront-core: Pure Cart Logic for the Shopfront Storefront
//!
//! This crate is the **heart** of the storefront cart. It owns the line items,
//! the mutations the view layer may apply to them, the derived total, and the
//! notifications fired when a mutation succeeds.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Shopfront Cart Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  View Adapter (storefront UI)                   │   │
//! │  │     Cart drawer ──► quantity input ──► remove (x) ──► toast     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / snapshots                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopfront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ line_item │  │   cart    │  │  totals   │  │  events   │  │   │
//! │  │   │ LineItem  │  │ CartStore │  │ CartTotals│  │ CartEvent │  │   │
//! │  │   │ LineKey   │  │ CartView  │  │total_price│  │ Notifier  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • IN-MEMORY ONLY            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`line_item`] - Line items, product references, stable keys
//! - [`cart`] - The cart store and its mutation API
//! - [`totals`] - Aggregate calculator (total price, total quantity)
//! - [`events`] - Notifications emitted on successful mutations
//! - [`snapshot`] - Parsing the initial cart snapshot handed over by the session layer
//! - [`validation`] - Line item and quantity rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{CartStore, Money, NewLineItem, ProductRef};
//!
//! let mut cart = CartStore::new();
//! cart.add_item(NewLineItem::new(ProductRef::new("Linen Shirt", "linen-shirt", Money::from_minor_units(100), "Shirts"), 2)).unwrap();
//! cart.add_item(NewLineItem::new(ProductRef::new("Canvas Tote", "canvas-tote", Money::from_minor_units(200), "Bags"), 1)).unwrap();
//! assert_eq!(cart.total_price().minor_units(), 400);
//!
//! let mut events = cart.subscribe();
//! cart.remove_item(0).unwrap();
//! assert_eq!(cart.total_price().minor_units(), 200);
//! assert!(events.try_recv().is_ok());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod events;
pub mod line_item;
pub mod money;
pub mod snapshot;
pub mod totals;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartStore, CartView, QuantityPolicy};
pub use error::{CoreError, CoreResult, ValidationError};
pub use events::{CartEvent, CartNotifier};
pub use line_item::{CategoryRef, LineItem, LineKey, NewLineItem, ProductRef};
pub use money::Money;
pub use totals::{total_price, total_quantity, CartTotals};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts. Each size/color variant counts as its own line.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line, enforced only by the strict quantity
/// policies ([`QuantityPolicy::Reject`] and [`QuantityPolicy::Clamp`]).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Default buffer size of the notification channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;
