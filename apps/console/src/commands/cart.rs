//! # Cart Commands
//!
//! The command surface the view drives the cart through.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │                         │
//! │  │  Cart    │     │          │     │ / Logout │                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │       ▲                │                 │                              │
//! │       │           add_to_cart            │                              │
//! │       │           update_cart_item       │                              │
//! │       │           remove_from_cart       │                              │
//! │       │                                  ▼                              │
//! │       └──────────────────────────── clear_cart                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the full cart after the operation, so the view can
//! re-render from one consistent response.

use serde::Serialize;
use shopfront_core::{CartStore, CartTotals, CartView, LineItem, LineKey, NewLineItem};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CartState;

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
    /// True when the view should show its empty-cart state.
    pub is_empty: bool,
}

impl From<&CartStore> for CartResponse {
    fn from(cart: &CartStore) -> Self {
        match cart.view() {
            CartView::Empty => CartResponse {
                items: Vec::new(),
                totals: cart.totals(),
                is_empty: true,
            },
            CartView::Items { items, totals } => CartResponse {
                items,
                totals,
                is_empty: false,
            },
        }
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart drawer                                                            │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  Your Shopping Carts                                          │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Product 1 · Category 1 · M / Red      Quantity: [2]   (x)    │    │
/// │  │  Product 2 · Category 2 · L / Blue     Quantity: [1]   (x)    │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Checkout                                        400đ         │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds a line to the cart (the storefront's add-to-cart action).
pub fn add_to_cart(cart: &CartState, draft: NewLineItem) -> Result<CartResponse, ApiError> {
    debug!(slug = %draft.product.slug, quantity = draft.quantity, "add_to_cart command");

    cart.with_cart_mut(|c| {
        c.add_item(draft)?;
        Ok::<CartResponse, ApiError>(CartResponse::from(&*c))
    })
}

/// Sets the quantity of the line at `index`.
///
/// ## Behavior
/// - The value goes through the session's quantity policy
/// - No notification is emitted
pub fn update_cart_item(
    cart: &CartState,
    index: usize,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(index, quantity, "update_cart_item command");

    cart.with_cart_mut(|c| {
        c.set_quantity(index, quantity)?;
        Ok::<CartResponse, ApiError>(CartResponse::from(&*c))
    })
}

/// Key-addressed form of [`update_cart_item`].
pub fn update_cart_item_by_key(
    cart: &CartState,
    key: LineKey,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(%key, quantity, "update_cart_item_by_key command");

    cart.with_cart_mut(|c| {
        c.set_quantity_by_key(key, quantity)?;
        Ok::<CartResponse, ApiError>(CartResponse::from(&*c))
    })
}

/// Removes the line at `index`. Subscribers get one `ItemRemoved` event.
pub fn remove_from_cart(cart: &CartState, index: usize) -> Result<CartResponse, ApiError> {
    debug!(index, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove_item(index)?;
        Ok::<CartResponse, ApiError>(CartResponse::from(&*c))
    })
}

/// Key-addressed form of [`remove_from_cart`].
pub fn remove_from_cart_by_key(cart: &CartState, key: LineKey) -> Result<CartResponse, ApiError> {
    debug!(%key, "remove_from_cart_by_key command");

    cart.with_cart_mut(|c| {
        c.remove_by_key(key)?;
        Ok::<CartResponse, ApiError>(CartResponse::from(&*c))
    })
}

/// Clears all items from the cart.
///
/// ## When Used
/// - After checkout
/// - On logout
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.end_session();
    get_cart(cart)
}
