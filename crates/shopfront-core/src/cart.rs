//! # Cart Store
//!
//! Sole owner and mutator of the cart's line items.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  View Action              Store Operation         State Change          │
//! │  ───────────              ───────────────         ────────────          │
//! │                                                                         │
//! │  Add to cart ────────────► add_item() ──────────► items.push(line)      │
//! │                                                                         │
//! │  Change quantity ────────► set_quantity(i, q) ──► items[i] = replaced   │
//! │                                                                         │
//! │  Click remove (x) ───────► remove_item(i) ──────► items.remove(i)       │
//! │                                                   + ItemRemoved event   │
//! │                                                                         │
//! │  Checkout / logout ──────► clear() ─────────────► items.clear()         │
//! │                                                                         │
//! │  Render drawer ──────────► view() / items() ────► (read only)           │
//! │                                                                         │
//! │  NOTE: Every operation validates first and mutates last. A rejected     │
//! │        operation leaves the cart untouched and emits nothing.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Addressing
//! Lines are addressed by position (display order) or by their stable
//! [`LineKey`]. Positions are always contiguous `0..len`; a removal shifts
//! every later line down by one. Keys never shift.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::events::{CartEvent, CartNotifier};
use crate::line_item::{LineItem, LineKey, NewLineItem};
use crate::money::Money;
use crate::totals::{self, CartTotals};
use crate::validation::validate_line_draft;
use crate::{DEFAULT_EVENT_CAPACITY, MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Quantity Policy
// =============================================================================

/// How [`CartStore::set_quantity`] treats the requested value.
///
/// ## Policy Comparison
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  requested │  Accept (default)  │  Reject               │  Clamp        │
/// │  ──────────┼────────────────────┼───────────────────────┼────────────── │
/// │  3         │  3                 │  3                    │  3            │
/// │  0         │  0                 │  Err(InvalidQuantity) │  1            │
/// │  -2        │  -2                │  Err(InvalidQuantity) │  1            │
/// │  5000      │  5000              │  Err(QuantityTooLarge)│  999          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// `Accept` stores exactly what the view requested; a minimum of one is left
/// to the view's input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuantityPolicy {
    /// Store the value as given.
    #[default]
    Accept,

    /// Reject values outside `1..=MAX_LINE_QUANTITY`.
    Reject,

    /// Clamp values into `1..=MAX_LINE_QUANTITY`.
    Clamp,
}

impl QuantityPolicy {
    /// Resolves the quantity to store, or the reason it is refused.
    pub fn resolve(&self, requested: i64) -> CoreResult<i64> {
        match self {
            QuantityPolicy::Accept => Ok(requested),
            QuantityPolicy::Reject => {
                if requested < 1 {
                    Err(CoreError::InvalidQuantity { requested })
                } else if requested > MAX_LINE_QUANTITY {
                    Err(CoreError::QuantityTooLarge {
                        requested,
                        max: MAX_LINE_QUANTITY,
                    })
                } else {
                    Ok(requested)
                }
            }
            QuantityPolicy::Clamp => Ok(requested.clamp(1, MAX_LINE_QUANTITY)),
        }
    }
}

impl fmt::Display for QuantityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityPolicy::Accept => write!(f, "accept"),
            QuantityPolicy::Reject => write!(f, "reject"),
            QuantityPolicy::Clamp => write!(f, "clamp"),
        }
    }
}

impl FromStr for QuantityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accept" | "lenient" => Ok(QuantityPolicy::Accept),
            "reject" | "strict" => Ok(QuantityPolicy::Reject),
            "clamp" => Ok(QuantityPolicy::Clamp),
            other => Err(format!(
                "Unknown quantity policy: '{}'. Valid options: accept, reject, clamp",
                other
            )),
        }
    }
}

// =============================================================================
// Cart View
// =============================================================================

/// What the view renders: a dedicated empty state, or the lines with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum CartView {
    /// Nothing in the cart. The total is zero.
    Empty,

    /// At least one line.
    Items {
        items: Vec<LineItem>,
        totals: CartTotals,
    },
}

// =============================================================================
// Cart Store
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Every line entered the cart with quantity >= 1
/// - Positions are contiguous; keys are unique
/// - Totals are derived from `items` on every call, never stored
/// - Every line total and both sums fit in `i64`
/// - At most `max_lines` lines
#[derive(Debug)]
pub struct CartStore {
    items: Vec<LineItem>,
    policy: QuantityPolicy,
    max_lines: usize,
    notifier: CartNotifier,
}

impl CartStore {
    /// Creates a new empty cart with the default policy and limits.
    pub fn new() -> Self {
        CartStore {
            items: Vec::new(),
            policy: QuantityPolicy::default(),
            max_lines: MAX_CART_LINES,
            notifier: CartNotifier::new(DEFAULT_EVENT_CAPACITY),
        }
    }

    /// Sets the quantity policy used by quantity edits.
    pub fn with_policy(mut self, policy: QuantityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the maximum number of lines.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Replaces the notifier, e.g. to share one across sessions or to size
    /// its buffer.
    pub fn with_notifier(mut self, notifier: CartNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Loads the initial snapshot handed over by the session layer.
    ///
    /// Lines keep their snapshot order. The whole snapshot is rejected if any
    /// line is invalid, it holds more than `max_lines` lines, or its totals
    /// leave the amount range.
    pub fn load_snapshot<I>(mut self, drafts: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = NewLineItem>,
    {
        let mut items = Vec::new();
        for draft in drafts {
            validate_line_draft(&draft)?;
            if items.len() >= self.max_lines {
                return Err(CoreError::CartTooLarge {
                    max: self.max_lines,
                });
            }
            items.push(LineItem::from_draft(draft));
        }
        ensure_totals_fit(&items)?;

        debug!(lines = items.len(), "cart snapshot loaded");
        self.items = items;
        Ok(self)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current lines in display order. Empty means "cart is empty".
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Owned copy of the current lines.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Current position of the line with `key`.
    pub fn position_of(&self, key: LineKey) -> Option<usize> {
        self.items.iter().position(|i| i.key == key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn policy(&self) -> QuantityPolicy {
        self.policy
    }

    /// Total price over the live lines.
    pub fn total_price(&self) -> Money {
        totals::total_price(&self.items)
    }

    /// Totals summary over the live lines.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self.items.as_slice())
    }

    /// Render-ready view: [`CartView::Empty`] or the lines with totals.
    pub fn view(&self) -> CartView {
        if self.items.is_empty() {
            CartView::Empty
        } else {
            CartView::Items {
                items: self.snapshot(),
                totals: self.totals(),
            }
        }
    }

    /// Subscribes to notifications for successful removals.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.notifier.subscribe()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Appends a new line and returns its key.
    ///
    /// ## Behavior
    /// - Same product with a different size/color becomes its own line
    /// - No notification is emitted
    pub fn add_item(&mut self, draft: NewLineItem) -> CoreResult<LineKey> {
        validate_line_draft(&draft)?;
        if self.items.len() >= self.max_lines {
            return Err(CoreError::CartTooLarge {
                max: self.max_lines,
            });
        }

        let item = LineItem::from_draft(draft);
        ensure_totals_fit(self.items.iter().chain(std::iter::once(&item)))?;
        let key = item.key;
        debug!(%key, slug = %item.product.slug, quantity = item.quantity, "line added");
        self.items.push(item);
        Ok(key)
    }

    /// Sets the quantity of the line at `index` and returns the updated lines.
    ///
    /// ## Behavior
    /// - The value is resolved through the store's [`QuantityPolicy`]
    /// - The line is replaced in place; every other line is untouched
    /// - No notification is emitted
    ///
    /// ## Errors
    /// - `IndexOutOfRange` if `index >= len`
    /// - `InvalidQuantity` / `QuantityTooLarge` under [`QuantityPolicy::Reject`]
    /// - `TotalOverflow` if the new line total or cart total leaves the
    ///   amount range (reachable under [`QuantityPolicy::Accept`])
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> CoreResult<&[LineItem]> {
        let len = self.items.len();
        let Some(current) = self.items.get(index) else {
            warn!(index, len, "set_quantity rejected: index out of range");
            return Err(CoreError::IndexOutOfRange { index, len });
        };

        let resolved = self.policy.resolve(quantity).inspect_err(|e| {
            warn!(index, quantity, error = %e, "set_quantity rejected by policy");
        })?;

        let replacement = current.with_quantity(resolved);
        ensure_totals_fit(
            self.items
                .iter()
                .enumerate()
                .map(|(i, item)| if i == index { &replacement } else { item }),
        )
        .inspect_err(|_| {
            warn!(index, quantity = resolved, "set_quantity rejected: total out of range");
        })?;

        debug!(index, key = %replacement.key, requested = quantity, quantity = resolved, "quantity set");
        self.items[index] = replacement;
        Ok(&self.items)
    }

    /// Key-addressed form of [`set_quantity`](Self::set_quantity).
    pub fn set_quantity_by_key(&mut self, key: LineKey, quantity: i64) -> CoreResult<&[LineItem]> {
        let index = self.position_of(key).ok_or(CoreError::LineNotFound(key))?;
        self.set_quantity(index, quantity)
    }

    /// Removes the line at `index` and returns the updated lines.
    ///
    /// ## Behavior
    /// - Every later line shifts down one position
    /// - Exactly one [`CartEvent::ItemRemoved`] is emitted on success
    ///
    /// ## Errors
    /// - `IndexOutOfRange` if `index >= len`; nothing is emitted
    /// - `TotalOverflow` if the remaining lines no longer sum into range,
    ///   e.g. removing a negative line that offset a huge one
    pub fn remove_item(&mut self, index: usize) -> CoreResult<&[LineItem]> {
        let len = self.items.len();
        if index >= len {
            warn!(index, len, "remove_item rejected: index out of range");
            return Err(CoreError::IndexOutOfRange { index, len });
        }
        ensure_totals_fit(
            self.items
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, item)| item),
        )
        .inspect_err(|_| {
            warn!(index, "remove_item rejected: total out of range");
        })?;

        let removed = self.items.remove(index);
        debug!(index, key = %removed.key, remaining = self.items.len(), "line removed");
        self.notifier.emit(CartEvent::ItemRemoved {
            index,
            key: removed.key,
        });
        Ok(&self.items)
    }

    /// Key-addressed form of [`remove_item`](Self::remove_item).
    pub fn remove_by_key(&mut self, key: LineKey) -> CoreResult<&[LineItem]> {
        let index = self.position_of(key).ok_or(CoreError::LineNotFound(key))?;
        self.remove_item(index)
    }

    /// Empties the cart at the end of a session (checkout, logout).
    ///
    /// No notification is emitted. Subscribers stay subscribed.
    pub fn clear(&mut self) {
        debug!(lines = self.items.len(), "cart cleared");
        self.items.clear();
    }
}

/// Rejects a candidate cart whose totals would not be exact.
fn ensure_totals_fit<'a, I>(candidate: I) -> CoreResult<()>
where
    I: IntoIterator<Item = &'a LineItem>,
{
    totals::checked_totals(candidate)
        .map(|_| ())
        .ok_or(CoreError::TotalOverflow)
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_item::ProductRef;
    use tokio::sync::broadcast::error::TryRecvError;

    fn draft(n: u32, price: i64, qty: i64) -> NewLineItem {
        NewLineItem::new(
            ProductRef::new(
                format!("Product {}", n),
                format!("product-{}", n),
                Money::from_minor_units(price),
                format!("Category {}", n),
            ),
            qty,
        )
        .with_image(format!("image{}.jpg", n))
    }

    /// The two-line cart used by the storefront's drawer tests.
    fn two_line_cart() -> CartStore {
        CartStore::new()
            .load_snapshot(vec![
                draft(1, 100, 2).with_size("M").with_color("Red"),
                draft(2, 200, 1).with_size("L").with_color("Blue"),
            ])
            .unwrap()
    }

    fn assert_total_consistent(cart: &CartStore) {
        let expected: i128 = cart
            .items()
            .iter()
            .map(|i| i128::from(i.product.unit_price.minor_units()) * i128::from(i.quantity))
            .sum();
        assert_eq!(i128::from(cart.total_price().minor_units()), expected);
    }

    #[test]
    fn test_snapshot_keeps_order() {
        let cart = two_line_cart();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].product.name, "Product 1");
        assert_eq!(cart.items()[1].product.name, "Product 2");
        assert_eq!(cart.items()[1].product.category.name, "Category 2");
        assert_eq!(cart.total_price().minor_units(), 400);
    }

    #[test]
    fn test_drawer_scenario() {
        let mut cart = two_line_cart();
        let mut events = cart.subscribe();
        assert_eq!(cart.total_price().minor_units(), 400);

        let removed_key = cart.items()[0].key;
        let items = cart.remove_item(0).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.unit_price.minor_units(), 200);
        assert_eq!(items[0].quantity, 1);
        assert_eq!(cart.total_price().minor_units(), 200);

        assert_eq!(
            events.try_recv().unwrap(),
            CartEvent::ItemRemoved {
                index: 0,
                key: removed_key
            }
        );
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

        cart.set_quantity(0, 3).unwrap();
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total_price().minor_units(), 600);
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let mut cart = CartStore::new()
            .load_snapshot((1..=5).map(|n| draft(n, 10 * n as i64, 1)))
            .unwrap();
        let before = cart.snapshot();

        cart.remove_item(2).unwrap();

        let expected: Vec<_> = before
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .map(|(_, item)| item.clone())
            .collect();
        assert_eq!(cart.items(), expected.as_slice());
        assert_total_consistent(&cart);
    }

    #[test]
    fn test_remove_out_of_range_is_rejected_without_event() {
        let mut cart = two_line_cart();
        let mut events = cart.subscribe();
        let before = cart.snapshot();

        let err = cart.remove_item(2).unwrap_err();

        assert!(matches!(err, CoreError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(cart.items(), before.as_slice());
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_remove_from_empty_cart() {
        let mut cart = CartStore::new();
        assert!(matches!(
            cart.remove_item(0),
            Err(CoreError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_set_quantity_touches_only_target_line() {
        let mut cart = two_line_cart();
        let before = cart.snapshot();

        cart.set_quantity(1, 7).unwrap();

        assert_eq!(cart.items()[0], before[0]);
        assert_eq!(cart.items()[1].quantity, 7);
        assert_eq!(cart.items()[1].key, before[1].key);
        assert_total_consistent(&cart);
    }

    #[test]
    fn test_set_quantity_out_of_range() {
        let mut cart = two_line_cart();
        let before = cart.snapshot();

        assert!(matches!(
            cart.set_quantity(5, 3),
            Err(CoreError::IndexOutOfRange { index: 5, len: 2 })
        ));
        assert_eq!(cart.items(), before.as_slice());
    }

    #[test]
    fn test_accept_policy_stores_value_as_given() {
        let mut cart = two_line_cart();

        cart.set_quantity(0, 0).unwrap();
        assert_eq!(cart.items()[0].quantity, 0);

        cart.set_quantity(0, -1).unwrap();
        assert_eq!(cart.items()[0].quantity, -1);
        assert_total_consistent(&cart);
    }

    #[test]
    fn test_reject_policy() {
        let mut cart = two_line_cart().with_policy(QuantityPolicy::Reject);
        let before = cart.snapshot();

        assert!(matches!(
            cart.set_quantity(0, 0),
            Err(CoreError::InvalidQuantity { requested: 0 })
        ));
        assert!(matches!(
            cart.set_quantity(0, MAX_LINE_QUANTITY + 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert_eq!(cart.items(), before.as_slice());

        cart.set_quantity(0, 4).unwrap();
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn test_clamp_policy() {
        let mut cart = two_line_cart().with_policy(QuantityPolicy::Clamp);

        cart.set_quantity(0, -5).unwrap();
        assert_eq!(cart.items()[0].quantity, 1);

        cart.set_quantity(1, 100_000).unwrap();
        assert_eq!(cart.items()[1].quantity, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_key_addressing_survives_shifts() {
        let mut cart = two_line_cart();
        let second = cart.items()[1].key;

        cart.remove_item(0).unwrap();
        assert_eq!(cart.position_of(second), Some(0));

        cart.set_quantity_by_key(second, 9).unwrap();
        assert_eq!(cart.items()[0].quantity, 9);

        let mut events = cart.subscribe();
        cart.remove_by_key(second).unwrap();
        assert!(cart.is_empty());
        assert!(matches!(
            events.try_recv().unwrap(),
            CartEvent::ItemRemoved { index: 0, .. }
        ));
    }

    #[test]
    fn test_unknown_key_is_rejected_without_event() {
        let mut cart = two_line_cart();
        let mut events = cart.subscribe();
        let stranger = LineKey::generate();

        assert!(matches!(
            cart.remove_by_key(stranger),
            Err(CoreError::LineNotFound(k)) if k == stranger
        ));
        assert!(matches!(
            cart.set_quantity_by_key(stranger, 2),
            Err(CoreError::LineNotFound(_))
        ));
        assert_eq!(cart.len(), 2);
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_same_product_different_selection_is_distinct_line() {
        let mut cart = CartStore::new();
        cart.add_item(draft(1, 100, 1).with_size("M")).unwrap();
        cart.add_item(draft(1, 100, 1).with_size("L")).unwrap();

        assert_eq!(cart.len(), 2);
        assert_ne!(cart.items()[0].key, cart.items()[1].key);
    }

    #[test]
    fn test_add_item_rejects_invalid_draft() {
        let mut cart = CartStore::new();
        assert!(matches!(
            cart.add_item(draft(1, 100, 0)),
            Err(CoreError::Validation(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_item_respects_max_lines() {
        let mut cart = CartStore::new().with_max_lines(1);
        cart.add_item(draft(1, 100, 1)).unwrap();

        assert!(matches!(
            cart.add_item(draft(2, 100, 1)),
            Err(CoreError::CartTooLarge { max: 1 })
        ));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_snapshot_rejects_invalid_line() {
        let result = CartStore::new().load_snapshot(vec![draft(1, 100, 1), draft(2, -1, 1)]);
        assert!(matches!(result, Err(CoreError::Validation(_))));

        let result = CartStore::new()
            .with_max_lines(1)
            .load_snapshot(vec![draft(1, 100, 1), draft(2, 100, 1)]);
        assert!(matches!(result, Err(CoreError::CartTooLarge { max: 1 })));
    }

    #[test]
    fn test_empty_view() {
        let cart = CartStore::new();
        assert_eq!(cart.view(), CartView::Empty);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_items_view() {
        let cart = two_line_cart();
        match cart.view() {
            CartView::Items { items, totals } => {
                assert_eq!(items.len(), 2);
                assert_eq!(totals.line_count, 2);
                assert_eq!(totals.total_quantity, 3);
                assert_eq!(totals.total_price.minor_units(), 400);
            }
            CartView::Empty => panic!("expected items view"),
        }
    }

    #[test]
    fn test_clear_is_silent_and_allows_new_items() {
        let mut cart = two_line_cart();
        let mut events = cart.subscribe();

        cart.clear();
        assert!(cart.is_empty());
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

        cart.add_item(draft(3, 300, 1)).unwrap();
        assert_eq!(cart.total_price().minor_units(), 300);
    }

    #[test]
    fn test_quantity_policy_parsing() {
        assert_eq!("accept".parse::<QuantityPolicy>().unwrap(), QuantityPolicy::Accept);
        assert_eq!("STRICT".parse::<QuantityPolicy>().unwrap(), QuantityPolicy::Reject);
        assert_eq!(" clamp ".parse::<QuantityPolicy>().unwrap(), QuantityPolicy::Clamp);
        assert!("floor".parse::<QuantityPolicy>().is_err());
        assert_eq!(QuantityPolicy::Reject.to_string(), "reject");
    }

    #[test]
    fn test_view_serialization_shape() {
        let json = serde_json::to_value(CartStore::new().view()).unwrap();
        assert_eq!(json["state"], "empty");

        let json = serde_json::to_value(two_line_cart().view()).unwrap();
        assert_eq!(json["state"], "items");
        assert_eq!(json["totals"]["totalPrice"], 400);
        assert_eq!(json["items"][0]["product"]["price"], 100);
    }

    #[test]
    fn test_accept_policy_rejects_quantity_that_overflows_total() {
        let mut cart = two_line_cart();
        let mut events = cart.subscribe();
        let before = cart.snapshot();

        assert!(matches!(
            cart.set_quantity(0, i64::MAX),
            Err(CoreError::TotalOverflow)
        ));
        assert!(matches!(
            cart.set_quantity(1, i64::MIN),
            Err(CoreError::TotalOverflow)
        ));

        assert_eq!(cart.items(), before.as_slice());
        assert_eq!(cart.total_price().minor_units(), 400);
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_accept_policy_allows_extremes_that_fit() {
        let mut cart = CartStore::new().load_snapshot(vec![draft(1, 1, 1)]).unwrap();

        cart.set_quantity(0, i64::MAX).unwrap();
        assert_eq!(cart.total_price().minor_units(), i64::MAX);
        assert_eq!(cart.totals().total_quantity, i64::MAX);
        assert_total_consistent(&cart);

        assert!(matches!(
            cart.add_item(draft(2, 1, 1)),
            Err(CoreError::TotalOverflow)
        ));
        assert_eq!(cart.len(), 1);

        cart.set_quantity(0, i64::MIN).unwrap();
        assert_eq!(cart.total_price().minor_units(), i64::MIN);
        assert_total_consistent(&cart);
    }

    #[test]
    fn test_remove_that_would_overflow_is_rejected() {
        let mut cart = CartStore::new()
            .load_snapshot(vec![draft(1, 1, 1), draft(2, 1, 1), draft(3, 1, 1)])
            .unwrap();
        cart.set_quantity(1, -1).unwrap();
        cart.set_quantity(0, i64::MAX).unwrap();
        assert_eq!(cart.total_price().minor_units(), i64::MAX);

        let mut events = cart.subscribe();
        let before = cart.snapshot();

        assert!(matches!(cart.remove_item(1), Err(CoreError::TotalOverflow)));
        assert_eq!(cart.items(), before.as_slice());
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

        cart.remove_item(2).unwrap();
        assert_eq!(cart.total_price().minor_units(), i64::MAX - 1);
        assert_total_consistent(&cart);
    }

    #[test]
    fn test_snapshot_with_overflowing_line_is_rejected() {
        let result = CartStore::new().load_snapshot(vec![draft(1, i64::MAX, 2)]);
        assert!(matches!(result, Err(CoreError::TotalOverflow)));

        let result =
            CartStore::new().load_snapshot(vec![draft(1, i64::MAX, 1), draft(2, 1, 1)]);
        assert!(matches!(result, Err(CoreError::TotalOverflow)));
    }
}
