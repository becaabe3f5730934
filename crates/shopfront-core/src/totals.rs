//! # Aggregate Calculator
//!
//! Pure functions from a cart snapshot to its totals.
//!
//! ## Never Cached
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartStore.items ──► total_price(items) ──► Σ unit_price × quantity     │
//! │                                                                         │
//! │  The total is recomputed from the live lines on every query. There is   │
//! │  no stored total that a removal or quantity edit could leave stale.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::line_item::LineItem;
use crate::money::Money;

/// Sum of `unit_price × quantity` over all lines. Zero for an empty cart.
///
/// Saturates at the `i64` bounds. A [`CartStore`](crate::CartStore) only
/// holds carts that pass [`checked_totals`], so its total is always exact.
///
/// ## Example
/// ```rust
/// use shopfront_core::totals::total_price;
///
/// assert!(total_price(&[]).is_zero());
/// ```
pub fn total_price(items: &[LineItem]) -> Money {
    let wide = items
        .iter()
        .map(|i| i128::from(i.unit_price().minor_units()) * i128::from(i.quantity))
        .fold(0_i128, i128::saturating_add);
    Money::from_minor_units(saturate(wide))
}

/// Sum of quantities over all lines. Saturates like [`total_price`].
pub fn total_quantity(items: &[LineItem]) -> i64 {
    saturate(items.iter().map(|i| i128::from(i.quantity)).sum())
}

/// Exact totals, or `None` if any line total or either sum leaves the
/// `i64` range.
///
/// The sums are taken in `i128`, so the outcome does not depend on line order.
pub fn checked_totals<'a, I>(items: I) -> Option<CartTotals>
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let mut line_count = 0;
    let mut quantity: i128 = 0;
    let mut price: i128 = 0;

    for item in items {
        price += i128::from(item.checked_line_total()?.minor_units());
        quantity += i128::from(item.quantity);
        line_count += 1;
    }

    Some(CartTotals {
        line_count,
        total_quantity: i64::try_from(quantity).ok()?,
        total_price: Money::from_minor_units(i64::try_from(price).ok()?),
    })
}

fn saturate(wide: i128) -> i64 {
    i64::try_from(wide).unwrap_or(if wide < 0 { i64::MIN } else { i64::MAX })
}

/// Cart totals summary for view responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Number of distinct lines.
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_price: Money,
}

impl From<&[LineItem]> for CartTotals {
    fn from(items: &[LineItem]) -> Self {
        CartTotals {
            line_count: items.len(),
            total_quantity: total_quantity(items),
            total_price: total_price(items),
        }
    }
}
