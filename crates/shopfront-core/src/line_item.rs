//! # Line Items
//!
//! One entry of the cart: which product, in which size/color, how many.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Line Item Types                                 │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   NewLineItem   │──►│    LineItem     │   │   ProductRef    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product        │   │  key (UUID)     │   │  name           │       │
//! │  │  image          │   │  product ───────┼──►│  slug           │       │
//! │  │  quantity       │   │  image          │   │  price (Money)  │       │
//! │  │  size, color    │   │  quantity       │   │  category.name  │       │
//! │  └─────────────────┘   │  size, color    │   └─────────────────┘       │
//! │    (from add-to-cart   │  added_at       │                              │
//! │     or a snapshot)     └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Replacement, Not Mutation
//! A `LineItem` is never edited in place. A quantity edit builds a new item
//! with [`LineItem::with_quantity`] and the store swaps it into the same
//! position. The key survives the replacement, so a view holding the key
//! keeps pointing at the same line.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Line Key
// =============================================================================

/// Stable opaque identifier of a cart line.
///
/// Positions shift on every removal; keys do not. Views that need to address
/// a line across re-renders should hold the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineKey(#[ts(type = "string")] Uuid);

impl LineKey {
    /// Generates a fresh random key.
    pub fn generate() -> Self {
        LineKey(Uuid::new_v4())
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for LineKey {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(LineKey)
    }
}

// =============================================================================
// Product Reference
// =============================================================================

/// Category the product is listed under. Only the name is shown in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryRef {
    pub name: String,
}

/// The product a line refers to.
///
/// Pricing arrives already resolved; the cart never looks a price up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRef {
    /// Display name.
    pub name: String,

    /// URL slug of the product page.
    pub slug: String,

    /// Price of one unit in minor currency units.
    #[serde(rename = "price")]
    pub unit_price: Money,

    /// Category the product belongs to.
    pub category: CategoryRef,
}

impl ProductRef {
    /// Creates a product reference.
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        unit_price: Money,
        category: impl Into<String>,
    ) -> Self {
        ProductRef {
            name: name.into(),
            slug: slug.into(),
            unit_price,
            category: CategoryRef {
                name: category.into(),
            },
        }
    }
}

// =============================================================================
// New Line Item
// =============================================================================

/// A line item as supplied by an add-to-cart action or a stored snapshot,
/// before the store has assigned it a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewLineItem {
    pub product: ProductRef,

    /// Display asset reference (URL or path).
    #[serde(default)]
    pub image: String,

    pub quantity: i64,

    #[serde(default)]
    pub size: String,

    #[serde(default)]
    pub color: String,
}

impl NewLineItem {
    /// Creates a draft with no image and no size/color selection.
    pub fn new(product: ProductRef, quantity: i64) -> Self {
        NewLineItem {
            product,
            image: String::new(),
            quantity,
            size: String::new(),
            color: String::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One entry of the cart.
///
/// ## Design Notes
/// - `key`: assigned once when the line enters the cart, never reused
/// - `product`: frozen copy of the product data handed over with the item
/// - `size`/`color`: two lines for the same product with different
///   selections are distinct lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub key: LineKey,
    pub product: ProductRef,
    pub image: String,
    pub quantity: i64,
    pub size: String,
    pub color: String,

    /// When this line entered the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Turns a draft into a keyed line item.
    pub fn from_draft(draft: NewLineItem) -> Self {
        LineItem {
            key: LineKey::generate(),
            product: draft.product,
            image: draft.image,
            quantity: draft.quantity,
            size: draft.size,
            color: draft.color,
            added_at: Utc::now(),
        }
    }

    /// Returns a copy of this line with a different quantity.
    ///
    /// Key, product and selection are carried over unchanged.
    pub fn with_quantity(&self, quantity: i64) -> Self {
        LineItem {
            quantity,
            ..self.clone()
        }
    }

    /// Price of one unit.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.product.unit_price
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Line total, or `None` if it does not fit in [`Money`].
    #[inline]
    pub fn checked_line_total(&self) -> Option<Money> {
        self.unit_price().checked_mul_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
