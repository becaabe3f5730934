//! # Cart Snapshots
//!
//! The cart's hand-over format with the session layer that persists carts.
//!
//! ```text
//! ┌──────────────────┐   JSON array of    ┌──────────────────┐
//! │  session store   │ ──── drafts ─────► │ parse_snapshot() │ ──► CartStore::load_snapshot
//! │  (outside core)  │ ◄─── drafts ────── │ export_snapshot()│ ◄── CartStore::items
//! └──────────────────┘                    └──────────────────┘
//! ```
//!
//! The JSON shape is the storefront's cart state:
//!
//! ```json
//! [
//!   {
//!     "product": { "name": "Product 1", "price": 100, "slug": "product-1", "category": { "name": "Category 1" } },
//!     "image": "image1.jpg",
//!     "quantity": 2,
//!     "size": "M",
//!     "color": "Red"
//!   }
//! ]
//! ```
//!
//! Keys and timestamps are session-local and not part of the format; a
//! reloaded cart gets fresh keys.

use crate::error::CoreResult;
use crate::line_item::{LineItem, NewLineItem};

/// Parses a JSON snapshot into drafts, in order.
pub fn parse_snapshot(json: &str) -> CoreResult<Vec<NewLineItem>> {
    Ok(serde_json::from_str(json)?)
}

/// Converts live lines back into the snapshot format.
pub fn export_snapshot(items: &[LineItem]) -> Vec<NewLineItem> {
    items.iter().cloned().map(NewLineItem::from).collect()
}

/// Serializes live lines into the JSON snapshot format.
pub fn export_snapshot_json(items: &[LineItem]) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(&export_snapshot(items))?)
}

impl From<LineItem> for NewLineItem {
    fn from(item: LineItem) -> Self {
        NewLineItem {
            product: item.product,
            image: item.image,
            quantity: item.quantity,
            size: item.size,
            color: item.color,
        }
    }
}
