//! # Validation Module
//!
//! Rules a line item must satisfy to enter the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View (storefront UI)                                          │
//! │  ├── Quantity input min=1                                               │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart store                                                    │
//! │  ├── THIS MODULE: drafts entering the cart (add / snapshot)             │
//! │  └── QuantityPolicy: quantity edits on existing lines                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::validate_line_draft;
//! use shopfront_core::{Money, NewLineItem, ProductRef};
//!
//! let draft = NewLineItem::new(
//!     ProductRef::new("Linen Shirt", "linen-shirt", Money::from_minor_units(100), "Shirts"),
//!     1,
//! );
//! assert!(validate_line_draft(&draft).is_ok());
//! ```

use crate::error::ValidationError;
use crate::line_item::NewLineItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price in minor units. Zero is allowed (free items).
pub fn validate_unit_price(units: i64) -> ValidationResult<()> {
    if units < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the quantity of a line entering the cart.
///
/// A freshly created line always carries at least one unit.
pub fn validate_initial_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a draft line item before it is keyed and stored.
pub fn validate_line_draft(draft: &NewLineItem) -> ValidationResult<()> {
    validate_product_name(&draft.product.name)?;
    validate_unit_price(draft.product.unit_price.minor_units())?;
    validate_initial_quantity(draft.quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
