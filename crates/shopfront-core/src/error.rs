//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  ├── CoreError        - Rejected cart operations                       │
//! │  └── ValidationError  - Malformed line items / quantities              │
//! │                                                                         │
//! │  console errors (apps/console)                                         │
//! │  ├── AppError         - Config / snapshot loading failures             │
//! │  └── ApiError         - What the view layer sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → View                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is local and synchronous. A rejected operation leaves the
//! cart exactly as it was.

use thiserror::Error;

use crate::line_item::LineKey;

// =============================================================================
// Core Error
// =============================================================================

/// Cart operation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A mutation referenced a position that is not in the cart.
    ///
    /// ## When This Occurs
    /// - The view held a stale row after another removal
    /// - Malformed input from an uncontrolled caller
    #[error("Index {index} is out of range for a cart of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// A key-addressed mutation referenced a line that is not in the cart.
    #[error("Line not found: {0}")]
    LineNotFound(LineKey),

    /// Quantity below one, rejected by the strict quantity policy.
    #[error("Invalid quantity {requested}: must be at least 1")]
    InvalidQuantity { requested: i64 },

    /// Quantity above the maximum, rejected by the strict quantity policy.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Cart has reached the maximum number of lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// The cart's line totals or sums would leave the `i64` range.
    #[error("Cart total would exceed the supported amount range")]
    TotalOverflow,

    /// The initial snapshot could not be parsed.
    #[error("Invalid cart snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for line items.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
