//! # Error Types
//!
//! Two error types live here:
//!
//! - [`ApiError`]: what a cart command returns to the view. Serializable, with
//!   a machine-readable `code` and a human-readable `message`.
//! - [`AppError`]: failures of the console itself (config, snapshot file,
//!   terminal I/O). These end the process.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console                            │
//! │                                                                         │
//! │  driver line "rm 7"                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<CartResponse, ApiError>                                  │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  CoreError::IndexOutOfRange ──► ApiError { INDEX_OUT_OF_RANGE }  │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  printed, session continues with the previous cart               │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Config / snapshot / stdin failure ──► AppError ──► exit code 1        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopfront_core::CoreError;
use thiserror::Error;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from cart commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INDEX_OUT_OF_RANGE",
///   "message": "Index 7 is out of range for a cart of 2 items"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Position not present in the cart
    IndexOutOfRange,

    /// Line key not present in the cart
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart-level limit reached
    CartError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::IndexOutOfRange { .. } => {
                ApiError::new(ErrorCode::IndexOutOfRange, err.to_string())
            }
            CoreError::LineNotFound(_) => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::InvalidQuantity { .. } | CoreError::QuantityTooLarge { .. } => {
                ApiError::validation(err.to_string())
            }
            CoreError::CartTooLarge { .. } | CoreError::TotalOverflow => {
                ApiError::new(ErrorCode::CartError, err.to_string())
            }
            CoreError::Snapshot(e) => ApiError::validation(format!("Invalid line item: {}", e)),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// App Error
// =============================================================================

/// Fatal console errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration is present but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file is not valid TOML for [`crate::config::ConsoleConfig`].
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The initial snapshot could not be loaded.
    #[error("Failed to load cart snapshot: {0}")]
    Snapshot(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for console operations.
pub type AppResult<T> = Result<T, AppError>;
