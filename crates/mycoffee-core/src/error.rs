//! # Error Types
//!
//! Domain-specific error types for mycoffee-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mycoffee-core errors (this file)                                      │
//! │  ├── CoreError        - Storefront rule violations                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  mycoffee-hal errors (separate crate)                                  │
//! │  └── HalError         - HTTP status, decode, missing link, config      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → HalError → app (anyhow)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Storefront rule violations.
///
/// These are raised before any request is sent, so a rejected action never
/// reaches the backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A stock adjustment would take the level below zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Stock Level: 0   [ - ] [ + ]
    ///                    │
    ///                    ▼
    /// validate_stock_adjustment(0, -1, ..)
    ///                    │
    ///                    ▼
    /// NegativeStock { requested: -1 }  → no PATCH, display stays at 0
    /// ```
    #[error("Stock cannot go below zero (requested {requested})")]
    NegativeStock { requested: i64 },

    /// A stock adjustment would exceed the inventory's capacity.
    #[error("Stock {requested} exceeds capacity {capacity}")]
    OverCapacity { requested: i64, capacity: i64 },

    /// Basket quantity exceeds the allowed maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
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

    /// Invalid format (e.g., a time of day that is not HH:MM).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::OverCapacity {
            requested: 11,
            capacity: 10,
        };
        assert_eq!(err.to_string(), "Stock 11 exceeds capacity 10");

        let err = CoreError::NegativeStock { requested: -1 };
        assert_eq!(err.to_string(), "Stock cannot go below zero (requested -1)");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "username".to_string(),
        };
        assert_eq!(validation_err.to_string(), "username is required");

        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
