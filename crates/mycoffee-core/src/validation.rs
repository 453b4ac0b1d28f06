//! # Validation Module
//!
//! Storefront rules that are checked before a request leaves the client.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console input (clap)                                         │
//! │  └── Type parsing of ids, deltas, quantities                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Stock bounds (0 ..= capacity)                                     │
//! │  ├── Basket quantity bounds                                            │
//! │  └── Opening hours normalized to HH:MM:SS                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Bean validation, ownership, uniqueness                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Stock
// =============================================================================

/// Computes the stock level after applying `delta`, or rejects it.
///
/// ## Rules
/// - The new level must not be negative.
/// - When `capacity` is set and positive, the new level must not exceed it.
///   A capacity of zero (or none) means "unbounded".
///
/// ## Example
/// ```rust
/// use mycoffee_core::validation::validate_stock_adjustment;
///
/// assert_eq!(validate_stock_adjustment(5, -1, Some(10)).unwrap(), 4);
/// assert!(validate_stock_adjustment(10, 1, Some(10)).is_err());
/// assert_eq!(validate_stock_adjustment(10, 1, Some(0)).unwrap(), 11);
/// ```
pub fn validate_stock_adjustment(
    current: i64,
    delta: i64,
    capacity: Option<i64>,
) -> CoreResult<i64> {
    let requested = current.saturating_add(delta);

    if requested < 0 {
        return Err(CoreError::NegativeStock { requested });
    }

    if let Some(capacity) = capacity.filter(|c| *c > 0) {
        if requested > capacity {
            return Err(CoreError::OverCapacity {
                requested,
                capacity,
            });
        }
    }

    Ok(requested)
}

// =============================================================================
// Basket
// =============================================================================

/// Validates a basket line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> CoreResult<()> {
    if qty <= 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        }
        .into());
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: qty,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a username used to look up or create a basket.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 100,
        });
    }

    if username.contains('/') {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must not contain '/'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Opening Hours
// =============================================================================

/// Normalizes a time of day to the backend's `HH:MM:SS` form.
///
/// `HH:MM` gets `:00` appended; `HH:MM:SS` is returned unchanged.
///
/// ## Example
/// ```rust
/// use mycoffee_core::validation::normalize_time_of_day;
///
/// assert_eq!(normalize_time_of_day("08:30").unwrap(), "08:30:00");
/// assert_eq!(normalize_time_of_day("17:45:10").unwrap(), "17:45:10");
/// assert!(normalize_time_of_day("8h30").is_err());
/// ```
pub fn normalize_time_of_day(value: &str) -> ValidationResult<String> {
    let value = value.trim();
    let parts: Vec<&str> = value.split(':').collect();

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "time".to_string(),
        reason: reason.to_string(),
    };

    if parts.len() != 2 && parts.len() != 3 {
        return Err(invalid("expected HH:MM or HH:MM:SS"));
    }

    let limits = [23u32, 59, 59];
    for (part, max) in parts.iter().zip(limits) {
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected two-digit components"));
        }
        let n: u32 = part
            .parse()
            .map_err(|_| invalid("expected two-digit components"))?;
        if n > max {
            return Err(invalid("component out of range"));
        }
    }

    if parts.len() == 2 {
        Ok(format!("{value}:00"))
    } else {
        Ok(value.to_string())
    }
}

/// Like [`normalize_time_of_day`] but passes `None` and blank input through
/// as `None`.
pub fn normalize_optional_time(value: Option<&str>) -> ValidationResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => normalize_time_of_day(v).map(Some),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_decrement_at_zero_rejected() {
        let err = validate_stock_adjustment(0, -1, Some(10)).unwrap_err();
        assert_eq!(err, CoreError::NegativeStock { requested: -1 });
    }

    #[test]
    fn test_stock_capacity_boundary() {
        assert_eq!(validate_stock_adjustment(9, 1, Some(10)).unwrap(), 10);
        let err = validate_stock_adjustment(10, 1, Some(10)).unwrap_err();
        assert_eq!(
            err,
            CoreError::OverCapacity {
                requested: 11,
                capacity: 10
            }
        );
    }

    #[test]
    fn test_stock_without_capacity_is_unbounded() {
        assert_eq!(validate_stock_adjustment(500, 1, None).unwrap(), 501);
        assert_eq!(validate_stock_adjustment(500, 1, Some(0)).unwrap(), 501);
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(matches!(
            validate_quantity(0),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            validate_quantity(MAX_ITEM_QUANTITY + 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn test_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("   ").is_err());
        assert!(validate_username("a/b").is_err());
        assert!(validate_username(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_time_normalization() {
        assert_eq!(normalize_time_of_day("07:00").unwrap(), "07:00:00");
        assert_eq!(normalize_time_of_day("23:59:59").unwrap(), "23:59:59");
        assert!(normalize_time_of_day("24:00").is_err());
        assert!(normalize_time_of_day("7:00").is_err());
        assert!(normalize_time_of_day("").is_err());
    }

    #[test]
    fn test_optional_time() {
        assert_eq!(normalize_optional_time(None).unwrap(), None);
        assert_eq!(normalize_optional_time(Some("  ")).unwrap(), None);
        assert_eq!(
            normalize_optional_time(Some("09:15")).unwrap(),
            Some("09:15:00".to_string())
        );
    }
}
