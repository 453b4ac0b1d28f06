//! # Money Module
//!
//! Integer-cent money for basket lines and totals.
//!
//! The backend sends product prices as JSON decimals (`2.5`, `3.75`). They are
//! converted to cents once, at the edge, and every sum after that is integer.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product.price (f64, wire) ──► Money::from_decimal ──► unit_price       │
//! │                                                          │              │
//! │                              unit_price × quantity ──► line_total       │
//! │                                                          │              │
//! │                              Σ line_total ──────────► basket total      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mycoffee_core::money::Money;
//!
//! let espresso = Money::from_decimal(2.5);
//! let latte = Money::from_decimal(3.75);
//!
//! let total: Money = [espresso * 2, latte].into_iter().sum();
//! assert_eq!(total.cents(), 875);
//! assert_eq!(total.to_string(), "$8.75");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so that discounts and corrections can be represented, though the
/// storefront itself only produces non-negative amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use mycoffee_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a wire decimal price into cents, rounding half away from zero.
    ///
    /// Non-finite input (NaN, infinity) yields zero.
    ///
    /// ## Example
    /// ```rust
    /// use mycoffee_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(2.5).cents(), 250);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
    /// ```
    pub fn from_decimal(value: f64) -> Self {
        if !value.is_finite() {
            return Money::zero();
        }
        Money((value * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollars portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Flat White $3.75
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: $7.50
    /// ```
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(3.75).cents(), 375);
        assert_eq!(Money::from_decimal(0.0).cents(), 0);
        // 1.005 is stored as 1.00499999..., so it rounds down
        assert_eq!(Money::from_decimal(1.005).cents(), 100);
        assert_eq!(Money::from_decimal(19.999).cents(), 2000);
        assert_eq!(Money::from_decimal(f64::NAN), Money::zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_cents(100);
        assert_eq!(c.cents(), 1400);
    }

    #[test]
    fn test_sum_avoids_float_drift() {
        // Ten lines of $0.10 must total exactly $1.00
        let lines = vec![Money::from_decimal(0.1); 10];
        let total: Money = lines.iter().sum();
        assert_eq!(total, Money::from_cents(100));
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_decimal(2.99);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let unit_price = Money::from_cents(250);
        assert_eq!(unit_price.multiply_quantity(i64::MAX), Money::from_cents(i64::MAX));
        assert_eq!((unit_price * i64::MIN).cents(), i64::MIN);
        assert_eq!(Money::from_cents(-250).multiply_quantity(i64::MAX).cents(), i64::MIN);
    }

    #[test]
    fn test_sum_saturates() {
        let lines = [Money::from_cents(i64::MAX), Money::from_cents(199)];
        let total: Money = lines.iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - Money::from_cents(1)).cents(), i64::MIN);
    }
}
