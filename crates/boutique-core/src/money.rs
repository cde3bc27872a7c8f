//! # Money Module
//!
//! Provides the `Money` type for handling prices and cart totals safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Catalog prices arrive as decimals: 89.99, 129.99, 45.5                │
//! │                                                                         │
//! │  Summing them as floats drifts:                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    and a $99.99 + $0.01 cart might miss the free-shipping line          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Decimals are rounded to cents ONCE, at the serialization boundary.   │
//! │    Every subtotal / shipping comparison is exact integer math.          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! `Money` serializes as a plain JSON number in major units (`89.99`), the
//! same shape the storefront's persisted cart uses. Deserialization rounds to
//! the nearest cent and rejects non-finite numbers.
//!
//! ## Usage
//! ```rust
//! use boutique_core::money::Money;
//!
//! let price = Money::from_cents(8999); // $89.99
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.cents(), 17998);
//! assert_eq!(line_total.to_string(), "$179.98");
//! ```

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// Arithmetic saturates at the `i64` bounds: cart quantities are unbounded,
/// so totals clamp instead of overflowing.
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences (e.g. original price minus sale price) may
///   go negative in intermediate math
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Ordered**: The query engine sorts on price directly
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──┬──► CartLine.line_total ──► Cart.subtotal            │
/// │                  │                                  │                   │
/// │                  │                                  ▼                   │
/// │                  │                   ShippingPolicy ──► CartTotals      │
/// │                  │                                                      │
/// │                  └──► PriceRange filter, price-low / price-high sort    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use boutique_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        let major_cents = major.saturating_mul(100);
        if major < 0 {
            Money(major_cents.saturating_sub(minor))
        } else {
            Money(major_cents.saturating_add(minor))
        }
    }

    /// Converts a decimal amount in major units (e.g. `89.99`) to Money.
    ///
    /// Rounds half away from zero to the nearest cent. Returns `None` for
    /// NaN, infinities and values outside the representable range.
    ///
    /// ## Example
    /// ```rust
    /// use boutique_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_units(89.99), Some(Money::from_cents(8999)));
    /// assert_eq!(Money::from_major_units(f64::NAN), None);
    /// ```
    pub fn from_major_units(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let cents = (amount * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the amount in major units as a float (for serialization and
    /// percentage math only, never for sums).
    #[inline]
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use boutique_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(4550); // $45.50
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 13650);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Percentage this (sale) price is below `original`, rounded to the
    /// nearest whole percent.
    ///
    /// Returns 0 when `original` is not greater than this price.
    ///
    /// ## Example
    /// ```rust
    /// use boutique_core::money::Money;
    ///
    /// let sale = Money::from_cents(8999);
    /// let original = Money::from_cents(12999);
    /// assert_eq!(sale.percent_off(original), 31);
    /// ```
    pub fn percent_off(&self, original: Money) -> u32 {
        if original.0 <= self.0 || original.0 <= 0 {
            return 0;
        }

        let saved = original.0.saturating_sub(self.0) as f64;
        (saved / original.0 as f64 * 100.0).round() as u32
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. The UI formats prices itself to handle
/// localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
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
// Serialization (major units on the wire)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major_units())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_major_units(amount).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Float(amount), &"a finite decimal amount")
        })
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
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_from_major_units_rounds_to_cents() {
        assert_eq!(Money::from_major_units(89.99).unwrap().cents(), 8999);
        assert_eq!(Money::from_major_units(45.5).unwrap().cents(), 4550);
        assert_eq!(Money::from_major_units(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_major_units(100.0).unwrap().cents(), 10000);
        assert!(Money::from_major_units(f64::INFINITY).is_none());
        assert!(Money::from_major_units(f64::NAN).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max + Money::from_cents(1), max);

        let mut total = max;
        total += max;
        assert_eq!(total, max);

        let min = Money::from_cents(i64::MIN);
        assert_eq!(min - Money::from_cents(1), min);

        let sum: Money = [max, max, Money::from_cents(5)].iter().sum();
        assert_eq!(sum, max);
    }

    #[test]
    fn test_percent_off() {
        let sale = Money::from_cents(8999);
        assert_eq!(sale.percent_off(Money::from_cents(12999)), 31);
        assert_eq!(sale.percent_off(Money::from_cents(8999)), 0);
        assert_eq!(sale.percent_off(Money::from_cents(5000)), 0);
        assert_eq!(Money::from_cents(5000).percent_off(Money::from_cents(10000)), 50);
    }

    #[test]
    fn test_serializes_as_major_units() {
        let json = serde_json::to_string(&Money::from_cents(8999)).unwrap();
        assert_eq!(json, "89.99");

        let parsed: Money = serde_json::from_str("129.99").unwrap();
        assert_eq!(parsed.cents(), 12999);

        let integer: Money = serde_json::from_str("50").unwrap();
        assert_eq!(integer.cents(), 5000);

        assert!(serde_json::from_str::<Money>("\"50\"").is_err());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());
        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
