//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! Floating-point prices make totals drift (`0.1 + 0.2 != 0.3`). Every
//! monetary value in this crate is an integer number of cents:
//!
//! ```text
//! Product.wholesale_price_cents ──► InvoiceItem.wholesale_price_cents
//!        │                                  │
//!        └──► selling price (margin)        └──► Invoice.total_value_cents
//!                                                       │
//!                              Installment.amount_cents ┘
//! ```
//!
//! ## Usage
//! ```rust
//! use marketpro_core::money::Money;
//!
//! let price = Money::from_cents(2550); // $25.50
//! let line = price * 3;                // $76.50
//! assert_eq!(line.cents(), 7650);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values represent shortfalls (e.g. an
///   overpaid invoice has a negative remaining balance)
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **Serde transparent-ish**: serializes as a bare integer in the blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
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
    /// Used for line totals: `wholesale price × quantity`.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a profit margin and returns the marked-up amount.
    ///
    /// ## Arguments
    /// * `margin_bps` - Margin in basis points (1500 = 15%)
    ///
    /// ## Example
    /// ```rust
    /// use marketpro_core::money::Money;
    ///
    /// let wholesale = Money::from_cents(2000);           // $20.00
    /// let selling = wholesale.apply_margin_bps(1500);    // 15% margin
    /// assert_eq!(selling.cents(), 2300);                 // $23.00
    /// ```
    ///
    /// ## Implementation
    /// Integer math with half-up rounding: `(amount * (10000 + bps) + 5000) / 10000`.
    /// i128 intermediate prevents overflow on large amounts.
    pub fn apply_margin_bps(&self, margin_bps: u32) -> Money {
        let marked_up =
            (self.0 as i128 * (10_000 + margin_bps as i128) + 5_000) / 10_000;
        Money::from_cents(marked_up as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for logs and debugging. The frontend formats currency itself
/// to handle localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity (for line totals).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over item lists (invoice totals, stock value).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
