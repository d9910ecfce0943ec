//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many restaurant systems:                                            │
//! │    $50.00 / 3 guests = $16.67 (×3 = $50.01)  → Invented $0.01!         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    5000 cents / 3 = shares of 1667, 1667, 1666 cents (= 5000 exactly) │
//! │    The odd cent is assigned explicitly, never invented or lost         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comanda_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;            // $21.98
//! let total = price + Money::from_cents(500); // $15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TipRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections, split deltas
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  MenuItem.price_cents ──┬──► OrderItem.unit_price ──► line_total        │
/// │                         │                                               │
/// │                         └──► Displayed as "$10.99" in UI                │
/// │                                                                         │
/// │  Bill.subtotal ──► Tip Calculation ──► Bill.total ──► Payer Shares     │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The store, calculations, and API all use cents.
    /// Only the UI converts to dollars for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // $10.99
    /// assert_eq!(price.cents(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -$5.50 (correction)
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.dollars(), 10);
    ///
    /// let negative = Money::from_cents(-550);
    /// assert_eq!(negative.dollars(), -5);
    /// ```
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates a tip with half-up rounding.
    ///
    /// ## Implementation
    /// We use integer math: `(amount * rate + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5)
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    /// use comanda_core::types::TipRate;
    ///
    /// let subtotal = Money::from_cents(4890); // $48.90
    /// let rate = TipRate::from_bps(1000);     // 10%
    ///
    /// let tip = subtotal.calculate_tip(rate);
    /// // $48.90 × 10% = $4.89 (489 cents)
    /// assert_eq!(tip.cents(), 489);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Bill Subtotal: $48.90
    ///      │
    ///      ▼
    /// calculate_tip(10%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tip: $4.89
    ///      │
    ///      ▼
    /// Grand Total: $53.79
    /// ```
    pub fn calculate_tip(&self, rate: TipRate) -> Money {
        // Use i128 to prevent overflow on large amounts
        // rate.bps() is basis points: 1000 = 10%
        // Formula: amount_cents * bps / 10000
        // With rounding: (amount_cents * bps + 5000) / 10000
        let tip_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tip_cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(890); // $8.90
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 2670); // $26.70
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Splits the amount into `ways` shares that sum back exactly.
    ///
    /// ## Largest-Remainder Splitting
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  SPLITTING $50.00 THREE WAYS                                        │
    /// │                                                                     │
    /// │  Naive:   5000 / 3 = 1666 cents each (×3 = 4998) → Lost 2 cents!  │
    /// │                                                                     │
    /// │  Here:    base = 1666, remainder = 2                               │
    /// │           shares = [1667, 1667, 1666]  (sum = 5000 exactly)        │
    /// │                                                                     │
    /// │  The first `remainder` shares absorb one extra cent each.          │
    /// │  No cent is ever invented or lost.                                 │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let bill = Money::from_cents(5000);
    /// let shares = bill.split_even(3);
    /// assert_eq!(shares.iter().map(|s| s.cents()).sum::<i64>(), 5000);
    /// assert_eq!(shares[0].cents(), 1667);
    /// assert_eq!(shares[2].cents(), 1666);
    /// ```
    pub fn split_even(&self, ways: u32) -> Vec<Money> {
        if ways == 0 {
            return Vec::new();
        }
        let ways_i = ways as i64;
        // Euclidean division keeps the remainder non-negative even for
        // negative totals, so the shares always sum back exactly.
        let base = self.0.div_euclid(ways_i);
        let mut remainder = self.0.rem_euclid(ways_i);
        let mut shares = Vec::with_capacity(ways as usize);
        for _ in 0..ways {
            let extra = if remainder > 0 {
                remainder -= 1;
                1
            } else {
                0
            };
            shares.push(Money(base + extra));
        }
        shares
    }

    /// Distributes the amount proportionally to `weights`, summing back exactly.
    ///
    /// Used to spread a tip across payers in proportion to what each one
    /// consumed. Fractional cents go to the entries with the largest
    /// remainders; ties break toward the earlier entry.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let tip = Money::from_cents(500); // $5.00 tip
    /// // Payer A consumed $20, payer B consumed $10
    /// let shares = tip.allocate(&[2000, 1000]);
    /// assert_eq!(shares[0].cents(), 333);
    /// assert_eq!(shares[1].cents(), 167);
    /// assert_eq!(shares.iter().map(|s| s.cents()).sum::<i64>(), 500);
    /// ```
    pub fn allocate(&self, weights: &[i64]) -> Vec<Money> {
        if weights.is_empty() {
            return Vec::new();
        }
        let total_weight: i128 = weights.iter().map(|w| *w as i128).sum();
        if total_weight <= 0 {
            return vec![Money::zero(); weights.len()];
        }

        let amount = self.0 as i128;
        let mut shares: Vec<i64> = Vec::with_capacity(weights.len());
        let mut remainders: Vec<(usize, i128)> = Vec::with_capacity(weights.len());
        let mut assigned: i128 = 0;

        for (idx, weight) in weights.iter().enumerate() {
            let exact = amount * *weight as i128;
            let base = exact.div_euclid(total_weight);
            remainders.push((idx, exact.rem_euclid(total_weight)));
            assigned += base;
            shares.push(base as i64);
        }

        // Hand out the leftover cents, largest fractional part first.
        let mut leftover = (amount - assigned) as usize;
        remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        for (idx, _) in remainders {
            if leftover == 0 {
                break;
            }
            shares[idx] += 1;
            leftover -= 1;
        }

        shares.into_iter().map(Money::from_cents).collect()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Use frontend formatting for actual UI display
/// to handle localization properly.
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

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.cents(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
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
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_tip_calculation_basic() {
        // $10.00 at 10% = $1.00
        let amount = Money::from_cents(1000);
        let rate = TipRate::from_bps(1000); // 10%
        let tip = amount.calculate_tip(rate);
        assert_eq!(tip.cents(), 100);
    }

    #[test]
    fn test_tip_calculation_with_rounding() {
        // $10.99 at 15% = $1.6485 → $1.65 (half-up rounding from +5000)
        let amount = Money::from_cents(1099);
        let rate = TipRate::from_bps(1500);
        let tip = amount.calculate_tip(rate);
        assert_eq!(tip.cents(), 165);
    }

    #[test]
    fn test_zero_tip_rate() {
        let amount = Money::from_cents(4890);
        let tip = amount.calculate_tip(TipRate::zero());
        assert!(tip.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_cents(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 897);
    }

    /// Critical test: $50.00 split three ways must reconstruct exactly.
    /// Naive division would lose 2 cents; largest-remainder must not.
    #[test]
    fn test_split_even_exact_reconstruction() {
        let fifty = Money::from_cents(5000);
        let shares = fifty.split_even(3);

        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].cents(), 1667);
        assert_eq!(shares[1].cents(), 1667);
        assert_eq!(shares[2].cents(), 1666);

        let sum: i64 = shares.iter().map(|s| s.cents()).sum();
        assert_eq!(sum, 5000);
    }

    #[test]
    fn test_split_even_no_remainder() {
        let shares = Money::from_cents(1000).split_even(4);
        assert!(shares.iter().all(|s| s.cents() == 250));
    }

    #[test]
    fn test_split_even_sums_exactly_for_many_inputs() {
        for total in [1, 7, 99, 1001, 4999, 123_456] {
            for ways in 2..=10u32 {
                let shares = Money::from_cents(total).split_even(ways);
                let sum: i64 = shares.iter().map(|s| s.cents()).sum();
                assert_eq!(sum, total, "total={total} ways={ways}");
                // No two shares differ by more than one cent
                let max = shares.iter().map(|s| s.cents()).max().unwrap();
                let min = shares.iter().map(|s| s.cents()).min().unwrap();
                assert!(max - min <= 1);
            }
        }
    }

    #[test]
    fn test_allocate_proportional() {
        let tip = Money::from_cents(500);
        let shares = tip.allocate(&[2000, 1000]);
        assert_eq!(shares[0].cents(), 333);
        assert_eq!(shares[1].cents(), 167);
    }

    #[test]
    fn test_allocate_sums_exactly() {
        let tip = Money::from_cents(1001);
        let shares = tip.allocate(&[3333, 3333, 3334]);
        let sum: i64 = shares.iter().map(|s| s.cents()).sum();
        assert_eq!(sum, 1001);
    }

    #[test]
    fn test_allocate_zero_weights() {
        let tip = Money::from_cents(500);
        let shares = tip.allocate(&[0, 0]);
        assert!(shares.iter().all(|s| s.is_zero()));
    }

    #[test]
    fn test_allocate_empty() {
        assert!(Money::from_cents(500).allocate(&[]).is_empty());
    }
}
