//! # Money Module
//!
//! Display rounding for money amounts and carat weights.
//!
//! ## Two Rounding Conventions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  VALUE KIND        PRECISION   WHEN                                     │
//! │  ─────────────     ─────────   ─────────────────────────────────────    │
//! │  carat weight      3 dp        inside mm → ct conversion (stored)       │
//! │  money amount      2 dp        at display time only (never stored)      │
//! │                                                                         │
//! │  Both round half-up. Carats are rounded before pricing; money is only  │
//! │  rounded when printed.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Half-Up on Binary Floats
//! `0.0075` is stored as `0.00749999…` and an interpolated weight can land a
//! few ulps under a half. Scaled values are nudged by [`ROUNDING_TOLERANCE`]
//! before flooring so a value that *reads* as an exact half rounds up.
//!
//! ## Usage
//! ```rust
//! use jewel_core::money::{round_half_up, Money};
//!
//! assert_eq!(round_half_up(0.0075, 3), 0.008);
//! assert_eq!(Money::from_amount(2315.5000000000005).to_string(), "2315.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::{CARAT_DECIMALS, MONEY_DECIMALS};

/// Slack added to a scaled value before half-up flooring.
pub const ROUNDING_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds `value` half-up to `decimals` places.
///
/// Non-finite input yields `0.0`.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let factor = scale(decimals);
    scaled_half_up(value, decimals) as f64 / factor
}

/// Rounds a carat weight to the 3-decimal carat precision.
#[inline]
pub fn round_ct(ct: f64) -> f64 {
    round_half_up(ct, CARAT_DECIMALS)
}

/// Formats `value` half-up with exactly `decimals` fractional digits.
///
/// Works on the scaled integer so the printed digits never drift from the
/// rounded value (`format!("{:.2}")` rounds half-to-even on the binary value).
pub fn format_half_up(value: f64, decimals: u32) -> String {
    format_scaled(scaled_half_up(value, decimals), decimals)
}

/// Formats a carat weight with 3 decimals.
#[inline]
pub fn format_ct(ct: f64) -> String {
    format_half_up(ct, CARAT_DECIMALS)
}

fn scale(decimals: u32) -> f64 {
    10_f64.powi(decimals as i32)
}

fn scaled_half_up(value: f64, decimals: u32) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    (value * scale(decimals) + 0.5 + ROUNDING_TOLERANCE).floor() as i64
}

fn format_scaled(units: i64, decimals: u32) -> String {
    let sign = if units < 0 { "-" } else { "" };
    let units = units.unsigned_abs();
    if decimals == 0 {
        return format!("{}{}", sign, units);
    }
    let divisor = 10_u64.pow(decimals);
    format!(
        "{}{}.{:0width$}",
        sign,
        units / divisor,
        units % divisor,
        width = decimals as usize
    )
}

// =============================================================================
// Money Type
// =============================================================================

/// A money amount rounded for display, held in cents.
///
/// Engine arithmetic stays in `f64` so the multiplication order is
/// reproduced exactly; `Money` only exists at the formatting boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Rounds an engine amount half-up to cents.
    ///
    /// Amounts beyond the `i64` cent range saturate. The engine never emits
    /// them: its amounts are capped at [`crate::sanitize::MAX_AMOUNT`].
    ///
    /// ## Example
    /// ```rust
    /// use jewel_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(57.75000000000001).cents(), 5775);
    /// assert_eq!(Money::from_amount(0.125).cents(), 13);
    /// ```
    #[inline]
    pub fn from_amount(amount: f64) -> Self {
        Money(scaled_half_up(amount, MONEY_DECIMALS))
    }

    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the rounded amount as a float (for comparisons in exports).
    #[inline]
    pub fn amount(&self) -> f64 {
        self.0 as f64 / scale(MONEY_DECIMALS)
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
}

/// Plain `1234.50` rendering; currency symbols belong to the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_scaled(self.0, MONEY_DECIMALS))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_exact_half() {
        assert_eq!(round_half_up(0.0075, 3), 0.008);
        assert_eq!(round_half_up(0.0085, 3), 0.009);
        assert_eq!(round_half_up(2.5, 0), 3.0);
    }

    #[test]
    fn test_round_half_up_just_below_half() {
        // An interpolated 0.0075 that lost a few ulps still rounds up.
        let ct = 0.005 + ((1.15 - 1.0) / (1.3 - 1.0)) * (0.01 - 0.005);
        assert_eq!(round_ct(ct), 0.008);
        assert_eq!(round_half_up(0.00749, 3), 0.007);
    }

    #[test]
    fn test_round_non_finite() {
        assert_eq!(round_half_up(f64::NAN, 2), 0.0);
        assert_eq!(round_half_up(f64::INFINITY, 2), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_amount(2315.5).to_string(), "2315.50");
        assert_eq!(Money::from_amount(0.0).to_string(), "0.00");
        assert_eq!(Money::from_amount(0.004).to_string(), "0.00");
        assert_eq!(Money::from_amount(0.005).to_string(), "0.01");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_format_half_up() {
        assert_eq!(format_half_up(5.0, 2), "5.00");
        assert_eq!(format_half_up(440.00000000000006, 2), "440.00");
        assert_eq!(format_ct(0.1), "0.100");
        assert_eq!(format_half_up(7.0, 0), "7");
    }

    #[test]
    fn test_binding_matches_wire_shape() {
        assert_eq!(Money::inline(), "number");
        assert_eq!(serde_json::to_string(&Money::from_cents(11550)).unwrap(), "11550");
    }

    #[test]
    fn test_amount_roundtrips_cents() {
        let money = Money::from_amount(115.50000000000001);
        assert_eq!(money.cents(), 11550);
        assert!((money.amount() - 115.5).abs() < 1e-12);
        assert!(!money.is_zero());
        assert!(Money::default().is_zero());
    }
}
