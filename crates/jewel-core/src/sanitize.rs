//! # Sanitize Module
//!
//! Coercion of out-of-domain numeric input to safe defaults.
//!
//! ## Coercion Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      InvalidNumericInput                                │
//! │                                                                         │
//! │  KIND              BAD INPUT                      BECOMES               │
//! │  ───────────────   ────────────────────────────   ───────               │
//! │  size / price      NaN, ±∞, negative              0                     │
//! │  quantity          NaN, ±∞, < 1, fractional       1                     │
//! │  multiplier        NaN, ±∞, negative              1                     │
//! │  computed amount   NaN, ±∞, |x| > MAX_AMOUNT      0                     │
//! │                                                                         │
//! │  Never surfaced as an error: the calculator keeps rendering while the  │
//! │  user is halfway through typing "1." or "-".                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

/// Quantity used when the entered value is not a positive integer.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Multiplier used when the entered margin/currency factor is unusable.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Largest money amount the engine emits. Larger computed amounts become 0,
/// which keeps every amount within `Money`'s cent range.
pub const MAX_AMOUNT: f64 = 1.0e15;

/// Coerces a size, weight or price to a finite non-negative value.
///
/// ## Example
/// ```rust
/// use jewel_core::sanitize::non_negative;
///
/// assert_eq!(non_negative(3.5), 3.5);
/// assert_eq!(non_negative(-2.0), 0.0);
/// assert_eq!(non_negative(f64::NAN), 0.0);
/// ```
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        debug!(value, "coercing invalid amount to 0");
        0.0
    }
}

/// Coerces a margin or currency multiplier.
///
/// Zero is a legitimate multiplier and is kept.
pub fn multiplier(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        debug!(value, "coercing invalid multiplier to 1");
        DEFAULT_MULTIPLIER
    }
}

/// Coerces a raw quantity to an integer ≥ 1.
///
/// ## Example
/// ```rust
/// use jewel_core::sanitize::quantity;
///
/// assert_eq!(quantity(3.0), 3);
/// assert_eq!(quantity(0.0), 1);
/// assert_eq!(quantity(2.5), 1);
/// ```
pub fn quantity(value: f64) -> u32 {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        value as u32
    } else {
        debug!(value, "coercing invalid quantity to 1");
        DEFAULT_QUANTITY
    }
}

/// Clamps an already-integral quantity to ≥ 1.
#[inline]
pub fn quantity_count(value: u32) -> u32 {
    value.max(DEFAULT_QUANTITY)
}

/// Replaces a non-finite or out-of-range computed amount with 0.
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value.abs() <= MAX_AMOUNT {
        value
    } else {
        debug!(value, "coercing unrepresentable amount to 0");
        0.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(0.0), 0.0);
        assert_eq!(non_negative(4.8), 4.8);
        assert_eq!(non_negative(-0.1), 0.0);
        assert_eq!(non_negative(f64::INFINITY), 0.0);
        assert_eq!(non_negative(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_multiplier() {
        assert_eq!(multiplier(1.1), 1.1);
        assert_eq!(multiplier(0.0), 0.0);
        assert_eq!(multiplier(-1.0), 1.0);
        assert_eq!(multiplier(f64::NAN), 1.0);
    }

    #[test]
    fn test_quantity() {
        assert_eq!(quantity(1.0), 1);
        assert_eq!(quantity(12.0), 12);
        assert_eq!(quantity(-3.0), 1);
        assert_eq!(quantity(0.5), 1);
        assert_eq!(quantity(f64::NAN), 1);
        assert_eq!(quantity_count(0), 1);
        assert_eq!(quantity_count(7), 7);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(2.0), 2.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(MAX_AMOUNT), MAX_AMOUNT);
        assert_eq!(finite_or_zero(1e300), 0.0);
    }
}
