//! # Tiered Pricing
//!
//! Flat price-per-carat by weight bracket. Used by the quick-quote flow
//! instead of a supplier catalog.
//!
//! ```text
//!   ct:   0 ───── 0.07 ─────────── 0.725 ─────────────►
//!         │ tier1 ]│     tier2      ]│      tier3
//! ```
//! Boundary values belong to the lower bracket.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::sanitize;
use crate::{TIER1_MAX_CT, TIER2_MAX_CT};

/// Three prices per carat, one per weight bracket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct TieredPriceTable {
    pub tier1: f64,
    pub tier2: f64,
    pub tier3: f64,
}

impl TieredPriceTable {
    pub const fn new(tier1: f64, tier2: f64, tier3: f64) -> Self {
        TieredPriceTable {
            tier1,
            tier2,
            tier3,
        }
    }

    /// True when every bracket is priced at 0.
    pub fn is_empty(&self) -> bool {
        [self.tier1, self.tier2, self.tier3]
            .iter()
            .all(|&price| sanitize::non_negative(price) == 0.0)
    }
}

/// Price per carat for a stone of weight `ct`.
///
/// ## Example
/// ```rust
/// use jewel_core::{get_price_per_ct, TieredPriceTable};
///
/// let tiers = TieredPriceTable::new(100.0, 200.0, 300.0);
/// assert_eq!(get_price_per_ct(0.07, &tiers), 100.0);
/// assert_eq!(get_price_per_ct(0.5, &tiers), 200.0);
/// ```
pub fn get_price_per_ct(ct: f64, tiers: &TieredPriceTable) -> f64 {
    let price = if ct <= TIER1_MAX_CT {
        tiers.tier1
    } else if ct <= TIER2_MAX_CT {
        tiers.tier2
    } else {
        tiers.tier3
    };
    sanitize::non_negative(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIERS: TieredPriceTable = TieredPriceTable::new(100.0, 200.0, 300.0);

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(get_price_per_ct(0.07, &TIERS), 100.0);
        assert_eq!(get_price_per_ct(0.0700001, &TIERS), 200.0);
        assert_eq!(get_price_per_ct(0.725, &TIERS), 200.0);
        assert_eq!(get_price_per_ct(0.7251, &TIERS), 300.0);
    }

    #[test]
    fn test_zero_weight_uses_first_tier() {
        assert_eq!(get_price_per_ct(0.0, &TIERS), 100.0);
    }

    #[test]
    fn test_large_stones() {
        assert_eq!(get_price_per_ct(3.0, &TIERS), 300.0);
    }

    #[test]
    fn test_invalid_tier_price_is_zero() {
        let tiers = TieredPriceTable::new(f64::NAN, -5.0, 300.0);
        assert_eq!(get_price_per_ct(0.01, &tiers), 0.0);
        assert_eq!(get_price_per_ct(0.5, &tiers), 0.0);
    }

    #[test]
    fn test_is_empty() {
        assert!(TieredPriceTable::default().is_empty());
        assert!(!TIERS.is_empty());
    }
}
