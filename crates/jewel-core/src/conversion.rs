//! # Conversion Module
//!
//! Round-brilliant reference table mapping stone diameter (mm) to weight (ct).
//!
//! ## Lookup Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  mm_to_ct: LINEAR INTERPOLATION (physical conversion)                   │
//! │                                                                         │
//! │     ct ▲                    ● hi (1.3mm, 0.010ct)                       │
//! │        │                 ╱                                              │
//! │        │              ○  ← 1.15mm → 0.0075 → 0.008 (3 dp, half-up)      │
//! │        │           ╱                                                    │
//! │        │        ● lo (1.0mm, 0.005ct)                                   │
//! │        └──────────────────────────────► mm                              │
//! │                                                                         │
//! │  Below the first row → first row's ct. Above the last → last row's ct. │
//! │  mm ≤ 0 → 0.                                                            │
//! │                                                                         │
//! │  ct_to_mm: interpolated inverse over the same rows, 2 dp half-up.       │
//! │  Where several rows share a weight, the smallest diameter wins.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is immutable configuration: build it once (usually with
//! [`ConversionTable::standard`]) and pass a reference into the engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{round_ct, round_half_up};
use crate::sanitize;

/// Decimal places for diameters returned by the inverse lookup.
const MM_DECIMALS: u32 = 2;

/// Decimal places for points (1/100 ct).
const POINTS_DECIMALS: u32 = 1;

/// Round-brilliant reference rows as `(points, mm, ct)`.
const STANDARD_ROWS: &[(f64, f64, f64)] = &[
    (0.5, 1.0, 0.005),
    (1.0, 1.3, 0.01),
    (1.5, 1.5, 0.015),
    (2.0, 1.7, 0.02),
    (2.5, 1.8, 0.025),
    (3.0, 2.0, 0.03),
    (4.0, 2.2, 0.04),
    (5.0, 2.4, 0.05),
    (6.0, 2.5, 0.06),
    (7.0, 2.7, 0.07),
    (8.0, 2.8, 0.08),
    (9.0, 2.9, 0.09),
    (10.0, 3.0, 0.10),
    (11.0, 3.1, 0.11),
    (12.0, 3.2, 0.12),
    (14.0, 3.3, 0.14),
    (15.0, 3.4, 0.15),
    (17.0, 3.5, 0.17),
    (18.0, 3.6, 0.18),
    (20.0, 3.8, 0.20),
    (23.0, 3.9, 0.23),
    (25.0, 4.1, 0.25),
    (30.0, 4.3, 0.30),
    (33.0, 4.5, 0.33),
    (40.0, 4.8, 0.40),
    (50.0, 5.2, 0.50),
    (60.0, 5.5, 0.60),
    (70.0, 5.8, 0.70),
    (75.0, 5.9, 0.75),
    (80.0, 6.0, 0.80),
    (90.0, 6.3, 0.90),
    (100.0, 6.5, 1.00),
    (125.0, 6.8, 1.25),
    (150.0, 7.4, 1.50),
    (175.0, 7.8, 1.75),
    (200.0, 8.2, 2.00),
    (250.0, 8.8, 2.50),
    (300.0, 9.4, 3.00),
];

// =============================================================================
// Conversion Entry
// =============================================================================

/// One row of the reference table.
///
/// `points` and `ct` describe the same weight; both are kept because the UI
/// shows either unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConversionEntry {
    pub points: f64,
    pub mm: f64,
    pub ct: f64,
}

impl ConversionEntry {
    pub const fn new(points: f64, mm: f64, ct: f64) -> Self {
        ConversionEntry { points, mm, ct }
    }
}

// =============================================================================
// Conversion Table
// =============================================================================

/// Immutable mm ↔ ct table, ascending by `mm`.
///
/// ## Invariants
/// - At least one row
/// - `mm` strictly increasing
/// - `ct` non-decreasing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionTable {
    entries: Vec<ConversionEntry>,
}

impl ConversionTable {
    /// Builds a table from rows, checking the ordering invariants.
    ///
    /// ## Example
    /// ```rust
    /// use jewel_core::{ConversionEntry, ConversionTable};
    ///
    /// let table = ConversionTable::new(vec![
    ///     ConversionEntry::new(0.5, 1.0, 0.005),
    ///     ConversionEntry::new(1.0, 1.3, 0.01),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.mm_to_ct(1.15), 0.008);
    /// ```
    pub fn new(entries: Vec<ConversionEntry>) -> CoreResult<Self> {
        if entries.is_empty() {
            return Err(CoreError::InvalidConversionTable {
                row: 0,
                reason: "table has no rows".to_string(),
            });
        }

        for (row, entry) in entries.iter().enumerate() {
            let values = [entry.points, entry.mm, entry.ct];
            if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(CoreError::InvalidConversionTable {
                    row,
                    reason: "values must be finite and non-negative".to_string(),
                });
            }
        }

        for (row, pair) in entries.windows(2).enumerate() {
            if pair[1].mm <= pair[0].mm {
                return Err(CoreError::InvalidConversionTable {
                    row: row + 1,
                    reason: "mm must be strictly increasing".to_string(),
                });
            }
            if pair[1].ct < pair[0].ct {
                return Err(CoreError::InvalidConversionTable {
                    row: row + 1,
                    reason: "ct must not decrease as mm grows".to_string(),
                });
            }
        }

        Ok(ConversionTable { entries })
    }

    /// The embedded round-brilliant dataset.
    pub fn standard() -> Self {
        ConversionTable {
            entries: STANDARD_ROWS
                .iter()
                .map(|&(points, mm, ct)| ConversionEntry::new(points, mm, ct))
                .collect(),
        }
    }

    /// Rows in ascending mm order.
    pub fn entries(&self) -> &[ConversionEntry] {
        &self.entries
    }

    /// Converts a diameter to a carat weight (3 dp, half-up).
    pub fn mm_to_ct(&self, mm: f64) -> f64 {
        let mm = sanitize::non_negative(mm);
        if mm <= 0.0 {
            return 0.0;
        }

        let (first, last) = self.bounds();
        if mm <= first.mm {
            return round_ct(first.ct);
        }
        if mm >= last.mm {
            return round_ct(last.ct);
        }

        // first.mm < mm < last.mm, so 0 < idx < len
        let idx = self.entries.partition_point(|e| e.mm < mm);
        let hi = &self.entries[idx];
        if hi.mm == mm {
            return round_ct(hi.ct);
        }
        let lo = &self.entries[idx - 1];

        let ratio = (mm - lo.mm) / (hi.mm - lo.mm);
        round_ct(lo.ct + ratio * (hi.ct - lo.ct))
    }

    /// Converts a carat weight back to a diameter (2 dp, half-up).
    pub fn ct_to_mm(&self, ct: f64) -> f64 {
        let ct = sanitize::non_negative(ct);
        if ct <= 0.0 {
            return 0.0;
        }

        let idx = self.entries.partition_point(|e| e.ct < ct);
        if idx == self.entries.len() {
            return self.bounds().1.mm;
        }
        let hi = &self.entries[idx];
        if idx == 0 || hi.ct == ct {
            return hi.mm;
        }
        let lo = &self.entries[idx - 1];

        // lo.ct < ct < hi.ct, so the span is never zero here
        let ratio = (ct - lo.ct) / (hi.ct - lo.ct);
        round_half_up(lo.mm + ratio * (hi.mm - lo.mm), MM_DECIMALS)
    }

    /// Carat weight expressed in points (1 ct = 100 pts).
    pub fn ct_to_points(ct: f64) -> f64 {
        round_half_up(sanitize::non_negative(ct) * 100.0, POINTS_DECIMALS)
    }

    /// Diameter converted straight to points.
    pub fn mm_to_points(&self, mm: f64) -> f64 {
        Self::ct_to_points(self.mm_to_ct(mm))
    }

    fn bounds(&self) -> (&ConversionEntry, &ConversionEntry) {
        // non-empty by construction
        let first = &self.entries[0];
        let last = &self.entries[self.entries.len() - 1];
        (first, last)
    }
}

impl Default for ConversionTable {
    fn default() -> Self {
        ConversionTable::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
