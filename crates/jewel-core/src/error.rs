//! # Error Types
//!
//! Domain-specific error types for jewel-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  jewel-core errors (this file)                                         │
//! │  └── CoreError        - Worksheet edits, reference-table shape         │
//! │                                                                         │
//! │  jewel-catalog errors (separate crate)                                 │
//! │  └── CatalogError     - Config files, supplier catalog validation      │
//! │                                                                         │
//! │  NOT errors (recovered in place):                                      │
//! │  ├── InvalidNumericInput → coerced to 0 (prices/sizes) or 1 (qty)      │
//! │  └── EmptyPriceSource    → price 0, visibly-zero line total            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing functions themselves are total: no variant below is ever
//! produced by `compute_stone_line`, `compute_gold_value` or `compute_total`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A worksheet edit referenced a stone line that does not exist.
    ///
    /// ## When This Occurs
    /// - The UI removed the line in another view before the edit landed
    /// - A stale id was kept after `Worksheet::clear`
    #[error("Stone line not found: {0}")]
    StoneNotFound(String),

    /// A conversion table violated its ordering invariants.
    ///
    /// ## When This Occurs
    /// - Empty dataset
    /// - `mm` not strictly increasing, or `ct` decreasing
    /// - Non-finite or negative values
    #[error("Invalid conversion table at row {row}: {reason}")]
    InvalidConversionTable { row: usize, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
