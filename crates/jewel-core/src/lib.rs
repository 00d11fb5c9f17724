//! # jewel-core: Pure Valuation Logic
//!
//! This crate is the **heart** of the jewelry admin tool's quoting flow. It
//! turns a piece's gold weight and its set stones into a priced valuation,
//! and renders that valuation as an auditable formula.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Jewel Valuation Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Admin UI (calculator views)                  │   │
//! │  │    Size / Qty edits ──► Live preview ──► PDF ──► Clipboard      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ jewel-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────┐    │   │
//! │  │   │ conversion │ │ supplier │ │  engine  │ │   formula    │    │   │
//! │  │   │  mm ↔ ct   │ │  tiered  │ │ Valuation│ │ preview/pdf/ │    │   │
//! │  │   │            │ │          │ │ Worksheet│ │ html         │    │   │
//! │  │   └────────────┘ └──────────┘ └──────────┘ └──────────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO NETWORK • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              jewel-catalog (Configuration Layer)                │   │
//! │  │        valuation.toml, supplier catalogs, env overrides         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`conversion`] - Stone diameter ↔ carat reference table
//! - [`supplier`] - Supplier price catalogs (nearest-neighbor + fallback)
//! - [`tiered`] - Carat-bracket step pricing
//! - [`engine`] - Price composition, gold value, totals
//! - [`worksheet`] - Editable stone list that stays fully recomputed
//! - [`formula`] - Audit formula for preview, PDF and HTML export
//! - [`money`] - Display rounding for money and carats
//! - [`sanitize`] - Coercion of out-of-domain numeric input
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same `(stone, catalog, context)` = same output
//! 2. **No I/O**: catalogs and quotes arrive as already-resolved values
//! 3. **Fixed Multiplication Order**: `base × ct × currency × margin`
//! 4. **Format, Never Recompute**: every export reads one [`Valuation`]
//!
//! ## Example Usage
//!
//! ```rust
//! use jewel_core::{
//!     ConversionTable, Formula, PriceSource, PricingContext, PricingEngine, Stone,
//!     SupplierPriceEntry,
//! };
//!
//! let table = ConversionTable::standard();
//! let entries = vec![SupplierPriceEntry::new(3.0, 525.0)];
//! let source = PriceSource::supplier_table(&entries, None);
//! let context = PricingContext::new(400.0, 1.1, 1.0);
//!
//! let engine = PricingEngine::new(&table, source, &context);
//! let valuation = engine.value_piece(5.0, &[Stone::new(2, 3.0)]);
//!
//! let formula = Formula::from_valuation(&valuation);
//! assert_eq!(formula.to_plain(), "(5.00 × 440.00) + (2 × 57.75) = 2315.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod conversion;
pub mod engine;
pub mod error;
pub mod formula;
pub mod money;
pub mod sanitize;
pub mod supplier;
pub mod tiered;
pub mod worksheet;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use jewel_core::Formula` instead of
// `use jewel_core::formula::Formula`

pub use conversion::{ConversionEntry, ConversionTable};
pub use engine::{
    compute_gold_value, compute_stone_line, compute_total, GoldValue, PriceSource, PricingContext, PricingEngine,
    PricingMode, Stone, StoneLine, Valuation, ValuedStone,
};
pub use error::{CoreError, CoreResult};
pub use formula::{ExportSurface, Formula};
pub use money::Money;
pub use supplier::{get_price, Supplier, SupplierPriceEntry, SupplierRegistry};
pub use tiered::{get_price_per_ct, TieredPriceTable};
pub use worksheet::{StoneLineItem, Worksheet};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper carat bound (inclusive) of the first pricing tier.
pub const TIER1_MAX_CT: f64 = 0.07;

/// Upper carat bound (inclusive) of the second pricing tier.
pub const TIER2_MAX_CT: f64 = 0.725;

/// Decimal places kept for carat weights.
pub const CARAT_DECIMALS: u32 = 3;

/// Decimal places used for every displayed money amount.
pub const MONEY_DECIMALS: u32 = 2;
