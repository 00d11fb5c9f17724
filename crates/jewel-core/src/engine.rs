//! # Pricing Engine
//!
//! Composes the conversion table, a price source and the margin/currency
//! multipliers into per-stone lines, a gold value and a piece total.
//!
//! ## Computation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     One Stone Line (order is fixed)                     │
//! │                                                                         │
//! │  size_mm ──► mm_to_ct ──► ct                                            │
//! │     │                      │                                            │
//! │     └──► PriceSource ◄─────┘   SupplierTable uses size_mm               │
//! │              │                 Tiered uses ct                           │
//! │              ▼                                                          │
//! │  step1          = base_price × ct                                       │
//! │  step2          = step1 × currency_multiplier                           │
//! │  price_per_unit = step2 × margin                                        │
//! │  total_price    = price_per_unit × quantity                             │
//! │                                                                         │
//! │  f64 products are order-sensitive: reordering these steps changes the  │
//! │  last bits and can move a printed cent.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Piece Total                                │
//! │                                                                         │
//! │  effective_gold_price = gold_price_per_gram × margin                    │
//! │  gold_value           = weight_grams × effective_gold_price             │
//! │  total                = gold_value + Σ total_price (insertion order)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is total: out-of-domain numbers are coerced by
//! [`crate::sanitize`] and no result is ever NaN or infinite.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::conversion::ConversionTable;
use crate::sanitize;
use crate::supplier::{get_price, SupplierPriceEntry, SupplierRegistry};
use crate::tiered::{get_price_per_ct, TieredPriceTable};

// =============================================================================
// Pricing Mode & Source
// =============================================================================

/// Which pricing strategy a calculator view is configured for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Nearest-neighbor lookup in a supplier catalog, by diameter.
    #[default]
    SupplierTable,
    /// Carat-bracket step pricing.
    Tiered,
}

/// A resolved base-price strategy, borrowing immutable reference data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceSource<'a> {
    SupplierTable {
        entries: &'a [SupplierPriceEntry],
        fallback: Option<&'a [SupplierPriceEntry]>,
    },
    Tiered(&'a TieredPriceTable),
}

impl<'a> PriceSource<'a> {
    pub fn supplier_table(
        entries: &'a [SupplierPriceEntry],
        fallback: Option<&'a [SupplierPriceEntry]>,
    ) -> Self {
        PriceSource::SupplierTable { entries, fallback }
    }

    pub fn tiered(tiers: &'a TieredPriceTable) -> Self {
        PriceSource::Tiered(tiers)
    }

    /// Resolves the source a configured `mode` asks for.
    ///
    /// The mode is always explicit; nothing is inferred from which data
    /// happens to be present.
    pub fn for_mode(
        mode: PricingMode,
        registry: &'a SupplierRegistry,
        tiers: &'a TieredPriceTable,
        context: &PricingContext,
    ) -> Self {
        match mode {
            PricingMode::SupplierTable => {
                let (entries, fallback) = registry.resolve(
                    &context.selected_supplier_id,
                    context.fallback_supplier_id.as_deref(),
                );
                PriceSource::SupplierTable { entries, fallback }
            }
            PricingMode::Tiered => PriceSource::Tiered(tiers),
        }
    }

    pub fn mode(&self) -> PricingMode {
        match self {
            PriceSource::SupplierTable { .. } => PricingMode::SupplierTable,
            PriceSource::Tiered(_) => PricingMode::Tiered,
        }
    }

    /// Base price per carat for a stone of the given size and weight.
    pub fn base_price(&self, size_mm: f64, ct: f64) -> f64 {
        match self {
            PriceSource::SupplierTable { entries, fallback } => get_price(size_mm, entries, *fallback),
            PriceSource::Tiered(tiers) => get_price_per_ct(ct, tiers),
        }
    }
}

// =============================================================================
// Pricing Context
// =============================================================================

/// The current calculator inputs that are not per-stone.
///
/// A plain value: rebuilt or patched whenever an input changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingContext {
    pub gold_price_per_gram: f64,
    pub margin_multiplier: f64,
    /// Converts the supplier's price unit into the operating currency.
    pub currency_multiplier: f64,
    pub selected_supplier_id: String,
    pub fallback_supplier_id: Option<String>,
}

impl PricingContext {
    pub fn new(gold_price_per_gram: f64, margin_multiplier: f64, currency_multiplier: f64) -> Self {
        PricingContext {
            gold_price_per_gram,
            margin_multiplier,
            currency_multiplier,
            selected_supplier_id: String::new(),
            fallback_supplier_id: None,
        }
    }

    pub fn with_supplier(mut self, selected: impl Into<String>, fallback: Option<String>) -> Self {
        self.selected_supplier_id = selected.into();
        self.fallback_supplier_id = fallback;
        self
    }
}

impl Default for PricingContext {
    fn default() -> Self {
        PricingContext::new(0.0, 1.0, 1.0)
    }
}

// =============================================================================
// Stone Lines
// =============================================================================

/// Per-stone input: how many, and how large.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Stone {
    pub quantity: u32,
    pub size_mm: f64,
}

impl Stone {
    pub fn new(quantity: u32, size_mm: f64) -> Self {
        Stone { quantity, size_mm }
    }

    /// Builds a stone from raw form values, coercing them.
    pub fn from_raw(quantity: f64, size_mm: f64) -> Self {
        Stone {
            quantity: sanitize::quantity(quantity),
            size_mm: sanitize::non_negative(size_mm),
        }
    }
}

/// Derived values for one stone line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoneLine {
    pub ct: f64,
    pub price_per_unit: f64,
    pub total_price: f64,
}

/// Prices one stone line.
///
/// ## Example
/// ```rust
/// use jewel_core::engine::compute_stone_line;
/// use jewel_core::{ConversionTable, PriceSource, Stone, SupplierPriceEntry};
///
/// let table = ConversionTable::standard();
/// let rows = [SupplierPriceEntry::new(3.0, 525.0)];
/// let source = PriceSource::supplier_table(&rows, None);
///
/// let line = compute_stone_line(&table, &Stone::new(2, 3.0), &source, 1.1, 1.0);
/// assert_eq!(line.ct, 0.1);
/// assert!((line.total_price - 115.5).abs() < 1e-9);
/// ```
pub fn compute_stone_line(
    table: &ConversionTable,
    stone: &Stone,
    source: &PriceSource<'_>,
    margin: f64,
    currency_multiplier: f64,
) -> StoneLine {
    let size_mm = sanitize::non_negative(stone.size_mm);
    let quantity = sanitize::quantity_count(stone.quantity);
    let margin = sanitize::multiplier(margin);
    let currency_multiplier = sanitize::multiplier(currency_multiplier);

    let ct = table.mm_to_ct(size_mm);
    let base_price = source.base_price(size_mm, ct);

    let step1 = base_price * ct;
    let step2 = step1 * currency_multiplier;
    let price_per_unit = sanitize::finite_or_zero(step2 * margin);
    let total_price = sanitize::finite_or_zero(price_per_unit * quantity as f64);

    StoneLine {
        ct,
        price_per_unit,
        total_price,
    }
}

// =============================================================================
// Gold & Totals
// =============================================================================

/// Gold part of a valuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GoldValue {
    pub weight_grams: f64,
    /// Displayed on its own, so it is computed and kept before the product.
    pub effective_gold_price: f64,
    pub gold_value: f64,
}

/// Values the gold by weight.
pub fn compute_gold_value(weight_grams: f64, price_per_gram: f64, margin: f64) -> GoldValue {
    let weight_grams = sanitize::non_negative(weight_grams);
    let price_per_gram = sanitize::non_negative(price_per_gram);
    let margin = sanitize::multiplier(margin);

    let effective_gold_price = sanitize::finite_or_zero(price_per_gram * margin);
    let gold_value = sanitize::finite_or_zero(weight_grams * effective_gold_price);

    GoldValue {
        weight_grams,
        effective_gold_price,
        gold_value,
    }
}

/// `gold_value + Σ total_price`, summed in the order given.
pub fn compute_total<'a>(gold_value: f64, lines: impl IntoIterator<Item = &'a StoneLine>) -> f64 {
    let total = lines
        .into_iter()
        .fold(sanitize::non_negative(gold_value), |acc, line| acc + line.total_price);
    sanitize::finite_or_zero(total)
}

// =============================================================================
// Valuation
// =============================================================================

/// One priced stone inside a [`Valuation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ValuedStone {
    pub quantity: u32,
    pub size_mm: f64,
    pub ct: f64,
    pub price_per_unit: f64,
    pub total_price: f64,
}

impl ValuedStone {
    pub fn new(stone: &Stone, line: StoneLine) -> Self {
        ValuedStone {
            quantity: sanitize::quantity_count(stone.quantity),
            size_mm: sanitize::non_negative(stone.size_mm),
            ct: line.ct,
            price_per_unit: line.price_per_unit,
            total_price: line.total_price,
        }
    }

    pub fn line(&self) -> StoneLine {
        StoneLine {
            ct: self.ct,
            price_per_unit: self.price_per_unit,
            total_price: self.total_price,
        }
    }
}

/// The single result every export surface reads from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub gold: GoldValue,
    pub stones: Vec<ValuedStone>,
    pub total: f64,
}

impl Valuation {
    /// Assembles a valuation; the total is derived here and nowhere else.
    pub fn new(gold: GoldValue, stones: Vec<ValuedStone>) -> Self {
        let lines: Vec<StoneLine> = stones.iter().map(ValuedStone::line).collect();
        let total = compute_total(gold.gold_value, &lines);
        Valuation {
            gold,
            stones,
            total,
        }
    }

    /// Sum of the stone lines only.
    pub fn stones_total(&self) -> f64 {
        self.stones.iter().fold(0.0, |acc, s| acc + s.total_price)
    }
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// The engine bound to one set of reference data and one context.
///
/// Cheap to build: it only borrows. Build a new one whenever the context
/// changes.
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine<'a> {
    table: &'a ConversionTable,
    source: PriceSource<'a>,
    gold_price_per_gram: f64,
    margin: f64,
    currency_multiplier: f64,
}

impl<'a> PricingEngine<'a> {
    pub fn new(table: &'a ConversionTable, source: PriceSource<'a>, context: &PricingContext) -> Self {
        PricingEngine {
            table,
            source,
            gold_price_per_gram: context.gold_price_per_gram,
            margin: context.margin_multiplier,
            currency_multiplier: context.currency_multiplier,
        }
    }

    pub fn table(&self) -> &'a ConversionTable {
        self.table
    }

    pub fn source(&self) -> PriceSource<'a> {
        self.source
    }

    pub fn stone_line(&self, stone: &Stone) -> StoneLine {
        compute_stone_line(
            self.table,
            stone,
            &self.source,
            self.margin,
            self.currency_multiplier,
        )
    }

    pub fn gold_value(&self, weight_grams: f64) -> GoldValue {
        compute_gold_value(weight_grams, self.gold_price_per_gram, self.margin)
    }

    /// Values a piece: gold by weight plus every stone, in order.
    pub fn value_piece(&self, weight_grams: f64, stones: &[Stone]) -> Valuation {
        let gold = self.gold_value(weight_grams);
        let valued = stones
            .iter()
            .map(|stone| ValuedStone::new(stone, self.stone_line(stone)))
            .collect();
        let valuation = Valuation::new(gold, valued);

        debug!(
            mode = ?self.source.mode(),
            stones = stones.len(),
            total = valuation.total,
            "valued piece"
        );
        valuation
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
