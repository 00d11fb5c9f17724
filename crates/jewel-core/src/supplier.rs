//! # Supplier Module
//!
//! Named supplier price catalogs keyed by stone diameter.
//!
//! ## Lookup Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_price: NEAREST NEIGHBOR (commercial anchors, never interpolated)   │
//! │                                                                         │
//! │  primary:   1.8 ─── 2.0 ─── … ─── 4.8                                   │
//! │                  ▲                    │                                 │
//! │             1.95 → 2.0 (0.05 < 0.15)  │ 6.0mm > max                     │
//! │                                       ▼                                 │
//! │  fallback:              5.0 ─── 6.0 ─── 7.0 ─── 8.0                     │
//! │                                  ▲                                      │
//! │                                  └── priced here, single level only     │
//! │                                                                         │
//! │  mm ≤ 0          → 0                                                    │
//! │  empty primary   → fallback (or 0)                                      │
//! │  mm > max + fb   → fallback                                             │
//! │  mm ≤ min        → min row's price                                      │
//! │  mm ≥ max        → max row's price                                      │
//! │  otherwise       → closest row, ties to the first in mm order           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::sanitize;

// =============================================================================
// Supplier Price Entry
// =============================================================================

/// One `{mm, price}` row of a supplier catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupplierPriceEntry {
    pub mm: f64,
    /// Base price per carat, in the supplier's currency.
    pub price: f64,
}

impl SupplierPriceEntry {
    pub const fn new(mm: f64, price: f64) -> Self {
        SupplierPriceEntry { mm, price }
    }
}

// =============================================================================
// Supplier
// =============================================================================

/// An immutable named catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub entries: Vec<SupplierPriceEntry>,
}

impl Supplier {
    pub fn new(id: impl Into<String>, name: impl Into<String>, entries: Vec<SupplierPriceEntry>) -> Self {
        Supplier {
            id: id.into(),
            name: name.into(),
            entries,
        }
    }

    /// Largest diameter this catalog prices, if any.
    pub fn max_mm(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.mm).max_by(f64::total_cmp)
    }

    /// Looks up a base price, optionally chaining to `fallback`.
    pub fn price_for(&self, mm: f64, fallback: Option<&Supplier>) -> f64 {
        get_price(mm, &self.entries, fallback.map(|f| f.entries.as_slice()))
    }
}

// =============================================================================
// Price Lookup
// =============================================================================

/// Nearest-neighbor price lookup with single-level fallback.
///
/// ## Example
/// ```rust
/// use jewel_core::{get_price, SupplierPriceEntry};
///
/// let rows = [SupplierPriceEntry::new(1.8, 300.0), SupplierPriceEntry::new(2.0, 425.0)];
/// assert_eq!(get_price(1.95, &rows, None), 425.0);
/// ```
pub fn get_price(
    mm: f64,
    entries: &[SupplierPriceEntry],
    fallback: Option<&[SupplierPriceEntry]>,
) -> f64 {
    let mm = sanitize::non_negative(mm);
    if mm <= 0.0 {
        return 0.0;
    }

    if entries.is_empty() {
        return match fallback {
            Some(fallback) => {
                debug!(mm, "primary catalog empty, pricing from fallback");
                get_price(mm, fallback, None)
            }
            None => 0.0,
        };
    }

    let mut sorted: Vec<&SupplierPriceEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.mm.total_cmp(&b.mm));

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    if let Some(fallback) = fallback {
        if mm > max.mm {
            debug!(mm, max_mm = max.mm, "size beyond primary catalog, pricing from fallback");
            return get_price(mm, fallback, None);
        }
    }

    if mm <= min.mm {
        return sanitize::non_negative(min.price);
    }
    if mm >= max.mm {
        return sanitize::non_negative(max.price);
    }

    let mut nearest = min;
    let mut best = (mm - min.mm).abs();
    for &entry in &sorted[1..] {
        let distance = (mm - entry.mm).abs();
        if distance < best {
            best = distance;
            nearest = entry;
        }
    }
    sanitize::non_negative(nearest.price)
}

// =============================================================================
// Supplier Registry
// =============================================================================

/// All configured supplier catalogs, keyed by id.
///
/// Built once from configuration and shared read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierRegistry {
    suppliers: BTreeMap<String, Supplier>,
}

impl SupplierRegistry {
    /// Builds a registry. A later supplier with a repeated id replaces the
    /// earlier one; the configuration layer rejects duplicates before this.
    pub fn new(suppliers: impl IntoIterator<Item = Supplier>) -> Self {
        SupplierRegistry {
            suppliers: suppliers
                .into_iter()
                .map(|supplier| (supplier.id.clone(), supplier))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.get(id)
    }

    /// Suppliers in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Supplier> {
        self.suppliers.values()
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Resolves the catalogs for a selected supplier and optional fallback.
    ///
    /// An unknown selected id resolves to an empty catalog so the affected
    /// stones price at 0. An unknown fallback id is ignored.
    pub fn resolve(
        &self,
        selected_id: &str,
        fallback_id: Option<&str>,
    ) -> (&[SupplierPriceEntry], Option<&[SupplierPriceEntry]>) {
        let primary: &[SupplierPriceEntry] = match self.get(selected_id) {
            Some(supplier) => supplier.entries.as_slice(),
            None => {
                warn!(supplier = selected_id, "selected supplier not found, stones price at 0");
                &[]
            }
        };

        let fallback = fallback_id.and_then(|id| {
            let found = self.get(id).map(|s| s.entries.as_slice());
            if found.is_none() {
                warn!(supplier = id, "fallback supplier not found, ignoring");
            }
            found
        });

        (primary, fallback)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
