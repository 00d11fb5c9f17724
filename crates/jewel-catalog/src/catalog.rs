//! # Supplier Catalogs
//!
//! Loading and checking supplier price tables.
//!
//! ## JSON Format
//! A catalog file is a bare array of rows, in any order:
//! ```json
//! [
//!   { "mm": 1.8, "price": 300 },
//!   { "mm": 2.0, "price": 425 }
//! ]
//! ```
//!
//! Malformed files are rejected at load time.

use std::path::Path;

use jewel_core::{Supplier, SupplierPriceEntry};
use tracing::info;

use crate::error::{CatalogError, CatalogResult};

/// Parses a JSON catalog and wraps it as a [`Supplier`].
pub fn parse_supplier_json(id: &str, name: &str, json: &str) -> CatalogResult<Supplier> {
    let entries: Vec<SupplierPriceEntry> = serde_json::from_str(json)?;
    validate_entries(id, &entries)?;
    Ok(Supplier::new(id, name, entries))
}

/// Reads a JSON catalog file.
pub fn load_supplier_json(path: &Path, id: &str, name: &str) -> CatalogResult<Supplier> {
    let contents = std::fs::read_to_string(path)?;
    let supplier = parse_supplier_json(id, name, &contents)?;
    info!(?path, supplier = id, rows = supplier.entries.len(), "Loaded supplier catalog");
    Ok(supplier)
}

/// Checks one catalog's rows.
///
/// ## Rules
/// - `mm` and `price` finite and non-negative
/// - no two rows with the same `mm`
///
/// An empty catalog is allowed; it prices every stone at 0.
pub fn validate_entries(supplier: &str, entries: &[SupplierPriceEntry]) -> CatalogResult<()> {
    let invalid = |row: usize, reason: &str| CatalogError::InvalidCatalog {
        supplier: supplier.to_string(),
        row,
        reason: reason.to_string(),
    };

    for (row, entry) in entries.iter().enumerate() {
        if !entry.mm.is_finite() || entry.mm < 0.0 {
            return Err(invalid(row, "mm must be finite and non-negative"));
        }
        if !entry.price.is_finite() || entry.price < 0.0 {
            return Err(invalid(row, "price must be finite and non-negative"));
        }
        if entries[..row].iter().any(|earlier| earlier.mm == entry.mm) {
            return Err(invalid(row, "duplicate mm"));
        }
    }
    Ok(())
}
