//! # Worksheet
//!
//! The editable list of stones on a piece being quoted.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI Action              Worksheet Method         Effect                 │
//! │  ─────────              ────────────────         ──────                 │
//! │                                                                         │
//! │  Add stone ────────────► add_stone() ──────────► push + price line      │
//! │  Edit quantity ────────► update_quantity() ────► reprice that line      │
//! │  Edit size ────────────► update_size() ────────► reprice that line      │
//! │  Remove stone ─────────► remove_stone() ───────► drop line              │
//! │  Supplier / margin /                                                    │
//! │  currency change ──────► reprice() ────────────► reprice every line     │
//! │  Preview / export ─────► valuate() ────────────► one shared Valuation   │
//! │                                                                         │
//! │  A line's derived fields are always rewritten together; no edit leaves │
//! │  ct, price_per_unit and total_price out of step.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::engine::{PricingEngine, Stone, StoneLine, Valuation, ValuedStone};
use crate::error::{CoreError, CoreResult};
use crate::sanitize;

// =============================================================================
// Stone Line Item
// =============================================================================

/// A stone row on the worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoneLineItem {
    /// UUID v4, assigned when the row is added.
    pub id: String,
    pub quantity: u32,
    pub size_mm: f64,
    pub ct: f64,
    pub price_per_unit: f64,
    pub total_price: f64,
}

impl StoneLineItem {
    fn new(stone: Stone, engine: &PricingEngine<'_>) -> Self {
        let mut item = StoneLineItem {
            id: Uuid::new_v4().to_string(),
            quantity: sanitize::quantity_count(stone.quantity),
            size_mm: sanitize::non_negative(stone.size_mm),
            ct: 0.0,
            price_per_unit: 0.0,
            total_price: 0.0,
        };
        item.recompute(engine);
        item
    }

    pub fn stone(&self) -> Stone {
        Stone::new(self.quantity, self.size_mm)
    }

    pub fn line(&self) -> StoneLine {
        StoneLine {
            ct: self.ct,
            price_per_unit: self.price_per_unit,
            total_price: self.total_price,
        }
    }

    fn recompute(&mut self, engine: &PricingEngine<'_>) {
        let line = engine.stone_line(&self.stone());
        self.ct = line.ct;
        self.price_per_unit = line.price_per_unit;
        self.total_price = line.total_price;
    }
}

// =============================================================================
// Worksheet
// =============================================================================

/// Gold weight plus the stones set in the piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Worksheet {
    pub weight_grams: f64,
    pub stones: Vec<StoneLineItem>,
}

impl Worksheet {
    pub fn new(weight_grams: f64) -> Self {
        Worksheet {
            weight_grams: sanitize::non_negative(weight_grams),
            stones: Vec::new(),
        }
    }

    pub fn set_weight(&mut self, weight_grams: f64) {
        self.weight_grams = sanitize::non_negative(weight_grams);
    }

    /// Adds a stone row and returns its id.
    pub fn add_stone(&mut self, stone: Stone, engine: &PricingEngine<'_>) -> String {
        let item = StoneLineItem::new(stone, engine);
        let id = item.id.clone();
        self.stones.push(item);
        id
    }

    /// Sets a row's quantity from a raw form value.
    pub fn update_quantity(
        &mut self,
        id: &str,
        quantity: f64,
        engine: &PricingEngine<'_>,
    ) -> CoreResult<()> {
        let item = self.find_mut(id)?;
        item.quantity = sanitize::quantity(quantity);
        item.recompute(engine);
        Ok(())
    }

    /// Sets a row's diameter from a raw form value.
    pub fn update_size(
        &mut self,
        id: &str,
        size_mm: f64,
        engine: &PricingEngine<'_>,
    ) -> CoreResult<()> {
        let item = self.find_mut(id)?;
        item.size_mm = sanitize::non_negative(size_mm);
        item.recompute(engine);
        Ok(())
    }

    pub fn remove_stone(&mut self, id: &str) -> CoreResult<()> {
        let initial_len = self.stones.len();
        self.stones.retain(|s| s.id != id);

        if self.stones.len() == initial_len {
            Err(CoreError::StoneNotFound(id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Reprices every row after a supplier, margin or currency change.
    pub fn reprice(&mut self, engine: &PricingEngine<'_>) {
        for item in &mut self.stones {
            item.recompute(engine);
        }
    }

    /// Reprices every row against `engine` and assembles the valuation that
    /// preview and exports share.
    pub fn valuate(&mut self, engine: &PricingEngine<'_>) -> Valuation {
        self.reprice(engine);
        let stones = self
            .stones
            .iter()
            .map(|item| ValuedStone::new(&item.stone(), item.line()))
            .collect();
        Valuation::new(engine.gold_value(self.weight_grams), stones)
    }

    pub fn get(&self, id: &str) -> Option<&StoneLineItem> {
        self.stones.iter().find(|s| s.id == id)
    }

    pub fn clear(&mut self) {
        self.stones.clear();
    }

    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// Total stone count across rows.
    pub fn total_quantity(&self) -> u64 {
        self.stones.iter().map(|s| u64::from(s.quantity)).sum()
    }

    fn find_mut(&mut self, id: &str) -> CoreResult<&mut StoneLineItem> {
        self.stones
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::StoneNotFound(id.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::ConversionTable;
    use crate::engine::{PriceSource, PricingContext};
    use crate::supplier::SupplierPriceEntry;

    fn catalog() -> Vec<SupplierPriceEntry> {
        vec![
            SupplierPriceEntry::new(2.0, 425.0),
            SupplierPriceEntry::new(3.0, 525.0),
        ]
    }

    #[test]
    fn test_add_stone_prices_immediately() {
        let table = ConversionTable::standard();
        let entries = catalog();
        let context = PricingContext::new(400.0, 1.1, 1.0);
        let engine = PricingEngine::new(&table, PriceSource::supplier_table(&entries, None), &context);

        let mut sheet = Worksheet::new(5.0);
        let id = sheet.add_stone(Stone::new(2, 3.0), &engine);

        let item = sheet.get(&id).unwrap();
        assert_eq!(item.ct, 0.1);
        assert!((item.total_price - 115.5).abs() < 1e-9);
        assert_eq!(sheet.total_quantity(), 2);
    }

    #[test]
    fn test_edits_recompute_whole_line() {
        let table = ConversionTable::standard();
        let entries = catalog();
        let context = PricingContext::new(400.0, 1.0, 1.0);
        let engine = PricingEngine::new(&table, PriceSource::supplier_table(&entries, None), &context);

        let mut sheet = Worksheet::new(0.0);
        let id = sheet.add_stone(Stone::new(1, 3.0), &engine);

        sheet.update_size(&id, 2.0, &engine).unwrap();
        let item = sheet.get(&id).unwrap();
        assert_eq!(item.ct, 0.03);
        assert!((item.price_per_unit - 425.0 * 0.03).abs() < 1e-9);

        sheet.update_quantity(&id, 4.0, &engine).unwrap();
        let item = sheet.get(&id).unwrap();
        assert_eq!(item.quantity, 4);
        assert!((item.total_price - item.price_per_unit * 4.0).abs() < 1e-12);

        sheet.update_quantity(&id, -3.0, &engine).unwrap();
        assert_eq!(sheet.get(&id).unwrap().quantity, 1);
    }

    #[test]
    fn test_reprice_after_margin_change() {
        let table = ConversionTable::standard();
        let entries = catalog();
        let source = PriceSource::supplier_table(&entries, None);

        let context = PricingContext::new(400.0, 1.0, 1.0);
        let engine = PricingEngine::new(&table, source, &context);
        let mut sheet = Worksheet::new(5.0);
        let id = sheet.add_stone(Stone::new(2, 3.0), &engine);

        let context = PricingContext::new(400.0, 1.1, 1.0);
        let engine = PricingEngine::new(&table, source, &context);
        sheet.reprice(&engine);

        assert!((sheet.get(&id).unwrap().price_per_unit - 57.75).abs() < 1e-9);
    }

    #[test]
    fn test_valuate_matches_engine() {
        let table = ConversionTable::standard();
        let entries = catalog();
        let context = PricingContext::new(400.0, 1.1, 1.0);
        let engine = PricingEngine::new(&table, PriceSource::supplier_table(&entries, None), &context);

        let mut sheet = Worksheet::new(5.0);
        sheet.add_stone(Stone::new(2, 3.0), &engine);
        sheet.add_stone(Stone::new(6, 2.0), &engine);

        let from_sheet = sheet.valuate(&engine);
        let direct = engine.value_piece(5.0, &[Stone::new(2, 3.0), Stone::new(6, 2.0)]);
        assert_eq!(from_sheet, direct);
    }

    #[test]
    fn test_unknown_id() {
        let table = ConversionTable::standard();
        let context = PricingContext::default();
        let engine = PricingEngine::new(&table, PriceSource::supplier_table(&[], None), &context);

        let mut sheet = Worksheet::new(1.0);
        assert_eq!(
            sheet.update_size("nope", 3.0, &engine),
            Err(CoreError::StoneNotFound("nope".to_string()))
        );
        assert!(sheet.remove_stone("nope").is_err());
    }

    #[test]
    fn test_remove_and_clear() {
        let table = ConversionTable::standard();
        let context = PricingContext::default();
        let engine = PricingEngine::new(&table, PriceSource::supplier_table(&[], None), &context);

        let mut sheet = Worksheet::new(1.0);
        let first = sheet.add_stone(Stone::new(1, 1.5), &engine);
        sheet.add_stone(Stone::new(1, 2.5), &engine);
        assert_eq!(sheet.len(), 2);

        sheet.remove_stone(&first).unwrap();
        assert_eq!(sheet.len(), 1);
        assert!(sheet.get(&first).is_none());

        sheet.clear();
        assert!(sheet.is_empty());
    }
}
