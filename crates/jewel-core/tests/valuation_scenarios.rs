//! # Valuation Scenarios
//!
//! End-to-end quotes through the public API: reference data → engine →
//! valuation → every export surface.

use jewel_core::{
    ConversionEntry, ConversionTable, ExportSurface, Formula, Money, PriceSource, PricingContext,
    PricingEngine, PricingMode, Stone, Supplier, SupplierPriceEntry, SupplierRegistry,
    TieredPriceTable, Worksheet,
};

// =============================================================================
// Fixtures
// =============================================================================

fn rows(pairs: &[(f64, f64)]) -> Vec<SupplierPriceEntry> {
    pairs
        .iter()
        .map(|&(mm, price)| SupplierPriceEntry::new(mm, price))
        .collect()
}

fn registry() -> SupplierRegistry {
    SupplierRegistry::new(vec![
        Supplier::new(
            "melee",
            "Melee House",
            rows(&[(1.0, 280.0), (1.8, 300.0), (2.0, 425.0), (3.0, 525.0), (4.8, 610.0)]),
        ),
        Supplier::new(
            "large",
            "Large Stones Co.",
            rows(&[(5.0, 700.0), (6.0, 900.0), (7.0, 1100.0), (8.0, 1400.0)]),
        ),
    ])
}

fn surface_total(rendered: &str) -> f64 {
    let formula = rendered
        .lines()
        .find(|line| line.contains("Formula:"))
        .unwrap_or(rendered);
    let formula = formula.split("</p>").next().unwrap_or(formula);
    let tail = formula.rsplit(" = ").next().expect("formula total");
    let digits: String = tail
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().expect("numeric total")
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn reference_quote_end_to_end() {
    let table = ConversionTable::standard();
    let registry = registry();
    let tiers = TieredPriceTable::default();
    let context = PricingContext::new(400.0, 1.1, 1.0).with_supplier("melee", None);

    let source = PriceSource::for_mode(PricingMode::SupplierTable, &registry, &tiers, &context);
    let engine = PricingEngine::new(&table, source, &context);
    let valuation = engine.value_piece(5.0, &[Stone::new(2, 3.0)]);

    assert_eq!(Money::from_amount(valuation.gold.effective_gold_price).to_string(), "440.00");
    assert_eq!(Money::from_amount(valuation.gold.gold_value).to_string(), "2200.00");

    let stone = &valuation.stones[0];
    assert_eq!(stone.ct, 0.1);
    assert_eq!(Money::from_amount(stone.price_per_unit).to_string(), "57.75");
    assert_eq!(Money::from_amount(stone.total_price).to_string(), "115.50");
    assert_eq!(Money::from_amount(valuation.total).to_string(), "2315.50");
}

#[test]
fn every_surface_embeds_the_engine_total() {
    let table = ConversionTable::standard();
    let registry = registry();
    let tiers = TieredPriceTable::default();
    let context = PricingContext::new(61.37, 1.35, 0.92).with_supplier("melee", Some("large".into()));

    let source = PriceSource::for_mode(PricingMode::SupplierTable, &registry, &tiers, &context);
    let engine = PricingEngine::new(&table, source, &context);

    let mut sheet = Worksheet::new(7.3);
    sheet.add_stone(Stone::new(12, 1.15), &engine);
    sheet.add_stone(Stone::new(1, 6.0), &engine);
    sheet.add_stone(Stone::new(3, 2.45), &engine);

    let valuation = sheet.valuate(&engine);
    let formula = Formula::from_valuation(&valuation);
    let expected = Money::from_amount(valuation.total).amount();

    for surface in [ExportSurface::Preview, ExportSurface::Pdf, ExportSurface::Html] {
        let rendered = formula.render(surface);
        assert_eq!(surface_total(&rendered), expected, "{:?}: {}", surface, rendered);
    }
}

#[test]
fn fallback_supplier_prices_large_stones() {
    let table = ConversionTable::standard();
    let registry = registry();
    let tiers = TieredPriceTable::default();

    let with_fallback =
        PricingContext::new(0.0, 1.0, 1.0).with_supplier("melee", Some("large".into()));
    let source = PriceSource::for_mode(PricingMode::SupplierTable, &registry, &tiers, &with_fallback);
    assert_eq!(source.base_price(6.0, table.mm_to_ct(6.0)), 900.0);

    let without = PricingContext::new(0.0, 1.0, 1.0).with_supplier("melee", None);
    let source = PriceSource::for_mode(PricingMode::SupplierTable, &registry, &tiers, &without);
    assert_eq!(source.base_price(6.0, table.mm_to_ct(6.0)), 610.0);
}

#[test]
fn tiered_mode_ignores_suppliers() {
    let table = ConversionTable::standard();
    let registry = registry();
    let tiers = TieredPriceTable::new(800.0, 1200.0, 2500.0);
    let context = PricingContext::new(0.0, 1.0, 1.0).with_supplier("melee", None);

    let source = PriceSource::for_mode(PricingMode::Tiered, &registry, &tiers, &context);
    let engine = PricingEngine::new(&table, source, &context);

    // 2.7mm → 0.07ct → tier1; 5.2mm → 0.50ct → tier2; 6.5mm → 1.00ct → tier3
    let valuation = engine.value_piece(
        0.0,
        &[Stone::new(1, 2.7), Stone::new(1, 5.2), Stone::new(1, 6.5)],
    );
    let per_unit: Vec<f64> = valuation.stones.iter().map(|s| s.price_per_unit).collect();
    assert!((per_unit[0] - 56.0).abs() < 1e-9);
    assert!((per_unit[1] - 600.0).abs() < 1e-9);
    assert!((per_unit[2] - 2500.0).abs() < 1e-9);
}

#[test]
fn unknown_supplier_prices_stones_at_zero() {
    let table = ConversionTable::standard();
    let registry = registry();
    let tiers = TieredPriceTable::default();
    let context = PricingContext::new(100.0, 1.0, 1.0).with_supplier("gone", None);

    let source = PriceSource::for_mode(PricingMode::SupplierTable, &registry, &tiers, &context);
    let engine = PricingEngine::new(&table, source, &context);
    let valuation = engine.value_piece(2.0, &[Stone::new(5, 3.0)]);

    assert_eq!(valuation.stones[0].total_price, 0.0);
    assert_eq!(Formula::from_valuation(&valuation).to_plain(), "(2.00 × 100.00) + (5 × 0.00) = 200.00");
}

#[test]
fn custom_table_interpolation() {
    let table = ConversionTable::new(vec![
        ConversionEntry::new(0.5, 1.0, 0.005),
        ConversionEntry::new(1.0, 1.3, 0.01),
    ])
    .unwrap();
    assert_eq!(table.mm_to_ct(1.15), 0.008);
}

#[test]
fn repeated_runs_are_identical() {
    let table = ConversionTable::standard();
    let registry = registry();
    let tiers = TieredPriceTable::default();
    let context = PricingContext::new(58.1, 1.27, 1.08).with_supplier("melee", Some("large".into()));
    let stones = [Stone::new(3, 1.45), Stone::new(1, 7.2), Stone::new(40, 1.05)];

    let run = || {
        let source = PriceSource::for_mode(PricingMode::SupplierTable, &registry, &tiers, &context);
        PricingEngine::new(&table, source, &context).value_piece(11.2, &stones)
    };

    let first = run();
    let second = run();
    assert_eq!(first.total.to_bits(), second.total.to_bits());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
