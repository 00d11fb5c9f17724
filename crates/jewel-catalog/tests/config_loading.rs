//! # Config Loading
//!
//! File round-trips for the valuation config and JSON catalogs, then a
//! quote priced from what was loaded.

use jewel_catalog::{load_supplier_json, CatalogError, ValuationConfig};
use jewel_core::{
    ConversionTable, Formula, PriceSource, PricingEngine, PricingMode, Stone, Supplier,
    SupplierPriceEntry, TieredPriceTable,
};

fn sample_config() -> ValuationConfig {
    let mut config = ValuationConfig::default();
    config.pricing.gold_price_per_gram = 400.0;
    config.pricing.margin = 1.1;
    config.pricing.selected_supplier = "melee".to_string();
    config.pricing.fallback_supplier = Some("large".to_string());
    config.tiers = TieredPriceTable::new(800.0, 1200.0, 2500.0);
    config.suppliers = vec![
        Supplier::new(
            "melee",
            "Melee House",
            vec![
                SupplierPriceEntry::new(1.8, 300.0),
                SupplierPriceEntry::new(3.0, 525.0),
                SupplierPriceEntry::new(4.8, 610.0),
            ],
        ),
        Supplier::new(
            "large",
            "Large Stones Co.",
            vec![SupplierPriceEntry::new(6.0, 900.0)],
        ),
    ];
    config
}

#[test]
fn save_then_parse_preserves_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("valuation.toml");

    let config = sample_config();
    config.save(Some(path.clone())).unwrap();
    assert!(path.exists());

    let loaded = ValuationConfig::from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(loaded.validate().is_ok());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ValuationConfig::load_or_default(Some(dir.path().join("absent.toml")));
    assert_eq!(config.mode(), PricingMode::SupplierTable);
    assert!(config.suppliers.is_empty());
}

#[test]
fn invalid_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[pricing\nmargin = ").unwrap();
    assert!(matches!(
        ValuationConfig::from_file(&path),
        Err(CatalogError::TomlParse(_))
    ));

    let path = dir.path().join("duplicate.toml");
    std::fs::write(
        &path,
        r#"
        [[suppliers]]
        id = "melee"
        name = "A"
        entries = []

        [[suppliers]]
        id = "melee"
        name = "B"
        entries = []
        "#,
    )
    .unwrap();
    let parsed = ValuationConfig::from_file(&path).unwrap();
    assert!(matches!(
        parsed.validate(),
        Err(CatalogError::DuplicateSupplier(_))
    ));
}

#[test]
fn json_catalog_joins_the_registry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("round.json");
    std::fs::write(
        &path,
        r#"[{"mm": 5.0, "price": 700}, {"mm": 2.0, "price": 425}, {"mm": 3.0, "price": 525}]"#,
    )
    .unwrap();

    let mut config = ValuationConfig::default();
    config.pricing.gold_price_per_gram = 400.0;
    config.pricing.margin = 1.1;
    config.pricing.selected_supplier = "round".to_string();
    config
        .add_supplier(load_supplier_json(&path, "round", "Round Brilliants").unwrap())
        .unwrap();

    let table = ConversionTable::standard();
    let registry = config.registry();
    let context = config.context();
    let source = PriceSource::for_mode(config.mode(), &registry, &config.tiers, &context);
    let valuation = PricingEngine::new(&table, source, &context).value_piece(5.0, &[Stone::new(2, 3.0)]);

    assert_eq!(
        Formula::from_valuation(&valuation).to_plain(),
        "(5.00 × 440.00) + (2 × 57.75) = 2315.50"
    );
}

#[test]
fn missing_json_catalog_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_supplier_json(&dir.path().join("nope.json"), "x", "X").unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}
