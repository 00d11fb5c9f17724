//! # jewel-catalog: Reference Data for Jewelry Valuation
//!
//! Loads the inputs [`jewel_core`] is handed but never reads itself.
//!
//! ## Module Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         jewel-catalog Crate                             │
//! │                                                                         │
//! │  ┌───────────────┐  ┌───────────────┐  ┌───────────────┐               │
//! │  │    config     │  │    catalog    │  │    error      │               │
//! │  │               │  │               │  │               │               │
//! │  │ ValuationCfg  │  │ JSON supplier │  │ CatalogError  │               │
//! │  │ TOML + env    │  │ catalogs      │  │               │               │
//! │  └───────┬───────┘  └───────┬───────┘  └───────────────┘               │
//! │          │                  │                                           │
//! │          └──────────┬───────┘                                           │
//! │                     ▼                                                   │
//! │     PricingContext + SupplierRegistry + TieredPriceTable                │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │               jewel_core::PricingEngine                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use jewel_catalog::ValuationConfig;
//! use jewel_core::{ConversionTable, Formula, PriceSource, PricingEngine, Stone};
//!
//! let config: ValuationConfig = toml::from_str(r#"
//!     [pricing]
//!     gold_price_per_gram = 400.0
//!     margin = 1.1
//!     selected_supplier = "melee"
//!
//!     [[suppliers]]
//!     id = "melee"
//!     name = "Melee House"
//!     entries = [{ mm = 3.0, price = 525.0 }]
//! "#).unwrap();
//!
//! let table = ConversionTable::standard();
//! let registry = config.registry();
//! let context = config.context();
//! let source = PriceSource::for_mode(config.mode(), &registry, &config.tiers, &context);
//!
//! let valuation = PricingEngine::new(&table, source, &context).value_piece(5.0, &[Stone::new(2, 3.0)]);
//! assert_eq!(Formula::from_valuation(&valuation).total.to_string(), "2315.50");
//! ```

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{load_supplier_json, parse_supplier_json, validate_entries};
pub use config::{parse_mode, PricingSettings, ValuationConfig, CONFIG_FILE_NAME};
pub use error::{CatalogError, CatalogResult};
