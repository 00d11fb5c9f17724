//! # Valuation Configuration
//!
//! Pricing settings, tier prices and supplier catalogs for the quote flow.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     JEWEL_GOLD_PRICE=61.5                                              │
//! │     JEWEL_SUPPLIER=melee                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/jewel-valuation/valuation.toml (Linux)                   │
//! │     ~/Library/Application Support/com.jewel.valuation/valuation.toml   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     margin 1, currency 1, supplier_table mode, no suppliers            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # valuation.toml
//! [pricing]
//! gold_price_per_gram = 61.5
//! margin = 1.35
//! currency_multiplier = 0.92
//! mode = "supplier_table"   # supplier_table | tiered
//! selected_supplier = "melee"
//! fallback_supplier = "large"
//!
//! [tiers]
//! tier1 = 800.0
//! tier2 = 1200.0
//! tier3 = 2500.0
//!
//! [[suppliers]]
//! id = "melee"
//! name = "Melee House"
//! entries = [{ mm = 1.8, price = 300.0 }, { mm = 2.0, price = 425.0 }]
//! ```

use std::path::{Path, PathBuf};

use jewel_core::{PricingContext, PricingMode, Supplier, SupplierRegistry, TieredPriceTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::validate_entries;
use crate::error::{CatalogError, CatalogResult};

/// File name used inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "valuation.toml";

// =============================================================================
// Pricing Settings
// =============================================================================

/// The non-per-stone calculator inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Gold price per gram, before margin.
    #[serde(default)]
    pub gold_price_per_gram: f64,

    /// Applied to gold and to every stone.
    #[serde(default = "default_multiplier")]
    pub margin: f64,

    /// Supplier price unit → operating currency.
    #[serde(default = "default_multiplier")]
    pub currency_multiplier: f64,

    #[serde(default)]
    pub mode: PricingMode,

    /// Supplier id used in `supplier_table` mode.
    #[serde(default)]
    pub selected_supplier: String,

    /// Consulted only for sizes beyond the selected catalog.
    #[serde(default)]
    pub fallback_supplier: Option<String>,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            gold_price_per_gram: 0.0,
            margin: default_multiplier(),
            currency_multiplier: default_multiplier(),
            mode: PricingMode::default(),
            selected_supplier: String::new(),
            fallback_supplier: None,
        }
    }
}

/// Parses a pricing mode name as written in env vars and CLI flags.
pub fn parse_mode(value: &str) -> Option<PricingMode> {
    match value.trim().to_lowercase().as_str() {
        "supplier_table" | "supplier" | "table" => Some(PricingMode::SupplierTable),
        "tiered" | "tier" | "tiers" => Some(PricingMode::Tiered),
        _ => None,
    }
}

// =============================================================================
// Main Valuation Configuration
// =============================================================================

/// Complete reference data for one calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub tiers: TieredPriceTable,

    #[serde(default)]
    pub suppliers: Vec<Supplier>,
}

impl ValuationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (valuation.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading valuation config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load valuation config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses one TOML file, without env overrides or validation.
    pub fn from_file(path: &Path) -> CatalogResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CatalogResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(CatalogError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Valuation config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        let pricing = &self.pricing;
        check_amount("gold_price_per_gram", pricing.gold_price_per_gram)?;
        check_amount("margin", pricing.margin)?;
        check_amount("currency_multiplier", pricing.currency_multiplier)?;
        check_amount("tiers.tier1", self.tiers.tier1)?;
        check_amount("tiers.tier2", self.tiers.tier2)?;
        check_amount("tiers.tier3", self.tiers.tier3)?;

        for (index, supplier) in self.suppliers.iter().enumerate() {
            if supplier.id.trim().is_empty() {
                return Err(CatalogError::InvalidConfig(format!(
                    "supplier #{} has an empty id",
                    index + 1
                )));
            }
            if self.suppliers[..index].iter().any(|s| s.id == supplier.id) {
                return Err(CatalogError::DuplicateSupplier(supplier.id.clone()));
            }
            validate_entries(&supplier.id, &supplier.entries)?;
        }

        // An unknown supplier or an all-zero tier table is not fatal: stones
        // price at 0.
        if pricing.mode == PricingMode::Tiered && self.tiers.is_empty() {
            warn!("Tiered pricing selected but every tier is priced at 0");
        }
        if pricing.mode == PricingMode::SupplierTable {
            let ids = [Some(pricing.selected_supplier.as_str()), pricing.fallback_supplier.as_deref()];
            for id in ids.into_iter().flatten() {
                if !id.is_empty() && self.supplier(id).is_none() {
                    warn!(supplier = id, "Configured supplier has no catalog");
                }
            }
        }

        Ok(())
    }

    /// Adds a catalog loaded from elsewhere (e.g. a JSON file).
    pub fn add_supplier(&mut self, supplier: Supplier) -> CatalogResult<()> {
        if self.supplier(&supplier.id).is_some() {
            return Err(CatalogError::DuplicateSupplier(supplier.id));
        }
        validate_entries(&supplier.id, &supplier.entries)?;
        self.suppliers.push(supplier);
        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `JEWEL_*` overrides from any key lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let number = |key: &str| -> Option<f64> {
            let raw = lookup(key)?;
            match raw.trim().parse::<f64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(key, value = %raw, "Ignoring non-numeric override");
                    None
                }
            }
        };

        if let Some(price) = number("JEWEL_GOLD_PRICE") {
            debug!(price, "Overriding gold price from environment");
            self.pricing.gold_price_per_gram = price;
        }

        if let Some(margin) = number("JEWEL_MARGIN") {
            debug!(margin, "Overriding margin from environment");
            self.pricing.margin = margin;
        }

        if let Some(multiplier) = number("JEWEL_CURRENCY_MULTIPLIER") {
            self.pricing.currency_multiplier = multiplier;
        }

        if let Some(id) = lookup("JEWEL_SUPPLIER") {
            debug!(supplier = %id, "Overriding selected supplier from environment");
            self.pricing.selected_supplier = id;
        }

        if let Some(id) = lookup("JEWEL_FALLBACK_SUPPLIER") {
            self.pricing.fallback_supplier = if id.trim().is_empty() { None } else { Some(id) };
        }

        if let Some(mode) = lookup("JEWEL_PRICING_MODE") {
            match parse_mode(&mode) {
                Some(parsed) => self.pricing.mode = parsed,
                None => warn!(mode = %mode, "Unknown pricing mode in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "jewel", "valuation")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn supplier(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    pub fn mode(&self) -> PricingMode {
        self.pricing.mode
    }

    /// The engine context these settings describe.
    pub fn context(&self) -> PricingContext {
        PricingContext::new(
            self.pricing.gold_price_per_gram,
            self.pricing.margin,
            self.pricing.currency_multiplier,
        )
        .with_supplier(
            self.pricing.selected_supplier.clone(),
            self.pricing.fallback_supplier.clone(),
        )
    }

    pub fn registry(&self) -> SupplierRegistry {
        SupplierRegistry::new(self.suppliers.iter().cloned())
    }
}

fn check_amount(field: &str, value: f64) -> CatalogResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidConfig(format!(
            "{} must be finite and non-negative, got {}",
            field, value
        )))
    }
}
