//! # Quote
//!
//! Prices a piece from the command line and prints its formula.
//!
//! ## Usage
//! ```bash
//! # 5 g of gold with two 3.0mm stones, default config
//! cargo run -p jewel-catalog --bin quote -- 5 2x3.0
//!
//! # Explicit config, PDF itemisation
//! cargo run -p jewel-catalog --bin quote -- --config ./valuation.toml --surface pdf 7.3 12x1.15 1x6.0
//!
//! # Extra supplier catalog from JSON, tiered pricing
//! cargo run -p jewel-catalog --bin quote -- --catalog melee=./melee.json --mode tiered 4 3x2.7
//! ```
//!
//! Logging follows `RUST_LOG` (default `info,jewel=debug`).

use std::env;
use std::path::PathBuf;

use jewel_catalog::{load_supplier_json, parse_mode, ValuationConfig};
use jewel_core::{ConversionTable, ExportSurface, Formula, PriceSource, PricingEngine, Stone, Worksheet};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,jewel=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    println!("Jewel Valuation Quote");
    println!();
    println!("Usage: quote [OPTIONS] <WEIGHT_G> [QTYxMM ...]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>      Config file (default: platform config dir)");
    println!("  -s, --surface <NAME>     preview | pdf | html (default: preview)");
    println!("  -m, --mode <NAME>        supplier_table | tiered (default: from config)");
    println!("      --catalog <ID=PATH>  Add a JSON supplier catalog");
    println!("      --json               Print the valuation as JSON");
    println!("  -h, --help               Show this help message");
}

fn parse_surface(value: &str) -> Option<ExportSurface> {
    match value.to_lowercase().as_str() {
        "preview" | "plain" => Some(ExportSurface::Preview),
        "pdf" => Some(ExportSurface::Pdf),
        "html" | "clipboard" => Some(ExportSurface::Html),
        _ => None,
    }
}

/// `"12x1.15"` → 12 stones of 1.15 mm. Out-of-range numbers are coerced.
fn parse_stone(value: &str) -> Option<Stone> {
    let (quantity, size) = value.split_once(['x', 'X'])?;
    let quantity: f64 = quantity.trim().parse().ok()?;
    let size: f64 = size.trim().parse().ok()?;
    Some(Stone::from_raw(quantity, size))
}

fn next_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{} requires a value", flag))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut surface = ExportSurface::Preview;
    let mut mode = None;
    let mut catalogs: Vec<(String, PathBuf)> = Vec::new();
    let mut json = false;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                config_path = Some(PathBuf::from(next_value(&args, &mut i, "--config")?));
            }
            "-s" | "--surface" => {
                let value = next_value(&args, &mut i, "--surface")?;
                surface = parse_surface(&value).ok_or_else(|| format!("Unknown surface: {}", value))?;
            }
            "-m" | "--mode" => {
                let value = next_value(&args, &mut i, "--mode")?;
                mode = Some(parse_mode(&value).ok_or_else(|| format!("Unknown pricing mode: {}", value))?);
            }
            "--catalog" => {
                let value = next_value(&args, &mut i, "--catalog")?;
                let (id, path) = value
                    .split_once('=')
                    .ok_or_else(|| format!("--catalog expects ID=PATH, got {}", value))?;
                catalogs.push((id.to_string(), PathBuf::from(path)));
            }
            "--json" => json = true,
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    init_tracing();

    let Some((weight, stones)) = positional.split_first() else {
        print_help();
        return Err("missing gold weight".into());
    };
    let weight: f64 = weight
        .parse()
        .map_err(|_| format!("Invalid gold weight: {}", weight))?;
    let stones = stones
        .iter()
        .map(|s| parse_stone(s).ok_or_else(|| format!("Invalid stone '{}', expected QTYxMM", s)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut config = ValuationConfig::load(config_path)?;
    for (id, path) in &catalogs {
        config.add_supplier(load_supplier_json(path, id, id)?)?;
    }
    if let Some(mode) = mode {
        config.pricing.mode = mode;
    }

    let table = ConversionTable::standard();
    let registry = config.registry();
    let context = config.context();
    let source = PriceSource::for_mode(config.mode(), &registry, &config.tiers, &context);
    let engine = PricingEngine::new(&table, source, &context);

    let mut sheet = Worksheet::new(weight);
    for stone in stones {
        sheet.add_stone(stone, &engine);
    }
    let valuation = sheet.valuate(&engine);
    info!(mode = ?config.mode(), stones = sheet.len(), "Quote computed");

    if json {
        println!("{}", serde_json::to_string_pretty(&valuation)?);
    } else {
        println!("{}", Formula::from_valuation(&valuation).render(surface));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stone() {
        assert_eq!(parse_stone("12x1.15"), Some(Stone::new(12, 1.15)));
        assert_eq!(parse_stone("2X3"), Some(Stone::new(2, 3.0)));
        assert_eq!(parse_stone("0x3.0"), Some(Stone::new(1, 3.0)));
        assert_eq!(parse_stone("3.0"), None);
        assert_eq!(parse_stone("ax3.0"), None);
    }

    #[test]
    fn test_parse_surface() {
        assert_eq!(parse_surface("PDF"), Some(ExportSurface::Pdf));
        assert_eq!(parse_surface("html"), Some(ExportSurface::Html));
        assert_eq!(parse_surface("fax"), None);
    }
}
