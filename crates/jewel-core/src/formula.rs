//! # Formula Generator
//!
//! Renders a [`Valuation`] as the audit formula printed on quotes.
//!
//! ```text
//!   (weight × effective_gold_price) + (qty × price_per_unit) + … = total
//!   (5.00   × 440.00)               + (2   × 57.75)              = 2315.50
//! ```
//!
//! ## One Result, Three Surfaces
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   PricingEngine ──► Valuation ──► Formula ──┬──► Preview (plain text)   │
//! │                                             ├──► Pdf (itemised text)    │
//! │                                             └──► Html (clipboard)       │
//! │                                                                         │
//! │   The formula only rounds and formats. It never multiplies or sums,    │
//! │   so the three surfaces cannot disagree with each other or with the    │
//! │   engine's total.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::engine::Valuation;
use crate::money::{format_ct, format_half_up, Money};
use crate::MONEY_DECIMALS;

/// Where a formula is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExportSurface {
    /// On-screen live preview.
    Preview,
    /// PDF quote body.
    Pdf,
    /// Clipboard / HTML description.
    Html,
}

/// The gold term, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GoldTerm {
    pub weight_grams: f64,
    pub effective_gold_price: Money,
    pub gold_value: Money,
}

/// One stone term, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoneTerm {
    pub quantity: u32,
    pub size_mm: f64,
    pub ct: f64,
    pub price_per_unit: Money,
    pub total_price: Money,
}

/// Display record for a valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    pub gold: GoldTerm,
    pub stones: Vec<StoneTerm>,
    pub total: Money,
}

impl Formula {
    /// Rounds every amount in `valuation` for display.
    pub fn from_valuation(valuation: &Valuation) -> Self {
        Formula {
            gold: GoldTerm {
                weight_grams: valuation.gold.weight_grams,
                effective_gold_price: Money::from_amount(valuation.gold.effective_gold_price),
                gold_value: Money::from_amount(valuation.gold.gold_value),
            },
            stones: valuation
                .stones
                .iter()
                .map(|stone| StoneTerm {
                    quantity: stone.quantity,
                    size_mm: stone.size_mm,
                    ct: stone.ct,
                    price_per_unit: Money::from_amount(stone.price_per_unit),
                    total_price: Money::from_amount(stone.total_price),
                })
                .collect(),
            total: Money::from_amount(valuation.total),
        }
    }

    /// Renders for the given surface.
    pub fn render(&self, surface: ExportSurface) -> String {
        match surface {
            ExportSurface::Preview => self.to_plain(),
            ExportSurface::Pdf => self.to_pdf(),
            ExportSurface::Html => self.to_html(),
        }
    }

    /// `(5.00 × 440.00) + (2 × 57.75) = 2315.50`
    pub fn to_plain(&self) -> String {
        format!("{} = {}", self.terms(" × ").join(" + "), self.total)
    }

    /// Plain formula preceded by one itemised line per component.
    pub fn to_pdf(&self) -> String {
        let mut lines = Vec::with_capacity(self.stones.len() + 3);
        lines.push(format!(
            "Gold: {} g × {} = {}",
            self.weight(),
            self.gold.effective_gold_price,
            self.gold.gold_value
        ));
        for (index, stone) in self.stones.iter().enumerate() {
            lines.push(format!(
                "Stone {}: {} × {} mm ({} ct) @ {} = {}",
                index + 1,
                stone.quantity,
                format_half_up(stone.size_mm, MONEY_DECIMALS),
                format_ct(stone.ct),
                stone.price_per_unit,
                stone.total_price
            ));
        }
        lines.push(format!("Formula: {}", self.to_plain()));
        lines.push(format!("Total: {}", self.total));
        lines.join("\n")
    }

    /// Clipboard description markup.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<p><strong>Formula:</strong> ");
        html.push_str(&self.terms(" &times; ").join(" + "));
        html.push_str(&format!(" = <strong>{}</strong></p>", self.total));

        if !self.stones.is_empty() {
            html.push_str("<ul>");
            for stone in &self.stones {
                html.push_str(&format!(
                    "<li>{} &times; {} mm ({} ct) @ {} = {}</li>",
                    stone.quantity,
                    format_half_up(stone.size_mm, MONEY_DECIMALS),
                    format_ct(stone.ct),
                    stone.price_per_unit,
                    stone.total_price
                ));
            }
            html.push_str("</ul>");
        }
        html
    }

    fn weight(&self) -> String {
        format_half_up(self.gold.weight_grams, MONEY_DECIMALS)
    }

    fn terms(&self, times: &str) -> Vec<String> {
        let mut terms = Vec::with_capacity(self.stones.len() + 1);
        terms.push(format!(
            "({}{}{})",
            self.weight(),
            times,
            self.gold.effective_gold_price
        ));
        terms.extend(
            self.stones
                .iter()
                .map(|stone| format!("({}{}{})", stone.quantity, times, stone.price_per_unit)),
        );
        terms
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
