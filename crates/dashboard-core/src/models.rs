use serde::{Deserialize, Serialize};

use crate::coercion;

/// Column names recognised in the event CSV.
pub mod columns {
    pub const BRAND: &str = "brand";
    pub const INSTRUMENT: &str = "instrument";
    pub const SELL_THROUGH_PCT: &str = "sell_through_pct";
    pub const UNITS_SOLD: &str = "units_sold";
    pub const PITCH_HZ: &str = "pitch_hz";
    pub const PRICE_USD: &str = "price_usd";
}

/// Instrument identifier used when a row does not name one.
pub const DEFAULT_INSTRUMENT: &str = "sine";

// ── FieldValue ────────────────────────────────────────────────────────────────

/// A single CSV cell after best-effort type inference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// The column is absent or the cell is blank.
    #[default]
    Empty,
    /// The cell held a finite numeric literal.
    Number(f64),
    /// Anything else, trimmed.
    Text(String),
}

impl FieldValue {
    /// Infer a typed value from a raw cell.
    ///
    /// Blank cells become [`FieldValue::Empty`]; cells that parse as a finite
    /// `f64` become [`FieldValue::Number`]; everything else is kept as text.
    /// `"NaN"` and `"inf"` stay text.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FieldValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Number(n),
            _ => FieldValue::Text(trimmed.to_string()),
        }
    }

    /// The numeric value of this cell, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            FieldValue::Empty => None,
        }
    }

    /// `true` when the cell is a usable number.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// The cell rendered as an identifier, or `None` when it is falsy
    /// (blank, empty text or the number zero).
    pub fn as_identifier(&self) -> Option<String> {
        match self {
            FieldValue::Empty => None,
            FieldValue::Text(s) if s.is_empty() => None,
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Number(n) if *n == 0.0 => None,
            FieldValue::Number(n) => Some(coercion::number_to_label(*n)),
        }
    }
}

// ── RawRecord ─────────────────────────────────────────────────────────────────

/// One CSV row as read from disk, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    /// 1-based data line number (header excluded), for diagnostics.
    pub line: u64,
    pub brand: FieldValue,
    pub instrument: FieldValue,
    pub sell_through_pct: FieldValue,
    pub units_sold: FieldValue,
    pub pitch_hz: FieldValue,
    pub price_usd: FieldValue,
}

// ── ValidRecord ───────────────────────────────────────────────────────────────

/// A row that passed the record filter, with every numeric field resolved
/// through the documented defaults in [`crate::coercion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidRecord {
    pub brand: String,
    pub instrument: String,
    pub sell_through_pct: f64,
    pub units_sold: f64,
    pub pitch_hz: f64,
    pub price_usd: f64,
}

impl ValidRecord {
    /// Validate `raw`, returning `None` when the brand is missing or the
    /// sell-through value is not numeric.
    pub fn from_raw(raw: &RawRecord) -> Option<Self> {
        let brand = raw.brand.as_identifier()?;
        let sell_through_pct = raw.sell_through_pct.as_number()?;
        Some(Self {
            brand,
            instrument: coercion::instrument_or_default(&raw.instrument),
            sell_through_pct,
            units_sold: coercion::units_or_zero(&raw.units_sold),
            pitch_hz: coercion::pitch_or_default(&raw.pitch_hz),
            price_usd: coercion::price_or_zero(&raw.price_usd),
        })
    }

    /// Estimated revenue for this event: units sold × unit price.
    pub fn revenue(&self) -> f64 {
        self.units_sold * self.price_usd
    }
}

// ── BrandSummary ──────────────────────────────────────────────────────────────

/// Per-brand aggregate produced by the brand aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSummary {
    pub brand: String,
    /// Mean of the per-event sell-through percentages.
    pub avg_sell_through: f64,
    pub total_units_sold: f64,
    pub avg_units_sold: f64,
    pub total_revenue: f64,
    pub avg_pitch_hz: f64,
    /// Unit-sales spread normalised across multi-event brands, in `[0, 1]`.
    pub volatility: f64,
    /// Number of contributing events.
    pub events: usize,
    /// Instrument identifier of the first event seen for this brand.
    pub instrument: String,
}

// ── DatasetSummary ────────────────────────────────────────────────────────────

/// Whole-dataset totals shown on the metric cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DatasetSummary {
    pub total_events: usize,
    pub total_units: f64,
    /// Record-weighted mean sell-through (not brand-weighted).
    pub avg_sell_through: f64,
    pub total_revenue: f64,
    pub unique_brands: usize,
    pub has_revenue: bool,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
