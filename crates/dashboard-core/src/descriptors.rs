//! Qualitative labels shown in the brand detail panel.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::formatting::title_case;
use crate::models::BrandSummary;

// ── PerformanceLevel ──────────────────────────────────────────────────────────

/// Tier derived from a brand's average sell-through percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceLevel {
    /// ≥ 75 %.
    Excellent,
    /// ≥ 70 %.
    Strong,
    /// ≥ 65 %.
    Good,
    Standard,
}

impl PerformanceLevel {
    pub fn from_sell_through(avg_sell_through: f64) -> Self {
        if avg_sell_through >= 75.0 {
            PerformanceLevel::Excellent
        } else if avg_sell_through >= 70.0 {
            PerformanceLevel::Strong
        } else if avg_sell_through >= 65.0 {
            PerformanceLevel::Good
        } else {
            PerformanceLevel::Standard
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "Excellent",
            PerformanceLevel::Strong => "Strong",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Standard => "Standard",
        }
    }
}

// ── VolatilityLevel ───────────────────────────────────────────────────────────

/// Tier derived from a brand's normalised volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityLevel {
    /// > 0.7
    High,
    /// > 0.4
    Moderate,
    /// > 0.1
    Low,
    VeryStable,
}

impl VolatilityLevel {
    pub fn from_volatility(volatility: f64) -> Self {
        if volatility > 0.7 {
            VolatilityLevel::High
        } else if volatility > 0.4 {
            VolatilityLevel::Moderate
        } else if volatility > 0.1 {
            VolatilityLevel::Low
        } else {
            VolatilityLevel::VeryStable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VolatilityLevel::High => "High Volatility",
            VolatilityLevel::Moderate => "Moderate Volatility",
            VolatilityLevel::Low => "Low Volatility",
            VolatilityLevel::VeryStable => "Very Stable",
        }
    }
}

// ── SalesVolume ───────────────────────────────────────────────────────────────

/// Sales-volume tier, read off the brand's (rounded) average pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesVolume {
    High,
    Medium,
    Low,
}

impl SalesVolume {
    pub fn from_pitch(avg_pitch_hz: f64) -> Self {
        let pitch = avg_pitch_hz.round();
        if pitch >= 600.0 {
            SalesVolume::High
        } else if pitch >= 400.0 {
            SalesVolume::Medium
        } else {
            SalesVolume::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SalesVolume::High => "High Volume",
            SalesVolume::Medium => "Medium Volume",
            SalesVolume::Low => "Low Volume",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(PerformanceLevel, VolatilityLevel, SalesVolume);

// ── BrandDescriptors ──────────────────────────────────────────────────────────

/// All qualitative labels for one brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandDescriptors {
    pub performance: PerformanceLevel,
    pub volatility: VolatilityLevel,
    pub sales_volume: SalesVolume,
}

impl BrandDescriptors {
    pub fn describe(summary: &BrandSummary) -> Self {
        Self {
            performance: PerformanceLevel::from_sell_through(summary.avg_sell_through),
            volatility: VolatilityLevel::from_volatility(summary.volatility),
            sales_volume: SalesVolume::from_pitch(summary.avg_pitch_hz),
        }
    }
}

/// Detail-panel name for an instrument identifier, e.g. `"Square Wave"`.
pub fn instrument_display_name(instrument: &str) -> String {
    format!("{} Wave", title_case(instrument))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_thresholds() {
        assert_eq!(PerformanceLevel::from_sell_through(75.0), PerformanceLevel::Excellent);
        assert_eq!(PerformanceLevel::from_sell_through(74.9), PerformanceLevel::Strong);
        assert_eq!(PerformanceLevel::from_sell_through(70.0), PerformanceLevel::Strong);
        assert_eq!(PerformanceLevel::from_sell_through(65.0), PerformanceLevel::Good);
        assert_eq!(PerformanceLevel::from_sell_through(64.9), PerformanceLevel::Standard);
    }

    #[test]
    fn test_volatility_thresholds_are_exclusive() {
        assert_eq!(VolatilityLevel::from_volatility(1.0), VolatilityLevel::High);
        assert_eq!(VolatilityLevel::from_volatility(0.7), VolatilityLevel::Moderate);
        assert_eq!(VolatilityLevel::from_volatility(0.4), VolatilityLevel::Low);
        assert_eq!(VolatilityLevel::from_volatility(0.1), VolatilityLevel::VeryStable);
        assert_eq!(VolatilityLevel::from_volatility(0.0), VolatilityLevel::VeryStable);
    }

    #[test]
    fn test_sales_volume_rounds_pitch() {
        assert_eq!(SalesVolume::from_pitch(599.5), SalesVolume::High);
        assert_eq!(SalesVolume::from_pitch(599.4), SalesVolume::Medium);
        assert_eq!(SalesVolume::from_pitch(400.0), SalesVolume::Medium);
        assert_eq!(SalesVolume::from_pitch(220.0), SalesVolume::Low);
    }

    #[test]
    fn test_instrument_display_name() {
        assert_eq!(instrument_display_name("square"), "Square Wave");
        assert_eq!(instrument_display_name("sine"), "Sine Wave");
    }

    #[test]
    fn test_labels_display() {
        assert_eq!(PerformanceLevel::Excellent.to_string(), "Excellent");
        assert_eq!(VolatilityLevel::Moderate.to_string(), "Moderate Volatility");
        assert_eq!(SalesVolume::Low.to_string(), "Low Volume");
    }

    #[test]
    fn test_describe_brand() {
        let summary = BrandSummary {
            brand: "A".to_string(),
            avg_sell_through: 72.0,
            total_units_sold: 150.0,
            avg_units_sold: 75.0,
            total_revenue: 1500.0,
            avg_pitch_hz: 640.0,
            volatility: 0.5,
            events: 2,
            instrument: "sine".to_string(),
        };
        let d = BrandDescriptors::describe(&summary);
        assert_eq!(d.performance, PerformanceLevel::Strong);
        assert_eq!(d.volatility, VolatilityLevel::Moderate);
        assert_eq!(d.sales_volume, SalesVolume::High);
    }
}
