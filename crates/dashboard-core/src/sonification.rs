//! Mapping from a brand summary to an audible tone.
//!
//! Pitch carries the average sales volume, loudness carries volatility and
//! the oscillator waveform (timbre) identifies the brand. How the tone is
//! actually produced is up to the runtime; this module only fixes the
//! mapping.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::coercion::DEFAULT_PITCH_HZ;
use crate::error::{DashboardError, Result};
use crate::models::BrandSummary;

/// Volatility below this is raised to it before conversion to decibels, so
/// a perfectly stable brand is quiet but still audible (≈ −26 dB).
pub const LOUDNESS_FLOOR: f64 = 0.05;

/// An eighth note at 120 BPM.
pub const DEFAULT_NOTE: Duration = Duration::from_millis(250);

// ── Timbre ────────────────────────────────────────────────────────────────────

/// The closed set of oscillator waveforms a brand can be voiced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timbre {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

impl Timbre {
    /// Every variant, in display order.
    pub const ALL: [Timbre; 4] = [
        Timbre::Sine,
        Timbre::Triangle,
        Timbre::Square,
        Timbre::Sawtooth,
    ];

    /// Variant used for identifiers outside the closed set.
    pub const FALLBACK: Timbre = Timbre::Sine;

    pub fn as_str(&self) -> &'static str {
        match self {
            Timbre::Sine => "sine",
            Timbre::Triangle => "triangle",
            Timbre::Square => "square",
            Timbre::Sawtooth => "sawtooth",
        }
    }

    /// Resolve an instrument identifier, falling back to [`Timbre::FALLBACK`].
    pub fn resolve(identifier: &str) -> Self {
        identifier.parse().unwrap_or_else(|_| {
            tracing::debug!(
                identifier,
                fallback = Self::FALLBACK.as_str(),
                "unrecognised instrument; using fallback timbre"
            );
            Self::FALLBACK
        })
    }
}

impl FromStr for Timbre {
    type Err = DashboardError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "sine" => Ok(Timbre::Sine),
            "triangle" => Ok(Timbre::Triangle),
            "square" => Ok(Timbre::Square),
            "sawtooth" => Ok(Timbre::Sawtooth),
            other => Err(DashboardError::UnknownTimbre(other.to_string())),
        }
    }
}

impl fmt::Display for Timbre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Loudness ──────────────────────────────────────────────────────────────────

/// Gain in decibels for a normalised volatility:
/// `20 · log10(max(volatility, LOUDNESS_FLOOR))`.
pub fn gain_db(volatility: f64) -> f64 {
    20.0 * volatility.max(LOUDNESS_FLOOR).log10()
}

/// Convert decibels to a linear amplitude factor.
pub fn db_to_linear(db: f64) -> f64 {
    10_f64.powf(db / 20.0)
}

// ── ToneSpec ──────────────────────────────────────────────────────────────────

/// Everything needed to voice one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    /// Brand the tone was derived from (used for naming output).
    pub brand: String,
    pub frequency_hz: f64,
    pub gain_db: f64,
    pub timbre: Timbre,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl ToneSpec {
    /// Build the tone for `summary`, held for `duration`.
    pub fn from_brand(summary: &BrandSummary, duration: Duration) -> Self {
        let frequency_hz = if summary.avg_pitch_hz.is_finite() && summary.avg_pitch_hz > 0.0 {
            summary.avg_pitch_hz
        } else {
            DEFAULT_PITCH_HZ
        };
        Self {
            brand: summary.brand.clone(),
            frequency_hz,
            gain_db: gain_db(summary.volatility),
            timbre: Timbre::resolve(&summary.instrument),
            duration,
        }
    }

    /// Linear amplitude in `(0, 1]`.
    pub fn amplitude(&self) -> f64 {
        db_to_linear(self.gain_db)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
