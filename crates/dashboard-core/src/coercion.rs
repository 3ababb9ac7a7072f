//! Defaulting rules applied at the parsing boundary.
//!
//! Malformed numeric cells never abort the pipeline. Each field has one
//! documented fallback, and every stage downstream of the record filter reads
//! values that have already been resolved through these functions.

use crate::models::{FieldValue, DEFAULT_INSTRUMENT};

/// Pitch used when a row carries no usable `pitch_hz`.
pub const DEFAULT_PITCH_HZ: f64 = 440.0;

/// The numeric value of `value`, or `fallback` when it has none.
pub fn number_or(value: &FieldValue, fallback: f64) -> f64 {
    value.as_number().unwrap_or(fallback)
}

/// `units_sold`, defaulting to 0.
pub fn units_or_zero(value: &FieldValue) -> f64 {
    number_or(value, 0.0)
}

/// `price_usd`, defaulting to 0.
pub fn price_or_zero(value: &FieldValue) -> f64 {
    number_or(value, 0.0)
}

/// `pitch_hz`, defaulting to [`DEFAULT_PITCH_HZ`].
///
/// Zero counts as missing, matching the falsy check the dashboard has always
/// applied to pitch.
pub fn pitch_or_default(value: &FieldValue) -> f64 {
    match value.as_number() {
        Some(hz) if hz != 0.0 => hz,
        _ => DEFAULT_PITCH_HZ,
    }
}

/// `instrument`, defaulting to `"sine"`.
pub fn instrument_or_default(value: &FieldValue) -> String {
    value
        .as_identifier()
        .unwrap_or_else(|| DEFAULT_INSTRUMENT.to_string())
}

/// Render a number as an identifier: integral values lose their `.0`.
pub fn number_to_label(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
