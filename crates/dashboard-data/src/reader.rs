//! CSV loading for pop-up event records.
//!
//! Reads a header-based CSV and converts every data row into a
//! [`RawRecord`] with best-effort type inference applied to each cell.
//! Validation happens later, in [`crate::filter`].

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{columns, FieldValue, RawRecord};
use tracing::{debug, warn};

// ── ColumnMap ─────────────────────────────────────────────────────────────────

/// Header positions of the recognised columns. Unrecognised columns are
/// ignored; absent ones read as [`FieldValue::Empty`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ColumnMap {
    brand: Option<usize>,
    instrument: Option<usize>,
    sell_through_pct: Option<usize>,
    units_sold: Option<usize>,
    pitch_hz: Option<usize>,
    price_usd: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &ByteRecord) -> Self {
        let mut map = ColumnMap::default();
        for (idx, raw) in headers.iter().enumerate() {
            let name = String::from_utf8_lossy(raw);
            // Excel likes to prepend a byte-order mark to the first header.
            let name = name.trim_start_matches('\u{feff}').trim();
            let slot = match name {
                columns::BRAND => &mut map.brand,
                columns::INSTRUMENT => &mut map.instrument,
                columns::SELL_THROUGH_PCT => &mut map.sell_through_pct,
                columns::UNITS_SOLD => &mut map.units_sold,
                columns::PITCH_HZ => &mut map.pitch_hz,
                columns::PRICE_USD => &mut map.price_usd,
                _ => continue,
            };
            // First occurrence wins for duplicated headers.
            slot.get_or_insert(idx);
        }
        map
    }

    /// Cells that are not valid UTF-8 are decoded lossily, so a stray
    /// Latin-1 byte degrades one value instead of the whole file.
    fn cell(record: &ByteRecord, idx: Option<usize>) -> FieldValue {
        idx.and_then(|i| record.get(i))
            .map(|bytes| FieldValue::infer(&decode(bytes)))
            .unwrap_or_default()
    }

    fn to_raw(&self, record: &ByteRecord, line: u64) -> RawRecord {
        RawRecord {
            line,
            brand: Self::cell(record, self.brand),
            instrument: Self::cell(record, self.instrument),
            sell_through_pct: Self::cell(record, self.sell_through_pct),
            units_sold: Self::cell(record, self.units_sold),
            pitch_hz: Self::cell(record, self.pitch_hz),
            price_usd: Self::cell(record, self.price_usd),
        }
    }
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Open `path` and read every data row.
pub fn read_records_from_path(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_records(file)?;
    debug!(
        "Read {} rows from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Read every data row from any CSV source.
///
/// Rows may be shorter or longer than the header; missing cells read as
/// empty. Blank lines are skipped. A record the CSV parser rejects is logged
/// and skipped; only I/O failures abort the read.
pub fn read_records<R: Read>(source: R) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.byte_headers()?.clone();
    let map = ColumnMap::from_headers(&headers);
    if map.brand.is_none() || map.sell_through_pct.is_none() {
        warn!(
            "CSV header lacks `{}` or `{}`; no row can be valid",
            columns::BRAND,
            columns::SELL_THROUGH_PCT
        );
    }

    let mut records = Vec::new();
    for (idx, result) in reader.byte_records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "skipping malformed CSV record");
                continue;
            }
        };
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);
        records.push(map.to_raw(&record, line));
    }
    Ok(records)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
