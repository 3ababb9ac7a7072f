//! Main analysis pipeline for the pop-up dashboard.
//!
//! Loads a CSV, filters it, aggregates per brand and summarises the whole
//! dataset, returning an [`AnalysisResult`] ready for the UI layer.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{BrandSummary, DatasetSummary, RawRecord, ValidRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregator::BrandAggregator;
use crate::filter::filter_valid;
use crate::reader::read_records_from_path;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// File the records came from, if any.
    pub source: Option<String>,
    /// Data rows read from the CSV (header excluded).
    pub rows_read: usize,
    /// Rows rejected by the record filter.
    pub rows_dropped: usize,
    /// Wall-clock seconds spent reading the CSV.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent filtering and aggregating.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze_csv`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Brand summaries, highest average sell-through first.
    pub brands: Vec<BrandSummary>,
    pub summary: DatasetSummary,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    pub fn brand(&self, index: usize) -> Option<&BrandSummary> {
        self.brands.get(index)
    }
}

// ── Summary metrics ───────────────────────────────────────────────────────────

/// Whole-dataset totals over validated records.
///
/// Average sell-through is a straight mean over records, so a brand with many
/// events weighs more than in the per-brand averages. An empty slice yields
/// [`DatasetSummary::default`].
pub fn calculate_summary(records: &[ValidRecord]) -> DatasetSummary {
    if records.is_empty() {
        return DatasetSummary::default();
    }

    let total_units: f64 = records.iter().map(|r| r.units_sold).sum();
    let total_revenue: f64 = records.iter().map(|r| r.revenue()).sum();
    let sell_through_sum: f64 = records.iter().map(|r| r.sell_through_pct).sum();
    let unique_brands = records
        .iter()
        .map(|r| r.brand.as_str())
        .collect::<HashSet<_>>()
        .len();

    DatasetSummary {
        total_events: records.len(),
        total_units,
        avg_sell_through: sell_through_sum / records.len() as f64,
        total_revenue,
        unique_brands,
        has_revenue: total_revenue > 0.0,
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Filter, aggregate and summarise rows that were already read.
///
/// Returns [`DashboardError::NoValidRows`] when filtering leaves nothing.
pub fn analyze_records(rows: &[RawRecord]) -> Result<(Vec<BrandSummary>, DatasetSummary)> {
    let valid = filter_valid(rows);
    if valid.is_empty() {
        return Err(DashboardError::NoValidRows);
    }
    let brands = BrandAggregator::aggregate(&valid);
    let summary = calculate_summary(&valid);
    Ok((brands, summary))
}

/// Run the full analysis pipeline on the CSV at `path`.
///
/// 1. Read every data row.
/// 2. Drop rows without a brand or a numeric sell-through.
/// 3. Aggregate per brand and summarise the dataset.
pub fn analyze_csv(path: &Path) -> Result<AnalysisResult> {
    // ── Step 1: Load rows ─────────────────────────────────────────────────────
    let load_start = Instant::now();
    let rows = read_records_from_path(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2-3: Filter and aggregate ────────────────────────────────────────
    let aggregate_start = Instant::now();
    let (brands, summary) = analyze_records(&rows)?;
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    info!(
        "Analysed {}: {} events across {} brands",
        path.display(),
        summary.total_events,
        summary.unique_brands
    );

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        source: Some(path.display().to_string()),
        rows_read: rows.len(),
        rows_dropped: rows.len() - summary.total_events,
        load_time_seconds: load_time,
        aggregate_time_seconds: aggregate_time,
    };

    Ok(AnalysisResult {
        brands,
        summary,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn rec(brand: &str, sell: f64, units: f64, price: f64) -> ValidRecord {
        ValidRecord {
            brand: brand.to_string(),
            instrument: "sine".to_string(),
            sell_through_pct: sell,
            units_sold: units,
            pitch_hz: 440.0,
            price_usd: price,
        }
    }

    // ── calculate_summary ─────────────────────────────────────────────────────

    #[test]
    fn test_summary_is_record_weighted() {
        let records = vec![
            rec("A", 80.0, 100.0, 10.0),
            rec("A", 60.0, 50.0, 10.0),
            rec("B", 70.0, 200.0, 5.0),
        ];
        let summary = calculate_summary(&records);
        assert_eq!(summary.total_events, 3);
        assert_eq!(summary.total_units, 350.0);
        assert_eq!(summary.total_revenue, 2500.0);
        assert_eq!(summary.avg_sell_through, 70.0);
        assert_eq!(summary.unique_brands, 2);
        assert!(summary.has_revenue);
    }

    #[test]
    fn test_summary_differs_from_brand_weighted_mean() {
        // Brand means are 90 and 30 (brand-weighted 60); record mean is 50.
        let records = vec![
            rec("A", 90.0, 1.0, 0.0),
            rec("B", 30.0, 1.0, 0.0),
            rec("B", 30.0, 1.0, 0.0),
        ];
        assert_eq!(calculate_summary(&records).avg_sell_through, 50.0);
    }

    #[test]
    fn test_summary_without_prices_has_no_revenue() {
        let records = vec![rec("A", 70.0, 10.0, 0.0)];
        let summary = calculate_summary(&records);
        assert_eq!(summary.total_revenue, 0.0);
        assert!(!summary.has_revenue);
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(calculate_summary(&[]), DatasetSummary::default());
    }

    #[test]
    fn test_brand_totals_match_dataset_summary() {
        let rows = crate::reader::read_records(
            "brand,sell_through_pct,units_sold,price_usd\n\
             A,80,100,10\n\
             B,70,,4\n\
             A,60,lots,10\n\
             C,55,12.5,\n\
             B,65,40,2.5\n\
             C,90\n"
                .as_bytes(),
        )
        .unwrap();
        let valid = filter_valid(&rows);
        let brands = BrandAggregator::aggregate(&valid);
        let summary = calculate_summary(&valid);

        let brand_units: f64 = brands.iter().map(|b| b.total_units_sold).sum();
        let brand_revenue: f64 = brands.iter().map(|b| b.total_revenue).sum();
        let brand_events: usize = brands.iter().map(|b| b.events).sum();

        assert_eq!(summary.total_units, 152.5);
        assert!((brand_units - summary.total_units).abs() < 1e-9);
        assert!((brand_revenue - summary.total_revenue).abs() < 1e-9);
        assert_eq!(brand_events, summary.total_events);
        assert_eq!(brands.len(), summary.unique_brands);
    }

    // ── analyze_csv ───────────────────────────────────────────────────────────

    #[test]
    fn test_analyze_csv_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let path = write_csv(
            tmp.path(),
            "events.csv",
            "brand,instrument,sell_through_pct,units_sold,pitch_hz,price_usd\n\
             A,square,80,100,500,10\n\
             A,,60,50,,10\n\
             ,sine,99,1,440,1\n\
             B,triangle,70,200,330,5\n\
             C,sine,not-a-number,5,440,1\n",
        );

        let result = analyze_csv(&path).unwrap();
        assert_eq!(result.brands.len(), 2);
        assert_eq!(result.brands[0].brand, "A");
        assert_eq!(result.brands[0].instrument, "square");
        // Blank pitch falls back to 440, so the mean is (500 + 440) / 2.
        assert_eq!(result.brands[0].avg_pitch_hz, 470.0);
        assert_eq!(result.brands[1].brand, "B");

        assert_eq!(result.summary.total_events, 3);
        assert_eq!(result.summary.unique_brands, 2);
        assert_eq!(result.metadata.rows_read, 5);
        assert_eq!(result.metadata.rows_dropped, 2);
        assert!(result.metadata.source.as_deref().unwrap().ends_with("events.csv"));
    }

    #[test]
    fn test_analyze_csv_keeps_rows_around_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("latin1.csv");
        std::fs::write(
            &path,
            b"brand,sell_through_pct,units_sold\nAcme,80,100\nCaf\xe9,70,50\nBolt,60,10\n",
        )
        .unwrap();

        let result = analyze_csv(&path).unwrap();
        let names: Vec<&str> = result.brands.iter().map(|b| b.brand.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Caf\u{fffd}", "Bolt"]);
        assert_eq!(result.summary.total_events, 3);
    }

    #[test]
    fn test_analyze_csv_no_valid_rows() {
        let tmp = TempDir::new().unwrap();
        let path = write_csv(tmp.path(), "bad.csv", "brand,sell_through_pct\n,50\nX,abc\n");
        let err = analyze_csv(&path).unwrap_err();
        assert!(matches!(err, DashboardError::NoValidRows));
        assert_eq!(err.to_string(), "No valid data found in CSV.");
    }

    #[test]
    fn test_analyze_csv_header_only() {
        let tmp = TempDir::new().unwrap();
        let path = write_csv(tmp.path(), "empty.csv", "brand,sell_through_pct\n");
        assert!(matches!(analyze_csv(&path), Err(DashboardError::NoValidRows)));
    }

    #[test]
    fn test_analyze_csv_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = analyze_csv(&tmp.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::FileRead { .. }));
    }

    #[test]
    fn test_analysis_result_serializes() {
        let (brands, summary) = analyze_records(&[RawRecord {
            line: 2,
            brand: dashboard_core::models::FieldValue::Text("A".to_string()),
            sell_through_pct: dashboard_core::models::FieldValue::Number(70.0),
            ..Default::default()
        }])
        .unwrap();
        let result = AnalysisResult {
            brands,
            summary,
            metadata: AnalysisMetadata {
                generated_at: "2024-01-01T00:00:00+00:00".to_string(),
                source: None,
                rows_read: 1,
                rows_dropped: 0,
                load_time_seconds: 0.0,
                aggregate_time_seconds: 0.0,
            },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["brands"][0]["brand"], "A");
        assert_eq!(json["summary"]["total_events"], 1);
        assert_eq!(json["metadata"]["rows_read"], 1);
    }
}
