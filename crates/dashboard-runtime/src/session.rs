//! Holder for the currently loaded dataset.
//!
//! A [`DashboardSession`] owns the CSV path and the most recent successful
//! [`AnalysisResult`]. Every load replaces the whole result in one
//! assignment; a failed load records the error and leaves the previous
//! result in place so the UI can keep showing it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use dashboard_core::error::Result;
use dashboard_core::models::{BrandSummary, DatasetSummary};
use dashboard_data::analysis::{analyze_csv, AnalysisResult};

// ── DashboardSession ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DashboardSession {
    /// CSV file every load reads from.
    csv_path: PathBuf,
    /// Most recent successful analysis.
    current: Option<AnalysisResult>,
    /// When `current` was produced.
    loaded_at: Option<DateTime<Local>>,
    /// Human-readable description of the last failed load.
    last_error: Option<String>,
    /// Number of successful loads so far.
    generation: u64,
}

impl DashboardSession {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            current: None,
            loaded_at: None,
            last_error: None,
            generation: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Read and analyse the CSV, superseding any earlier result.
    ///
    /// On failure the previous result stays current and the error is both
    /// returned and remembered in [`last_error`](Self::last_error).
    pub fn load(&mut self) -> Result<()> {
        match analyze_csv(&self.csv_path) {
            Ok(result) => {
                self.install(result);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.csv_path.display(),
                    error = %e,
                    "load failed; keeping previous dataset"
                );
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Replace the current result with one produced elsewhere.
    pub fn install(&mut self, result: AnalysisResult) {
        tracing::debug!(
            brands = result.brands.len(),
            events = result.summary.total_events,
            "dataset installed"
        );
        self.current = Some(result);
        self.loaded_at = Some(Local::now());
        self.last_error = None;
        self.generation += 1;
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    /// Brand summaries of the current dataset; empty before the first load.
    pub fn brands(&self) -> &[BrandSummary] {
        self.current
            .as_ref()
            .map(|r| r.brands.as_slice())
            .unwrap_or(&[])
    }

    pub fn summary(&self) -> Option<&DatasetSummary> {
        self.current.as_ref().map(|r| &r.summary)
    }

    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
