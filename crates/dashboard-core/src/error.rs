use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the pop-up dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV document is structurally malformed.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Filtering left nothing to aggregate.
    #[error("No valid data found in CSV.")]
    NoValidRows,

    /// An instrument identifier is not one of the recognised timbres.
    #[error("Unknown timbre: {0}")]
    UnknownTimbre(String),

    /// A tone could not be synthesized or written.
    #[error("Audio render failed: {0}")]
    AudioRender(String),

    /// A JSON document could not be produced or parsed.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
