//! Data layer for the pop-up dashboard.
//!
//! Reads event CSVs, filters invalid rows, aggregates per brand and runs the
//! top-level analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod reader;

pub use dashboard_core as core;
