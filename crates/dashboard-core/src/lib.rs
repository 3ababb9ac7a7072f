//! Domain model and pure computations for the pop-up event dashboard.
//!
//! Holds the record and summary types, the numeric defaulting rules applied
//! at the parsing boundary, the statistics helpers, the brand descriptors,
//! the tone mapping used for sonification, display formatting, and the CLI
//! settings shared by every other crate.

pub mod coercion;
pub mod descriptors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod sonification;
pub mod stats;

pub use error::{DashboardError, Result};
