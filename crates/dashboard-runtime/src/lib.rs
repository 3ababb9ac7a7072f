//! Runtime layer for the pop-up dashboard.
//!
//! Holds the loaded dataset between reloads and runs the background tone
//! renderer that the TUI talks to over channels.

pub mod player;
pub mod session;
pub mod voices;

pub use dashboard_data as data;
