//! Terminal UI layer for the pop-up dashboard.
//!
//! Provides themes, metric cards, the sell-through bar chart, the brand
//! detail panel, dashboard and table views, and the application event loop
//! built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;
