//! Reusable dashboard widgets.

pub mod bar_chart;
pub mod detail_panel;
pub mod header;
pub mod metric_cards;
