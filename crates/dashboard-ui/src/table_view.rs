//! Static brand table for the `table` view.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per brand in
//! summary order plus a highlighted totals row at the bottom.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use dashboard_core::descriptors::{instrument_display_name, BrandDescriptors};
use dashboard_core::formatting::{format_currency, format_number, format_percent};
use dashboard_core::models::{BrandSummary, DatasetSummary};

use crate::themes::Theme;

const HEADERS: [&str; 8] = [
    "Brand",
    "Sell-Through",
    "Performance",
    "Units",
    "Avg Units",
    "Revenue",
    "Events",
    "Instrument",
];

/// Display cells for one brand, in [`HEADERS`] order.
pub fn brand_cells(brand: &BrandSummary) -> [String; 8] {
    let descriptors = BrandDescriptors::describe(brand);
    [
        brand.brand.clone(),
        format_percent(brand.avg_sell_through),
        descriptors.performance.to_string(),
        format_number(brand.total_units_sold, 0),
        format_number(brand.avg_units_sold, 0),
        format_currency(brand.total_revenue),
        brand.events.to_string(),
        instrument_display_name(&brand.instrument),
    ]
}

/// Display cells for the totals row.
pub fn total_cells(summary: &DatasetSummary) -> [String; 8] {
    [
        "TOTAL".to_string(),
        format_percent(summary.avg_sell_through),
        format!("{} brands", summary.unique_brands),
        format_number(summary.total_units, 0),
        String::new(),
        format_currency(summary.total_revenue),
        summary.total_events.to_string(),
        String::new(),
    ]
}

/// Render the brand table into `area`.
pub fn render_brand_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    brands: &[BrandSummary],
    summary: &DatasetSummary,
    theme: &Theme,
) {
    let header = Row::new(
        HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let mut rows: Vec<Row> = brands
        .iter()
        .enumerate()
        .map(|(i, brand)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(brand_cells(brand).map(Cell::from)).style(style)
        })
        .collect();

    rows.push(Row::new(total_cells(summary).map(Cell::from)).style(theme.table_total));

    let widths = [
        Constraint::Length(18),
        Constraint::Length(13),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(7),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
