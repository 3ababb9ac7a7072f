//! Interactive dashboard screen.
//!
//! Stacks the header, metric cards, sell-through chart, selection tooltip,
//! status line and key help, with the detail panel drawn on top when open.

use dashboard_core::models::{BrandSummary, DatasetSummary};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::components::bar_chart::{render_sell_through_chart, tooltip};
use crate::components::detail_panel::render_detail_panel;
use crate::components::header::Header;
use crate::components::metric_cards::{render_metric_cards, CARD_HEIGHT};
use crate::themes::Theme;

pub const KEY_HELP: &str =
    "←/→ select · Enter play · r reload · Esc close · q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One-line message under the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
        }
    }
}

/// All data required to render the dashboard.
pub struct DashboardViewData<'a> {
    pub source: &'a str,
    pub loaded_at: Option<String>,
    pub brands: &'a [BrandSummary],
    pub summary: &'a DatasetSummary,
    pub selected: Option<usize>,
    pub detail_open: bool,
    pub status: Option<&'a StatusMessage>,
}

pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &DashboardViewData, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(Header::HEIGHT),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Header::new(data.source, data.loaded_at.as_deref(), theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), chunks[0]);

    render_metric_cards(frame, chunks[1], data.summary, theme);
    render_sell_through_chart(frame, chunks[2], data.brands, data.selected, theme);

    let selected = data.selected.and_then(|i| data.brands.get(i));
    let tooltip_line = match selected {
        Some(brand) => Line::from(Span::styled(tooltip(brand), theme.info)),
        None => Line::from(Span::styled("No brand selected", theme.dim)),
    };
    frame.render_widget(Paragraph::new(tooltip_line), chunks[3]);

    if let Some(status) = data.status {
        let style = match status.level {
            StatusLevel::Info => theme.success,
            StatusLevel::Error => theme.error,
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(status.text.as_str(), style))),
            chunks[4],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(KEY_HELP, theme.dim))),
        chunks[5],
    );

    if data.detail_open {
        if let Some(brand) = selected {
            render_detail_panel(frame, area, brand, theme);
        }
    }
}

/// Placeholder shown when nothing could be loaded.
pub fn render_no_data(frame: &mut Frame, area: Rect, message: Option<&str>, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No valid data found in CSV.", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            message.unwrap_or("Each row needs a brand and a numeric sell_through_pct."),
            theme.dim,
        )),
        Line::from(Span::styled("Press 'r' to reload or 'q' to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pop-Up Dashboard "),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
