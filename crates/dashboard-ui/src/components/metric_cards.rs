//! Whole-dataset metric cards shown above the chart.

use dashboard_core::formatting::{format_millions, format_number, format_percent};
use dashboard_core::models::DatasetSummary;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// Rows a card occupies: border, title, value, border.
pub const CARD_HEIGHT: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
}

/// Cards for `summary`. The revenue card is only present when the dataset
/// has revenue.
pub fn metric_cards(summary: &DatasetSummary) -> Vec<MetricCard> {
    let mut cards = vec![
        MetricCard {
            title: "Total Events",
            value: format_number(summary.total_events as f64, 0),
        },
        MetricCard {
            title: "Avg Sell-Through",
            value: format_percent(summary.avg_sell_through),
        },
        MetricCard {
            title: "Total Units Sold",
            value: format_number(summary.total_units, 0),
        },
    ];
    if summary.has_revenue {
        cards.push(MetricCard {
            title: "Total Revenue",
            value: format_millions(summary.total_revenue),
        });
    }
    cards.push(MetricCard {
        title: "Brands Analyzed",
        value: summary.unique_brands.to_string(),
    });
    cards
}

/// Lay the cards out side by side in equal-width columns.
pub fn render_metric_cards(frame: &mut Frame, area: Rect, summary: &DatasetSummary, theme: &Theme) {
    let cards = metric_cards(summary);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        let text = vec![
            Line::from(Span::styled(card.title, theme.card_title)),
            Line::from(Span::styled(card.value.clone(), theme.card_value)),
        ];
        let widget = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.card_border),
            );
        frame.render_widget(widget, *column);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
