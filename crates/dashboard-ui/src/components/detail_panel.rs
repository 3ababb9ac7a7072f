//! Pop-over with the full metric breakdown of one brand.

use dashboard_core::descriptors::{instrument_display_name, BrandDescriptors};
use dashboard_core::formatting::{format_number, format_percent, format_thousands};
use dashboard_core::models::BrandSummary;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Which theme style a row's value is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTone {
    Plain,
    Performance,
    Volatility,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
    pub tone: ValueTone,
}

impl DetailRow {
    fn plain(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            tone: ValueTone::Plain,
        }
    }
}

/// Rows of the panel, top to bottom. Revenue is left out when it is zero.
pub fn detail_rows(brand: &BrandSummary) -> Vec<DetailRow> {
    let descriptors = BrandDescriptors::describe(brand);

    let mut rows = vec![
        DetailRow::plain("Sell-Through Rate", format_percent(brand.avg_sell_through)),
        DetailRow {
            label: "Performance",
            value: descriptors.performance.to_string(),
            tone: ValueTone::Performance,
        },
        DetailRow::plain("Total Units Sold", format_number(brand.total_units_sold, 0)),
        DetailRow::plain("Avg Units / Event", format_number(brand.avg_units_sold, 0)),
    ];
    if brand.total_revenue > 0.0 {
        rows.push(DetailRow::plain(
            "Total Revenue",
            format_thousands(brand.total_revenue),
        ));
    }
    rows.push(DetailRow::plain("Events", brand.events.to_string()));
    rows.push(DetailRow::plain(
        "Sales Volume",
        descriptors.sales_volume.to_string(),
    ));
    rows.push(DetailRow {
        label: "Volatility",
        value: descriptors.volatility.to_string(),
        tone: ValueTone::Volatility,
    });
    rows.push(DetailRow::plain(
        "Instrument",
        instrument_display_name(&brand.instrument),
    ));
    rows
}

/// A `width` × `height` rectangle centred in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_detail_panel(frame: &mut Frame, area: Rect, brand: &BrandSummary, theme: &Theme) {
    let rows = detail_rows(brand);
    let descriptors = BrandDescriptors::describe(brand);
    let label_width = rows.iter().map(|r| r.label.width()).max().unwrap_or(0);

    let mut lines: Vec<Line> = rows
        .iter()
        .map(|row| {
            let value_style: Style = match row.tone {
                ValueTone::Plain => theme.value,
                ValueTone::Performance => theme.performance_style(descriptors.performance),
                ValueTone::Volatility => theme.volatility_style(descriptors.volatility),
            };
            let pad = " ".repeat(label_width - row.label.width());
            Line::from(vec![
                Span::styled(format!("{}{pad}  ", row.label), theme.label),
                Span::styled(row.value.clone(), value_style),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: play again   Esc: close",
        theme.dim,
    )));

    let content_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let panel = centered_rect(area, content_width + 4, lines.len() as u16 + 2);

    frame.render_widget(Clear, panel);
    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.panel_border)
                .title(Span::styled(format!(" {} ", brand.brand), theme.panel_title)),
        ),
        panel,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn brand(revenue: f64) -> BrandSummary {
        BrandSummary {
            brand: "Acme".to_string(),
            avg_sell_through: 76.04,
            total_units_sold: 1_250.0,
            avg_units_sold: 312.6,
            total_revenue: revenue,
            avg_pitch_hz: 612.0,
            volatility: 0.45,
            events: 4,
            instrument: "square".to_string(),
        }
    }

    fn value_of<'a>(rows: &'a [DetailRow], label: &str) -> Option<&'a str> {
        rows.iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }

    #[test]
    fn test_detail_rows_full() {
        let rows = detail_rows(&brand(15_400.0));
        assert_eq!(value_of(&rows, "Sell-Through Rate"), Some("76.0%"));
        assert_eq!(value_of(&rows, "Performance"), Some("Excellent"));
        assert_eq!(value_of(&rows, "Total Units Sold"), Some("1,250"));
        assert_eq!(value_of(&rows, "Avg Units / Event"), Some("313"));
        assert_eq!(value_of(&rows, "Total Revenue"), Some("$15K"));
        assert_eq!(value_of(&rows, "Events"), Some("4"));
        assert_eq!(value_of(&rows, "Sales Volume"), Some("High Volume"));
        assert_eq!(value_of(&rows, "Volatility"), Some("Moderate Volatility"));
        assert_eq!(value_of(&rows, "Instrument"), Some("Square Wave"));
    }

    #[test]
    fn test_detail_rows_without_revenue() {
        let rows = detail_rows(&brand(0.0));
        assert!(value_of(&rows, "Total Revenue").is_none());
        assert_eq!(rows.len(), 8);
    }

    #[test]
    fn test_detail_row_tones() {
        let rows = detail_rows(&brand(0.0));
        let tones: Vec<ValueTone> = rows.iter().map(|r| r.tone).collect();
        assert_eq!(tones.iter().filter(|t| **t == ValueTone::Performance).count(), 1);
        assert_eq!(tones.iter().filter(|t| **t == ValueTone::Volatility).count(), 1);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(area, 40, 10), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect(area, 200, 50), area);
    }

    #[test]
    fn test_render_detail_panel() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_detail_panel(frame, area, &brand(15_400.0), &theme);
            })
            .unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(rendered.contains("Acme"));
        assert!(rendered.contains("Square Wave"));
        assert!(rendered.contains("Excellent"));
    }

    #[test]
    fn test_render_detail_panel_tiny_area() {
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_detail_panel(frame, area, &brand(0.0), &theme);
            })
            .unwrap();
    }
}
