//! Average sell-through per brand as a vertical bar chart.

use std::ops::Range;

use dashboard_core::formatting::{format_number, format_percent};
use dashboard_core::models::BrandSummary;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::themes::Theme;

/// Upper bound of the y axis; sell-through is a percentage.
pub const CHART_MAX: u64 = 100;

const MIN_BAR_WIDTH: u16 = 3;
const MAX_BAR_WIDTH: u16 = 12;
const BAR_GAP: u16 = 1;

/// Cut `s` to at most `max_width` terminal columns, ending in `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Widest bar that still fits every brand into `inner_width` columns.
pub fn bar_width_for(inner_width: u16, bars: usize) -> u16 {
    if bars == 0 {
        return MAX_BAR_WIDTH;
    }
    let bars = bars as u16;
    let gaps = BAR_GAP * bars.saturating_sub(1);
    (inner_width.saturating_sub(gaps) / bars).clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

/// How many bars of the minimum width fit into `inner_width` columns.
pub fn visible_capacity(inner_width: u16) -> usize {
    (((inner_width + BAR_GAP) / (MIN_BAR_WIDTH + BAR_GAP)) as usize).max(1)
}

/// Slice of brand indices to draw: everything when it fits, otherwise a
/// `capacity`-wide window that keeps `selected` in view.
pub fn visible_window(total: usize, capacity: usize, selected: Option<usize>) -> Range<usize> {
    if total <= capacity {
        return 0..total;
    }
    let selected = selected.unwrap_or(0).min(total - 1);
    let start = selected.saturating_sub(capacity / 2).min(total - capacity);
    start..start + capacity
}

/// Hover text for one brand: sell-through, rounded average units, events.
pub fn tooltip(brand: &BrandSummary) -> String {
    format!(
        "{}: {} sell-through · {} avg units · {} events",
        brand.brand,
        format_percent(brand.avg_sell_through),
        format_number(brand.avg_units_sold, 0),
        brand.events
    )
}

pub fn render_sell_through_chart(
    frame: &mut Frame,
    area: Rect,
    brands: &[BrandSummary],
    selected: Option<usize>,
    theme: &Theme,
) {
    let inner_width = area.width.saturating_sub(2);
    let window = visible_window(brands.len(), visible_capacity(inner_width), selected);
    let bar_width = bar_width_for(inner_width, window.len());

    let title = if window.len() < brands.len() {
        format!(
            " Average Sell-Through by Brand (0-100%) · {}-{} of {} ",
            window.start + 1,
            window.end,
            brands.len()
        )
    } else {
        " Average Sell-Through by Brand (0-100%) ".to_string()
    };

    let bars: Vec<Bar> = brands[window.clone()]
        .iter()
        .zip(window)
        .map(|(brand, i)| {
            let value = brand.avg_sell_through.clamp(0.0, CHART_MAX as f64).round() as u64;
            Bar::default()
                .value(value)
                .text_value(format!("{value}%"))
                .label(Line::from(truncate_to_width(&brand.brand, bar_width as usize)))
                .style(theme.bar_style(i, selected))
                .value_style(theme.bar_value)
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.card_border)
                .title(title),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(BAR_GAP)
        .label_style(theme.bar_label)
        .max(CHART_MAX);

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
