use dashboard_core::descriptors::{PerformanceLevel, VolatilityLevel};
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|val| val.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()))
        .map(|bg| {
            if bg <= 6 {
                BackgroundType::Dark
            } else {
                BackgroundType::Light
            }
        })
        .unwrap_or(BackgroundType::Dark)
}

/// Every style used by the dashboard widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Metric cards ─────────────────────────────────────────────────────────
    pub card_border: Style,
    pub card_title: Style,
    pub card_value: Style,

    // ── Bar chart ────────────────────────────────────────────────────────────
    pub bar: Style,
    /// Bar under the selection cursor.
    pub bar_selected: Style,
    /// Numeric value printed inside each bar.
    pub bar_value: Style,
    pub bar_label: Style,

    // ── Detail panel ─────────────────────────────────────────────────────────
    pub panel_border: Style,
    pub panel_title: Style,

    // ── Performance tiers ────────────────────────────────────────────────────
    pub tier_excellent: Style,
    pub tier_strong: Style,
    pub tier_good: Style,
    pub tier_standard: Style,

    // ── Volatility ───────────────────────────────────────────────────────────
    pub volatility_high: Style,
    pub volatility_moderate: Style,
    pub volatility_low: Style,
    pub volatility_stable: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            card_border: Style::default().fg(Color::DarkGray),
            card_title: Style::default().fg(Color::Gray),
            card_value: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            bar: Style::default().fg(Color::Magenta),
            bar_selected: Style::default().fg(Color::Cyan),
            bar_value: Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            bar_label: Style::default().fg(Color::Gray),

            panel_border: Style::default().fg(Color::Cyan),
            panel_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            tier_excellent: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            tier_strong: Style::default().fg(Color::Green),
            tier_good: Style::default().fg(Color::Yellow),
            tier_standard: Style::default().fg(Color::Gray),

            volatility_high: Style::default().fg(Color::Red),
            volatility_moderate: Style::default().fg(Color::Yellow),
            volatility_low: Style::default().fg(Color::Cyan),
            volatility_stable: Style::default().fg(Color::Green),

            table_header: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Blue),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            card_border: Style::default().fg(Color::Gray),
            card_title: Style::default().fg(Color::DarkGray),
            card_value: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            bar: Style::default().fg(Color::Magenta),
            bar_selected: Style::default().fg(Color::Blue),
            bar_value: Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            bar_label: Style::default().fg(Color::DarkGray),

            panel_border: Style::default().fg(Color::Blue),
            panel_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            tier_excellent: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            tier_strong: Style::default().fg(Color::Green),
            tier_good: Style::default().fg(Color::Yellow),
            tier_standard: Style::default().fg(Color::DarkGray),

            volatility_high: Style::default().fg(Color::Red),
            volatility_moderate: Style::default().fg(Color::Yellow),
            volatility_low: Style::default().fg(Color::Blue),
            volatility_stable: Style::default().fg(Color::Green),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Basic 8-colour ANSI palette, no bold.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            card_border: Style::default().fg(Color::DarkGray),
            card_title: Style::default().fg(Color::Gray),
            card_value: Style::default().fg(Color::White),

            bar: Style::default().fg(Color::Cyan),
            bar_selected: Style::default().fg(Color::Yellow),
            bar_value: Style::default().fg(Color::Black).bg(Color::Cyan),
            bar_label: Style::default().fg(Color::White),

            panel_border: Style::default().fg(Color::White),
            panel_title: Style::default().fg(Color::Cyan),

            tier_excellent: Style::default().fg(Color::Green),
            tier_strong: Style::default().fg(Color::Green),
            tier_good: Style::default().fg(Color::Yellow),
            tier_standard: Style::default().fg(Color::White),

            volatility_high: Style::default().fg(Color::Red),
            volatility_moderate: Style::default().fg(Color::Yellow),
            volatility_low: Style::default().fg(Color::Cyan),
            volatility_stable: Style::default().fg(Color::Green),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    pub fn performance_style(&self, level: PerformanceLevel) -> Style {
        match level {
            PerformanceLevel::Excellent => self.tier_excellent,
            PerformanceLevel::Strong => self.tier_strong,
            PerformanceLevel::Good => self.tier_good,
            PerformanceLevel::Standard => self.tier_standard,
        }
    }

    pub fn volatility_style(&self, level: VolatilityLevel) -> Style {
        match level {
            VolatilityLevel::High => self.volatility_high,
            VolatilityLevel::Moderate => self.volatility_moderate,
            VolatilityLevel::Low => self.volatility_low,
            VolatilityLevel::VeryStable => self.volatility_stable,
        }
    }

    /// Bar fill for the brand at `index` given the current selection.
    pub fn bar_style(&self, index: usize, selected: Option<usize>) -> Style {
        if selected == Some(index) {
            self.bar_selected
        } else {
            self.bar
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
