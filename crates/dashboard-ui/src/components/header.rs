use crate::themes::Theme;
use ratatui::text::{Line, Span};

pub const TITLE: &str = "POP-UP EVENT DASHBOARD";

/// Decoration placed either side of the title.
pub const ACCENT: &str = "♪ ♫";

/// Dashboard header rendering three lines:
///
/// 1. Title with note decorations.
/// 2. A 60-column `=` separator.
/// 3. `[ source | loaded HH:MM:SS ]`.
pub struct Header<'a> {
    /// File name of the loaded CSV.
    pub source: &'a str,
    /// Formatted load time, or `None` before the first load.
    pub loaded_at: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: &'a str, loaded_at: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            source,
            loaded_at,
            theme,
        }
    }

    /// Number of lines produced by [`Header::to_lines`].
    pub const HEIGHT: u16 = 3;

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let loaded = match self.loaded_at {
            Some(t) => format!("loaded {t}"),
            None => "not loaded".to_string(),
        };

        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(format!(" {TITLE} "), self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(loaded, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_line_count_matches_height() {
        let theme = Theme::dark();
        let lines = Header::new("events.csv", None, &theme).to_lines();
        assert_eq!(lines.len(), Header::HEIGHT as usize);
    }

    #[test]
    fn test_header_title() {
        let theme = Theme::dark();
        let lines = Header::new("events.csv", None, &theme).to_lines();
        assert_eq!(line_text(&lines[0]), "♪ ♫ POP-UP EVENT DASHBOARD ♪ ♫");
        assert_eq!(line_text(&lines[1]).len(), 60);
    }

    #[test]
    fn test_header_source_and_time() {
        let theme = Theme::dark();
        let lines = Header::new("events.csv", Some("14:02:03"), &theme).to_lines();
        assert_eq!(line_text(&lines[2]), "[ events.csv | loaded 14:02:03 ]");
    }

    #[test]
    fn test_header_not_loaded() {
        let theme = Theme::light();
        let lines = Header::new("events.csv", None, &theme).to_lines();
        assert!(line_text(&lines[2]).contains("not loaded"));
    }
}
