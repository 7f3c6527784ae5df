use crate::themes::Theme;
use dashboard_core::formatting::format_number;
use ratatui::text::{Line, Span};

/// Application title shown on the first header line.
pub const TITLE: &str = "ONLINE FOOD DELIVERY · BUSINESS DASHBOARD";

/// Decoration placed either side of the title.
pub const ACCENT: &str = "━━";

/// Dashboard header rendering three lines:
///
/// 1. Application title.
/// 2. A 60-column `=` separator.
/// 3. Data file and row counts in `[ file | matching / total rows ]` format.
pub struct Header<'a> {
    /// Path of the loaded orders file.
    pub source: &'a str,
    pub matching_rows: usize,
    pub total_rows: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: &'a str, matching_rows: usize, total_rows: usize, theme: &'a Theme) -> Self {
        Self {
            source,
            matching_rows,
            total_rows,
            theme,
        }
    }

    /// Number of lines produced by [`Header::to_lines`].
    pub const HEIGHT: u16 = 3;

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let counts = format!(
            "{} / {} rows",
            format_number(self.matching_rows as f64, 0),
            format_number(self.total_rows as f64, 0),
        );

        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(format!(" {TITLE} "), self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(counts, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_line_count() {
        let theme = Theme::dark();
        let lines = Header::new("orders.csv", 10, 20, &theme).to_lines();
        assert_eq!(lines.len(), Header::HEIGHT as usize);
    }

    #[test]
    fn test_header_title_line() {
        let theme = Theme::dark();
        let lines = Header::new("orders.csv", 10, 20, &theme).to_lines();
        let title = line_text(&lines[0]);
        assert!(title.contains(TITLE), "got: {title}");
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let lines = Header::new("orders.csv", 10, 20, &theme).to_lines();
        let sep = line_text(&lines[1]);
        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_info_line_counts() {
        let theme = Theme::dark();
        let lines = Header::new("data/orders.csv", 1_234, 56_789, &theme).to_lines();
        let info = line_text(&lines[2]);
        assert_eq!(info, "[ data/orders.csv | 1,234 / 56,789 rows ]");
    }
}
