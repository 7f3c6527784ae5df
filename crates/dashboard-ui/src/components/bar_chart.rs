//! Horizontal bar charts drawn with block characters.
//!
//! Each bar is one line: a padded category label, a bar scaled to the largest
//! value in the series, and the formatted value.

use dashboard_core::formatting::{format_compact, format_number, CURRENCY_SYMBOL};
use dashboard_data::aggregator::SeriesPoint;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use unicode_width::UnicodeWidthStr;

use super::{pad_to_width, truncate_to_width};
use crate::themes::Theme;

const FILLED_CHAR: char = '\u{2588}'; // █  FULL BLOCK
const EMPTY_CHAR: char = '\u{2591}'; // ░  LIGHT SHADE

/// Widest category label before truncation.
const MAX_LABEL_WIDTH: usize = 18;

/// A titled series ready to be drawn.
pub struct HorizontalBarChart<'a> {
    pub title: &'a str,
    /// `(category, value, formatted value)` per bar, in display order.
    pub bars: Vec<(String, f64, String)>,
    pub theme: &'a Theme,
}

impl<'a> HorizontalBarChart<'a> {
    /// Chart of order counts.
    pub fn from_counts(title: &'a str, series: &[SeriesPoint<u64>], theme: &'a Theme) -> Self {
        let bars = series
            .iter()
            .map(|p| {
                let value = p.value as f64;
                (p.category.clone(), value, format_number(value, 0))
            })
            .collect();
        Self { title, bars, theme }
    }

    /// Chart of rupee amounts, labelled compactly (`₹ 12.3K`).
    pub fn from_amounts(title: &'a str, series: &[SeriesPoint<Decimal>], theme: &'a Theme) -> Self {
        let bars = series
            .iter()
            .map(|p| {
                let value = p.value.to_f64().unwrap_or_default();
                let label = format!("{} {}", CURRENCY_SYMBOL, format_compact(value));
                (p.category.clone(), value, label)
            })
            .collect();
        Self { title, bars, theme }
    }

    /// Lay the bars out for an inner width of `width` columns. Values are
    /// right-aligned so every line has the same width.
    pub fn to_lines(&self, width: u16) -> Vec<Line<'a>> {
        let width = width as usize;
        let label_width = self
            .bars
            .iter()
            .map(|(category, _, _)| category.width())
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH)
            .min(width / 3);
        let value_width = self
            .bars
            .iter()
            .map(|(_, _, formatted)| formatted.width())
            .max()
            .unwrap_or(0);
        // Label, space, bar, space, value.
        let bar_width = width.saturating_sub(label_width + value_width + 2);

        let max = self
            .bars
            .iter()
            .map(|(_, value, _)| *value)
            .fold(0.0_f64, f64::max);

        self.bars
            .iter()
            .map(|(category, value, formatted)| {
                let filled = if max > 0.0 {
                    ((value.max(0.0) / max) * bar_width as f64).round() as usize
                } else {
                    0
                };
                let filled = filled.min(bar_width);
                let empty = bar_width - filled;

                Line::from(vec![
                    Span::styled(pad_to_width(category, label_width), self.theme.label),
                    Span::raw(" "),
                    Span::styled(
                        std::iter::repeat_n(FILLED_CHAR, filled).collect::<String>(),
                        self.theme.bar,
                    ),
                    Span::styled(
                        std::iter::repeat_n(EMPTY_CHAR, empty).collect::<String>(),
                        self.theme.bar_empty,
                    ),
                    Span::raw(" "),
                    Span::styled(
                        format!("{}{}", " ".repeat(value_width - formatted.width()), formatted),
                        self.theme.bar_label,
                    ),
                ])
            })
            .collect()
    }

    /// Draw the chart inside a bordered block filling `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        let title = truncate_to_width(self.title, inner_width as usize);
        let lines = if self.bars.is_empty() {
            vec![Line::from(Span::styled("No values", self.theme.dim))]
        } else {
            self.to_lines(inner_width)
        };

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border)
                .title(Span::styled(format!(" {title} "), self.theme.header)),
        );
        frame.render_widget(paragraph, area);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
