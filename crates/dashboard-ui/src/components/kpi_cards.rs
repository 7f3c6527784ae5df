//! The row of five KPI cards above the charts.

use dashboard_core::formatting::{
    format_minutes, format_number, format_optional, format_percent, format_rupees,
};
use dashboard_core::metrics::Metrics;
use rust_decimal::prelude::ToPrimitive;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// One formatted KPI.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
}

/// Rows taken by the KPI row, borders included.
pub const KPI_ROW_HEIGHT: u16 = 3;

/// Format `metrics` into the five dashboard cards, in display order.
pub fn kpi_cards(metrics: &Metrics) -> Vec<KpiCard> {
    vec![
        KpiCard {
            title: "Total Orders",
            value: format_number(metrics.order_count as f64, 0),
        },
        KpiCard {
            title: "Total Revenue",
            value: format_rupees(metrics.total_revenue.to_f64().unwrap_or_default(), 0),
        },
        KpiCard {
            title: "Avg Order Value",
            value: format_optional(metrics.avg_order_value, |v| format_rupees(v, 0)),
        },
        KpiCard {
            title: "Avg Delivery Time",
            value: format_optional(metrics.avg_delivery_time, format_minutes),
        },
        KpiCard {
            title: "Cancellation Rate",
            value: format_percent(metrics.cancellation_rate),
        },
    ]
}

/// Draw the KPI cards side by side across `area`.
pub fn render_kpi_row(frame: &mut Frame, area: Rect, metrics: &Metrics, theme: &Theme) {
    let cards = kpi_cards(metrics);
    let columns = Layout::horizontal(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for (card, column) in cards.into_iter().zip(columns.iter()) {
        let style: Style = if card.title == "Cancellation Rate" {
            theme.cancellation_style(metrics.cancellation_rate)
        } else {
            theme.value
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(card.value, style)))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border)
                    .title(Span::styled(format!(" {} ", card.title), theme.label)),
            );
        frame.render_widget(paragraph, *column);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
