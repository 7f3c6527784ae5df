//! Full-screen dashboard layout.
//!
//! ```text
//! ┌ header ───────────────────────────────────────────┐
//! │ filters │ KPI cards                               │
//! │         │ Orders by City      │ Revenue by Cuisine │
//! │         │ Delivery Performance│ Payment Mode       │
//! └ key help / status ────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use dashboard_data::aggregator::ChartSeries;
use dashboard_data::pipeline::{ViewModel, NO_DATA_MESSAGE};

use crate::components::bar_chart::HorizontalBarChart;
use crate::components::filter_panel::{render_filter_panel, FilterPanelState};
use crate::components::header::Header;
use crate::components::kpi_cards::{render_kpi_row, KPI_ROW_HEIGHT};
use crate::themes::Theme;

/// Width of the filter sidebar.
pub const SIDEBAR_WIDTH: u16 = 30;

/// Key bindings shown in the footer.
pub const KEY_HELP: &str =
    "Tab switch list · ↑/↓ move · Space toggle · a all · n none · e export · r reload · q quit";

/// One-line message shown in the footer after an action.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Everything [`render_dashboard`] draws from.
pub struct DashboardViewData<'a> {
    pub source: &'a str,
    pub view_model: &'a ViewModel,
    pub panel: &'a FilterPanelState,
    pub status: Option<&'a StatusMessage>,
}

/// Draw the whole dashboard into `area`.
pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &DashboardViewData<'_>, theme: &Theme) {
    let vm = data.view_model;
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(Header::HEIGHT),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let header = Header::new(data.source, vm.matching_rows, vm.total_rows, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

    let [sidebar_area, main_area] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .areas(body_area);

    render_filter_panel(frame, sidebar_area, &vm.options, &vm.selection, data.panel, theme);

    match (vm.metrics(), vm.charts()) {
        (Some(metrics), Some(charts)) => {
            let [kpi_area, charts_area] =
                Layout::vertical([Constraint::Length(KPI_ROW_HEIGHT), Constraint::Min(0)])
                    .areas(main_area);
            render_kpi_row(frame, kpi_area, metrics, theme);
            render_charts(frame, charts_area, charts, theme);
        }
        _ => render_no_data(frame, main_area, theme),
    }

    render_footer(frame, footer_area, data.status, theme);
}

/// The four charts in a 2×2 grid.
pub fn render_charts(frame: &mut Frame, area: Rect, charts: &ChartSeries, theme: &Theme) {
    let [top, bottom] =
        Layout::vertical([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(area);
    let [top_left, top_right] =
        Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(top);
    let [bottom_left, bottom_right] =
        Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(bottom);

    HorizontalBarChart::from_counts("Orders by City", &charts.orders_by_city, theme)
        .render(frame, top_left);
    HorizontalBarChart::from_amounts("Revenue by Cuisine", &charts.revenue_by_cuisine, theme)
        .render(frame, top_right);
    HorizontalBarChart::from_counts(
        "Delivery Performance",
        &charts.orders_by_delivery_performance,
        theme,
    )
    .render(frame, bottom_left);
    HorizontalBarChart::from_counts(
        "Payment Mode Preference",
        &charts.orders_by_payment_mode,
        theme,
    )
    .render(frame, bottom_right);
}

/// Placeholder shown instead of metrics and charts when nothing matches.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(NO_DATA_MESSAGE, theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'a' to select every value of the focused filter.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border),
            ),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, status: Option<&StatusMessage>, theme: &Theme) {
    let line = match status {
        Some(msg) if msg.is_error => Line::from(Span::styled(msg.text.as_str(), theme.error)),
        Some(msg) => Line::from(Span::styled(msg.text.as_str(), theme.success)),
        None => Line::from(Span::styled(KEY_HELP, theme.dim)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
