//! Render pipeline for the dashboard.
//!
//! [`render`] runs one full pass from the current selections to everything
//! the presentation layer displays: filter options, KPI metrics and the four
//! chart series, or the "no data" state when nothing matches.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use dashboard_core::metrics::{summarize, Metrics};
use dashboard_core::models::Table;
use dashboard_core::selection::FilterSelection;

use crate::aggregator::ChartSeries;
use crate::filter::{self, FilterOptions};

/// Notice shown instead of metrics and charts when the view is empty.
pub const NO_DATA_MESSAGE: &str =
    "No data available for the selected filters. Please adjust the filters.";

// ── Public types ──────────────────────────────────────────────────────────────

/// What the body of the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewContent {
    /// Nothing matched; metrics and charts were not computed.
    NoData,
    /// At least one record matched.
    Data {
        metrics: Metrics,
        charts: ChartSeries,
    },
}

/// Timing information for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderMetadata {
    /// RFC 3339 timestamp when this view model was generated.
    pub generated_at: String,
    /// Wall-clock seconds spent filtering and aggregating.
    pub render_time_seconds: f64,
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    /// Values offered by each filter control.
    pub options: Vec<FilterOptions>,
    /// Selection this view model was rendered for.
    pub selection: FilterSelection,
    /// Records in the loaded table.
    pub total_rows: usize,
    /// Records in the filtered view.
    pub matching_rows: usize,
    pub content: ViewContent,
    pub metadata: RenderMetadata,
}

impl ViewModel {
    pub fn has_data(&self) -> bool {
        matches!(self.content, ViewContent::Data { .. })
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        match &self.content {
            ViewContent::Data { metrics, .. } => Some(metrics),
            ViewContent::NoData => None,
        }
    }

    pub fn charts(&self) -> Option<&ChartSeries> {
        match &self.content {
            ViewContent::Data { charts, .. } => Some(charts),
            ViewContent::NoData => None,
        }
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Filter `table` by `selection` and compute the dashboard's view model.
///
/// Pure apart from reading the clock for [`RenderMetadata`]; the table is not
/// modified and nothing is cached between calls.
pub fn render(table: &Table, selection: &FilterSelection) -> ViewModel {
    let started = std::time::Instant::now();

    let view = filter::apply(table, selection);

    let content = if view.is_empty() {
        ViewContent::NoData
    } else {
        match summarize(&view) {
            Ok(metrics) => ViewContent::Data {
                metrics,
                charts: ChartSeries::from_view(&view),
            },
            Err(e) => {
                warn!("Falling back to empty view: {}", e);
                ViewContent::NoData
            }
        }
    };

    let render_time = started.elapsed().as_secs_f64();
    debug!(
        "Rendered {} of {} rows in {:.4}s",
        view.len(),
        table.len(),
        render_time
    );

    ViewModel {
        options: filter::filter_options(table),
        selection: selection.clone(),
        total_rows: table.len(),
        matching_rows: view.len(),
        content,
        metadata: RenderMetadata {
            generated_at: Utc::now().to_rfc3339(),
            render_time_seconds: render_time,
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::models::{Dimension, OrderRecord};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn order(city: &str, cuisine: &str, status: &str, amount: Decimal) -> OrderRecord {
        OrderRecord {
            city: Some(city.to_string()),
            cuisine_type: Some(cuisine.to_string()),
            order_status: Some(status.to_string()),
            final_amount: Some(amount),
            order_value: Some(amount),
            delivery_time_minutes: Some(dec!(30)),
            delivery_performance: Some("On Time".to_string()),
            payment_mode: Some("UPI".to_string()),
            ..Default::default()
        }
    }

    fn sample_table() -> Table {
        Table::from_records(vec![
            order("Pune", "Italian", "delivered", dec!(500)),
            order("Pune", "Italian", "cancelled", dec!(300)),
            order("Delhi", "Chinese", "delivered", dec!(200)),
        ])
    }

    #[test]
    fn test_render_pune_scenario() {
        let table = sample_table();
        let mut sel = FilterSelection::default();
        sel.set(Dimension::City, ["Pune"]);

        let vm = render(&table, &sel);
        assert_eq!(vm.total_rows, 3);
        assert_eq!(vm.matching_rows, 2);

        let metrics = vm.metrics().unwrap();
        assert_eq!(metrics.order_count, 2);
        assert_eq!(metrics.total_revenue, dec!(800));
        assert_eq!(metrics.cancellation_rate, 50.0);
    }

    #[test]
    fn test_render_no_data_state() {
        let table = sample_table();
        let mut sel = FilterSelection::default();
        sel.select_none(Dimension::OrderStatus);

        let vm = render(&table, &sel);
        assert_eq!(vm.content, ViewContent::NoData);
        assert!(!vm.has_data());
        assert!(vm.metrics().is_none());
        assert!(vm.charts().is_none());
        // Options are still offered so the user can widen the filters.
        assert_eq!(vm.options.len(), 3);
    }

    #[test]
    fn test_render_empty_table_is_no_data() {
        let vm = render(&Table::default(), &FilterSelection::default());
        assert_eq!(vm.content, ViewContent::NoData);
        assert_eq!(vm.total_rows, 0);
    }

    #[test]
    fn test_render_charts_follow_selection() {
        let table = sample_table();
        let mut sel = FilterSelection::default();
        sel.set(Dimension::OrderStatus, ["delivered"]);

        let vm = render(&table, &sel);
        let charts = vm.charts().unwrap();
        let cities: Vec<&str> = charts
            .orders_by_city
            .iter()
            .map(|p| p.category.as_str())
            .collect();
        assert_eq!(cities.len(), 2);
        assert!(cities.contains(&"Pune"));
        assert!(cities.contains(&"Delhi"));
    }

    #[test]
    fn test_default_view_revenue_consistent_with_missing_cuisine() {
        let mut no_cuisine = order("Pune", "x", "delivered", dec!(300));
        no_cuisine.cuisine_type = None;
        let table = Table::from_records(vec![order("Pune", "Italian", "delivered", dec!(500)), no_cuisine]);

        let vm = render(&table, &FilterSelection::default());
        let metrics = vm.metrics().unwrap();
        let by_cuisine = crate::aggregator::series_total(&vm.charts().unwrap().revenue_by_cuisine);
        assert_eq!(metrics.order_count, 1);
        assert_eq!(metrics.total_revenue, dec!(500));
        assert_eq!(by_cuisine, metrics.total_revenue);
    }

    #[test]
    fn test_render_echoes_selection() {
        let table = sample_table();
        let mut sel = FilterSelection::default();
        sel.set(Dimension::CuisineType, ["Chinese"]);
        let vm = render(&table, &sel);
        assert_eq!(vm.selection, sel);
    }

    #[test]
    fn test_view_model_serialises_state_tag() {
        let table = sample_table();
        let vm = render(&table, &FilterSelection::default());
        let json = serde_json::to_value(&vm).unwrap();
        assert_eq!(json["content"]["state"], "data");
        assert_eq!(json["content"]["metrics"]["order_count"], 3);
        assert_eq!(json["content"]["metrics"]["total_revenue"], 1000.0);
        assert_eq!(json["content"]["charts"]["revenue_by_cuisine"][0]["value"], 200.0);
        assert_eq!(json["options"][0]["dimension"], "City");

        let mut none = FilterSelection::default();
        none.select_none(Dimension::City);
        let json = serde_json::to_value(render(&table, &none)).unwrap();
        assert_eq!(json["content"]["state"], "no_data");
    }
}
