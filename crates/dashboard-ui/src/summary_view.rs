//! Plain-text rendering of a view model for non-interactive use.

use std::fmt::Write;

use dashboard_core::formatting::{format_number, format_rupees};
use dashboard_data::aggregator::SeriesPoint;
use dashboard_data::pipeline::{ViewModel, NO_DATA_MESSAGE};
use rust_decimal::prelude::ToPrimitive;

use crate::components::kpi_cards::kpi_cards;
use crate::components::pad_to_width;

/// Width of the label column in KPI and series tables.
const LABEL_WIDTH: usize = 24;

/// Render `vm` as text: a KPI table followed by the four series, or the
/// no-data notice.
pub fn render_summary(vm: &ViewModel, source: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Online Food Delivery Dashboard");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(
        out,
        "Source: {} ({} of {} rows)",
        source,
        format_number(vm.matching_rows as f64, 0),
        format_number(vm.total_rows as f64, 0)
    );
    for (dimension, allowed) in vm.selection.restrictions() {
        let values: Vec<&str> = allowed.iter().map(String::as_str).collect();
        let _ = writeln!(out, "Filter {}: {}", dimension.label(), values.join(", "));
    }
    out.push('\n');

    let (Some(metrics), Some(charts)) = (vm.metrics(), vm.charts()) else {
        let _ = writeln!(out, "{NO_DATA_MESSAGE}");
        return out;
    };

    let _ = writeln!(out, "Key Metrics");
    for card in kpi_cards(metrics) {
        let _ = writeln!(out, "  {}{}", pad_to_width(card.title, LABEL_WIDTH), card.value);
    }

    write_series(&mut out, "Orders by City", &charts.orders_by_city, |v| {
        format_number(v as f64, 0)
    });
    write_series(&mut out, "Revenue by Cuisine", &charts.revenue_by_cuisine, |v| {
        format_rupees(v.to_f64().unwrap_or_default(), 0)
    });
    write_series(
        &mut out,
        "Delivery Performance",
        &charts.orders_by_delivery_performance,
        |v| format_number(v as f64, 0),
    );
    write_series(
        &mut out,
        "Payment Mode Preference",
        &charts.orders_by_payment_mode,
        |v| format_number(v as f64, 0),
    );
    out
}

fn write_series<T: Copy>(
    out: &mut String,
    title: &str,
    series: &[SeriesPoint<T>],
    fmt: impl Fn(T) -> String,
) {
    let _ = writeln!(out, "\n{title}");
    for point in series {
        let _ = writeln!(
            out,
            "  {}{}",
            pad_to_width(&point.category, LABEL_WIDTH),
            fmt(point.value)
        );
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
