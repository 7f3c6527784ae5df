//! Summary metrics over a filtered view of orders.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::models::{FilteredView, Measure};

/// The five KPI figures shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Number of orders in the view.
    pub order_count: u64,
    /// Exact sum of `Final_Amount` over the view.
    pub total_revenue: Decimal,
    /// Mean `Order_Value`; `None` when every value is missing.
    pub avg_order_value: Option<f64>,
    /// Mean `Delivery_Time_Min`; `None` when every value is missing.
    pub avg_delivery_time: Option<f64>,
    /// Share of cancelled orders, in percent (0–100).
    pub cancellation_rate: f64,
}

/// Compute [`Metrics`] for a non-empty view.
///
/// Callers are expected to short-circuit on an empty view first; if one
/// reaches here anyway the result is [`DashboardError::ArithmeticUndefined`]
/// rather than a division by zero.
pub fn summarize(view: &FilteredView<'_>) -> Result<Metrics> {
    if view.is_empty() {
        return Err(DashboardError::ArithmeticUndefined("summary metrics"));
    }

    let order_count = view.len() as u64;
    let total_revenue = sum(view, Measure::FinalAmount);
    let cancelled = view.iter().filter(|r| r.is_cancelled()).count();
    let cancellation_rate = (cancelled as f64 / order_count as f64) * 100.0;

    Ok(Metrics {
        order_count,
        total_revenue,
        avg_order_value: mean(view, Measure::OrderValue),
        avg_delivery_time: mean(view, Measure::DeliveryTimeMin),
        cancellation_rate,
    })
}

/// Sum of the present values of `measure`; missing values contribute nothing.
pub fn sum(view: &FilteredView<'_>, measure: Measure) -> Decimal {
    view.iter().filter_map(|r| r.measure(measure)).sum()
}

/// Arithmetic mean of the present values of `measure`.
///
/// The total is exact; only the quotient is converted to `f64`. Returns
/// `None` when no record carries a value.
pub fn mean(view: &FilteredView<'_>, measure: Measure) -> Option<f64> {
    let (total, count) = view
        .iter()
        .filter_map(|r| r.measure(measure))
        .fold((Decimal::ZERO, 0u64), |(t, c), v| (t + v, c + 1));
    if count == 0 {
        return None;
    }
    (total / Decimal::from(count)).to_f64()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
