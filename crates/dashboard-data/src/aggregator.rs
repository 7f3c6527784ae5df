//! Grouped counts and sums over a filtered view.
//!
//! Grouping keys are the exact observed strings: no trimming or case folding,
//! so `"Pune"` and `"pune "` are separate categories. Records with a missing
//! key are left out of every series.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use dashboard_core::models::{Dimension, FilteredView, Measure};

// ── SeriesPoint ───────────────────────────────────────────────────────────────

/// One bar of a chart: a category and its aggregated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint<T> {
    pub category: String,
    pub value: T,
}

impl<T> SeriesPoint<T> {
    fn new(category: impl Into<String>, value: T) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}

// ── Grouping ──────────────────────────────────────────────────────────────────

/// Number of records per value of `dimension`.
///
/// Sorted by descending count; ties are ordered by category.
pub fn group_count(view: &FilteredView<'_>, dimension: Dimension) -> Vec<SeriesPoint<u64>> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in view.iter() {
        if let Some(key) = record.dimension(dimension) {
            *counts.entry(key).or_default() += 1;
        }
    }

    let mut series: Vec<SeriesPoint<u64>> = counts
        .into_iter()
        .map(|(category, count)| SeriesPoint::new(category, count))
        .collect();
    // Stable sort keeps the BTreeMap's category order among equal counts.
    series.sort_by(|a, b| b.value.cmp(&a.value));
    series
}

/// Sum of `measure` per value of `dimension`, sorted by category.
///
/// Missing measure values add nothing; a category whose values are all
/// missing still appears with a sum of zero. Sums are exact, so the series
/// total equals [`dashboard_core::metrics::sum`] over the same records.
pub fn group_sum(
    view: &FilteredView<'_>,
    dimension: Dimension,
    measure: Measure,
) -> Vec<SeriesPoint<Decimal>> {
    let mut sums: BTreeMap<&str, Decimal> = BTreeMap::new();
    for record in view.iter() {
        if let Some(key) = record.dimension(dimension) {
            *sums.entry(key).or_default() += record.measure(measure).unwrap_or_default();
        }
    }

    sums.into_iter()
        .map(|(category, total)| SeriesPoint::new(category, total))
        .collect()
}

/// Sum of every value in a series.
pub fn series_total<T>(series: &[SeriesPoint<T>]) -> T
where
    T: Copy + std::iter::Sum<T>,
{
    series.iter().map(|p| p.value).sum()
}

// ── ChartSeries ───────────────────────────────────────────────────────────────

/// The four series shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Order count per `City`.
    pub orders_by_city: Vec<SeriesPoint<u64>>,
    /// `Final_Amount` sum per `Cuisine_Type`.
    pub revenue_by_cuisine: Vec<SeriesPoint<Decimal>>,
    /// Order count per `Delivery_Performance`.
    pub orders_by_delivery_performance: Vec<SeriesPoint<u64>>,
    /// Order count per `Payment_Mode`.
    pub orders_by_payment_mode: Vec<SeriesPoint<u64>>,
}

impl ChartSeries {
    pub fn from_view(view: &FilteredView<'_>) -> Self {
        Self {
            orders_by_city: group_count(view, Dimension::City),
            revenue_by_cuisine: group_sum(view, Dimension::CuisineType, Measure::FinalAmount),
            orders_by_delivery_performance: group_count(view, Dimension::DeliveryPerformance),
            orders_by_payment_mode: group_count(view, Dimension::PaymentMode),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
