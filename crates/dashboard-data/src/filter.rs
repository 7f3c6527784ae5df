//! Row filtering by per-dimension value selections.

use serde::Serialize;

use dashboard_core::models::{Dimension, FilteredView, OrderRecord, Table};
use dashboard_core::selection::FilterSelection;

/// Values offered for one filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub dimension: Dimension,
    /// Distinct observed values, sorted, missing values excluded.
    pub values: Vec<String>,
}

/// Options for every filterable dimension, in sidebar order.
pub fn filter_options(table: &Table) -> Vec<FilterOptions> {
    Dimension::FILTERABLE
        .into_iter()
        .map(|dimension| FilterOptions {
            dimension,
            values: table.distinct_values(dimension),
        })
        .collect()
}

/// Keep the records that satisfy every filter dimension of `selection`.
///
/// Within a dimension any selected value matches; across dimensions all must
/// match. A record with a missing value never matches a restricted dimension.
/// An unrestricted dimension stands for every observed value, so it drops
/// missing values too unless [`Dimension::keeps_missing`] says otherwise.
/// Source order is preserved and the table is left untouched.
pub fn apply<'a>(table: &'a Table, selection: &FilterSelection) -> FilteredView<'a> {
    if selection.has_empty_dimension() {
        return FilteredView::new(table.headers(), Vec::new());
    }

    let records = table
        .records()
        .iter()
        .filter(|record| matches(record, selection))
        .collect();
    FilteredView::new(table.headers(), records)
}

/// Whether a single record passes `selection`.
pub fn matches(record: &OrderRecord, selection: &FilterSelection) -> bool {
    Dimension::FILTERABLE.into_iter().all(|dimension| {
        match (record.dimension(dimension), selection.allowed(dimension)) {
            (Some(value), Some(allowed)) => allowed.contains(value),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => dimension.keeps_missing(),
        }
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn order(city: Option<&str>, cuisine: &str, status: &str, amount: i64) -> OrderRecord {
        OrderRecord {
            city: city.map(str::to_string),
            cuisine_type: Some(cuisine.to_string()),
            order_status: Some(status.to_string()),
            final_amount: Some(Decimal::from(amount)),
            ..Default::default()
        }
    }

    fn sample_table() -> Table {
        Table::from_records(vec![
            order(Some("Pune"), "Italian", "delivered", 500),
            order(Some("Pune"), "Italian", "cancelled", 300),
            order(Some("Delhi"), "Chinese", "delivered", 200),
            order(Some("Mumbai"), "Thai", "delivered", 150),
            order(None, "Thai", "delivered", 50),
        ])
    }

    fn cities(view: &FilteredView<'_>) -> Vec<Option<String>> {
        view.iter().map(|r| r.city.clone()).collect()
    }

    // ── apply ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_unrestricted_returns_every_record_with_a_city() {
        let table = sample_table();
        let view = apply(&table, &FilterSelection::unrestricted());
        assert_eq!(view.len(), table.len() - 1);
        assert!(view.iter().all(|r| r.city.is_some()));
    }

    #[test]
    fn test_unrestricted_equals_all_observed_for_city_and_cuisine() {
        let mut no_cuisine = order(Some("Pune"), "x", "delivered", 300);
        no_cuisine.cuisine_type = None;
        let mut rows = sample_table().records().to_vec();
        rows.push(no_cuisine);
        let table = Table::from_records(rows);

        let default_view = apply(&table, &FilterSelection::unrestricted());
        let explicit = apply(&table, &FilterSelection::all_observed(&table));
        assert_eq!(default_view.records(), explicit.records());
        assert_eq!(default_view.len(), 4);
    }

    #[test]
    fn test_unrestricted_status_keeps_missing_status() {
        let mut no_status = order(Some("Pune"), "Thai", "x", 10);
        no_status.order_status = None;
        let table = Table::from_records(vec![order(Some("Pune"), "Thai", "delivered", 10), no_status]);

        assert_eq!(apply(&table, &FilterSelection::unrestricted()).len(), 2);

        let mut sel = FilterSelection::default();
        sel.set(Dimension::OrderStatus, ["delivered"]);
        assert_eq!(apply(&table, &sel).len(), 1);
    }

    #[test]
    fn test_single_city_selection() {
        let table = sample_table();
        let mut sel = FilterSelection::default();
        sel.set(Dimension::City, ["Pune"]);

        let view = apply(&table, &sel);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.city.as_deref() == Some("Pune")));
    }

    #[test]
    fn test_disjunction_within_dimension() {
        let table = sample_table();
        let mut sel = FilterSelection::default();
        sel.set(Dimension::City, ["Pune", "Delhi"]);
        assert_eq!(apply(&table, &sel).len(), 3);
    }

    #[test]
    fn test_conjunction_across_dimensions() {
        let table = sample_table();
        let mut sel = FilterSelection::default();
        sel.set(Dimension::City, ["Pune", "Delhi"]);
        sel.set(Dimension::OrderStatus, ["delivered"]);
        sel.set(Dimension::CuisineType, ["Italian", "Chinese", "Thai"]);

        let view = apply(&table, &sel);
        assert_eq!(
            cities(&view),
            vec![Some("Pune".to_string()), Some("Delhi".to_string())]
        );
        for r in view.iter() {
            assert!(sel.is_selected(Dimension::City, r.city.as_deref().unwrap()));
            assert!(sel.is_selected(Dimension::OrderStatus, r.order_status.as_deref().unwrap()));
        }
    }

    #[test]
    fn test_empty_dimension_yields_empty_view() {
        let table = sample_table();
        let mut sel = FilterSelection::all_observed(&table);
        sel.select_none(Dimension::CuisineType);
        assert!(apply(&table, &sel).is_empty());
    }

    #[test]
    fn test_all_observed_excludes_missing_values() {
        let table = sample_table();
        let explicit = apply(&table, &FilterSelection::all_observed(&table));
        assert_eq!(explicit.len(), table.len() - 1);
        assert!(explicit.iter().all(|r| r.city.is_some()));
    }

    #[test]
    fn test_membership_is_exact_string_equality() {
        let table = sample_table();
        let mut sel = FilterSelection::default();
        sel.set(Dimension::City, ["pune"]);
        assert!(apply(&table, &sel).is_empty());
    }

    #[test]
    fn test_apply_preserves_source_order_and_table() {
        let table = sample_table();
        let before = table.records().to_vec();
        let mut sel = FilterSelection::default();
        sel.set(Dimension::OrderStatus, ["delivered"]);

        let view = apply(&table, &sel);
        let amounts: Vec<Decimal> = view.iter().filter_map(|r| r.final_amount).collect();
        assert_eq!(
            amounts,
            [500, 200, 150].map(Decimal::from).to_vec()
        );
        assert_eq!(table.records(), before.as_slice());
    }

    #[test]
    fn test_view_borrows_source_headers() {
        let table = sample_table();
        let view = apply(&table, &FilterSelection::default());
        assert_eq!(view.headers(), table.headers());
    }

    // ── filter_options ────────────────────────────────────────────────────────

    #[test]
    fn test_filter_options_cover_filterable_dimensions() {
        let table = sample_table();
        let options = filter_options(&table);
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].dimension, Dimension::City);
        assert_eq!(options[0].values, vec!["Delhi", "Mumbai", "Pune"]);
        assert_eq!(options[2].dimension, Dimension::OrderStatus);
        assert_eq!(options[2].values, vec!["cancelled", "delivered"]);
    }
}
