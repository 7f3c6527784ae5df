use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// Column names of the order table, in export order for in-memory tables.
pub const SCHEMA_COLUMNS: [&str; 8] = [
    "City",
    "Cuisine_Type",
    "Order_Status",
    "Final_Amount",
    "Order_Value",
    "Delivery_Time_Min",
    "Delivery_Performance",
    "Payment_Mode",
];

/// `Order_Status` value that marks a cancelled order.
pub const CANCELLED_STATUS: &str = "cancelled";

// ── Dimension ─────────────────────────────────────────────────────────────────

/// A categorical column used for filtering or grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "City")]
    City,
    #[serde(rename = "Cuisine_Type")]
    CuisineType,
    #[serde(rename = "Order_Status")]
    OrderStatus,
    #[serde(rename = "Delivery_Performance")]
    DeliveryPerformance,
    #[serde(rename = "Payment_Mode")]
    PaymentMode,
}

impl Dimension {
    /// Every categorical dimension.
    pub const ALL: [Dimension; 5] = [
        Dimension::City,
        Dimension::CuisineType,
        Dimension::OrderStatus,
        Dimension::DeliveryPerformance,
        Dimension::PaymentMode,
    ];

    /// The dimensions offered as user filters, in sidebar order.
    pub const FILTERABLE: [Dimension; 3] = [
        Dimension::City,
        Dimension::CuisineType,
        Dimension::OrderStatus,
    ];

    /// Exact source column name.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::City => "City",
            Dimension::CuisineType => "Cuisine_Type",
            Dimension::OrderStatus => "Order_Status",
            Dimension::DeliveryPerformance => "Delivery_Performance",
            Dimension::PaymentMode => "Payment_Mode",
        }
    }

    /// Whether an unrestricted filter on this dimension lets records with a
    /// missing value through.
    ///
    /// City and cuisine options are built from the non-missing values only, so
    /// their default selection drops blank cells. The status options keep the
    /// blank value, so the default status selection matches it.
    pub fn keeps_missing(self) -> bool {
        matches!(self, Dimension::OrderStatus)
    }

    /// Short human-readable label for UI headings.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::City => "City",
            Dimension::CuisineType => "Cuisine",
            Dimension::OrderStatus => "Order Status",
            Dimension::DeliveryPerformance => "Delivery Performance",
            Dimension::PaymentMode => "Payment Mode",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Dimension {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|d| d.column() == s)
            .ok_or_else(|| DashboardError::UnknownDimension(s.to_string()))
    }
}

// ── Measure ───────────────────────────────────────────────────────────────────

/// A numeric column that can be summed or averaged.
///
/// Values are exact decimals so that sums do not depend on summation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measure {
    #[serde(rename = "Final_Amount")]
    FinalAmount,
    #[serde(rename = "Order_Value")]
    OrderValue,
    #[serde(rename = "Delivery_Time_Min")]
    DeliveryTimeMin,
}

impl Measure {
    pub const ALL: [Measure; 3] = [
        Measure::FinalAmount,
        Measure::OrderValue,
        Measure::DeliveryTimeMin,
    ];

    /// Exact source column name.
    pub fn column(self) -> &'static str {
        match self {
            Measure::FinalAmount => "Final_Amount",
            Measure::OrderValue => "Order_Value",
            Measure::DeliveryTimeMin => "Delivery_Time_Min",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Measure {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Measure::ALL
            .into_iter()
            .find(|m| m.column() == s)
            .ok_or_else(|| DashboardError::UnknownMeasure(s.to_string()))
    }
}

// ── OrderRecord ───────────────────────────────────────────────────────────────

/// One row of the order table.
///
/// Typed fields are `None` when the source cell was blank. `raw` keeps every
/// field of the source row, including columns the dashboard ignores, so an
/// export reproduces the row exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderRecord {
    pub city: Option<String>,
    pub cuisine_type: Option<String>,
    pub order_status: Option<String>,
    /// Amount actually charged, after discounts and fees.
    pub final_amount: Option<Decimal>,
    /// Basket value before adjustments.
    pub order_value: Option<Decimal>,
    pub delivery_time_minutes: Option<Decimal>,
    pub delivery_performance: Option<String>,
    pub payment_mode: Option<String>,
    /// Source fields, aligned with [`Table::headers`].
    pub raw: Vec<String>,
}

impl OrderRecord {
    /// Value of a categorical column, `None` when missing.
    pub fn dimension(&self, dimension: Dimension) -> Option<&str> {
        let value = match dimension {
            Dimension::City => &self.city,
            Dimension::CuisineType => &self.cuisine_type,
            Dimension::OrderStatus => &self.order_status,
            Dimension::DeliveryPerformance => &self.delivery_performance,
            Dimension::PaymentMode => &self.payment_mode,
        };
        value.as_deref()
    }

    /// Value of a numeric column, `None` when missing.
    pub fn measure(&self, measure: Measure) -> Option<Decimal> {
        match measure {
            Measure::FinalAmount => self.final_amount,
            Measure::OrderValue => self.order_value,
            Measure::DeliveryTimeMin => self.delivery_time_minutes,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.order_status.as_deref() == Some(CANCELLED_STATUS)
    }

    /// Render the typed fields as raw strings in [`SCHEMA_COLUMNS`] order.
    fn schema_fields(&self) -> Vec<String> {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let number = |v: Option<Decimal>| v.map(|n| n.normalize().to_string()).unwrap_or_default();
        vec![
            text(&self.city),
            text(&self.cuisine_type),
            text(&self.order_status),
            number(self.final_amount),
            number(self.order_value),
            number(self.delivery_time_minutes),
            text(&self.delivery_performance),
            text(&self.payment_mode),
        ]
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// The loaded order table. Immutable once built; only filtered into views.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    records: Vec<OrderRecord>,
}

impl Table {
    /// Build a table from a header row and records whose `raw` fields align
    /// with it.
    pub fn new(headers: Vec<String>, records: Vec<OrderRecord>) -> Self {
        Self { headers, records }
    }

    /// Build a table using [`SCHEMA_COLUMNS`] as the header row, deriving each
    /// record's raw fields from its typed fields.
    pub fn from_records(records: Vec<OrderRecord>) -> Self {
        let headers = SCHEMA_COLUMNS.iter().map(|c| c.to_string()).collect();
        let records = records
            .into_iter()
            .map(|mut r| {
                r.raw = r.schema_fields();
                r
            })
            .collect();
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct non-missing values of `dimension`.
    pub fn distinct_values(&self, dimension: Dimension) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|r| r.dimension(dimension))
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// A view over every record.
    pub fn full_view(&self) -> FilteredView<'_> {
        FilteredView::new(&self.headers, self.records.iter().collect())
    }
}

// ── FilteredView ──────────────────────────────────────────────────────────────

/// A borrowed subset of a [`Table`]'s records, in source order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    headers: &'a [String],
    records: Vec<&'a OrderRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn new(headers: &'a [String], records: Vec<&'a OrderRecord>) -> Self {
        Self { headers, records }
    }

    /// Header row of the source table.
    pub fn headers(&self) -> &'a [String] {
        self.headers
    }

    pub fn records(&self) -> &[&'a OrderRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a OrderRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order(city: &str, cuisine: &str, status: &str, amount: i64) -> OrderRecord {
        OrderRecord {
            city: Some(city.to_string()),
            cuisine_type: Some(cuisine.to_string()),
            order_status: Some(status.to_string()),
            final_amount: Some(Decimal::from(amount)),
            ..Default::default()
        }
    }

    // ── Dimension / Measure ───────────────────────────────────────────────────

    #[test]
    fn test_dimension_parses_exact_column_name() {
        assert_eq!("City".parse::<Dimension>().unwrap(), Dimension::City);
        assert_eq!(
            "Cuisine_Type".parse::<Dimension>().unwrap(),
            Dimension::CuisineType
        );
        assert_eq!(
            "Payment_Mode".parse::<Dimension>().unwrap(),
            Dimension::PaymentMode
        );
    }

    #[test]
    fn test_dimension_parse_is_case_sensitive() {
        let err = "city".parse::<Dimension>().unwrap_err();
        assert!(matches!(err, DashboardError::UnknownDimension(ref s) if s == "city"));
    }

    #[test]
    fn test_dimension_display_round_trips() {
        for dim in Dimension::ALL {
            assert_eq!(dim.to_string().parse::<Dimension>().unwrap(), dim);
        }
    }

    #[test]
    fn test_measure_parse() {
        assert_eq!(
            "Final_Amount".parse::<Measure>().unwrap(),
            Measure::FinalAmount
        );
        assert!(matches!(
            "Revenue".parse::<Measure>(),
            Err(DashboardError::UnknownMeasure(_))
        ));
    }

    #[test]
    fn test_dimension_serializes_as_column_name() {
        let json = serde_json::to_string(&Dimension::DeliveryPerformance).unwrap();
        assert_eq!(json, "\"Delivery_Performance\"");
    }

    // ── OrderRecord ───────────────────────────────────────────────────────────

    #[test]
    fn test_record_dimension_lookup() {
        let r = order("Pune", "Italian", "delivered", 500);
        assert_eq!(r.dimension(Dimension::City), Some("Pune"));
        assert_eq!(r.dimension(Dimension::OrderStatus), Some("delivered"));
        assert_eq!(r.dimension(Dimension::PaymentMode), None);
    }

    #[test]
    fn test_record_measure_lookup() {
        let mut r = order("Pune", "Italian", "delivered", 500);
        r.delivery_time_minutes = Some(dec!(32.5));
        assert_eq!(r.measure(Measure::FinalAmount), Some(dec!(500)));
        assert_eq!(r.measure(Measure::DeliveryTimeMin), Some(dec!(32.5)));
        assert_eq!(r.measure(Measure::OrderValue), None);
    }

    #[test]
    fn test_only_status_keeps_missing_values() {
        assert!(Dimension::OrderStatus.keeps_missing());
        assert!(!Dimension::City.keeps_missing());
        assert!(!Dimension::CuisineType.keeps_missing());
    }

    #[test]
    fn test_record_is_cancelled_exact_match() {
        assert!(order("Pune", "Italian", "cancelled", 1).is_cancelled());
        assert!(!order("Pune", "Italian", "Cancelled", 1).is_cancelled());
        assert!(!OrderRecord::default().is_cancelled());
    }

    // ── Table ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_from_records_uses_schema_headers() {
        let table = Table::from_records(vec![order("Pune", "Italian", "delivered", 500)]);
        assert_eq!(table.headers(), &SCHEMA_COLUMNS[..]);
        assert_eq!(table.records()[0].raw[0], "Pune");
        assert_eq!(table.records()[0].raw[3], "500");
        // Missing numeric fields become empty cells.
        assert_eq!(table.records()[0].raw[4], "");
    }

    #[test]
    fn test_distinct_values_sorted_and_skip_missing() {
        let mut no_city = order("x", "Thai", "delivered", 1);
        no_city.city = None;
        let table = Table::from_records(vec![
            order("Pune", "Italian", "delivered", 1),
            order("Delhi", "Chinese", "delivered", 1),
            order("Pune", "Thai", "cancelled", 1),
            no_city,
        ]);
        assert_eq!(table.distinct_values(Dimension::City), vec!["Delhi", "Pune"]);
        assert_eq!(
            table.distinct_values(Dimension::CuisineType),
            vec!["Chinese", "Italian", "Thai"]
        );
    }

    #[test]
    fn test_distinct_values_keep_case_variants() {
        let table = Table::from_records(vec![
            order("Pune", "Italian", "delivered", 1),
            order("pune", "Italian", "delivered", 1),
            order("Pune ", "Italian", "delivered", 1),
        ]);
        assert_eq!(table.distinct_values(Dimension::City).len(), 3);
    }

    #[test]
    fn test_full_view_covers_table() {
        let table = Table::from_records(vec![
            order("Pune", "Italian", "delivered", 1),
            order("Delhi", "Chinese", "delivered", 2),
        ]);
        let view = table.full_view();
        assert_eq!(view.len(), 2);
        assert_eq!(view.headers().len(), SCHEMA_COLUMNS.len());
        assert!(!view.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let table = Table::default();
        assert!(table.is_empty());
        assert!(table.full_view().is_empty());
        assert!(table.distinct_values(Dimension::City).is_empty());
    }
}
