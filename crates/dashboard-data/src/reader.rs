//! CSV loading for the food delivery dashboard.
//!
//! Reads the orders file into a [`Table`], keeping every source field so the
//! filtered view can be exported unchanged.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use dashboard_core::models::{Dimension, Measure, OrderRecord, Table};
use dashboard_core::DataSourceError;
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Cell contents treated as a missing value, matching common CSV tooling.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the orders table from `path`.
///
/// Fails when the file cannot be opened, is not valid delimited text, lacks a
/// required column, or holds a non-numeric value in a numeric column.
pub fn load_table(path: &Path) -> Result<Table, DataSourceError> {
    let started = Instant::now();
    let file = std::fs::File::open(path).map_err(|source| DataSourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let table = read_table(std::io::BufReader::new(file), path)?;

    debug!(
        "Loaded {} rows ({} columns) from {} in {:.3}s",
        table.len(),
        table.headers().len(),
        path.display(),
        started.elapsed().as_secs_f64(),
    );
    Ok(table)
}

/// Parse CSV data from any reader. `origin` is only used in error messages.
pub fn read_table<R: Read>(reader: R, origin: &Path) -> Result<Table, DataSourceError> {
    let csv_error = |source: csv::Error| DataSourceError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(csv_error)?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let columns = ColumnIndex::locate(&headers, origin)?;

    let mut records = Vec::new();
    let mut padded_rows = 0u64;

    for result in rdr.records() {
        let row = result.map_err(csv_error)?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        if row.len() > headers.len() {
            return Err(DataSourceError::TooManyFields {
                row: line,
                expected: headers.len(),
                found: row.len(),
            });
        }

        let mut raw: Vec<String> = row.iter().map(str::to_string).collect();
        if raw.len() < headers.len() {
            padded_rows += 1;
            raw.resize(headers.len(), String::new());
        }

        records.push(columns.build(raw, line)?);
    }

    if padded_rows > 0 {
        warn!(
            "{} short rows in {} padded with missing values",
            padded_rows,
            origin.display()
        );
    }

    Ok(Table::new(headers, records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the required columns within the header row.
struct ColumnIndex {
    city: usize,
    cuisine_type: usize,
    order_status: usize,
    final_amount: usize,
    order_value: usize,
    delivery_time_minutes: usize,
    delivery_performance: usize,
    payment_mode: usize,
}

impl ColumnIndex {
    fn locate(headers: &[String], origin: &Path) -> Result<Self, DataSourceError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| DataSourceError::MissingColumn {
                    path: origin.to_path_buf(),
                    column: column.to_string(),
                })
        };

        Ok(Self {
            city: find(Dimension::City.column())?,
            cuisine_type: find(Dimension::CuisineType.column())?,
            order_status: find(Dimension::OrderStatus.column())?,
            final_amount: find(Measure::FinalAmount.column())?,
            order_value: find(Measure::OrderValue.column())?,
            delivery_time_minutes: find(Measure::DeliveryTimeMin.column())?,
            delivery_performance: find(Dimension::DeliveryPerformance.column())?,
            payment_mode: find(Dimension::PaymentMode.column())?,
        })
    }

    /// Map one padded row to an [`OrderRecord`].
    fn build(&self, raw: Vec<String>, line: u64) -> Result<OrderRecord, DataSourceError> {
        let number = |idx: usize, measure: Measure| parse_number(&raw[idx], measure, line);

        Ok(OrderRecord {
            city: text(&raw[self.city]),
            cuisine_type: text(&raw[self.cuisine_type]),
            order_status: text(&raw[self.order_status]),
            final_amount: number(self.final_amount, Measure::FinalAmount)?,
            order_value: number(self.order_value, Measure::OrderValue)?,
            delivery_time_minutes: number(self.delivery_time_minutes, Measure::DeliveryTimeMin)?,
            delivery_performance: text(&raw[self.delivery_performance]),
            payment_mode: text(&raw[self.payment_mode]),
            raw,
        })
    }
}

fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

/// Categorical cell: kept verbatim (no trimming or case folding).
fn text(value: &str) -> Option<String> {
    if is_missing(value) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Numeric cell: surrounding whitespace is ignored. Parsed as an exact
/// decimal; exponent notation (`1.5e3`) is accepted.
fn parse_number(value: &str, measure: Measure, line: u64) -> Result<Option<Decimal>, DataSourceError> {
    let trimmed = value.trim();
    if is_missing(trimmed) {
        return Ok(None);
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map(Some)
        .map_err(|_| DataSourceError::InvalidNumber {
            row: line,
            column: measure.column().to_string(),
            value: value.to_string(),
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str = "Order_ID,City,Cuisine_Type,Order_Status,Final_Amount,Order_Value,Delivery_Time_Min,Delivery_Performance,Payment_Mode";

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn parse(lines: &[&str]) -> Result<Table, DataSourceError> {
        let data = lines.join("\n");
        read_table(data.as_bytes(), Path::new("inline.csv"))
    }

    // ── load_table ────────────────────────────────────────────────────────────

    #[test]
    fn test_load_table_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "orders.csv",
            &[
                HEADER,
                "1,Pune,Italian,delivered,500,520.5,32,On Time,UPI",
                "2,Delhi,Chinese,cancelled,300,310,45,Delayed,Card",
            ],
        );

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.headers().len(), 9);

        let first = &table.records()[0];
        assert_eq!(first.city.as_deref(), Some("Pune"));
        assert_eq!(first.final_amount, Some(dec!(500)));
        assert_eq!(first.order_value, Some(dec!(520.5)));
        assert_eq!(first.delivery_time_minutes, Some(dec!(32)));
        assert_eq!(first.payment_mode.as_deref(), Some("UPI"));
        assert_eq!(first.raw[0], "1");
    }

    #[test]
    fn test_load_table_missing_file() {
        let err = load_table(Path::new("/tmp/does-not-exist-food-dashboard.csv")).unwrap_err();
        assert!(matches!(err, DataSourceError::Open { .. }));
    }

    // ── read_table ────────────────────────────────────────────────────────────

    #[test]
    fn test_missing_required_column() {
        let err = parse(&["City,Cuisine_Type,Order_Status", "Pune,Italian,delivered"]).unwrap_err();
        match err {
            DataSourceError::MissingColumn { column, .. } => assert_eq!(column, "Final_Amount"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input_reports_missing_column() {
        let err = parse(&[]).unwrap_err();
        assert!(matches!(err, DataSourceError::MissingColumn { .. }));
    }

    #[test]
    fn test_header_only_yields_empty_table() {
        let table = parse(&[HEADER]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 9);
    }

    #[test]
    fn test_columns_located_by_name_not_position() {
        let table = parse(&[
            "Payment_Mode,Delivery_Performance,Delivery_Time_Min,Order_Value,Final_Amount,Order_Status,Cuisine_Type,City",
            "Cash,On Time,20,100,90,delivered,Thai,Mumbai",
        ])
        .unwrap();
        let r = &table.records()[0];
        assert_eq!(r.city.as_deref(), Some("Mumbai"));
        assert_eq!(r.final_amount, Some(dec!(90)));
        assert_eq!(r.payment_mode.as_deref(), Some("Cash"));
    }

    #[test]
    fn test_blank_and_marker_cells_are_missing() {
        let table = parse(&[
            HEADER,
            "1,,Italian,NA,,n/a,NaN,,UPI",
        ])
        .unwrap();
        let r = &table.records()[0];
        assert!(r.city.is_none());
        assert!(r.order_status.is_none());
        assert!(r.final_amount.is_none());
        assert!(r.order_value.is_none());
        assert!(r.delivery_time_minutes.is_none());
        assert!(r.delivery_performance.is_none());
        // Raw text is retained for export.
        assert_eq!(r.raw[3], "NA");
    }

    #[test]
    fn test_categorical_values_not_normalised() {
        let table = parse(&[HEADER, "1, Pune ,ITALIAN,Delivered,1,1,1,On Time,UPI"]).unwrap();
        let r = &table.records()[0];
        assert_eq!(r.city.as_deref(), Some(" Pune "));
        assert_eq!(r.cuisine_type.as_deref(), Some("ITALIAN"));
        assert!(!r.is_cancelled());
    }

    #[test]
    fn test_numeric_whitespace_tolerated() {
        let table = parse(&[HEADER, "1,Pune,Thai,delivered, 250.75 ,300,15,On Time,UPI"]).unwrap();
        assert_eq!(table.records()[0].final_amount, Some(dec!(250.75)));
    }

    #[test]
    fn test_amounts_parsed_exactly() {
        let table = parse(&[
            HEADER,
            "1,Pune,Thai,delivered,533.82,0.10,1.5e1,On Time,UPI",
        ])
        .unwrap();
        let r = &table.records()[0];
        assert_eq!(r.final_amount.unwrap().to_string(), "533.82");
        assert_eq!(r.order_value, Some(dec!(0.1)));
        assert_eq!(r.delivery_time_minutes, Some(dec!(15)));
    }

    #[test]
    fn test_invalid_number_is_error() {
        let err = parse(&[HEADER, "1,Pune,Thai,delivered,abc,300,15,On Time,UPI"]).unwrap_err();
        match err {
            DataSourceError::InvalidNumber { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Final_Amount");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_row_padded() {
        let table = parse(&[HEADER, "1,Pune,Thai,delivered,100"]).unwrap();
        let r = &table.records()[0];
        assert_eq!(r.final_amount, Some(dec!(100)));
        assert!(r.order_value.is_none());
        assert!(r.payment_mode.is_none());
        assert_eq!(r.raw.len(), 9);
    }

    #[test]
    fn test_long_row_is_error() {
        let err = parse(&[HEADER, "1,Pune,Thai,delivered,1,1,1,On Time,UPI,extra"]).unwrap_err();
        assert!(matches!(
            err,
            DataSourceError::TooManyFields {
                expected: 9,
                found: 10,
                ..
            }
        ));
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let table = parse(&[HEADER, "1,\"Delhi, NCR\",Thai,delivered,1,1,1,On Time,UPI"]).unwrap();
        assert_eq!(table.records()[0].city.as_deref(), Some("Delhi, NCR"));
    }

    #[test]
    fn test_utf8_bom_stripped_from_first_header() {
        let data = "\u{feff}City,Cuisine_Type,Order_Status,Final_Amount,Order_Value,Delivery_Time_Min,Delivery_Performance,Payment_Mode\nPune,Thai,delivered,1,1,1,On Time,UPI";
        let table = read_table(data.as_bytes(), Path::new("bom.csv")).unwrap();
        assert_eq!(table.headers()[0], "City");
        assert_eq!(table.len(), 1);
    }
}
