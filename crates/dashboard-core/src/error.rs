use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading the order table from disk.
///
/// Every variant is fatal for the session: there is no fallback data source.
#[derive(Error, Debug)]
pub enum DataSourceError {
    /// The file could not be opened.
    #[error("Failed to open data file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content could not be read as delimited text.
    #[error("Failed to parse CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("Missing required column {column} in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A numeric column holds a value that is not a number.
    #[error("Invalid number {value:?} in column {column} at row {row}")]
    InvalidNumber {
        row: u64,
        column: String,
        value: String,
    },

    /// A data row has more fields than the header row.
    #[error("Row {row} has {found} fields but the header has {expected}")]
    TooManyFields {
        row: u64,
        expected: usize,
        found: usize,
    },
}

/// All errors produced by the food delivery dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The input table could not be loaded.
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// A mean or rate was requested over zero records.
    #[error("Cannot compute {0} over an empty view")]
    ArithmeticUndefined(&'static str),

    /// A column name is not one of the categorical dimensions.
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    /// A column name is not one of the numeric measures.
    #[error("Unknown measure: {0}")]
    UnknownMeasure(String),

    /// A filter value does not occur in the loaded table.
    #[error("Unknown value {value:?} for filter {dimension}")]
    UnknownFilterValue { dimension: String, value: String },

    /// The filtered view could not be written out.
    #[error("Failed to export to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
