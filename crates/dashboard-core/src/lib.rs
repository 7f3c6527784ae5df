//! Shared domain types for the food delivery dashboard.
//!
//! Holds the order table model, filter selections, the summary-metrics
//! calculator, display formatting, CLI settings and the error taxonomy used
//! by every other crate in the workspace.

pub mod error;
pub mod formatting;
pub mod metrics;
pub mod models;
pub mod selection;
pub mod settings;

pub use error::{DashboardError, DataSourceError, Result};
