//! Data layer for the food-delivery dashboard.
//!
//! Loads the orders CSV into a [`core::models::Table`], filters it by the
//! sidebar selections, groups the result into chart series and exports
//! filtered views back to CSV. [`pipeline::render`] ties these together into
//! the view model the presentation layer draws.

pub mod aggregator;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod reader;

pub use dashboard_core as core;
