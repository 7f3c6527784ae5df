//! Runtime layer for the food-delivery dashboard.
//!
//! Holds the loaded data and the user's filter selection between
//! interactions, and routes each interaction through the render pipeline.

pub mod data_source;
pub mod session;

pub use dashboard_core as core;
pub use dashboard_data as data;
