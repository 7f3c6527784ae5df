//! Terminal UI layer for the food-delivery dashboard.
//!
//! Provides themes, the header, KPI, chart and filter components, the
//! full-screen dashboard and plain-text summary views, and the interactive
//! event loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod summary_view;
pub mod themes;

pub use dashboard_core as core;
