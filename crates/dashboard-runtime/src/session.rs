//! Interactive dashboard state.
//!
//! A [`DashboardSession`] owns the data source and the current filter
//! selection. Every query re-runs the render pipeline from scratch against
//! the cached table; nothing else is carried between interactions.

use std::path::Path;

use dashboard_core::models::{Dimension, Table};
use dashboard_core::selection::FilterSelection;
use dashboard_core::Result;
use dashboard_data::export::export_to_file;
use dashboard_data::filter;
use dashboard_data::pipeline::{render, ViewModel};

use crate::data_source::DataSource;

pub struct DashboardSession {
    source: DataSource,
    selection: FilterSelection,
}

impl DashboardSession {
    /// Load `source` and start with `selection`.
    pub fn open(mut source: DataSource, selection: FilterSelection) -> Result<Self> {
        source.load()?;
        Ok(Self { source, selection })
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// The loaded table.
    pub fn table(&mut self) -> Result<&Table> {
        self.source.load()
    }

    /// Filter options, metrics and chart series for the current selection.
    pub fn view_model(&mut self) -> Result<ViewModel> {
        let table = self.source.load()?;
        Ok(render(table, &self.selection))
    }

    /// Flip one value of `dimension` in or out of the selection.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) -> Result<()> {
        let table = self.source.load()?;
        self.selection.toggle(dimension, value, table);
        tracing::debug!(%dimension, value, "filter value toggled");
        Ok(())
    }

    /// Select every observed value of `dimension`.
    pub fn select_all(&mut self, dimension: Dimension) {
        self.selection.select_all(dimension);
        tracing::debug!(%dimension, "all values selected");
    }

    /// Deselect every value of `dimension`; the view becomes empty.
    pub fn select_none(&mut self, dimension: Dimension) {
        self.selection.select_none(dimension);
        tracing::debug!(%dimension, "all values deselected");
    }

    /// Re-read the data file. Returns the new row count.
    ///
    /// Selected values that no longer occur in the file are dropped from the
    /// selection. On failure the previous table and selection stay in place.
    pub fn reload(&mut self) -> Result<usize> {
        let table = self.source.reload()?;
        let rows = table.len();
        let dropped = self.selection.retain_observed(table);
        if dropped > 0 {
            tracing::warn!(dropped, "selected values no longer present after reload");
        }
        tracing::info!(rows, "data reloaded");
        Ok(rows)
    }

    /// Write the currently filtered rows to `path`. Returns the rows written.
    pub fn export(&mut self, path: &Path) -> Result<usize> {
        let table = self.source.load()?;
        let view = filter::apply(table, &self.selection);
        export_to_file(&view, path)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
