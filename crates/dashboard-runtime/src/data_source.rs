//! Cached access to the orders file.
//!
//! [`DataSource`] loads the table once and hands out the cached copy until
//! [`DataSource::reload`] is called. A failed reload keeps the previous table
//! so the dashboard stays usable while the file is being rewritten.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use dashboard_core::models::Table;
use dashboard_core::Result;
use dashboard_data::reader::load_table;

// ── DataSource ────────────────────────────────────────────────────────────────

/// Orders file plus its most recently loaded table.
///
/// # Example
/// ```no_run
/// use dashboard_runtime::data_source::DataSource;
///
/// let mut source = DataSource::new("data/online_food_delivery_final.csv");
/// let table = source.load()?;
/// println!("{} orders", table.len());
/// # Ok::<(), dashboard_runtime::core::DashboardError>(())
/// ```
#[derive(Debug)]
pub struct DataSource {
    path: PathBuf,
    cache: Option<Table>,
    /// When the cache was last populated.
    loaded_at: Option<DateTime<Utc>>,
    /// Description of the last failed load, cleared on success.
    last_error: Option<String>,
}

impl DataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
            loaded_at: None,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the cached table, reading the file on first use.
    pub fn load(&mut self) -> Result<&Table> {
        let table = match self.cache.take() {
            Some(table) => table,
            None => self.fetch()?,
        };
        Ok(&*self.cache.insert(table))
    }

    /// Re-read the file, replacing the cached table.
    ///
    /// On failure the previous table (if any) is kept and the error returned.
    pub fn reload(&mut self) -> Result<&Table> {
        let table = self.fetch()?;
        Ok(&*self.cache.insert(table))
    }

    /// Drop the cached table so the next [`load`](Self::load) reads the file.
    pub fn invalidate(&mut self) {
        self.cache = None;
        self.loaded_at = None;
        tracing::debug!("table cache invalidated");
    }

    /// Cached table without touching the file.
    pub fn table(&self) -> Option<&Table> {
        self.cache.as_ref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn fetch(&mut self) -> Result<Table> {
        let started = Instant::now();
        match load_table(&self.path) {
            Ok(table) => {
                tracing::info!(
                    rows = table.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    path = %self.path.display(),
                    "orders table loaded"
                );
                self.loaded_at = Some(Utc::now());
                self.last_error = None;
                Ok(table)
            }
            Err(e) => {
                tracing::warn!(error = %e, "load failed; keeping previous table");
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
