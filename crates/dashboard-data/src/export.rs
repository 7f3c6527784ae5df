//! CSV export of a filtered view.
//!
//! Writes the source header row and the raw source fields of each record, so
//! re-loading an export reproduces the same rows.

use std::io::Write;
use std::path::{Path, PathBuf};

use dashboard_core::models::FilteredView;
use dashboard_core::{DashboardError, Result};
use tracing::info;

/// File name used for dashboard exports.
pub const EXPORT_FILE_NAME: &str = "food_delivery_dashboard_data.csv";

/// Write `view` as UTF-8 comma-delimited text to `writer`.
pub fn write_csv<W: Write>(view: &FilteredView<'_>, writer: W) -> std::result::Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(view.headers())?;
    for record in view.iter() {
        wtr.write_record(&record.raw)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Serialise `view` into an in-memory CSV buffer.
pub fn to_csv_bytes(view: &FilteredView<'_>) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::new();
    write_csv(view, &mut buf)?;
    Ok(buf)
}

/// Write `view` to `path`, creating parent directories as needed.
///
/// Returns the number of data rows written.
pub fn export_to_file(view: &FilteredView<'_>, path: &Path) -> Result<usize> {
    let export_error = |source: csv::Error| DashboardError::Export {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| export_error(e.into()))?;
    }
    let file = std::fs::File::create(path).map_err(|e| export_error(e.into()))?;
    write_csv(view, std::io::BufWriter::new(file)).map_err(export_error)?;

    info!("Exported {} rows to {}", view.len(), path.display());
    Ok(view.len())
}

/// Where an export lands: `dir` when given, otherwise the user's download
/// directory, otherwise the working directory.
pub fn default_export_path(dir: Option<&Path>) -> PathBuf {
    let base = dir
        .map(Path::to_path_buf)
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(EXPORT_FILE_NAME)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
