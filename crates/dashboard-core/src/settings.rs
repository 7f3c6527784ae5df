use clap::Parser;
use std::path::PathBuf;

use crate::models::Dimension;
use crate::selection::FilterSelection;

/// Default location of the orders file, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/online_food_delivery_final.csv";

/// Environment variable that overrides the orders file location.
pub const DATA_PATH_ENV: &str = "FOOD_DASHBOARD_DATA";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Online food delivery business dashboard
#[derive(Parser, Debug, Clone)]
#[command(
    name = "food-dashboard",
    about = "Online food delivery business dashboard",
    version
)]
pub struct Settings {
    /// Path to the orders CSV file
    #[arg(long, env = DATA_PATH_ENV, default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "summary", "json"])]
    pub view: String,

    /// Cities to include (comma separated; all when omitted)
    #[arg(long, value_delimiter = ',')]
    pub city: Vec<String>,

    /// Cuisines to include (comma separated; all when omitted)
    #[arg(long, value_delimiter = ',')]
    pub cuisine: Vec<String>,

    /// Order statuses to include (comma separated; all when omitted)
    #[arg(long, value_delimiter = ',')]
    pub status: Vec<String>,

    /// Write the filtered orders to this CSV file and exit
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Directory used by the dashboard's export key (defaults to Downloads)
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list, for tests.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Apply the `--debug` flag.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Initial filter selection from `--city`, `--cuisine` and `--status`.
    ///
    /// Dimensions without a flag stay unrestricted.
    pub fn filter_selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::unrestricted();
        let flags = [
            (Dimension::City, &self.city),
            (Dimension::CuisineType, &self.cuisine),
            (Dimension::OrderStatus, &self.status),
        ];
        for (dimension, values) in flags {
            if !values.is_empty() {
                selection.set(dimension, values.iter().cloned());
            }
        }
        selection
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
