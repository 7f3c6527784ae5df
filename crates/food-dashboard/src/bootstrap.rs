use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Append to a file.
    File(&'a Path),
    Stderr,
    /// Drop every record; used while the TUI owns the terminal.
    Discard,
}

impl<'a> LogTarget<'a> {
    /// A log file always wins; otherwise the interactive dashboard discards
    /// records so they do not corrupt the screen.
    pub fn choose(log_file: Option<&'a Path>, interactive: bool) -> Self {
        match log_file {
            Some(path) => Self::File(path),
            None if interactive => Self::Discard,
            None => Self::Stderr,
        }
    }
}

/// Map a `--log-level` value to an [`EnvFilter`] directive.
///
/// Unrecognised names fall back to `"info"`.
pub fn level_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" | "WARN" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber.
pub fn setup_logging(log_level: &str, target: LogTarget<'_>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, ansi) = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        LogTarget::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogTarget::Discard => (BoxMakeWriter::new(std::io::sink), false),
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(ansi)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("Cannot install the tracing subscriber")?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
