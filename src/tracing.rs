//! Tracing infrastructure for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=flowgrid::model=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/flowgrid/logs/flowgrid.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::FlowSheet;

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr so command output on stdout stays clean.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "flowgrid.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of sheet state for diffing around an update
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSnapshot {
    pub texts: usize,
    pub flows: usize,
    pub rows: usize,
    pub selected_row: usize,
    pub editing: Option<(usize, String)>,
    pub window: (usize, usize),
}

impl SheetSnapshot {
    pub fn from_sheet(sheet: &FlowSheet) -> Self {
        let window = sheet.window();
        Self {
            texts: sheet.texts().len(),
            flows: sheet.flows().len(),
            rows: sheet.row_count(),
            selected_row: sheet.selection.row,
            editing: sheet.editing().map(|e| (e.row, e.column.to_string())),
            window: (window.start, window.end),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SheetSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.texts != other.texts {
            changes.push(format!("texts: {} → {}", self.texts, other.texts));
        }
        if self.flows != other.flows {
            changes.push(format!("flows: {} → {}", self.flows, other.flows));
        }
        if self.rows != other.rows {
            changes.push(format!("rows: {} → {}", self.rows, other.rows));
        }
        if self.selected_row != other.selected_row {
            changes.push(format!(
                "selection: {} → {}",
                self.selected_row, other.selected_row
            ));
        }
        if self.editing != other.editing {
            let describe = |e: &Option<(usize, String)>| match e {
                Some((row, column)) => format!("{}:{}", row, column),
                None => "none".to_string(),
            };
            changes.push(format!(
                "edit: {} → {}",
                describe(&self.editing),
                describe(&other.editing)
            ));
        }
        if self.window != other.window {
            changes.push(format!(
                "window: {}..{} → {}..{}",
                self.window.0, self.window.1, other.window.0, other.window.1
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
