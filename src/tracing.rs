//! Tracing setup and session diffing
//!
//! Configure console output via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=gridnav::traverse=trace` - module-level filtering
//!
//! Logs are also written to `~/.config/gridnav/logs/gridnav.log` with daily
//! rotation, always at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::grid::Coordinate;
use crate::session::SessionTracker;

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "gridnav.log");
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

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of an edit session for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub position: Option<Coordinate>,
    pub value: Option<String>,
}

impl SessionSnapshot {
    pub fn from_tracker(tracker: &SessionTracker) -> Self {
        Self {
            position: tracker.active_position(),
            value: tracker.active_editor().map(|e| e.value().to_string()),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        match (self.position, other.position) {
            (Some(before), Some(after)) if before != after => {
                changes.push(format!("editor {} → {}", before, after));
            }
            (None, Some(after)) => changes.push(format!("editor opened at {}", after)),
            (Some(before), None) => changes.push(format!("editor at {} closed", before)),
            _ => {}
        }

        if self.position == other.position && self.value != other.value {
            if let Some(value) = &other.value {
                changes.push(format!("value {:?}", value));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{CellEditor, EditorKind};

    #[test]
    fn test_diff_reports_moves() {
        let mut tracker = SessionTracker::new();
        let idle = SessionSnapshot::from_tracker(&tracker);

        tracker.get_cell_editor(Coordinate::new(0, 1), CellEditor::new(EditorKind::Text, "a"));
        let open = SessionSnapshot::from_tracker(&tracker);
        assert_eq!(idle.diff(&open).as_deref(), Some("editor opened at (0,1)"));

        tracker.get_cell_editor(Coordinate::new(1, 1), CellEditor::new(EditorKind::Text, "b"));
        let moved = SessionSnapshot::from_tracker(&tracker);
        assert_eq!(open.diff(&moved).as_deref(), Some("editor (0,1) → (1,1)"));
        assert_eq!(moved.diff(&moved), None);
    }

    #[test]
    fn test_diff_reports_typing() {
        let mut tracker = SessionTracker::new();
        tracker.get_cell_editor(Coordinate::new(0, 0), CellEditor::new(EditorKind::Text, ""));
        let before = SessionSnapshot::from_tracker(&tracker);

        if let Some(editor) = tracker.active_editor_mut() {
            editor.insert_char('x');
        }
        let after = SessionSnapshot::from_tracker(&tracker);
        assert_eq!(before.diff(&after).as_deref(), Some("value \"x\""));
    }
}
