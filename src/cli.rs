//! Command-line argument parsing for the replay tool
//!
//! Supports:
//! - Loading a grid from a CSV/TSV file
//! - Replaying a comma-separated key sequence against it
//! - Overriding the skip set, row creation and locked cells
//! - Drop-down columns to exercise arrow key suppression

use clap::Parser;
use std::path::PathBuf;

use crate::grid::Coordinate;
use crate::keymap::{parse_key_string, Keystroke};

/// Replay cell editor navigation keys against a grid
#[derive(Parser, Debug)]
#[command(
    name = "gridnav",
    version,
    about = "Replay cell editor navigation keys against a grid"
)]
pub struct CliArgs {
    /// CSV, TSV or PSV file holding the grid
    #[arg(value_name = "GRID")]
    pub grid: PathBuf,

    /// Keys to replay, comma-separated (e.g. "tab,tab,shift+tab,x,enter")
    #[arg(short, long, value_name = "KEYS", default_value = "")]
    pub keys: String,

    /// Cell to open the first editor on, as ROW,COL (0-based)
    #[arg(short, long, value_name = "ROW,COL", default_value = "0,0")]
    pub start: String,

    /// Column Tab and Shift+Tab step over (repeatable)
    #[arg(long = "skip", value_name = "COL")]
    pub skip: Vec<usize>,

    /// Create a row when Tab/Enter runs past the last one
    #[arg(long)]
    pub create_rows: bool,

    /// Cell that cannot be edited, as ROW,COL (repeatable)
    #[arg(long = "lock", value_name = "ROW,COL")]
    pub lock: Vec<String>,

    /// Drop-down column, as COL=OPTION|OPTION|... (repeatable)
    #[arg(long = "options", value_name = "COL=OPTIONS")]
    pub options: Vec<String>,

    /// Navigation config file instead of ~/.config/gridnav/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keymap file instead of ~/.config/gridnav/keymap.yaml
    #[arg(long, value_name = "PATH")]
    pub keymap: Option<PathBuf>,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

/// A column that opens a drop-down editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionColumn {
    pub column: usize,
    pub options: Vec<String>,
}

/// Replay settings derived from CLI arguments
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    pub grid_path: PathBuf,
    pub keys: Vec<Keystroke>,
    pub start: Coordinate,
    pub skipped: Vec<usize>,
    pub create_rows: bool,
    pub locked: Vec<Coordinate>,
    pub selection_columns: Vec<SelectionColumn>,
    pub config_path: Option<PathBuf>,
    pub keymap_path: Option<PathBuf>,
    pub json: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into replay settings
    pub fn into_config(self) -> Result<ReplayConfig, String> {
        let keys = parse_keys(&self.keys)?;
        let start = parse_coordinate(&self.start)?;
        let locked = self
            .lock
            .iter()
            .map(|s| parse_coordinate(s))
            .collect::<Result<Vec<_>, _>>()?;
        let selection_columns = self
            .options
            .iter()
            .map(|s| parse_selection_column(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReplayConfig {
            grid_path: self.grid,
            keys,
            start,
            skipped: self.skip,
            create_rows: self.create_rows,
            locked,
            selection_columns,
            config_path: self.config,
            keymap_path: self.keymap,
            json: self.json,
        })
    }
}

/// Parse "tab, shift+tab,x" into keystrokes; empty entries are ignored
pub fn parse_keys(keys: &str) -> Result<Vec<Keystroke>, String> {
    keys.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(|k| parse_key_string(k).map_err(|e| format!("--keys: {}", e)))
        .collect()
}

/// Parse "ROW,COL"
pub fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("Expected ROW,COL but got '{}'", s))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row in '{}'", s))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| format!("Invalid column in '{}'", s))?;
    Ok(Coordinate::new(row, col))
}

/// Parse "COL=A|B|C"
pub fn parse_selection_column(s: &str) -> Result<SelectionColumn, String> {
    let (column, options) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected COL=OPTIONS but got '{}'", s))?;
    let column = column
        .trim()
        .parse()
        .map_err(|_| format!("Invalid column in '{}'", s))?;
    let options: Vec<String> = options
        .split('|')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();
    if options.is_empty() {
        return Err(format!("No options in '{}'", s));
    }
    Ok(SelectionColumn { column, options })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{KeyCode, Modifiers};

    fn args(keys: &str) -> CliArgs {
        CliArgs {
            grid: PathBuf::from("grid.csv"),
            keys: keys.to_string(),
            start: "0,0".to_string(),
            skip: vec![],
            create_rows: false,
            lock: vec![],
            options: vec![],
            config: None,
            keymap: None,
            json: false,
        }
    }

    #[test]
    fn test_defaults() {
        let config = args("").into_config().unwrap();
        assert!(config.keys.is_empty());
        assert_eq!(config.start, Coordinate::new(0, 0));
        assert!(!config.create_rows);
    }

    #[test]
    fn test_key_sequence() {
        let config = args("tab, shift+tab,x,enter").into_config().unwrap();
        assert_eq!(
            config.keys,
            vec![
                Keystroke::key(KeyCode::Tab),
                Keystroke::new(KeyCode::Tab, Modifiers::SHIFT),
                Keystroke::key(KeyCode::Char('x')),
                Keystroke::key(KeyCode::Enter),
            ]
        );
    }

    #[test]
    fn test_bad_key_is_an_error() {
        let err = args("tab,warp").into_config().unwrap_err();
        assert!(err.contains("warp"));
    }

    #[test]
    fn test_start_and_locks() {
        let mut cli = args("");
        cli.start = "2, 1".to_string();
        cli.lock = vec!["0,1".to_string(), "3,0".to_string()];
        let config = cli.into_config().unwrap();

        assert_eq!(config.start, Coordinate::new(2, 1));
        assert_eq!(
            config.locked,
            vec![Coordinate::new(0, 1), Coordinate::new(3, 0)]
        );
    }

    #[test]
    fn test_bad_coordinate() {
        assert!(parse_coordinate("3").is_err());
        assert!(parse_coordinate("a,1").is_err());
    }

    #[test]
    fn test_selection_column() {
        let column = parse_selection_column("2=red|green| blue").unwrap();
        assert_eq!(column.column, 2);
        assert_eq!(column.options, vec!["red", "green", "blue"]);

        assert!(parse_selection_column("2=").is_err());
        assert!(parse_selection_column("red|green").is_err());
    }
}
