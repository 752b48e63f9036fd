//! Capabilities the host grid injects into the traversal core

use serde::{Deserialize, Serialize};

use super::model::Coordinate;
use crate::editor::CellEditor;

/// Kind of data a grid is bound to
///
/// Only the first two kinds know how to materialize a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// Rows of a tabular content (one record per row)
    #[default]
    TabularRows,
    /// Literals of an enumeration (one value per row)
    EnumeratedValues,
    /// Anything else; rows are never created
    Other,
}

impl BindingKind {
    /// Whether a row factory can create rows for this kind
    pub fn supports_row_creation(self) -> bool {
        matches!(self, BindingKind::TabularRows | BindingKind::EnumeratedValues)
    }
}

/// Current shape of the grid
pub trait GridGeometry {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    /// Row holding the grid selection, if any
    fn selected_row(&self) -> Option<usize>;
}

/// Oracle deciding whether a cell accepts an editor right now
pub trait CellEditability {
    fn can_edit(&self, at: Coordinate) -> bool;
}

/// Creates rows when traversal runs past the last one
pub trait RowFactory {
    /// What the grid is bound to
    fn binding_kind(&self) -> BindingKind;

    /// Append a row for `kind`, returning its index
    ///
    /// Returns `None` when the bound data cannot grow.
    fn create_row(&mut self, kind: BindingKind) -> Option<usize>;
}

/// Mutation surface used by the strategies to move the edited cell
pub trait GridSurface: GridGeometry + CellEditability + RowFactory {
    /// Scroll horizontally until `column` is visible
    fn scroll_into_view(&mut self, column: usize);

    /// Open an editor on `at`
    ///
    /// Returns `None` when there is no editable element at `at`. Requests for
    /// rows that do not exist leave the grid without an editor and move focus
    /// back to the grid itself.
    fn begin_editing(&mut self, at: Coordinate) -> Option<CellEditor>;

    /// Write a committed editor value back into the grid
    fn apply_value(&mut self, at: Coordinate, value: &str);

    /// Re-read the bound data (after rows were created)
    fn refresh(&mut self);

    /// Give keyboard focus to the grid widget instead of a cell editor
    fn focus_grid(&mut self);
}
