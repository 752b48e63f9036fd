//! In-memory grid types

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use super::surface::{BindingKind, CellEditability, GridGeometry, GridSurface, RowFactory};
use super::viewport::GridViewport;
use crate::editor::{CellEditor, EditorKind};

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Rows of string cells
///
/// Ragged input is allowed; `column_count` is the widest row and missing
/// cells read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridData {
    rows: Vec<Vec<String>>,
    column_count: usize,
}

impl GridData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid of `rows` x `cols` empty cells
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![vec![String::new(); cols]; rows],
            column_count: cols,
        }
    }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let column_count = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        Self { rows, column_count }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value, empty for anything out of range
    pub fn get(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = &str> {
        self.rows
            .get(row)
            .into_iter()
            .flat_map(|cells| cells.iter().map(String::as_str))
    }

    /// Set a cell value; writes to missing rows are dropped
    pub fn set(&mut self, row: usize, col: usize, value: &str) {
        let Some(cells) = self.rows.get_mut(row) else {
            return;
        };
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value.to_string();
        self.column_count = self.column_count.max(col + 1);
    }

    /// Append a row, padding it to the current width; returns its index
    pub fn push_row(&mut self, mut cells: Vec<String>) -> usize {
        if cells.len() < self.column_count {
            cells.resize(self.column_count, String::new());
        }
        self.column_count = self.column_count.max(cells.len());
        self.rows.push(cells);
        self.rows.len() - 1
    }
}

/// Who owns keyboard focus in the grid widget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridFocus {
    /// The grid itself (no cell editor)
    #[default]
    Grid,
    /// A cell editor
    Editor,
}

/// Grid backed by [`GridData`] implementing every collaborator contract
///
/// Editability is decided by locked cells and locked columns. Each column
/// opens a text editor unless a different [`EditorKind`] was registered.
#[derive(Debug, Clone)]
pub struct MemoryGrid {
    data: GridData,
    binding: BindingKind,
    locked_cells: HashSet<Coordinate>,
    locked_columns: BTreeSet<usize>,
    column_editors: HashMap<usize, EditorKind>,
    viewport: GridViewport,
    focus: GridFocus,
    selected_row: Option<usize>,
    editors_opened: usize,
    refreshes: usize,
}

impl MemoryGrid {
    pub fn new(data: GridData) -> Self {
        Self {
            data,
            binding: BindingKind::default(),
            locked_cells: HashSet::new(),
            locked_columns: BTreeSet::new(),
            column_editors: HashMap::new(),
            viewport: GridViewport::new(25, 8),
            focus: GridFocus::Grid,
            selected_row: None,
            editors_opened: 0,
            refreshes: 0,
        }
    }

    pub fn with_binding(mut self, binding: BindingKind) -> Self {
        self.binding = binding;
        self
    }

    pub fn with_viewport(mut self, viewport: GridViewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn data(&self) -> &GridData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut GridData {
        &mut self.data
    }

    pub fn lock_cell(&mut self, at: Coordinate) {
        self.locked_cells.insert(at);
    }

    pub fn unlock_cell(&mut self, at: Coordinate) {
        self.locked_cells.remove(&at);
    }

    pub fn lock_column(&mut self, col: usize) {
        self.locked_columns.insert(col);
    }

    pub fn unlock_column(&mut self, col: usize) {
        self.locked_columns.remove(&col);
    }

    /// Use `kind` for editors opened in `col`
    pub fn set_column_editor(&mut self, col: usize, kind: EditorKind) {
        self.column_editors.insert(col, kind);
    }

    pub fn focus(&self) -> GridFocus {
        self.focus
    }

    pub fn viewport(&self) -> &GridViewport {
        &self.viewport
    }

    /// Number of editors opened so far
    pub fn editors_opened(&self) -> usize {
        self.editors_opened
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    fn editor_kind(&self, col: usize) -> EditorKind {
        self.column_editors.get(&col).cloned().unwrap_or_default()
    }

    fn in_range(&self, at: Coordinate) -> bool {
        at.row < self.data.row_count() && at.col < self.data.column_count()
    }
}

impl GridGeometry for MemoryGrid {
    fn row_count(&self) -> usize {
        self.data.row_count()
    }

    fn column_count(&self) -> usize {
        self.data.column_count()
    }

    fn selected_row(&self) -> Option<usize> {
        self.selected_row
    }
}

impl CellEditability for MemoryGrid {
    fn can_edit(&self, at: Coordinate) -> bool {
        self.in_range(at)
            && !self.locked_columns.contains(&at.col)
            && !self.locked_cells.contains(&at)
    }
}

impl RowFactory for MemoryGrid {
    fn binding_kind(&self) -> BindingKind {
        self.binding
    }

    fn create_row(&mut self, kind: BindingKind) -> Option<usize> {
        let row = match kind {
            BindingKind::TabularRows => self.data.push_row(Vec::new()),
            BindingKind::EnumeratedValues => {
                let literal = format!("VALUE_{}", self.data.row_count() + 1);
                self.data.push_row(vec![literal])
            }
            BindingKind::Other => return None,
        };
        tracing::debug!(row, ?kind, "created grid row");
        Some(row)
    }
}

impl GridSurface for MemoryGrid {
    fn scroll_into_view(&mut self, column: usize) {
        self.viewport
            .ensure_column_visible(column, self.data.column_count());
    }

    fn begin_editing(&mut self, at: Coordinate) -> Option<CellEditor> {
        if !self.in_range(at) {
            tracing::debug!(%at, "no element at coordinate, grid loses editor focus");
            self.focus = GridFocus::Grid;
            return None;
        }
        if !self.can_edit(at) {
            tracing::debug!(%at, "cell is not editable");
            self.focus = GridFocus::Grid;
            return None;
        }

        self.editors_opened += 1;
        self.selected_row = Some(at.row);
        self.focus = GridFocus::Editor;
        self.viewport.ensure_visible(
            at.row,
            at.col,
            self.data.row_count(),
            self.data.column_count(),
        );
        Some(CellEditor::new(
            self.editor_kind(at.col),
            self.data.get(at.row, at.col),
        ))
    }

    fn apply_value(&mut self, at: Coordinate, value: &str) {
        self.data.set(at.row, at.col, value);
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn focus_grid(&mut self) {
        self.focus = GridFocus::Grid;
    }
}
