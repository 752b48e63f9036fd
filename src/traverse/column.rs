//! Traversal within one grid
//!
//! Handles Tab/Shift+Tab, Enter, Escape and the vertical arrows for the
//! cell editors of a single grid. The only state is the skip set and the
//! row creation policy; every step is a function of the edited coordinate
//! and the intent.

use super::intent::{KeyOutcome, NavIntent};
use super::skip::SkipSet;
use crate::config::NavigationConfig;
use crate::grid::{Coordinate, GridSurface};
use crate::session::SessionTracker;

/// Single-grid traversal strategy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridTraversal {
    skipped: SkipSet,
    create_rows: bool,
}

impl GridTraversal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &NavigationConfig) -> Self {
        Self {
            skipped: config.skipped_columns.iter().copied().collect(),
            create_rows: config.create_rows,
        }
    }

    pub fn with_row_creation(mut self, enabled: bool) -> Self {
        self.create_rows = enabled;
        self
    }

    pub fn with_skipped<I: IntoIterator<Item = usize>>(mut self, columns: I) -> Self {
        self.skipped.extend(columns);
        self
    }

    pub fn skipped(&self) -> &SkipSet {
        &self.skipped
    }

    pub fn skipped_mut(&mut self) -> &mut SkipSet {
        &mut self.skipped
    }

    pub fn creates_rows(&self) -> bool {
        self.create_rows
    }

    pub fn set_row_creation(&mut self, enabled: bool) {
        self.create_rows = enabled;
    }

    // === Column arithmetic ===
    //
    // These require `column_count > 0` and at least one column outside the
    // skip set; otherwise they divide by zero or loop forever.

    /// Next column to the right, wrapping, stepping over skipped columns
    pub fn next_column(&self, current: Coordinate, column_count: usize) -> usize {
        let mut col = (current.col + 1) % column_count;
        while self.skipped.contains(col) {
            col = (col + 1) % column_count;
        }
        col
    }

    /// Next column to the left, stepping over skipped columns
    ///
    /// Wrapping below column 0 goes to the last column, except on row 0
    /// where it stops at the first visitable column: there is no row above
    /// to wrap into.
    pub fn previous_column(&self, current: Coordinate, column_count: usize) -> usize {
        let mut col = current.col.checked_sub(1);
        loop {
            let candidate = match col {
                Some(candidate) => candidate,
                None if current.row == 0 => return self.first_column(column_count),
                None => column_count - 1,
            };
            if !self.skipped.contains(candidate) {
                return candidate;
            }
            col = candidate.checked_sub(1);
        }
    }

    /// Whether no visitable column lies right of the current one
    pub fn is_at_last_column(&self, current: Coordinate, column_count: usize) -> bool {
        !(current.col + 1..column_count).any(|col| !self.skipped.contains(col))
    }

    /// Leftmost visitable column
    pub fn first_column(&self, column_count: usize) -> usize {
        self.skipped.first_unskipped(column_count).unwrap_or(0)
    }

    // === Row arithmetic ===

    /// Row below the current one
    ///
    /// On the last row this is the current row, unless row creation is
    /// enabled and the grid's binding can grow, in which case a row is
    /// created and its index returned.
    pub fn next_row<G: GridSurface + ?Sized>(&self, grid: &mut G, current: Coordinate) -> usize {
        if current.row + 1 < grid.row_count() {
            return current.row + 1;
        }
        if !self.create_rows {
            return current.row;
        }

        let kind = grid.binding_kind();
        if !kind.supports_row_creation() {
            tracing::debug!(?kind, "binding cannot grow, staying on last row");
            return current.row;
        }

        match grid.create_row(kind) {
            Some(row) => {
                grid.refresh();
                tracing::debug!(row, "row created past the last row");
                row
            }
            None => {
                tracing::warn!(?kind, "row factory did not create a row");
                current.row
            }
        }
    }

    /// Row above the current one, clamped at 0
    pub fn previous_row(&self, current: Coordinate) -> usize {
        current.row.saturating_sub(1)
    }

    // === Editing ===

    /// Move the editor to `at`
    ///
    /// Does nothing when `at` is already being edited. Otherwise commits the
    /// active edit, scrolls the column into view and asks the grid for an
    /// editor. A grid without an element at `at` simply opens nothing.
    pub fn edit_cell<G: GridSurface + ?Sized>(
        &self,
        grid: &mut G,
        session: &mut SessionTracker,
        at: Coordinate,
    ) {
        if session.active_position() == Some(at) {
            tracing::trace!(%at, "cell already being edited");
            return;
        }

        session.commit_to(grid);
        grid.scroll_into_view(at.col);
        match grid.begin_editing(at) {
            Some(editor) => {
                session.get_cell_editor(at, editor);
            }
            None => tracing::debug!(%at, "grid opened no editor"),
        }
    }

    /// Handle a navigation intent from the active editor
    pub fn handle_intent<G: GridSurface + ?Sized>(
        &self,
        grid: &mut G,
        session: &mut SessionTracker,
        intent: NavIntent,
    ) -> KeyOutcome {
        let Some(current) = session.active_position() else {
            return KeyOutcome::Forwarded;
        };
        if grid.column_count() == 0 {
            return KeyOutcome::Forwarded;
        }

        if intent.is_arrow() && session.active_editor().is_some_and(|e| e.is_selection()) {
            // Arrows browse the drop-down instead
            return KeyOutcome::Forwarded;
        }

        tracing::debug!(%current, %intent, "grid traversal");
        match intent {
            NavIntent::Cancel => {
                session.cancel();
            }
            NavIntent::NextRow => {
                session.commit_to(grid);
                let row = self.next_row(grid, current);
                self.edit_cell(grid, session, Coordinate::new(row, current.col));
            }
            NavIntent::NextColumn => {
                session.commit_to(grid);
                self.edit_next_column(grid, session, current);
            }
            NavIntent::PreviousColumn => {
                session.commit_to(grid);
                self.edit_previous_column(grid, session, current);
            }
            NavIntent::RowDown => {
                let row = self.next_row(grid, current);
                self.edit_cell(grid, session, Coordinate::new(row, current.col));
            }
            NavIntent::RowUp => {
                let row = self.previous_row(current);
                self.edit_cell(grid, session, Coordinate::new(row, current.col));
            }
        }
        KeyOutcome::Consumed
    }

    /// The active editor lost focus
    ///
    /// Edits in skipped columns are discarded, all others are committed.
    pub fn focus_lost<G: GridSurface + ?Sized>(&self, grid: &mut G, session: &mut SessionTracker) {
        let Some(at) = session.active_position() else {
            return;
        };
        if self.skipped.contains(at.col) {
            session.cancel();
        } else {
            session.commit_to(grid);
        }
    }

    fn edit_next_column<G: GridSurface + ?Sized>(
        &self,
        grid: &mut G,
        session: &mut SessionTracker,
        current: Coordinate,
    ) {
        let column_count = grid.column_count();
        let col = self.next_column(current, column_count);
        if !self.is_at_last_column(current, column_count) {
            self.edit_cell(grid, session, Coordinate::new(current.row, col));
            return;
        }

        let row = self.next_row(grid, current);
        if row == current.row {
            tracing::debug!(%current, "tab past the last cell, focus goes to the grid");
            session.cancel();
            grid.focus_grid();
            return;
        }
        self.edit_cell(grid, session, Coordinate::new(row, col));
    }

    fn edit_previous_column<G: GridSurface + ?Sized>(
        &self,
        grid: &mut G,
        session: &mut SessionTracker,
        current: Coordinate,
    ) {
        let col = self.previous_column(current, grid.column_count());
        let row = if col < current.col {
            current.row
        } else {
            self.previous_row(current)
        };
        self.edit_cell(grid, session, Coordinate::new(row, col));
    }
}
