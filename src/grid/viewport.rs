//! Visible region of a grid
//!
//! Traversal asks the grid to scroll the target column into view before it
//! opens an editor there.

/// Viewport state for a grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridViewport {
    /// First visible row (0-indexed)
    pub top_row: usize,
    /// First visible column (0-indexed)
    pub left_col: usize,
    pub visible_rows: usize,
    pub visible_cols: usize,
}

impl GridViewport {
    pub fn new(visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            top_row: 0,
            left_col: 0,
            visible_rows,
            visible_cols,
        }
    }

    /// Scroll horizontally so `col` is inside the viewport
    pub fn ensure_column_visible(&mut self, col: usize, total_cols: usize) {
        if col < self.left_col {
            self.left_col = col;
        } else if self.visible_cols > 0 && col >= self.left_col + self.visible_cols {
            self.left_col = col + 1 - self.visible_cols;
        }
        self.left_col = self
            .left_col
            .min(total_cols.saturating_sub(self.visible_cols));
    }

    /// Scroll both axes so the cell is inside the viewport
    pub fn ensure_visible(&mut self, row: usize, col: usize, total_rows: usize, total_cols: usize) {
        if row < self.top_row {
            self.top_row = row;
        } else if self.visible_rows > 0 && row >= self.top_row + self.visible_rows {
            self.top_row = row + 1 - self.visible_rows;
        }
        self.top_row = self
            .top_row
            .min(total_rows.saturating_sub(self.visible_rows));

        self.ensure_column_visible(col, total_cols);
    }

    pub fn is_row_visible(&self, row: usize) -> bool {
        (self.top_row..self.top_row + self.visible_rows).contains(&row)
    }

    pub fn is_col_visible(&self, col: usize) -> bool {
        (self.left_col..self.left_col + self.visible_cols).contains(&col)
    }
}
