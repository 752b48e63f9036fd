//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use gridnav::grid::{Coordinate, GridData, MemoryGrid};
use gridnav::keymap::{parse_key_string, Keystroke};
use gridnav::traverse::{GridTraversal, KeyOutcome};
use gridnav::GridEditor;

/// Grid of `rows` x `cols` cells holding "r{row}c{col}"
pub fn test_grid(rows: usize, cols: usize) -> MemoryGrid {
    let cells = (0..rows)
        .map(|r| (0..cols).map(|c| format!("r{}c{}", r, c)).collect())
        .collect();
    MemoryGrid::new(GridData::from_rows(cells))
}

/// Host over a `rows` x `cols` test grid with an editor open at `start`
pub fn test_editor(
    rows: usize,
    cols: usize,
    traversal: GridTraversal,
    start: (usize, usize),
) -> GridEditor<MemoryGrid> {
    let mut editor = GridEditor::new(test_grid(rows, cols), traversal);
    editor.edit_cell(at(start.0, start.1));
    editor
}

pub fn at(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col)
}

/// Parse a key like "shift+tab"
pub fn key(s: &str) -> Keystroke {
    parse_key_string(s).unwrap()
}

/// Press each comma-separated key, returning the outcomes
pub fn press<G: gridnav::GridSurface>(editor: &mut GridEditor<G>, keys: &str) -> Vec<KeyOutcome> {
    keys.split(',')
        .map(|k| editor.handle_key(key(k.trim())))
        .collect()
}

/// Type text into the active editor
pub fn type_text<G: gridnav::GridSurface>(editor: &mut GridEditor<G>, text: &str) {
    for ch in text.chars() {
        editor.handle_key(Keystroke::char(ch));
    }
}

/// Cell value of a memory grid
pub fn cell(editor: &GridEditor<MemoryGrid>, row: usize, col: usize) -> String {
    editor.grid().data().get(row, col).to_string()
}
