//! Benchmarks for navigation hot paths
//!
//! Run with: cargo bench navigation

use gridnav::grid::{Coordinate, GridData, MemoryGrid};
use gridnav::host::ChainEditor;
use gridnav::keymap::{KeyCode, Keystroke, Modifiers};
use gridnav::traverse::GridTraversal;
use gridnav::GridEditor;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn grid(rows: usize, cols: usize) -> MemoryGrid {
    MemoryGrid::new(GridData::with_size(rows, cols))
}

// ============================================================================
// Column arithmetic
// ============================================================================

#[divan::bench(args = [8, 64, 512])]
fn next_column_half_skipped(cols: usize) {
    let traversal = GridTraversal::new().with_skipped((0..cols).filter(|c| c % 2 == 1));
    let mut at = Coordinate::new(0, 0);
    for _ in 0..cols {
        at.col = traversal.next_column(divan::black_box(at), cols);
    }
    divan::black_box(at);
}

// ============================================================================
// Key handling
// ============================================================================

#[divan::bench(args = [100, 1_000])]
fn tab_through_grid(rows: usize) {
    let mut editor = GridEditor::new(grid(rows, 6), GridTraversal::new().with_skipped([2]));
    editor.edit_cell(Coordinate::new(0, 0));
    let tab = Keystroke::key(KeyCode::Tab);

    for _ in 0..rows * 5 {
        editor.handle_key(tab);
    }
    divan::black_box(editor.active_position());
}

#[divan::bench(args = [100, 1_000])]
fn tab_with_row_creation(rows: usize) {
    let traversal = GridTraversal::new().with_row_creation(true);
    let mut editor = GridEditor::new(grid(1, 4), traversal);
    editor.edit_cell(Coordinate::new(0, 0));
    let tab = Keystroke::key(KeyCode::Tab);

    for _ in 0..rows * 4 {
        editor.handle_key(tab);
    }
    divan::black_box(editor.grid().data().row_count());
}

#[divan::bench]
fn shift_tab_back_to_start() {
    let mut editor = GridEditor::new(grid(50, 8), GridTraversal::new());
    editor.edit_cell(Coordinate::new(49, 7));
    let back = Keystroke::new(KeyCode::Tab, Modifiers::SHIFT);

    for _ in 0..50 * 8 {
        editor.handle_key(back);
    }
    divan::black_box(editor.active_position());
}

// ============================================================================
// Linked columns
// ============================================================================

#[divan::bench(args = [4, 32])]
fn chain_over_locked_columns(panes: usize) {
    let mut editor = ChainEditor::new((0..panes).map(|_| grid(200, 2)).collect());
    let ids = editor.link_columns((0..panes).flat_map(|p| [(p, 0), (p, 1)]));
    for pane in 1..panes {
        if let Some(grid) = editor.pane_mut(pane) {
            grid.lock_column(0);
            grid.lock_column(1);
        }
    }
    editor.edit(ids[0], 0);
    let tab = Keystroke::key(KeyCode::Tab);

    for _ in 0..200 {
        editor.handle_key(tab);
    }
    divan::black_box(editor.active());
}
