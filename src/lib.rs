//! gridnav - keyboard navigation for grid cell editors
//!
//! Tab, Shift+Tab, Enter, Escape and the arrow keys move the cell editor of
//! a data grid around the way spreadsheet users expect. Two traversal
//! strategies are provided: [`GridTraversal`] for one grid with a skip set
//! and optional row creation, and [`TraversalChain`] for columns linked
//! across grids. [`SessionTracker`] keeps track of the one open editor.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editor;
pub mod grid;
pub mod host;
pub mod keymap;
pub mod session;
pub mod tracing;
pub mod traverse;

pub use config::NavigationConfig;
pub use editor::{CellEditor, EditorKind};
pub use grid::{Coordinate, GridSurface, MemoryGrid};
pub use host::{ChainEditor, GridColumn, GridEditor};
pub use session::{CellEdit, EditSession, SessionTracker, TraversalListener};
pub use traverse::{
    ColumnBinding, GridTraversal, KeyOutcome, NavIntent, NodeId, TraversalChain,
};
