//! Grid model and the collaborator contracts of the traversal core
//!
//! The traversal strategies never touch a concrete grid. They talk to the
//! traits in [`surface`](self::GridSurface): geometry, editability, row
//! creation and the mutation surface (scrolling, opening editors).
//!
//! `MemoryGrid` is an in-memory implementation of every contract, used by
//! the replay CLI, the tests and the benchmarks.
//!
//! ```text
//! GridEditor
//! ├── MemoryGrid (GridSurface)
//! │   ├── GridData (rows of cells)
//! │   └── GridViewport (visible region)
//! ├── SessionTracker (active editor)
//! └── GridTraversal (key → next cell)
//! ```

mod model;
mod parser;
mod surface;
mod viewport;

pub use model::{Coordinate, GridData, GridFocus, MemoryGrid};
pub use parser::{detect_delimiter, parse_csv, Delimiter, ParseError};
pub use surface::{BindingKind, CellEditability, GridGeometry, GridSurface, RowFactory};
pub use viewport::GridViewport;
