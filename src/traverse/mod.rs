//! Keyboard traversal strategies
//!
//! Two strategy families decide which cell is edited next:
//!
//! - [`GridTraversal`] moves within one grid, skipping the columns of its
//!   [`SkipSet`] and optionally creating rows past the last one.
//! - [`TraversalChain`] links independent column bindings, possibly on
//!   different grids, into one tab order.
//!
//! Both consume [`NavIntent`]s (resolved from keystrokes by the keymap) and
//! report whether the key was consumed or should reach the editor.

mod column;
mod intent;
mod linked;
mod skip;

pub use column::GridTraversal;
pub use intent::{KeyOutcome, NavIntent, ParseIntentError};
pub use linked::{ChainError, ColumnBinding, NodeId, TraversalChain, DEFAULT_WALK_LIMIT};
pub use skip::SkipSet;
