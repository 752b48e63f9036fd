//! Configurable navigation keys
//!
//! Maps keystrokes to the navigation intents a cell editor reports to its
//! traversal strategy. Everything not bound here is typed into the editor.
//!
//! ```text
//! Keystroke → NavKeymap::lookup() → Option<NavIntent>
//! ```
//!
//! Defaults are compiled in from keymap.yaml; a user keymap.yaml in the
//! config directory overrides them key by key.

mod binding;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use defaults::{default_bindings, load_default_keymap, merge_bindings, merge_user_keymap};
pub use keymap::NavKeymap;
pub use types::{KeyCode, Keystroke, Modifiers};
