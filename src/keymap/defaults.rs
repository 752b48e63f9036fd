//! Default navigation keybindings
//!
//! The defaults ship as keymap.yaml compiled into the binary, with a
//! hardcoded fallback. The user's keymap.yaml is merged over them.

use std::path::Path;

use super::binding::Keybinding;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::types::{KeyCode, Keystroke, Modifiers};
use crate::traverse::NavIntent;

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// Embedded defaults merged with the user keymap, if one exists
pub fn load_default_keymap() -> Vec<Keybinding> {
    let bindings = embedded_bindings();

    match crate::config_paths::keymap_file() {
        Some(path) => merge_user_keymap(bindings, &path),
        None => bindings,
    }
}

/// Embedded defaults merged with the keymap at `path`
///
/// A missing or broken file leaves the defaults untouched.
pub fn merge_user_keymap(bindings: Vec<Keybinding>, path: &Path) -> Vec<Keybinding> {
    if !path.exists() {
        return bindings;
    }
    match load_keymap_file(path) {
        Ok(user) => {
            tracing::info!(
                "Merging user keymap from {} ({} bindings)",
                path.display(),
                user.len()
            );
            merge_bindings(bindings, user)
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
            bindings
        }
    }
}

fn embedded_bindings() -> Vec<Keybinding> {
    match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::debug!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    }
}

/// Merge user bindings over base bindings
///
/// A user binding replaces the base binding for the same keystroke; an
/// unbound entry removes it.
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.is_unbound() {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        match result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke)
        {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded navigation keys
pub fn default_bindings() -> Vec<Keybinding> {
    vec![
        bind(KeyCode::Escape, Modifiers::NONE, NavIntent::Cancel),
        bind(KeyCode::Enter, Modifiers::NONE, NavIntent::NextRow),
        bind(KeyCode::NumpadEnter, Modifiers::NONE, NavIntent::NextRow),
        bind(KeyCode::Tab, Modifiers::NONE, NavIntent::NextColumn),
        bind(KeyCode::Tab, Modifiers::SHIFT, NavIntent::PreviousColumn),
        bind(KeyCode::Down, Modifiers::NONE, NavIntent::RowDown),
        bind(KeyCode::Up, Modifiers::NONE, NavIntent::RowUp),
    ]
}

fn bind(key: KeyCode, mods: Modifiers, intent: NavIntent) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), intent)
}
