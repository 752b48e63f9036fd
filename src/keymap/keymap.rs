//! Keymap struct for storing and looking up navigation bindings

use std::collections::HashMap;
use std::path::Path;

use super::binding::Keybinding;
use super::config::load_keymap_file;
use super::defaults::{default_bindings, load_default_keymap, merge_bindings};
use super::types::Keystroke;
use super::KeymapError;
use crate::traverse::NavIntent;

/// Maps keystrokes to navigation intents
///
/// Keys without an intent are not navigation keys and go to the editor.
#[derive(Debug, Clone)]
pub struct NavKeymap {
    bindings: Vec<Keybinding>,
    lookup: HashMap<Keystroke, NavIntent>,
}

impl NavKeymap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Create a keymap with the given bindings; later bindings win
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    /// Embedded defaults plus the user's keymap.yaml
    pub fn load() -> Self {
        Self::with_bindings(load_default_keymap())
    }

    /// Hardcoded defaults merged with the keymap file at `path`
    pub fn load_from(path: &Path) -> Result<Self, KeymapError> {
        let user = load_keymap_file(path)?;
        Ok(Self::with_bindings(merge_bindings(default_bindings(), user)))
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        match binding.intent {
            Some(intent) => {
                self.lookup.insert(binding.keystroke, intent);
            }
            None => {
                self.lookup.remove(&binding.keystroke);
            }
        }
        self.bindings.retain(|b| b.keystroke != binding.keystroke);
        if !binding.is_unbound() {
            self.bindings.push(binding);
        }
    }

    /// Bind `keystroke` to `intent`, replacing any existing binding
    pub fn bind(&mut self, keystroke: Keystroke, intent: NavIntent) {
        self.add_binding(Keybinding::new(keystroke, intent));
    }

    pub fn unbind(&mut self, keystroke: Keystroke) {
        self.add_binding(Keybinding::unbound(keystroke));
    }

    pub fn lookup(&self, keystroke: &Keystroke) -> Option<NavIntent> {
        self.lookup.get(keystroke).copied()
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// First keystroke bound to `intent`
    pub fn keystroke_for(&self, intent: NavIntent) -> Option<Keystroke> {
        self.bindings
            .iter()
            .find(|b| b.intent == Some(intent))
            .map(|b| b.keystroke)
    }
}

impl Default for NavKeymap {
    fn default() -> Self {
        Self::with_bindings(default_bindings())
    }
}
