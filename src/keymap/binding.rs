//! Keybinding struct mapping a keystroke to a navigation intent

use super::types::Keystroke;
use crate::traverse::NavIntent;

/// A single keybinding
///
/// An `intent` of `None` is an unbinding: merged over other bindings it
/// removes whatever the keystroke was bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub intent: Option<NavIntent>,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, intent: NavIntent) -> Self {
        Self {
            keystroke,
            intent: Some(intent),
        }
    }

    /// Binding that removes `keystroke` when merged
    pub fn unbound(keystroke: Keystroke) -> Self {
        Self {
            keystroke,
            intent: None,
        }
    }

    pub fn is_unbound(&self) -> bool {
        self.intent.is_none()
    }
}
