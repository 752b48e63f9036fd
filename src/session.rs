//! Cell edit session tracking
//!
//! The tracker sits between a grid and its traversal strategy. It records
//! which editor is open and which coordinate that editor is bound to, so a
//! strategy can commit or cancel it before moving on.
//!
//! A session is either `Idle` or `Editing`. Applying or canceling the editor
//! completes the session exactly once and returns it to `Idle`.

use crate::editor::CellEditor;
use crate::grid::{Coordinate, GridSurface};
use crate::traverse::NodeId;

/// Strategy that receives key, traverse and focus events from an editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalListener {
    /// The single-grid strategy of the grid's host
    Grid,
    /// A node of a linked traversal chain
    Chain(NodeId),
}

/// The open editor and the cell it edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEdit {
    pub position: Coordinate,
    pub editor: CellEditor,
}

/// Edit state of one tracker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(ActiveEdit),
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }

    pub fn position(&self) -> Option<Coordinate> {
        match self {
            EditSession::Editing(active) => Some(active.position),
            EditSession::Idle => None,
        }
    }

    pub fn editor(&self) -> Option<&CellEditor> {
        match self {
            EditSession::Editing(active) => Some(&active.editor),
            EditSession::Idle => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut CellEditor> {
        match self {
            EditSession::Editing(active) => Some(&mut active.editor),
            EditSession::Idle => None,
        }
    }
}

/// A committed cell edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub position: Coordinate,
    pub old_value: String,
    pub new_value: String,
}

/// Tracks the single active editor of one editing support
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    session: EditSession,
    listener: Option<TraversalListener>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker with a traversal strategy already registered
    pub fn with_listener(listener: TraversalListener) -> Self {
        Self {
            session: EditSession::Idle,
            listener: Some(listener),
        }
    }

    /// Replace the registered strategy
    ///
    /// Only editors opened afterwards are attached to the new strategy.
    pub fn set_traversal_strategy(&mut self, listener: Option<TraversalListener>) {
        self.listener = listener;
    }

    pub fn traversal_strategy(&self) -> Option<TraversalListener> {
        self.listener
    }

    /// Record a freshly opened editor for `at` and return it
    ///
    /// The registered strategy, if any, becomes the editor's listener. The
    /// grid framework only edits one cell at a time, so a second open while
    /// editing means the previous editor was dropped without completing.
    pub fn get_cell_editor(&mut self, at: Coordinate, mut editor: CellEditor) -> &mut CellEditor {
        if let Some(previous) = self.session.position() {
            tracing::warn!(%previous, %at, "editor opened while another was active, dropping it");
        }

        editor.set_listener(self.listener);
        tracing::debug!(%at, listener = ?self.listener, "cell editor opened");
        self.session = EditSession::Editing(ActiveEdit {
            position: at,
            editor,
        });

        match &mut self.session {
            EditSession::Editing(active) => &mut active.editor,
            EditSession::Idle => unreachable!("session was just opened"),
        }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    pub fn active_position(&self) -> Option<Coordinate> {
        self.session.position()
    }

    pub fn active_editor(&self) -> Option<&CellEditor> {
        self.session.editor()
    }

    pub fn active_editor_mut(&mut self) -> Option<&mut CellEditor> {
        self.session.editor_mut()
    }

    /// Complete the session by applying the editor value
    ///
    /// Returns the edit when the value changed. The session is `Idle`
    /// afterwards either way.
    pub fn apply(&mut self) -> Option<CellEdit> {
        let EditSession::Editing(active) = std::mem::take(&mut self.session) else {
            return None;
        };

        if !active.editor.is_modified() {
            return None;
        }

        Some(CellEdit {
            position: active.position,
            old_value: active.editor.original().to_string(),
            new_value: active.editor.value().to_string(),
        })
    }

    /// Apply the editor value and write it into `grid`
    pub fn commit_to<G: GridSurface + ?Sized>(&mut self, grid: &mut G) -> Option<CellEdit> {
        let edit = self.apply()?;
        grid.apply_value(edit.position, &edit.new_value);
        tracing::debug!(at = %edit.position, value = %edit.new_value, "cell edit committed");
        Some(edit)
    }

    /// Complete the session discarding the editor value
    ///
    /// Returns false when no editor was open.
    pub fn cancel(&mut self) -> bool {
        let was_editing = self.session.is_editing();
        if was_editing {
            tracing::debug!(at = ?self.session.position(), "cell edit canceled");
        }
        self.session = EditSession::Idle;
        was_editing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorKind;

    fn text_editor(value: &str) -> CellEditor {
        CellEditor::new(EditorKind::Text, value)
    }

    #[test]
    fn test_open_records_position_and_listener() {
        let mut tracker = SessionTracker::with_listener(TraversalListener::Grid);
        let editor = tracker.get_cell_editor(Coordinate::new(1, 2), text_editor("a"));

        assert_eq!(editor.listener(), Some(TraversalListener::Grid));
        assert_eq!(tracker.active_position(), Some(Coordinate::new(1, 2)));
        assert!(tracker.is_editing());
    }

    #[test]
    fn test_no_listener_without_registered_strategy() {
        let mut tracker = SessionTracker::new();
        let editor = tracker.get_cell_editor(Coordinate::new(0, 0), text_editor(""));
        assert_eq!(editor.listener(), None);
    }

    #[test]
    fn test_strategy_change_applies_to_later_editors() {
        let mut tracker = SessionTracker::with_listener(TraversalListener::Grid);
        tracker.get_cell_editor(Coordinate::new(0, 0), text_editor(""));

        tracker.set_traversal_strategy(None);
        assert_eq!(
            tracker.active_editor().and_then(CellEditor::listener),
            Some(TraversalListener::Grid)
        );

        tracker.cancel();
        let editor = tracker.get_cell_editor(Coordinate::new(0, 1), text_editor(""));
        assert_eq!(editor.listener(), None);
    }

    #[test]
    fn test_apply_returns_edit_only_when_modified() {
        let mut tracker = SessionTracker::new();
        tracker.get_cell_editor(Coordinate::new(0, 0), text_editor("same"));
        assert_eq!(tracker.apply(), None);
        assert!(!tracker.is_editing());

        tracker
            .get_cell_editor(Coordinate::new(0, 1), text_editor("a"))
            .insert_char('b');
        let edit = tracker.apply().unwrap();
        assert_eq!(edit.old_value, "a");
        assert_eq!(edit.new_value, "ab");
        assert_eq!(edit.position, Coordinate::new(0, 1));
        assert_eq!(tracker.session(), &EditSession::Idle);
    }

    #[test]
    fn test_completion_is_one_shot() {
        let mut tracker = SessionTracker::new();
        tracker
            .get_cell_editor(Coordinate::new(0, 0), text_editor(""))
            .insert_char('x');

        assert!(tracker.cancel());
        assert!(!tracker.cancel());
        assert_eq!(tracker.apply(), None);
    }

    #[test]
    fn test_reopen_replaces_active_pair() {
        let mut tracker = SessionTracker::new();
        tracker.get_cell_editor(Coordinate::new(0, 0), text_editor("a"));
        tracker.get_cell_editor(Coordinate::new(2, 1), text_editor("b"));

        assert_eq!(tracker.active_position(), Some(Coordinate::new(2, 1)));
        assert_eq!(tracker.active_editor().map(CellEditor::value), Some("b"));
    }
}
