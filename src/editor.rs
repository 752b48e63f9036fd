//! Transient cell editors
//!
//! A `CellEditor` is the input control bound to one grid coordinate while
//! editing is active. Text editors hold a single-line buffer with a char
//! cursor. Selection editors hold a fixed list of options and browse them
//! with the arrow keys, which is why traversal strategies leave Up/Down to
//! them.

use crate::session::TraversalListener;

/// What kind of input control edits a cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorKind {
    /// Free single-line text
    #[default]
    Text,
    /// Drop-down choice among `options`
    Selection { options: Vec<String> },
}

impl EditorKind {
    pub fn selection<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EditorKind::Selection {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_selection(&self) -> bool {
        matches!(self, EditorKind::Selection { .. })
    }
}

/// Editor state for the cell being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEditor {
    kind: EditorKind,
    buffer: String,
    /// Cursor position in chars
    cursor: usize,
    /// Value before editing started (restored on cancel)
    original: String,
    listener: Option<TraversalListener>,
}

impl CellEditor {
    /// Editor holding `value`, cursor at the end
    pub fn new(kind: EditorKind, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            kind,
            cursor: value.chars().count(),
            buffer: value.clone(),
            original: value,
            listener: None,
        }
    }

    /// Editor whose content is replaced by a first typed character
    pub fn with_char(kind: EditorKind, original: impl Into<String>, ch: char) -> Self {
        let mut editor = Self::new(kind, original);
        editor.buffer.clear();
        editor.cursor = 0;
        editor.insert_char(ch);
        editor
    }

    pub fn kind(&self) -> &EditorKind {
        &self.kind
    }

    pub fn is_selection(&self) -> bool {
        self.kind.is_selection()
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_modified(&self) -> bool {
        self.buffer != self.original
    }

    pub fn cursor_char_position(&self) -> usize {
        self.cursor
    }

    /// Strategy receiving this editor's key, traverse and focus events
    pub fn listener(&self) -> Option<TraversalListener> {
        self.listener
    }

    pub(crate) fn set_listener(&mut self, listener: Option<TraversalListener>) {
        self.listener = listener;
    }

    /// Type a character
    ///
    /// Selection editors jump to the first option starting with `ch`.
    pub fn insert_char(&mut self, ch: char) {
        if let EditorKind::Selection { options } = &self.kind {
            let lower = ch.to_lowercase().to_string();
            if let Some(option) = options
                .iter()
                .find(|o| o.to_lowercase().starts_with(&lower))
            {
                self.buffer = option.clone();
                self.cursor = self.buffer.chars().count();
            }
            return;
        }

        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert pasted text, dropping line breaks
    pub fn insert_text(&mut self, text: &str) {
        for ch in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(ch);
        }
    }

    pub fn delete_backward(&mut self) {
        if self.is_selection() || self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.buffer.remove(at);
    }

    pub fn delete_forward(&mut self) {
        if self.is_selection() || self.cursor >= self.buffer.chars().count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.buffer.remove(at);
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }

    /// Select the option after the current one; returns false at the end
    /// or for text editors
    pub fn select_next(&mut self) -> bool {
        self.step_option(1)
    }

    /// Select the option before the current one
    pub fn select_previous(&mut self) -> bool {
        self.step_option(-1)
    }

    fn step_option(&mut self, delta: isize) -> bool {
        let EditorKind::Selection { options } = &self.kind else {
            return false;
        };
        if options.is_empty() {
            return false;
        }

        let target = match options.iter().position(|o| *o == self.buffer) {
            Some(idx) => idx as isize + delta,
            // Nothing chosen yet: first option either way
            None => 0,
        };
        let Some(option) = usize::try_from(target).ok().and_then(|t| options.get(t)) else {
            return false;
        };

        self.buffer = option.clone();
        self.cursor = self.buffer.chars().count();
        true
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}
