//! Editing hosts
//!
//! A host owns the grid(s), the edit session and a traversal strategy, and
//! routes keystrokes: navigation keys go to the strategy that listens to the
//! active editor, everything else is typed into the editor.
//!
//! [`GridEditor`] drives one grid with [`GridTraversal`]. [`ChainEditor`]
//! drives several panes whose columns are linked into a [`TraversalChain`].

use crate::config::NavigationConfig;
use crate::editor::CellEditor;
use crate::grid::{Coordinate, GridSurface};
use crate::keymap::{KeyCode, Keystroke, NavKeymap};
use crate::session::{SessionTracker, TraversalListener};
use crate::tracing::SessionSnapshot;
use crate::traverse::{ColumnBinding, GridTraversal, KeyOutcome, NodeId, TraversalChain};

/// Type a non-navigation key into `editor`
fn forward_key(editor: &mut CellEditor, keystroke: Keystroke) {
    if let Some(ch) = keystroke.typed_char() {
        editor.insert_char(ch);
        return;
    }
    match keystroke.key {
        KeyCode::Backspace => editor.delete_backward(),
        KeyCode::Delete => editor.delete_forward(),
        KeyCode::Left => editor.cursor_left(),
        KeyCode::Right => editor.cursor_right(),
        KeyCode::Home => editor.cursor_home(),
        KeyCode::End => editor.cursor_end(),
        KeyCode::Down => {
            editor.select_next();
        }
        KeyCode::Up => {
            editor.select_previous();
        }
        _ => tracing::trace!(key = %keystroke, "key ignored by editor"),
    }
}

// =============================================================================
// Single grid
// =============================================================================

/// One grid with its own traversal strategy
#[derive(Debug)]
pub struct GridEditor<G> {
    grid: G,
    session: SessionTracker,
    traversal: GridTraversal,
    keymap: NavKeymap,
}

impl<G: GridSurface> GridEditor<G> {
    /// Host with `traversal` registered for every editor it opens
    pub fn new(grid: G, traversal: GridTraversal) -> Self {
        Self {
            grid,
            session: SessionTracker::with_listener(TraversalListener::Grid),
            traversal,
            keymap: NavKeymap::default(),
        }
    }

    pub fn with_keymap(mut self, keymap: NavKeymap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn into_grid(self) -> G {
        self.grid
    }

    pub fn session(&self) -> &SessionTracker {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionTracker {
        &mut self.session
    }

    pub fn traversal(&self) -> &GridTraversal {
        &self.traversal
    }

    pub fn traversal_mut(&mut self) -> &mut GridTraversal {
        &mut self.traversal
    }

    pub fn keymap(&self) -> &NavKeymap {
        &self.keymap
    }

    pub fn active_position(&self) -> Option<Coordinate> {
        self.session.active_position()
    }

    /// Open the editor at `at`, committing whatever was being edited
    pub fn edit_cell(&mut self, at: Coordinate) {
        self.traversal
            .edit_cell(&mut self.grid, &mut self.session, at);
    }

    /// Route a keystroke from the active editor
    pub fn handle_key(&mut self, keystroke: Keystroke) -> KeyOutcome {
        let before = SessionSnapshot::from_tracker(&self.session);
        let outcome = self.route_key(keystroke);
        let after = SessionSnapshot::from_tracker(&self.session);

        if let Some(diff) = before.diff(&after) {
            tracing::debug!(key = %keystroke, ?outcome, "{}", diff);
        }
        outcome
    }

    /// The active editor lost focus
    pub fn focus_lost(&mut self) {
        match self.active_listener() {
            Some(TraversalListener::Grid) => {
                self.traversal
                    .focus_lost(&mut self.grid, &mut self.session);
            }
            _ => {
                self.session.commit_to(&mut self.grid);
            }
        }
    }

    fn active_listener(&self) -> Option<TraversalListener> {
        self.session.active_editor().and_then(CellEditor::listener)
    }

    fn route_key(&mut self, keystroke: Keystroke) -> KeyOutcome {
        if !self.session.is_editing() {
            return KeyOutcome::Forwarded;
        }

        if let Some(intent) = self.keymap.lookup(&keystroke) {
            if self.active_listener() == Some(TraversalListener::Grid) {
                let outcome =
                    self.traversal
                        .handle_intent(&mut self.grid, &mut self.session, intent);
                if outcome.is_consumed() {
                    return outcome;
                }
            }
        }

        self.default_key(keystroke);
        KeyOutcome::Forwarded
    }

    /// Processing of a key no strategy consumed
    fn default_key(&mut self, keystroke: Keystroke) {
        match keystroke.key {
            KeyCode::Escape if keystroke.mods.is_empty() => {
                self.session.cancel();
            }
            KeyCode::Enter | KeyCode::NumpadEnter if keystroke.mods.is_empty() => {
                self.session.commit_to(&mut self.grid);
            }
            _ => {
                if let Some(editor) = self.session.active_editor_mut() {
                    forward_key(editor, keystroke);
                }
            }
        }
    }
}

// =============================================================================
// Linked panes
// =============================================================================

/// A column of one pane, taking part in a traversal chain
///
/// Rows are the chain's data items. Each column tracks its own editor; the
/// chain commits it before moving elsewhere.
#[derive(Debug)]
pub struct GridColumn {
    pane: usize,
    column: usize,
    session: SessionTracker,
}

impl GridColumn {
    pub fn new(pane: usize, column: usize) -> Self {
        Self {
            pane,
            column,
            session: SessionTracker::new(),
        }
    }

    pub fn pane(&self) -> usize {
        self.pane
    }

    pub fn column(&self) -> usize {
        self.column
    }

    fn at(&self, row: usize) -> Coordinate {
        Coordinate::new(row, self.column)
    }
}

impl<G: GridSurface> ColumnBinding<Vec<G>, usize> for GridColumn {
    fn can_edit(&self, panes: &Vec<G>, row: &usize) -> bool {
        panes.get(self.pane).is_some_and(|grid| {
            *row < grid.row_count()
                && self.column < grid.column_count()
                && grid.can_edit(self.at(*row))
        })
    }

    fn edit(&mut self, panes: &mut Vec<G>, row: &usize) {
        let Some(grid) = panes.get_mut(self.pane) else {
            return;
        };
        let at = self.at(*row);
        self.session.commit_to(grid);
        grid.scroll_into_view(self.column);
        match grid.begin_editing(at) {
            Some(editor) => {
                self.session.get_cell_editor(at, editor);
            }
            None => tracing::debug!(pane = self.pane, %at, "pane opened no editor"),
        }
    }

    fn next_item(&self, panes: &Vec<G>, row: &usize) -> Option<usize> {
        let rows = panes.get(self.pane)?.row_count();
        (row + 1 < rows).then_some(row + 1)
    }

    fn previous_item(&self, _panes: &Vec<G>, row: &usize) -> Option<usize> {
        row.checked_sub(1)
    }

    fn apply_editor_value(&mut self, panes: &mut Vec<G>) {
        match panes.get_mut(self.pane) {
            Some(grid) => {
                self.session.commit_to(grid);
            }
            None => {
                self.session.cancel();
            }
        }
    }

    fn deactivate_editor(&mut self, _panes: &mut Vec<G>) {
        self.session.cancel();
    }

    fn active_item(&self) -> Option<usize> {
        self.session.active_position().map(|at| at.row)
    }

    fn is_selection_editor(&self) -> bool {
        self.session
            .active_editor()
            .is_some_and(CellEditor::is_selection)
    }

    fn active_editor(&self) -> Option<&CellEditor> {
        self.session.active_editor()
    }

    fn active_editor_mut(&mut self) -> Option<&mut CellEditor> {
        self.session.active_editor_mut()
    }

    fn attached(&mut self, node: NodeId) {
        self.session
            .set_traversal_strategy(Some(TraversalListener::Chain(node)));
    }
}

/// Several panes whose columns are linked in one tab order
pub struct ChainEditor<G> {
    panes: Vec<G>,
    chain: TraversalChain<Vec<G>, usize>,
    keymap: NavKeymap,
}

impl<G: GridSurface + 'static> ChainEditor<G> {
    pub fn new(panes: Vec<G>) -> Self {
        Self {
            panes,
            chain: TraversalChain::new(),
            keymap: NavKeymap::default(),
        }
    }

    pub fn from_config(panes: Vec<G>, config: &NavigationConfig) -> Self {
        Self {
            panes,
            chain: TraversalChain::from_config(config),
            keymap: NavKeymap::default(),
        }
    }

    pub fn with_keymap(mut self, keymap: NavKeymap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn with_walk_limit(mut self, limit: usize) -> Self {
        self.chain = std::mem::take(&mut self.chain).with_walk_limit(limit);
        self
    }

    /// Link `(pane, column)` pairs in tab order
    pub fn link_columns<I>(&mut self, columns: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        self.chain.add_linked(
            columns
                .into_iter()
                .map(|(pane, column)| GridColumn::new(pane, column)),
        )
    }

    pub fn panes(&self) -> &[G] {
        &self.panes
    }

    pub fn pane_mut(&mut self, pane: usize) -> Option<&mut G> {
        self.panes.get_mut(pane)
    }

    pub fn chain(&self) -> &TraversalChain<Vec<G>, usize> {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut TraversalChain<Vec<G>, usize> {
        &mut self.chain
    }

    /// Node with an open editor and the row it edits
    pub fn active(&self) -> Option<(NodeId, usize)> {
        self.chain.active_node()
    }

    pub fn active_editor(&self) -> Option<&CellEditor> {
        let (node, _) = self.chain.active_node()?;
        self.chain.binding(node)?.active_editor()
    }

    /// Edit `row` in `node`, or in the first editable column after it
    ///
    /// An editor already open anywhere in the chain is committed first.
    pub fn edit(&mut self, node: NodeId, row: usize) {
        self.chain.apply_open_editors(&mut self.panes);
        self.chain
            .edit_cell_or_column_follower_for(node, &mut self.panes, Some(row));
    }

    pub fn handle_key(&mut self, keystroke: Keystroke) -> KeyOutcome {
        let Some((node, _)) = self.chain.active_node() else {
            return KeyOutcome::Forwarded;
        };

        if let Some(intent) = self.keymap.lookup(&keystroke) {
            let outcome = self.chain.handle_active_intent(&mut self.panes, intent);
            if outcome.is_consumed() {
                return outcome;
            }
        }

        if let Some(editor) = self
            .chain
            .binding_mut(node)
            .and_then(|binding| binding.active_editor_mut())
        {
            forward_key(editor, keystroke);
        }
        KeyOutcome::Forwarded
    }

    pub fn focus_lost(&mut self) {
        if let Some((node, _)) = self.chain.active_node() {
            self.chain.focus_lost(node, &mut self.panes);
        }
    }
}
