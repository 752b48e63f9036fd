//! Linked-column traversal across panes

mod common;

use common::{at, key, test_grid};
use gridnav::editor::EditorKind;
use gridnav::grid::MemoryGrid;
use gridnav::traverse::{ChainError, ColumnBinding, KeyOutcome, NavIntent, NodeId, TraversalChain};
use gridnav::{ChainEditor, TraversalListener};

// ========================================================================
// A binding over plain numbers, logging what the chain asks of it
// ========================================================================

struct Log {
    events: Vec<String>,
    items: u32,
}

impl Log {
    fn new(items: u32) -> Self {
        Self {
            events: Vec::new(),
            items,
        }
    }
}

struct NumberColumn {
    name: &'static str,
    editable: bool,
    active: Option<u32>,
}

fn column(name: &'static str, editable: bool) -> NumberColumn {
    NumberColumn {
        name,
        editable,
        active: None,
    }
}

impl ColumnBinding<Log, u32> for NumberColumn {
    fn can_edit(&self, _log: &Log, _item: &u32) -> bool {
        self.editable
    }

    fn edit(&mut self, log: &mut Log, item: &u32) {
        self.active = Some(*item);
        log.events.push(format!("edit {} {}", self.name, item));
    }

    fn next_item(&self, log: &Log, item: &u32) -> Option<u32> {
        (item + 1 < log.items).then_some(item + 1)
    }

    fn previous_item(&self, _log: &Log, item: &u32) -> Option<u32> {
        item.checked_sub(1)
    }

    fn apply_editor_value(&mut self, log: &mut Log) {
        if let Some(item) = self.active.take() {
            log.events.push(format!("apply {} {}", self.name, item));
        }
    }

    fn deactivate_editor(&mut self, log: &mut Log) {
        if let Some(item) = self.active.take() {
            log.events.push(format!("cancel {} {}", self.name, item));
        }
    }

    fn active_item(&self) -> Option<u32> {
        self.active
    }
}

fn abc(editable: [bool; 3]) -> (TraversalChain<Log, u32>, Vec<NodeId>) {
    let mut chain = TraversalChain::new();
    let ids = chain.add_linked([
        column("a", editable[0]),
        column("b", editable[1]),
        column("c", editable[2]),
    ]);
    (chain, ids)
}

// ========================================================================
// Wiring
// ========================================================================

#[test]
fn test_links_are_bidirectional() {
    let (chain, ids) = abc([true; 3]);

    assert_eq!(chain.follower(ids[0]), Some(ids[1]));
    assert_eq!(chain.predecessor(ids[1]), Some(ids[0]));
    assert_eq!(chain.follower(ids[2]), None);
    assert_eq!(chain.head(ids[2]), ids[0]);
    assert_eq!(chain.tail(ids[0]), ids[2]);
    assert_eq!(chain.order(ids[1]), ids);
}

#[test]
fn test_clearing_follower_clears_back_reference() {
    let (mut chain, ids) = abc([true; 3]);

    chain.set_follower(ids[0], None).unwrap();

    assert_eq!(chain.follower(ids[0]), None);
    assert_eq!(chain.predecessor(ids[1]), None);
    assert_eq!(chain.order(ids[1]), vec![ids[1], ids[2]]);
}

#[test]
fn test_relinking_detaches_skipped_node() {
    let (mut chain, ids) = abc([true; 3]);

    chain.connect(ids[0], Some(ids[2])).unwrap();

    assert_eq!(chain.follower(ids[0]), Some(ids[2]));
    assert_eq!(chain.predecessor(ids[2]), Some(ids[0]));
    assert_eq!(chain.predecessor(ids[1]), None);
    assert_eq!(chain.follower(ids[1]), None);
}

#[test]
fn test_set_predecessor() {
    let (mut chain, ids) = abc([true; 3]);

    chain.set_predecessor(ids[2], None).unwrap();
    assert_eq!(chain.follower(ids[1]), None);

    chain.set_predecessor(ids[2], Some(ids[0])).unwrap();
    assert_eq!(chain.order(ids[0]), vec![ids[0], ids[2]]);
}

#[test]
fn test_cycles_are_rejected() {
    let (mut chain, ids) = abc([true; 3]);

    assert_eq!(
        chain.connect(ids[2], Some(ids[0])),
        Err(ChainError::Cycle {
            from: ids[2],
            to: ids[0]
        })
    );
    assert!(chain.connect(ids[1], Some(ids[1])).is_err());
    assert_eq!(chain.follower(ids[2]), None);
}

#[test]
fn test_foreign_node_is_rejected() {
    let (mut chain, ids) = abc([true; 3]);
    let (mut bigger, _) = abc([true; 3]);
    let foreign = bigger.add(column("d", true));

    assert_eq!(
        chain.connect(ids[0], Some(foreign)),
        Err(ChainError::UnknownNode(foreign))
    );
}

// ========================================================================
// Walks
// ========================================================================

#[test]
fn test_tab_skips_uneditable_column_and_wraps() {
    let (mut chain, ids) = abc([true, false, true]);
    let mut log = Log::new(3);

    chain.edit_cell_or_column_follower_for(ids[0], &mut log, Some(0));
    assert_eq!(chain.handle_active_intent(&mut log, NavIntent::NextColumn), KeyOutcome::Consumed);
    assert_eq!(chain.active_node(), Some((ids[2], 0)));

    chain.handle_active_intent(&mut log, NavIntent::NextColumn);
    assert_eq!(chain.active_node(), Some((ids[0], 1)));

    assert_eq!(
        log.events,
        vec!["edit a 0", "apply a 0", "edit c 0", "apply c 0", "edit a 1"]
    );
}

#[test]
fn test_shift_tab_wraps_to_tail_with_previous_item() {
    let (mut chain, ids) = abc([true, true, false]);
    let mut log = Log::new(3);

    chain.edit_cell_or_column_follower_for(ids[0], &mut log, Some(2));
    chain.handle_active_intent(&mut log, NavIntent::PreviousColumn);

    assert_eq!(chain.active_node(), Some((ids[1], 1)));
}

#[test]
fn test_tab_past_last_item_closes_editor() {
    let (mut chain, ids) = abc([true; 3]);
    let mut log = Log::new(1);

    chain.edit_cell_or_column_follower_for(ids[2], &mut log, Some(0));
    chain.handle_active_intent(&mut log, NavIntent::NextColumn);

    assert_eq!(chain.active_node(), None);
    assert_eq!(log.events.last().map(String::as_str), Some("apply c 0"));
}

#[test]
fn test_row_walk_stays_in_column() {
    let (mut chain, ids) = abc([true; 3]);
    let mut log = Log::new(4);

    chain.edit_cell_or_column_follower_for(ids[1], &mut log, Some(1));
    chain.handle_active_intent(&mut log, NavIntent::NextRow);
    assert_eq!(chain.active_node(), Some((ids[1], 2)));

    chain.handle_active_intent(&mut log, NavIntent::RowUp);
    chain.handle_active_intent(&mut log, NavIntent::RowUp);
    assert_eq!(chain.active_node(), Some((ids[1], 0)));
}

#[test]
fn test_escape_deactivates_without_applying() {
    let (mut chain, ids) = abc([true; 3]);
    let mut log = Log::new(2);

    chain.edit_cell_or_column_follower_for(ids[0], &mut log, Some(0));
    chain.handle_active_intent(&mut log, NavIntent::Cancel);

    assert_eq!(chain.active_node(), None);
    assert_eq!(log.events, vec!["edit a 0", "cancel a 0"]);
}

#[test]
fn test_focus_lost_always_applies() {
    let (mut chain, ids) = abc([true; 3]);
    let mut log = Log::new(2);

    chain.edit_cell_or_column_follower_for(ids[1], &mut log, Some(1));
    chain.focus_lost(ids[1], &mut log);

    assert_eq!(log.events, vec!["edit b 1", "apply b 1"]);
}

#[test]
fn test_walk_limit_bounds_locked_chain() {
    let (chain, ids) = abc([false; 3]);
    let mut chain = chain.with_walk_limit(10);
    let mut log = Log::new(1_000_000);

    chain.edit_cell_or_column_follower_for(ids[0], &mut log, Some(0));

    assert_eq!(chain.active_node(), None);
    assert!(log.events.is_empty());
}

#[test]
fn test_fully_locked_chain_stops_at_sequence_end() {
    let (mut chain, ids) = abc([false; 3]);
    let mut log = Log::new(5);

    chain.edit_cell_or_column_predecessor_for(ids[2], &mut log, Some(4));
    assert!(log.events.is_empty());
}

// ========================================================================
// Panes through ChainEditor
// ========================================================================

fn two_panes() -> (ChainEditor<MemoryGrid>, Vec<NodeId>) {
    let mut editor = ChainEditor::new(vec![test_grid(3, 2), test_grid(3, 2)]);
    let ids = editor.link_columns([(0, 0), (0, 1), (1, 0), (1, 1)]);
    (editor, ids)
}

fn pane_cell(editor: &ChainEditor<MemoryGrid>, pane: usize, row: usize, col: usize) -> String {
    editor.panes()[pane].data().get(row, col).to_string()
}

#[test]
fn test_tab_crosses_panes_over_locked_column() {
    let (mut editor, ids) = two_panes();
    if let Some(pane) = editor.pane_mut(1) {
        pane.lock_column(0);
    }
    editor.edit(ids[0], 0);

    editor.handle_key(key("tab"));
    assert_eq!(editor.active(), Some((ids[1], 0)));

    editor.handle_key(key("tab"));
    assert_eq!(editor.active(), Some((ids[3], 0)));

    editor.handle_key(key("tab"));
    assert_eq!(editor.active(), Some((ids[0], 1)));
}

#[test]
fn test_typed_value_lands_in_its_pane() {
    let (mut editor, ids) = two_panes();
    editor.edit(ids[2], 1);

    editor.handle_key(key("shift+z"));
    editor.handle_key(key("shift+tab"));

    assert_eq!(pane_cell(&editor, 1, 1, 0), "r1c0Z");
    assert_eq!(pane_cell(&editor, 0, 1, 0), "r1c0");
    assert_eq!(editor.active(), Some((ids[1], 1)));
}

#[test]
fn test_enter_skips_locked_cell_in_column() {
    let (mut editor, ids) = two_panes();
    if let Some(pane) = editor.pane_mut(0) {
        pane.lock_cell(at(1, 1));
    }
    editor.edit(ids[1], 0);

    assert_eq!(editor.handle_key(key("enter")), KeyOutcome::Consumed);
    assert_eq!(editor.active(), Some((ids[1], 2)));
}

#[test]
fn test_editing_another_node_commits_open_editor() {
    let (mut editor, ids) = two_panes();
    editor.edit(ids[3], 2);
    editor.handle_key(key("z"));

    editor.edit(ids[0], 0);

    let open: Vec<NodeId> = ids
        .iter()
        .copied()
        .filter(|id| {
            editor
                .chain()
                .binding(*id)
                .is_some_and(|b| b.active_item().is_some())
        })
        .collect();
    assert_eq!(open, vec![ids[0]]);
    assert_eq!(pane_cell(&editor, 1, 2, 1), "r2c1z");

    editor.handle_key(key("escape"));
    assert_eq!(editor.active(), None);
}

#[test]
fn test_chain_editors_listen_to_their_node() {
    let (mut editor, ids) = two_panes();
    editor.edit(ids[3], 2);

    assert_eq!(
        editor.active_editor().and_then(|e| e.listener()),
        Some(TraversalListener::Chain(ids[3]))
    );
}

#[test]
fn test_escape_and_focus_lost_in_panes() {
    let (mut editor, ids) = two_panes();
    editor.edit(ids[0], 0);
    editor.handle_key(key("x"));
    editor.handle_key(key("escape"));
    assert_eq!(pane_cell(&editor, 0, 0, 0), "r0c0");
    assert_eq!(editor.active(), None);

    editor.edit(ids[0], 0);
    editor.handle_key(key("y"));
    editor.focus_lost();
    assert_eq!(pane_cell(&editor, 0, 0, 0), "r0c0y");
}

#[test]
fn test_selection_column_keeps_arrows() {
    let (mut editor, ids) = two_panes();
    if let Some(pane) = editor.pane_mut(1) {
        pane.set_column_editor(1, EditorKind::selection(["on", "off"]));
    }
    editor.edit(ids[3], 0);

    assert_eq!(editor.handle_key(key("down")), KeyOutcome::Forwarded);
    assert_eq!(editor.active(), Some((ids[3], 0)));
    assert_eq!(editor.active_editor().map(|e| e.value()), Some("on"));
}
