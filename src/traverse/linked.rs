//! Traversal across linked columns
//!
//! A chain links column bindings in tab order. Each binding may sit on a
//! different grid or editing support; the chain only needs them to agree on
//! the data item type `T` and the host context `C` handed to every call.
//!
//! ```text
//!          predecessor            predecessor
//!   [A] <---------------- [B] <---------------- [C]
//!   [A] ----------------> [B] ----------------> [C]
//!           follower               follower
//! ```
//!
//! Tab past the tail wraps to the head with the next data item; Shift+Tab
//! past the head wraps to the tail with the previous item. Nodes live in an
//! arena and are addressed by [`NodeId`]; links only change through
//! [`TraversalChain::connect`], which keeps both directions consistent.

use std::fmt;

use crate::config::NavigationConfig;

use super::intent::{KeyOutcome, NavIntent};
use crate::editor::CellEditor;

/// Default upper bound on the steps of one navigation walk
pub const DEFAULT_WALK_LIMIT: usize = 65_536;

/// Handle of a node in a [`TraversalChain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One column taking part in a chain
///
/// `next_item` / `previous_item` define the visible data sequence. They must
/// strictly advance and eventually return `None`.
pub trait ColumnBinding<C, T> {
    /// Whether `item` can be edited in this column
    fn can_edit(&self, ctx: &C, item: &T) -> bool;

    /// Open an editor for `item` in this column
    fn edit(&mut self, ctx: &mut C, item: &T);

    /// Item after `item` in the visible sequence
    fn next_item(&self, ctx: &C, item: &T) -> Option<T>;

    /// Item before `item` in the visible sequence
    fn previous_item(&self, ctx: &C, item: &T) -> Option<T>;

    /// Commit the pending edit of this column, if any
    fn apply_editor_value(&mut self, ctx: &mut C);

    /// Close this column's editor without applying
    fn deactivate_editor(&mut self, ctx: &mut C);

    /// Item currently edited in this column
    fn active_item(&self) -> Option<T> {
        None
    }

    /// Whether the open editor is a drop-down that keeps the arrow keys
    fn is_selection_editor(&self) -> bool {
        false
    }

    /// The open editor, for keys the chain does not handle
    fn active_editor(&self) -> Option<&CellEditor> {
        None
    }

    fn active_editor_mut(&mut self) -> Option<&mut CellEditor> {
        None
    }

    /// Called once when the binding joins a chain
    fn attached(&mut self, _node: NodeId) {}
}

/// Error raised while wiring a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The id does not belong to this chain
    UnknownNode(NodeId),
    /// Linking `from` to `to` would close a loop
    Cycle { from: NodeId, to: NodeId },
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::UnknownNode(node) => write!(f, "unknown chain node {}", node),
            ChainError::Cycle { from, to } => {
                write!(f, "linking {} to {} would create a cycle", from, to)
            }
        }
    }
}

impl std::error::Error for ChainError {}

struct ChainNode<C, T> {
    binding: Box<dyn ColumnBinding<C, T>>,
    predecessor: Option<NodeId>,
    follower: Option<NodeId>,
}

#[derive(Clone, Copy)]
enum Step {
    Forward,
    Backward,
}

/// Linked column traversal strategy
pub struct TraversalChain<C, T> {
    nodes: Vec<ChainNode<C, T>>,
    walk_limit: usize,
}

impl<C, T> Default for TraversalChain<C, T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            walk_limit: DEFAULT_WALK_LIMIT,
        }
    }
}

impl<C, T> fmt::Debug for TraversalChain<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.nodes
                    .iter()
                    .map(|n| (n.predecessor.map(NodeId::index), n.follower.map(NodeId::index))),
            )
            .finish()
    }
}

impl<C, T: Clone> TraversalChain<C, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &NavigationConfig) -> Self {
        Self::new().with_walk_limit(config.walk_limit)
    }

    /// Bound the number of steps a single navigation may take
    pub fn with_walk_limit(mut self, limit: usize) -> Self {
        self.walk_limit = limit.max(1);
        self
    }

    pub fn walk_limit(&self) -> usize {
        self.walk_limit
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add an unlinked node
    pub fn add(&mut self, binding: impl ColumnBinding<C, T> + 'static) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut binding: Box<dyn ColumnBinding<C, T>> = Box::new(binding);
        binding.attached(id);
        self.nodes.push(ChainNode {
            binding,
            predecessor: None,
            follower: None,
        });
        id
    }

    /// Add nodes and link them in the given order
    pub fn add_linked<B, I>(&mut self, bindings: I) -> Vec<NodeId>
    where
        B: ColumnBinding<C, T> + 'static,
        I: IntoIterator<Item = B>,
    {
        let ids: Vec<NodeId> = bindings.into_iter().map(|b| self.add(b)).collect();
        for pair in ids.windows(2) {
            // Fresh nodes cannot form a cycle
            let _ = self.connect(pair[0], Some(pair[1]));
        }
        ids
    }

    pub fn binding(&self, node: NodeId) -> Option<&(dyn ColumnBinding<C, T> + 'static)> {
        self.nodes.get(node.0).map(|n| n.binding.as_ref())
    }

    pub fn binding_mut(&mut self, node: NodeId) -> Option<&mut (dyn ColumnBinding<C, T> + 'static)> {
        self.nodes.get_mut(node.0).map(|n| n.binding.as_mut())
    }

    pub fn follower(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.follower)
    }

    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.predecessor)
    }

    // === Wiring ===

    /// Make `to` the follower of `from` (or unlink `from`'s follower)
    ///
    /// The previous follower of `from` and the previous predecessor of `to`
    /// lose their back-references, so both directions always agree.
    pub fn connect(&mut self, from: NodeId, to: Option<NodeId>) -> Result<(), ChainError> {
        self.check(from)?;
        if let Some(to) = to {
            self.check(to)?;
            if to == from || self.follows(to, from) {
                return Err(ChainError::Cycle { from, to });
            }
        }

        if self.nodes[from.0].follower == to {
            return Ok(());
        }

        if let Some(old) = self.nodes[from.0].follower.take() {
            self.nodes[old.0].predecessor = None;
        }
        if let Some(to) = to {
            if let Some(old) = self.nodes[to.0].predecessor.take() {
                self.nodes[old.0].follower = None;
            }
            self.nodes[to.0].predecessor = Some(from);
        }
        self.nodes[from.0].follower = to;

        tracing::debug!(%from, to = ?to, "chain link updated");
        Ok(())
    }

    pub fn set_follower(&mut self, node: NodeId, follower: Option<NodeId>) -> Result<(), ChainError> {
        self.connect(node, follower)
    }

    pub fn set_predecessor(
        &mut self,
        node: NodeId,
        predecessor: Option<NodeId>,
    ) -> Result<(), ChainError> {
        self.check(node)?;
        match predecessor {
            Some(pred) => self.connect(pred, Some(node)),
            None => match self.nodes[node.0].predecessor {
                Some(old) => self.connect(old, None),
                None => Ok(()),
            },
        }
    }

    /// First node of the chain containing `node`
    pub fn head(&self, node: NodeId) -> NodeId {
        let mut current = node;
        for _ in 0..self.nodes.len() {
            match self.predecessor(current) {
                Some(pred) => current = pred,
                None => break,
            }
        }
        current
    }

    /// Last node of the chain containing `node`
    pub fn tail(&self, node: NodeId) -> NodeId {
        let mut current = node;
        for _ in 0..self.nodes.len() {
            match self.follower(current) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// Nodes of the chain containing `node`, head first
    pub fn order(&self, node: NodeId) -> Vec<NodeId> {
        let mut order = vec![self.head(node)];
        while let Some(next) = order.last().and_then(|last| self.follower(*last)) {
            if order.len() > self.nodes.len() {
                break;
            }
            order.push(next);
        }
        order
    }

    /// Node whose binding has an editor open
    pub fn active_node(&self) -> Option<(NodeId, T)> {
        self.nodes
            .iter()
            .enumerate()
            .find_map(|(idx, n)| n.binding.active_item().map(|item| (NodeId(idx), item)))
    }

    // === Column direction ===

    /// Tab: edit the next column for `item`
    pub fn edit_next_column_for(&mut self, node: NodeId, ctx: &mut C, item: &T) {
        let Some(entry) = self.nodes.get(node.0) else {
            return;
        };
        if let Some(next) = entry.follower {
            self.edit_cell_or_column_follower_for(next, ctx, Some(item.clone()));
            return;
        }
        let next_item = entry.binding.next_item(ctx, item);
        let head = self.head(node);
        self.edit_cell_or_column_follower_for(head, ctx, next_item);
    }

    /// Shift+Tab: edit the previous column for `item`
    pub fn edit_previous_column_for(&mut self, node: NodeId, ctx: &mut C, item: &T) {
        let Some(entry) = self.nodes.get(node.0) else {
            return;
        };
        if let Some(prev) = entry.predecessor {
            self.edit_cell_or_column_predecessor_for(prev, ctx, Some(item.clone()));
            return;
        }
        let previous_item = entry.binding.previous_item(ctx, item);
        let tail = self.tail(node);
        self.edit_cell_or_column_predecessor_for(tail, ctx, previous_item);
    }

    /// Edit `item` in `node`, or in the first editable column after it
    ///
    /// Runs of locked columns are stepped over, wrapping to the head with the
    /// next item. `None` (end of the sequence) does nothing.
    pub fn edit_cell_or_column_follower_for(&mut self, node: NodeId, ctx: &mut C, item: Option<T>) {
        self.walk_columns(node, ctx, item, Step::Forward);
    }

    /// Edit `item` in `node`, or in the first editable column before it
    pub fn edit_cell_or_column_predecessor_for(
        &mut self,
        node: NodeId,
        ctx: &mut C,
        item: Option<T>,
    ) {
        self.walk_columns(node, ctx, item, Step::Backward);
    }

    // === Row direction ===

    /// Enter / Arrow-Down: next editable item in the same column
    pub fn edit_next_row_for(&mut self, node: NodeId, ctx: &mut C, item: &T) {
        self.walk_rows(node, ctx, item, Step::Forward);
    }

    /// Arrow-Up: previous editable item in the same column
    pub fn edit_previous_row_for(&mut self, node: NodeId, ctx: &mut C, item: &T) {
        self.walk_rows(node, ctx, item, Step::Backward);
    }

    // === Events ===

    /// Handle a navigation intent from the editor of `node` editing `item`
    pub fn handle_intent(&mut self, node: NodeId, ctx: &mut C, item: &T, intent: NavIntent) -> KeyOutcome {
        let Some(entry) = self.nodes.get_mut(node.0) else {
            return KeyOutcome::Forwarded;
        };
        if intent.is_arrow() && entry.binding.is_selection_editor() {
            return KeyOutcome::Forwarded;
        }

        tracing::debug!(%node, %intent, "chain traversal");
        if intent == NavIntent::Cancel {
            entry.binding.deactivate_editor(ctx);
            return KeyOutcome::Consumed;
        }

        entry.binding.apply_editor_value(ctx);
        match intent {
            NavIntent::NextRow | NavIntent::RowDown => self.edit_next_row_for(node, ctx, item),
            NavIntent::RowUp => self.edit_previous_row_for(node, ctx, item),
            NavIntent::NextColumn => self.edit_next_column_for(node, ctx, item),
            NavIntent::PreviousColumn => self.edit_previous_column_for(node, ctx, item),
            NavIntent::Cancel => {}
        }
        KeyOutcome::Consumed
    }

    /// Route an intent to whichever node has an editor open
    pub fn handle_active_intent(&mut self, ctx: &mut C, intent: NavIntent) -> KeyOutcome {
        match self.active_node() {
            Some((node, item)) => self.handle_intent(node, ctx, &item, intent),
            None => KeyOutcome::Forwarded,
        }
    }

    /// Commit every open editor in the chain
    ///
    /// Used before an editor is opened from outside a walk, so that at most
    /// one binding is ever editing.
    pub fn apply_open_editors(&mut self, ctx: &mut C) {
        for (idx, entry) in self.nodes.iter_mut().enumerate() {
            if entry.binding.active_item().is_some() {
                tracing::debug!(node = %NodeId(idx), "committing open editor");
                entry.binding.apply_editor_value(ctx);
            }
        }
    }

    /// The editor of `node` lost focus: always commit
    pub fn focus_lost(&mut self, node: NodeId, ctx: &mut C) {
        if let Some(entry) = self.nodes.get_mut(node.0) {
            entry.binding.apply_editor_value(ctx);
        }
    }

    // === Internals ===

    fn check(&self, node: NodeId) -> Result<(), ChainError> {
        if node.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(ChainError::UnknownNode(node))
        }
    }

    /// Whether `target` is reachable from `start` through followers
    fn follows(&self, start: NodeId, target: NodeId) -> bool {
        let mut current = Some(start);
        for _ in 0..=self.nodes.len() {
            match current {
                Some(node) if node == target => return true,
                Some(node) => current = self.follower(node),
                None => return false,
            }
        }
        false
    }

    fn walk_columns(&mut self, node: NodeId, ctx: &mut C, item: Option<T>, step: Step) {
        let Some(mut item) = item else {
            tracing::trace!(%node, "no item, nothing to edit");
            return;
        };
        let mut node = node;

        for steps in 0..self.walk_limit {
            let Some(entry) = self.nodes.get_mut(node.0) else {
                return;
            };
            if entry.binding.can_edit(ctx, &item) {
                tracing::debug!(%node, steps, "editing column");
                entry.binding.edit(ctx, &item);
                return;
            }

            let link = match step {
                Step::Forward => entry.follower,
                Step::Backward => entry.predecessor,
            };
            match link {
                Some(next) => node = next,
                None => {
                    let wrapped = match step {
                        Step::Forward => entry.binding.next_item(ctx, &item),
                        Step::Backward => entry.binding.previous_item(ctx, &item),
                    };
                    let Some(wrapped) = wrapped else {
                        tracing::debug!(%node, "item sequence exhausted");
                        return;
                    };
                    item = wrapped;
                    node = match step {
                        Step::Forward => self.head(node),
                        Step::Backward => self.tail(node),
                    };
                }
            }
        }
        tracing::warn!(limit = self.walk_limit, "column walk stopped at the step limit");
    }

    fn walk_rows(&mut self, node: NodeId, ctx: &mut C, item: &T, step: Step) {
        let limit = self.walk_limit;
        let Some(entry) = self.nodes.get_mut(node.0) else {
            return;
        };

        let mut current = item.clone();
        for _ in 0..limit {
            let next = match step {
                Step::Forward => entry.binding.next_item(ctx, &current),
                Step::Backward => entry.binding.previous_item(ctx, &current),
            };
            let Some(next) = next else {
                tracing::debug!(%node, "no further rows");
                return;
            };
            if entry.binding.can_edit(ctx, &next) {
                entry.binding.edit(ctx, &next);
                return;
            }
            current = next;
        }
        tracing::warn!(limit, "row walk stopped at the step limit");
    }
}
