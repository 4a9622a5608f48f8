#![forbid(unsafe_code)]

//! Multi-select and bulk delete.
//!
//! # State machine
//!
//! ```text
//!            mark(id, false)               mark(id, true) toggles
//!   Idle ───────────────────▶ Selecting ◀──────────────────┐
//!    ▲                           │  └────────────────────────┘
//!    └── clear / commit_delete ──┘
//! ```
//!
//! A plain mark replaces the set with `{id}`. A modified mark toggles `id`;
//! toggling the last id out returns to Idle.
//!
//! # Delete commit
//!
//! [`SelectionController::commit_delete`] removes the selection (optionally
//! with descendants, see [`DeletePolicy`]) from the store, then picks the
//! new focus: the old focus if it survived, otherwise a remaining node chosen
//! by [`RefocusPolicy`], otherwise none.

use std::collections::BTreeSet;

use chatgraph_core::{NodeId, TreeStore};
use tracing::{debug, info};

/// Which nodes a delete commit removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Exactly the selected ids. Children become roots.
    #[default]
    Exact,
    /// The selected ids and all their descendants.
    Cascade,
}

/// How the new focus is chosen when the old one was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefocusPolicy {
    /// First remaining node in store order.
    #[default]
    FirstRemaining,
    /// Remaining node with the highest id, i.e. the most recently created.
    MostRecent,
}

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Selecting,
}

/// Tracks the nodes marked for deletion.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: BTreeSet<NodeId>,
    delete_policy: DeletePolicy,
    refocus_policy: RefocusPolicy,
}

impl SelectionController {
    /// Create an idle controller with default policies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delete policy.
    #[must_use]
    pub fn delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    /// Set the refocus policy.
    #[must_use]
    pub fn refocus_policy(mut self, policy: RefocusPolicy) -> Self {
        self.refocus_policy = policy;
        self
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SelectionState {
        if self.selected.is_empty() {
            SelectionState::Idle
        } else {
            SelectionState::Selecting
        }
    }

    /// Mark `id`. Without a modifier the selection becomes `{id}`; with one,
    /// `id` is toggled.
    pub fn mark(&mut self, id: NodeId, modifier: bool) {
        if modifier {
            if !self.selected.remove(&id) {
                self.selected.insert(id);
            }
        } else {
            self.selected.clear();
            self.selected.insert(id);
        }
        debug!(
            id = id.raw(),
            modifier,
            selected = self.selected.len(),
            "selection marked"
        );
    }

    /// Drop the selection (background click or explicit clear).
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            debug!(dropped = self.selected.len(), "selection cleared");
        }
        self.selected.clear();
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in ascending order.
    pub fn selected(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.selected.iter().copied()
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Remove the selection from `store` and return the new focus.
    ///
    /// Always leaves the controller Idle. With nothing selected the store is
    /// untouched and only the refocus rule applies.
    pub fn commit_delete(&mut self, store: &mut TreeStore, focus: Option<NodeId>) -> Option<NodeId> {
        let doomed = match self.delete_policy {
            DeletePolicy::Exact => std::mem::take(&mut self.selected),
            DeletePolicy::Cascade => {
                let closure = store.with_descendants(&self.selected);
                self.selected.clear();
                closure
            }
        };

        let removed = store.remove_nodes(&doomed);
        let new_focus = self.refocus(store, focus);
        info!(
            requested = doomed.len(),
            removed = removed.len(),
            remaining = store.len(),
            focus = new_focus.map(NodeId::raw),
            "delete committed"
        );
        new_focus
    }

    fn refocus(&self, store: &TreeStore, focus: Option<NodeId>) -> Option<NodeId> {
        if let Some(id) = focus.filter(|&id| store.contains(id)) {
            return Some(id);
        }
        let fallback = match self.refocus_policy {
            RefocusPolicy::FirstRemaining => store.first(),
            RefocusPolicy::MostRecent => store.latest(),
        };
        fallback.map(|node| node.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatgraph_core::Node;

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    fn store() -> TreeStore {
        TreeStore::from_nodes([Node::root(1, "a"), Node::child(2, 1, "b"), Node::child(3, 2, "c")])
            .unwrap()
    }

    fn remaining(store: &TreeStore) -> Vec<u64> {
        store.nodes().iter().map(|n| n.id.raw()).collect()
    }

    #[test]
    fn starts_idle() {
        let sel = SelectionController::new();
        assert_eq!(sel.state(), SelectionState::Idle);
        assert!(sel.is_empty());
    }

    #[test]
    fn plain_mark_replaces() {
        let mut sel = SelectionController::new();
        sel.mark(id(1), false);
        sel.mark(id(2), true);
        sel.mark(id(3), false);
        assert_eq!(sel.selected().collect::<Vec<_>>(), vec![id(3)]);
        assert_eq!(sel.state(), SelectionState::Selecting);
    }

    #[test]
    fn modifier_toggles() {
        let mut sel = SelectionController::new();
        sel.mark(id(1), false);
        sel.mark(id(2), true);
        assert_eq!(sel.len(), 2);
        sel.mark(id(1), true);
        assert!(!sel.is_selected(id(1)));
        assert!(sel.is_selected(id(2)));
        sel.mark(id(2), true);
        assert_eq!(sel.state(), SelectionState::Idle);
    }

    #[test]
    fn modifier_from_idle_selects() {
        let mut sel = SelectionController::new();
        sel.mark(id(4), true);
        assert_eq!(sel.selected().collect::<Vec<_>>(), vec![id(4)]);
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut sel = SelectionController::new();
        sel.mark(id(1), false);
        sel.clear();
        assert_eq!(sel.state(), SelectionState::Idle);
    }

    #[test]
    fn deleting_focus_picks_first_remaining() {
        let mut store = store();
        let mut sel = SelectionController::new();
        sel.mark(id(2), false);
        let focus = sel.commit_delete(&mut store, Some(id(2)));
        assert_eq!(remaining(&store), vec![1, 3]);
        assert_eq!(focus, Some(id(1)));
        assert_eq!(sel.state(), SelectionState::Idle);
    }

    #[test]
    fn surviving_focus_is_kept() {
        let mut store = store();
        let mut sel = SelectionController::new();
        sel.mark(id(1), false);
        assert_eq!(sel.commit_delete(&mut store, Some(id(3))), Some(id(3)));
    }

    #[test]
    fn deleting_everything_clears_focus() {
        let mut store = store();
        let mut sel = SelectionController::new();
        for raw in 1..=3 {
            sel.mark(id(raw), true);
        }
        assert_eq!(sel.commit_delete(&mut store, Some(id(1))), None);
        assert!(store.is_empty());
    }

    #[test]
    fn cascade_removes_subtree() {
        let mut store = store();
        store.add_node(Node::child(4, 1, "side")).unwrap();
        let mut sel = SelectionController::new().delete_policy(DeletePolicy::Cascade);
        sel.mark(id(2), false);
        let focus = sel.commit_delete(&mut store, Some(id(3)));
        assert_eq!(remaining(&store), vec![1, 4]);
        assert_eq!(focus, Some(id(1)));
    }

    #[test]
    fn most_recent_refocus() {
        let mut store = store();
        let mut sel = SelectionController::new().refocus_policy(RefocusPolicy::MostRecent);
        sel.mark(id(2), false);
        assert_eq!(sel.commit_delete(&mut store, Some(id(2))), Some(id(3)));
    }

    #[test]
    fn empty_commit_only_refocuses() {
        let mut store = store();
        let mut sel = SelectionController::new();
        assert_eq!(sel.commit_delete(&mut store, Some(id(9))), Some(id(1)));
        assert_eq!(store.len(), 3);
    }
}
