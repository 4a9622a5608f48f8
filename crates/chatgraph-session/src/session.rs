#![forbid(unsafe_code)]

//! One conversation's structural state.
//!
//! [`Session`] owns the [`TreeStore`], the focused node, and the selection,
//! and is the only place they are mutated. Layout and active path are
//! derived on demand and never stored.

use chatgraph_core::{CyclicParentError, Node, NodeId, StoreError, TreeStore};
use chatgraph_layout::{Layout, LayoutConfig, LayoutError, compute_layout, fallback_grid};
use tracing::{debug, info, warn};

use crate::path::{ActivePath, resolve_in_store};
use crate::selection::{SelectionController, SelectionState};
use crate::summary::{SUMMARY_WORD_LIMIT, truncate_words};

/// Store, focus, and selection for one conversation.
#[derive(Debug, Clone, Default)]
pub struct Session {
    store: TreeStore,
    focus: Option<NodeId>,
    selection: SelectionController,
    config: LayoutConfig,
}

impl Session {
    /// Create an empty session.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Wrap an existing store. Focus starts on the most recent node.
    #[must_use]
    pub fn with_store(store: TreeStore, config: LayoutConfig) -> Self {
        let focus = store.latest().map(|node| node.id);
        Self {
            store,
            focus,
            selection: SelectionController::default(),
            config,
        }
    }

    /// Replace the selection controller (to change its policies).
    #[must_use]
    pub fn with_selection(mut self, selection: SelectionController) -> Self {
        self.selection = selection;
        self
    }

    /// The node set.
    #[must_use]
    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// The focused node, if any.
    #[must_use]
    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    /// Layout parameters.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Selection state.
    #[must_use]
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Record a new turn branching from the current focus and focus it.
    ///
    /// The summary is cut to ten words. Returns the new node's id.
    pub fn submit(&mut self, summary: &str) -> Result<NodeId, StoreError> {
        let id = self.store.next_id();
        let parent = self.focus.filter(|&focus| self.store.contains(focus));
        self.store
            .add_node(Node::new(id, parent, truncate_words(summary, SUMMARY_WORD_LIMIT)))?;
        self.focus = Some(id);
        info!(id = id.raw(), parent = parent.map(NodeId::raw), "turn submitted");
        Ok(id)
    }

    /// Insert a node created elsewhere. Focus is unchanged.
    pub fn insert(&mut self, node: Node) -> Result<(), StoreError> {
        let id = node.id;
        self.store.add_node(node).inspect_err(|err| {
            warn!(id = id.raw(), %err, "insert rejected");
        })
    }

    // ========================================================================
    // Focus
    // ========================================================================

    /// Focus `id`. Returns false, leaving focus unchanged, if `id` is absent.
    pub fn set_focus(&mut self, id: NodeId) -> bool {
        if !self.store.contains(id) {
            warn!(id = id.raw(), "focus target not in store");
            return false;
        }
        self.focus = Some(id);
        debug!(id = id.raw(), "focus changed");
        true
    }

    /// Drop focus so the next submit starts a new root.
    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    /// The active path for the current focus.
    pub fn active_path(&self) -> Result<ActivePath, CyclicParentError> {
        resolve_in_store(&self.store, self.focus)
    }

    /// Nodes to show in the chat pane, in store order.
    ///
    /// Empty when nothing is focused or the focus sits on a parent cycle.
    #[must_use]
    pub fn transcript(&self) -> Vec<&Node> {
        match self.active_path() {
            Ok(path) => path.transcript(self.store.nodes()).collect(),
            Err(err) => {
                warn!(%err, "transcript unavailable");
                Vec::new()
            }
        }
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// Lay out the current node set.
    pub fn layout(&self) -> Result<Layout, LayoutError> {
        compute_layout(self.store.nodes(), &self.config)
    }

    /// Lay out the current node set, falling back to a grid on error.
    #[must_use]
    pub fn layout_or_fallback(&self) -> Layout {
        self.layout().unwrap_or_else(|err| {
            warn!(%err, nodes = self.store.len(), "layout failed; using fallback grid");
            fallback_grid(self.store.nodes(), &self.config)
        })
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Mark a node for deletion. Ids not in the store are ignored.
    pub fn mark(&mut self, id: NodeId, modifier: bool) {
        if self.store.contains(id) {
            self.selection.mark(id, modifier);
        }
    }

    /// Background click: drop the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Delete the selection and refocus. Returns the new focus.
    pub fn commit_delete(&mut self) -> Option<NodeId> {
        if self.selection.state() == SelectionState::Idle {
            return self.focus;
        }
        self.focus = self.selection.commit_delete(&mut self.store, self.focus);
        self.focus
    }
}
