#![forbid(unsafe_code)]

//! Active path resolution.
//!
//! The active path is the ancestor chain from a root down to the focused
//! node. The chat pane shows exactly the nodes on it, and the node's parent
//! chain is the context for the next submitted turn.
//!
//! The walk trusts nothing about the parent relation: it stops at the first
//! parent that does not resolve, and a revisited id is reported as a
//! [`CyclicParentError`] rather than looped on.

use chatgraph_core::{CyclicParentError, Node, NodeId, TreeStore};
use rustc_hash::{FxHashMap, FxHashSet};

/// Ordered ancestor chain plus its membership set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivePath {
    ordered: Vec<NodeId>,
    members: FxHashSet<NodeId>,
}

impl ActivePath {
    /// Ids from the root down to the focused node, inclusive.
    #[must_use]
    pub fn ids(&self) -> &[NodeId] {
        &self.ordered
    }

    /// Whether `id` is the focus or one of its ancestors.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    /// Unordered membership set.
    #[must_use]
    pub fn members(&self) -> &FxHashSet<NodeId> {
        &self.members
    }

    /// Number of nodes on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// True when nothing is focused.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Topmost node of the path.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.ordered.first().copied()
    }

    /// The focused node.
    #[must_use]
    pub fn focus(&self) -> Option<NodeId> {
        self.ordered.last().copied()
    }

    /// Nodes on the path, in snapshot order.
    ///
    /// This is the filter the transcript pane applies to the full node list.
    pub fn transcript<'s, 'a>(
        &'s self,
        nodes: &'a [Node],
    ) -> impl Iterator<Item = &'a Node> + use<'s, 'a> {
        nodes.iter().filter(move |node| self.contains(node.id))
    }

    /// Nodes on the path, root first.
    ///
    /// Ids that are no longer in `store` are skipped.
    pub fn chain<'a>(&'a self, store: &'a TreeStore) -> impl Iterator<Item = &'a Node> + 'a {
        self.ordered.iter().filter_map(move |&id| store.get(id))
    }
}

/// Resolve the active path for `focus` over a node snapshot.
///
/// Returns an empty path when `focus` is `None` or not in `nodes`.
pub fn resolve_active_path(
    nodes: &[Node],
    focus: Option<NodeId>,
) -> Result<ActivePath, CyclicParentError> {
    let index: FxHashMap<NodeId, &Node> = nodes.iter().map(|node| (node.id, node)).collect();
    walk(focus, |id| index.get(&id).copied())
}

/// Resolve the active path for `focus` using the store's own index.
pub fn resolve_in_store(
    store: &TreeStore,
    focus: Option<NodeId>,
) -> Result<ActivePath, CyclicParentError> {
    walk(focus, |id| store.get(id))
}

fn walk<'a>(
    focus: Option<NodeId>,
    lookup: impl Fn(NodeId) -> Option<&'a Node>,
) -> Result<ActivePath, CyclicParentError> {
    let Some(mut current) = focus.and_then(&lookup) else {
        return Ok(ActivePath::default());
    };

    let start = current.id;
    let mut ordered = vec![start];
    let mut members = FxHashSet::default();
    members.insert(start);

    while let Some(parent) = current.parent.and_then(&lookup) {
        if !members.insert(parent.id) {
            return Err(CyclicParentError {
                start,
                revisited: parent.id,
            });
        }
        ordered.push(parent.id);
        current = parent;
    }

    ordered.reverse();
    Ok(ActivePath { ordered, members })
}
