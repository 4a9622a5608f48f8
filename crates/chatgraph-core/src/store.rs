#![forbid(unsafe_code)]

//! Node set and parent relation.
//!
//! [`TreeStore`] is the single writer for the conversation structure. Every
//! other component reads an immutable snapshot via [`TreeStore::nodes`] and
//! derives its output from scratch.
//!
//! # Ordering
//!
//! Nodes are kept in insertion order. Removal preserves the relative order of
//! the survivors. Layout uses this order to break ties between siblings, so
//! it is part of the observable contract.
//!
//! # Removal
//!
//! [`TreeStore::remove_nodes`] removes exactly the requested ids. Children of
//! a removed node keep their `parent` field and therefore become roots whose
//! parent no longer resolves. Use [`TreeStore::with_descendants`] first if a
//! whole subtree should go.

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::StoreError;
use crate::node::{Node, NodeId};

/// Ordered node set with an id index.
#[derive(Debug, Clone, Default)]
pub struct TreeStore {
    nodes: Vec<Node>,
    index: FxHashMap<NodeId, usize>,
    /// Highest id ever added, including removed nodes.
    high_water: Option<NodeId>,
}

impl TreeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from nodes in order, rejecting duplicate ids.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for node in nodes {
            store.add_node(node)?;
        }
        Ok(store)
    }

    /// Append a node.
    pub fn add_node(&mut self, node: Node) -> Result<(), StoreError> {
        if self.index.contains_key(&node.id) {
            #[cfg(feature = "tracing")]
            tracing::warn!(id = node.id.raw(), "rejected duplicate node id");
            return Err(StoreError::DuplicateId(node.id));
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            id = node.id.raw(),
            parent = node.parent.map(NodeId::raw),
            "node added"
        );
        self.high_water = self.high_water.max(Some(node.id));
        self.index.insert(node.id, self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Remove every node whose id is in `ids`. Does not cascade.
    ///
    /// Returns the removed nodes in store order. Ids that are not present are
    /// ignored.
    pub fn remove_nodes<'a>(&mut self, ids: impl IntoIterator<Item = &'a NodeId>) -> Vec<Node> {
        let doomed: FxHashSet<NodeId> = ids
            .into_iter()
            .copied()
            .filter(|id| self.index.contains_key(id))
            .collect();
        if doomed.is_empty() {
            return Vec::new();
        }

        let (removed, kept): (Vec<Node>, Vec<Node>) = std::mem::take(&mut self.nodes)
            .into_iter()
            .partition(|node| doomed.contains(&node.id));
        self.nodes = kept;
        self.reindex();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            removed = removed.len(),
            remaining = self.nodes.len(),
            "nodes removed"
        );
        removed
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, node) in self.nodes.iter().enumerate() {
            self.index.insert(node.id, i);
        }
    }

    /// The current snapshot, in store order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Whether `id` is present.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// The parent of `id`, if both the node and its parent are present.
    #[must_use]
    pub fn parent_of(&self, id: NodeId) -> Option<&Node> {
        self.get(id)?.parent.and_then(|parent| self.get(parent))
    }

    /// Direct children of `id`, in store order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.nodes
            .iter()
            .filter(move |node| node.parent == Some(id))
    }

    /// Nodes whose parent is absent or does not resolve, in store order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes
            .iter()
            .filter(|node| node.parent.is_none_or(|parent| !self.contains(parent)))
    }

    /// First node in store order.
    #[must_use]
    pub fn first(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Most recently created node (highest id).
    #[must_use]
    pub fn latest(&self) -> Option<&Node> {
        self.nodes.iter().max_by_key(|node| node.id)
    }

    /// Id to assign to the next created node: one past the highest id this
    /// store has ever held, starting at 1. Removed ids are never handed out
    /// again.
    #[must_use]
    pub fn next_id(&self) -> NodeId {
        self.high_water.map_or(NodeId::new(1), NodeId::next)
    }

    /// `ids` plus every present node that descends from one of them.
    ///
    /// Terminates on cyclic parent relations since each id is expanded at
    /// most once.
    #[must_use]
    pub fn with_descendants<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a NodeId>,
    ) -> BTreeSet<NodeId> {
        let mut closure: BTreeSet<NodeId> = ids.into_iter().copied().collect();
        let mut children_of: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
        for node in &self.nodes {
            if let Some(parent) = node.parent {
                children_of.entry(parent).or_default().push(node.id);
            }
        }

        let mut stack: Vec<NodeId> = closure.iter().copied().collect();
        while let Some(current) = stack.pop() {
            let Some(children) = children_of.get(&current) else {
                continue;
            };
            for &child in children {
                if closure.insert(child) {
                    stack.push(child);
                }
            }
        }
        closure
    }
}
