#![forbid(unsafe_code)]

//! Conversation nodes.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// NodeId
// ============================================================================

/// Identifier of one conversation turn.
///
/// Assigned monotonically by whoever creates the node and never reused within
/// a session, so a larger id always means a more recent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(u64);

impl NodeId {
    /// Create a NodeId from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// ============================================================================
// Node
// ============================================================================

/// One user/assistant exchange in a branching conversation.
///
/// Only the structural fields live here. `summary` is used to size the node
/// box; the message bodies belong to the embedding application.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub id: NodeId,
    /// Node this one branched from. `None` for a root.
    ///
    /// May name a node that is no longer in the store (after a delete), in
    /// which case the node behaves as a root.
    pub parent: Option<NodeId>,
    pub summary: String,
}

impl Node {
    /// Create a node.
    pub fn new(id: NodeId, parent: Option<NodeId>, summary: impl Into<String>) -> Self {
        Self {
            id,
            parent,
            summary: summary.into(),
        }
    }

    /// A node with no parent, from a raw id.
    pub fn root(id: u64, summary: impl Into<String>) -> Self {
        Self::new(NodeId::new(id), None, summary)
    }

    /// A node branching from `parent`, from raw ids.
    pub fn child(id: u64, parent: u64, summary: impl Into<String>) -> Self {
        Self::new(NodeId::new(id), Some(NodeId::new(parent)), summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrip_and_display() {
        let id = NodeId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.next(), NodeId::new(8));
        assert_eq!(id.to_string(), "#7");
    }

    #[test]
    fn constructors() {
        let root = Node::root(1, "hello");
        assert_eq!(root.parent, None);
        let child = Node::child(2, 1, "reply");
        assert_eq!(child.parent, Some(NodeId::new(1)));
        assert_eq!(child.summary, "reply");
    }
}
