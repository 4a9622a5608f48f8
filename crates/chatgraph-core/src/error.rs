#![forbid(unsafe_code)]

//! Store integrity and tree-shape errors.

use std::fmt;

use crate::node::NodeId;

/// Tree store integrity errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A node with this id is already present.
    DuplicateId(NodeId),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate node id {id}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// A parent chain loops back on itself.
///
/// `start` is the node the walk began at; `revisited` is the first id seen
/// twice along its ancestor chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclicParentError {
    pub start: NodeId,
    pub revisited: NodeId,
}

impl fmt::Display for CyclicParentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cyclic parent chain: walking up from {} revisits {}",
            self.start, self.revisited
        )
    }
}

impl std::error::Error for CyclicParentError {}
