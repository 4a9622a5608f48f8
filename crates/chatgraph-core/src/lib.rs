#![forbid(unsafe_code)]

//! Core: node model, tree store, and geometry.
//!
//! # Role in chatgraph
//! `chatgraph-core` is the leaf crate. It owns the conversation node type,
//! the [`TreeStore`](store::TreeStore) that is the single writer of the node
//! set, and the rectangle math shared by layout and rendering.
//!
//! # How it fits in the system
//! `chatgraph-layout` and `chatgraph-session` only ever read
//! [`TreeStore::nodes`](store::TreeStore::nodes) snapshots. Every derived
//! value (positions, active path) is recomputed from a snapshot, so nothing
//! here caches derived state.

pub mod error;
pub mod geometry;
pub mod node;
pub mod store;

pub use error::{CyclicParentError, StoreError};
pub use geometry::{Position, Rect};
pub use node::{Node, NodeId};
pub use store::TreeStore;
