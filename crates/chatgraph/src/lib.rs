#![forbid(unsafe_code)]

//! chatgraph: layout and navigation core for branching conversations.
//!
//! A conversation is a forest of turns; any turn can be revisited to start a
//! new branch. This crate keeps three derived views consistent with that
//! forest:
//!
//! - a non-overlapping box per node ([`compute_layout`]),
//! - the active path from a root to the focused node
//!   ([`resolve_active_path`]),
//! - a multi-select/delete model that always recovers a valid focus
//!   ([`SelectionController`]).
//!
//! [`Session`] bundles the store, focus, and selection for a presentation
//! layer.
//!
//! # Quick start
//!
//! ```
//! use chatgraph::prelude::*;
//!
//! let mut session = Session::default();
//! let root = session.submit("What is a B-tree?").unwrap();
//! session.submit("Show an insert example").unwrap();
//! session.set_focus(root);
//! session.submit("Compare with LSM trees").unwrap();
//!
//! let layout = session.layout().unwrap();
//! assert_eq!(layout.len(), 3);
//! assert_eq!(session.active_path().unwrap().len(), 2);
//! ```

pub mod error;

pub use chatgraph_core::{
    CyclicParentError, Node, NodeId, Position, Rect, StoreError, TreeStore,
};
pub use chatgraph_layout::{
    ConfigError, Layout, LayoutConfig, LayoutEngine, LayoutError, Link, Placement,
    compute_layout, fallback_grid,
};
pub use chatgraph_session::{
    ActivePath, DeletePolicy, RefocusPolicy, SelectionController, SelectionState, Session,
    resolve_active_path,
};
pub use error::{DegradationAction, Error, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{DegradationAction, Error, Result};
    pub use crate::{
        ActivePath, Layout, LayoutConfig, Node, NodeId, Position, Rect, SelectionController,
        Session, TreeStore, compute_layout, resolve_active_path,
    };
}
