#![forbid(unsafe_code)]

//! Node-link diagram layout.
//!
//! # Role in chatgraph
//! `chatgraph-layout` turns a [`TreeStore`](chatgraph_core::TreeStore)
//! snapshot into one non-overlapping box per node. Placement is
//! parent-relative and deterministic; see [`engine`] for the algorithm.
//!
//! # Primary responsibilities
//! - **LayoutConfig**: node sizing and spacing, loadable from TOML/JSON.
//! - **compute_layout**: placement plus collision repair.
//! - **Layout::links**: connector segments for the renderer.
//! - **fallback_grid**: a dumb grid for when placement fails.

pub mod config;
pub mod engine;
pub mod grid;
pub mod links;
pub mod sizing;

pub use config::{ConfigError, LayoutConfig};
pub use engine::{Layout, LayoutEngine, LayoutError, Placement, compute_layout};
pub use grid::fallback_grid;
pub use links::Link;
pub use sizing::{estimated_lines, node_height, summary_height};
