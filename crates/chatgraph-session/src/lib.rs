#![forbid(unsafe_code)]

//! Session state: active path, selection, and the session facade.
//!
//! # Role in chatgraph
//! This crate is what a presentation layer talks to. It resolves the active
//! path for the focused node, runs the multi-select/delete state machine,
//! and wraps both together with layout in a [`Session`].
//!
//! # Logging
//! Mutations are logged with `tracing` (`info` for commits and submits,
//! `debug` for focus and selection changes, `warn` for rejected input and
//! layout fallbacks). Installing a subscriber is the application's job.

pub mod path;
pub mod selection;
pub mod session;
pub mod summary;

pub use path::{ActivePath, resolve_active_path, resolve_in_store};
pub use selection::{DeletePolicy, RefocusPolicy, SelectionController, SelectionState};
pub use session::Session;
pub use summary::{SUMMARY_WORD_LIMIT, truncate_words};
