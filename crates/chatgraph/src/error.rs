#![forbid(unsafe_code)]

//! Unified error model and graceful degradation.
//!
//! Each subsystem keeps its own typed error; [`Error`] wraps them so callers
//! can use `?` across crates, and [`Error::degradation`] tells the
//! presentation layer how to keep the diagram usable instead of failing.

use std::fmt;

use chatgraph_core::{CyclicParentError, StoreError};
use chatgraph_layout::{ConfigError, LayoutError};

/// Top-level error type for chatgraph.
#[derive(Debug)]
pub enum Error {
    /// Tree store integrity violation.
    Store(StoreError),
    /// Active path resolution hit a parent cycle.
    Path(CyclicParentError),
    /// Layout computation failure.
    Layout(LayoutError),
    /// Layout configuration could not be loaded.
    Config(ConfigError),
}

/// Standard result type for chatgraph APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// What the presentation layer should do when an error occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationAction {
    /// Reject the edit and tell the user.
    RejectEdit,
    /// Show the placeholder transcript.
    EmptyTranscript,
    /// Draw the fallback grid instead of the tree layout.
    FallbackGrid,
    /// Keep running with the default layout configuration.
    DefaultConfig,
}

impl Error {
    /// Determine the graceful degradation action for this error.
    pub fn degradation(&self) -> DegradationAction {
        match self {
            Self::Store(StoreError::DuplicateId(_)) => DegradationAction::RejectEdit,
            Self::Path(_) => DegradationAction::EmptyTranscript,
            Self::Layout(_) => DegradationAction::FallbackGrid,
            Self::Config(_) => DegradationAction::DefaultConfig,
        }
    }

    /// Error type label for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Store(_) => "store",
            Self::Path(_) => "path",
            Self::Layout(_) => "layout",
            Self::Config(_) => "config",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Path(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Path(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl fmt::Display for DegradationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RejectEdit => write!(f, "reject_edit"),
            Self::EmptyTranscript => write!(f, "empty_transcript"),
            Self::FallbackGrid => write!(f, "fallback_grid"),
            Self::DefaultConfig => write!(f, "default_config"),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<CyclicParentError> for Error {
    fn from(err: CyclicParentError) -> Self {
        Self::Path(err)
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use chatgraph_core::{Node, NodeId, TreeStore};
    use chatgraph_layout::{LayoutConfig, compute_layout};
    use chatgraph_session::resolve_active_path;

    use super::*;

    fn cycle() -> Vec<Node> {
        vec![Node::child(1, 2, "a"), Node::child(2, 1, "b")]
    }

    #[test]
    fn duplicate_rejects_edit() {
        let mut store = TreeStore::new();
        store.add_node(Node::root(1, "a")).unwrap();
        let err: Error = store.add_node(Node::root(1, "b")).unwrap_err().into();
        assert_eq!(err.degradation(), DegradationAction::RejectEdit);
        assert_eq!(err.error_type(), "store");
        assert!(err.to_string().contains("#1"));
    }

    #[test]
    fn cycle_empties_transcript() {
        let err: Error = resolve_active_path(&cycle(), Some(NodeId::new(1)))
            .unwrap_err()
            .into();
        assert_eq!(err.degradation(), DegradationAction::EmptyTranscript);
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn layout_failure_uses_grid() {
        let err: Error = compute_layout(&cycle(), &LayoutConfig::default())
            .unwrap_err()
            .into();
        assert_eq!(err.degradation(), DegradationAction::FallbackGrid);
        assert_eq!(err.degradation().to_string(), "fallback_grid");
    }

    #[test]
    fn bad_config_keeps_defaults() {
        let err: Error = LayoutConfig {
            node_width: -5,
            ..LayoutConfig::default()
        }
        .validated()
        .unwrap_err()
        .into();
        assert_eq!(err.degradation(), DegradationAction::DefaultConfig);
        assert!(err.to_string().contains("node_width"));
    }

    #[cfg(feature = "layout-config")]
    #[test]
    fn config_parse_errors_available_with_feature() {
        let err: Error = LayoutConfig::from_toml_str("node_width = \"wide\"")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Config(ConfigError::Toml(_))));
        assert_eq!(err.degradation(), DegradationAction::DefaultConfig);
    }

    #[cfg(not(feature = "layout-config"))]
    #[test]
    fn config_errors_without_parsers() {
        // Exhaustive only when the TOML and JSON variants are compiled out.
        let err = ConfigError::Validation(vec!["x".into()]);
        let label = match err {
            ConfigError::Io(_) => "io",
            ConfigError::Validation(_) => "validation",
        };
        assert_eq!(label, "validation");
    }

    #[test]
    fn question_mark_across_crates() {
        fn run() -> Result<usize> {
            let store = TreeStore::from_nodes([Node::root(1, "a"), Node::child(2, 1, "b")])?;
            let layout = compute_layout(store.nodes(), &LayoutConfig::default())?;
            let path = resolve_active_path(store.nodes(), Some(NodeId::new(2)))?;
            Ok(layout.len() + path.len())
        }
        assert_eq!(run().unwrap(), 4);
    }
}
