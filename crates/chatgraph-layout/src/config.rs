#![forbid(unsafe_code)]

//! Layout geometry as data.
//!
//! Every constant the layout engine uses lives in [`LayoutConfig`], which can
//! be loaded from TOML or JSON so a renderer can tune spacing without a
//! rebuild.
//!
//! ```toml
//! # chatgraph-layout.toml
//! node_width = 200
//! vertical_gap = 32
//!
//! [origin]
//! x = 16
//! y = 16
//! ```
//!
//! ```rust,ignore
//! let config = LayoutConfig::from_toml_file("chatgraph-layout.toml")?.validated()?;
//! ```
//!
//! Omitted fields keep their defaults.

#[cfg(feature = "layout-config")]
use std::path::Path;

use chatgraph_core::{Position, Rect};
use serde::{Deserialize, Serialize};

/// Node sizing and spacing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fixed width of every node box.
    pub node_width: i32,
    /// Lower clamp for node height.
    pub min_height: i32,
    /// Upper clamp for node height.
    pub max_height: i32,
    /// Height before any text lines are added.
    pub base_height: i32,
    /// Height added per estimated line of summary text.
    pub line_height: i32,
    /// Characters assumed to fit on one wrapped line.
    pub chars_per_line: usize,
    /// Cap on the estimated line count.
    pub max_lines: usize,
    /// Space between a parent's bottom edge and its children's top edge.
    pub vertical_gap: i32,
    /// Space between sibling columns.
    pub horizontal_gap: i32,
    /// Where root nodes are placed before collision repair.
    pub origin: Position,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 240,
            min_height: 80,
            max_height: 120,
            base_height: 20,
            line_height: 20,
            chars_per_line: 30,
            max_lines: 5,
            vertical_gap: 40,
            horizontal_gap: 60,
            origin: Position::new(50, 50),
        }
    }
}

impl LayoutConfig {
    /// Horizontal distance between adjacent sibling slots, also the
    /// distance a colliding node is shifted per repair step.
    #[inline]
    #[must_use]
    pub const fn column_step(&self) -> i32 {
        self.node_width.saturating_add(self.horizontal_gap)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.node_width <= 0 {
            errors.push(format!("node_width must be > 0, got {}", self.node_width));
        }
        if self.min_height <= 0 {
            errors.push(format!("min_height must be > 0, got {}", self.min_height));
        }
        if self.max_height < self.min_height {
            errors.push(format!(
                "max_height ({}) must be >= min_height ({})",
                self.max_height, self.min_height
            ));
        }
        if self.base_height < 0 {
            errors.push(format!("base_height must be >= 0, got {}", self.base_height));
        }
        if self.line_height < 0 {
            errors.push(format!("line_height must be >= 0, got {}", self.line_height));
        }
        if self.chars_per_line == 0 {
            errors.push("chars_per_line must be > 0".into());
        }
        if self.max_lines == 0 {
            errors.push("max_lines must be > 0".into());
        }
        if self.vertical_gap < 0 {
            errors.push(format!("vertical_gap must be >= 0, got {}", self.vertical_gap));
        }
        if self.horizontal_gap < 0 {
            errors.push(format!(
                "horizontal_gap must be >= 0, got {}",
                self.horizontal_gap
            ));
        }
        if !Rect::at(self.origin, self.node_width, self.max_height).is_representable() {
            errors.push(format!(
                "origin ({}, {}) leaves no room for a {}x{} box",
                self.origin.x, self.origin.y, self.node_width, self.max_height
            ));
        }

        errors
    }

    /// Return `self` if it validates cleanly.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "layout-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "layout-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "layout-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "layout-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a layout configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "layout-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "layout-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "layout-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "layout-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "layout-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "layout-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
