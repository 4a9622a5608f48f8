#![forbid(unsafe_code)]

//! Node box sizing.
//!
//! Boxes have a fixed width and a height estimated from the summary length:
//! the text is bucketed into wrapped lines of `chars_per_line` characters,
//! capped at `max_lines`, and the result is clamped to
//! `[min_height, max_height]`.

use chatgraph_core::Node;

use crate::config::LayoutConfig;

/// Estimated number of wrapped lines for `summary`.
///
/// Length is measured in Unicode scalar values.
#[must_use]
pub fn estimated_lines(summary: &str, config: &LayoutConfig) -> usize {
    let chars = summary.chars().count();
    chars
        .div_ceil(config.chars_per_line.max(1))
        .min(config.max_lines)
}

/// Box height for a node with the given summary.
#[must_use]
pub fn summary_height(summary: &str, config: &LayoutConfig) -> i32 {
    let lines = i32::try_from(estimated_lines(summary, config)).unwrap_or(i32::MAX);
    let raw = config
        .base_height
        .saturating_add(lines.saturating_mul(config.line_height));
    raw.max(config.min_height).min(config.max_height.max(config.min_height))
}

/// Box height for `node`.
#[inline]
#[must_use]
pub fn node_height(node: &Node, config: &LayoutConfig) -> i32 {
    summary_height(&node.summary, config)
}
