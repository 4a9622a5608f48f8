#![forbid(unsafe_code)]

//! Structure-free fallback placement.
//!
//! Used when [`compute_layout`](crate::compute_layout) fails so the diagram
//! still shows every node. Nodes fill a near-square grid in snapshot order;
//! every cell is one column step wide and tall enough for the tallest box, so
//! boxes never overlap. Duplicate ids keep their first cell.
//!
//! The grid starts at `origin` unless that would push its far edge past
//! `i32`; then it is pulled back just far enough to fit.

use chatgraph_core::{Node, Position, Rect};
use rustc_hash::FxHashSet;

use crate::config::LayoutConfig;
use crate::engine::{Layout, Placement};
use crate::sizing::node_height;

/// Lay `nodes` out on a grid, ignoring the parent relation.
#[must_use]
pub fn fallback_grid(nodes: &[Node], config: &LayoutConfig) -> Layout {
    let mut seen = FxHashSet::default();
    let unique: Vec<&Node> = nodes.iter().filter(|n| seen.insert(n.id)).collect();

    let columns = columns_for(unique.len());
    let heights: Vec<i32> = unique.iter().map(|n| node_height(n, config)).collect();
    let row_height = heights
        .iter()
        .copied()
        .max()
        .unwrap_or(config.min_height)
        .saturating_add(config.vertical_gap.max(0));
    let column_width = config
        .node_width
        .saturating_add(config.horizontal_gap.max(0));

    let rows = unique.len().div_ceil(columns).max(1);
    let used_columns = columns.min(unique.len()).max(1);
    let anchor = Position::new(
        fit_anchor(config.origin.x, used_columns - 1, column_width, config.node_width),
        fit_anchor(config.origin.y, rows - 1, row_height, row_height),
    );

    let placements = unique
        .iter()
        .zip(heights)
        .enumerate()
        .map(|(i, (node, height))| {
            let col = i32::try_from(i % columns).unwrap_or(i32::MAX);
            let row = i32::try_from(i / columns).unwrap_or(i32::MAX);
            let origin = Position::new(
                anchor.x.saturating_add(col.saturating_mul(column_width)),
                anchor.y.saturating_add(row.saturating_mul(row_height)),
            );
            Placement {
                id: node.id,
                rect: Rect::at(origin, config.node_width, height),
            }
        })
        .collect();
    Layout::from_placements(placements)
}

/// Start coordinate so that `cells` steps of `step` plus a trailing `extent`
/// still end inside `i32`.
fn fit_anchor(start: i32, cells: usize, step: i32, extent: i32) -> i32 {
    let cells = i64::try_from(cells).unwrap_or(i64::MAX);
    let span = cells
        .saturating_mul(i64::from(step.max(0)))
        .saturating_add(i64::from(extent.max(0)));
    let latest = i64::from(i32::MAX).saturating_sub(span);
    let anchored = i64::from(start).min(latest).max(i64::from(i32::MIN));
    i32::try_from(anchored).unwrap_or(i32::MIN)
}

/// Smallest column count whose square holds `count` cells.
fn columns_for(count: usize) -> usize {
    let mut columns = 1;
    while columns * columns < count {
        columns += 1;
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatgraph_core::NodeId;

    #[test]
    fn column_counts() {
        assert_eq!(columns_for(0), 1);
        assert_eq!(columns_for(1), 1);
        assert_eq!(columns_for(4), 2);
        assert_eq!(columns_for(5), 3);
    }

    #[test]
    fn grid_places_every_node_without_overlap() {
        // A cyclic snapshot that compute_layout rejects.
        let nodes: Vec<Node> = (1..=5)
            .map(|i| Node::child(i, if i == 1 { 5 } else { i - 1 }, "x".repeat(i as usize * 40)))
            .collect();
        let layout = fallback_grid(&nodes, &LayoutConfig::default());
        assert_eq!(layout.len(), 5);
        assert_eq!(layout.first_overlap(), None);
        assert_eq!(layout.position(NodeId::new(1)), Some(Position::new(50, 50)));
        assert_eq!(layout.position(NodeId::new(4)), Some(Position::new(50, 210)));
    }

    #[test]
    fn grid_near_i32_edge_is_pulled_back() {
        let config = LayoutConfig {
            origin: Position::new(i32::MAX - 500, i32::MAX - 100),
            ..LayoutConfig::default()
        };
        let nodes: Vec<Node> = (1..=4).map(|i| Node::root(i, "n")).collect();
        let layout = fallback_grid(&nodes, &config);
        assert_eq!(layout.first_overlap(), None);
        for placement in layout.iter() {
            assert!(placement.rect.is_representable(), "{placement:?}");
        }
        // Two columns of 300 end exactly at i32::MAX.
        let bounds = layout.bounds().unwrap();
        assert_eq!(bounds.x, i32::MAX - 540);
        assert_eq!(bounds.right(), i32::MAX);
    }

    #[test]
    fn duplicates_keep_first_cell() {
        let nodes = [Node::root(1, "a"), Node::root(1, "b"), Node::root(2, "c")];
        let layout = fallback_grid(&nodes, &LayoutConfig::default());
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.position(NodeId::new(2)), Some(Position::new(350, 50)));
    }
}
