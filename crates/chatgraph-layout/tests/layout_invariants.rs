//! Property tests for layout invariants on random forests.
//!
//! Forests are generated with parents drawn from earlier indices (so they are
//! acyclic), a share of dangling parent ids, and then shuffled so children
//! often appear before their parents in the snapshot.

use chatgraph_core::{Node, NodeId, TreeStore};
use chatgraph_layout::{LayoutConfig, compute_layout, node_height};
use proptest::prelude::*;

/// `(parent selector, summary length)` per node.
fn forest() -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec((any::<u16>(), 0usize..200), 0..40)
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (selector, len))| {
                    let id = i as u64 + 1;
                    let summary = "w".repeat(len);
                    match selector % 8 {
                        0 => Node::root(id, summary),
                        1 => Node::child(id, 10_000 + u64::from(selector), summary),
                        _ if i > 0 => {
                            let parent = u64::from(selector) % (i as u64) + 1;
                            Node::child(id, parent, summary)
                        }
                        _ => Node::root(id, summary),
                    }
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn parent_of<'a>(nodes: &'a [Node], node: &Node) -> Option<&'a Node> {
    let parent = node.parent?;
    nodes.iter().find(|n| n.id == parent)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn no_two_boxes_overlap(nodes in forest()) {
        let layout = compute_layout(&nodes, &LayoutConfig::default()).unwrap();
        prop_assert_eq!(layout.len(), nodes.len());
        prop_assert_eq!(layout.first_overlap(), None);
    }

    #[test]
    fn children_sit_below_parents(nodes in forest()) {
        let config = LayoutConfig::default();
        let layout = compute_layout(&nodes, &config).unwrap();
        for node in &nodes {
            if let Some(parent) = parent_of(&nodes, node) {
                let child_pos = layout.position(node.id).unwrap();
                let parent_pos = layout.position(parent.id).unwrap();
                prop_assert!(
                    child_pos.y >= parent_pos.y + node_height(parent, &config) + config.vertical_gap
                );
            }
        }
    }

    #[test]
    fn layout_is_deterministic(nodes in forest()) {
        let config = LayoutConfig::default();
        let first = compute_layout(&nodes, &config).unwrap();
        let second = compute_layout(&nodes, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn add_then_remove_restores_layout(nodes in forest(), len in 0usize..200) {
        let config = LayoutConfig::default();
        let mut store = TreeStore::from_nodes(nodes).unwrap();
        let before = compute_layout(store.nodes(), &config).unwrap();

        let id = store.next_id();
        let parent = store.first().map(|n| n.id);
        store.add_node(Node::new(id, parent, "z".repeat(len))).unwrap();
        store.remove_nodes(&[id]);

        let after = compute_layout(store.nodes(), &config).unwrap();
        prop_assert_eq!(before, after);
    }
}

#[test]
fn fan_out_is_left_to_right_on_one_row() {
    let nodes = [
        Node::root(1, "root"),
        Node::child(2, 1, "A"),
        Node::child(3, 1, "B"),
        Node::child(4, 1, "C"),
    ];
    let layout = compute_layout(&nodes, &LayoutConfig::default()).unwrap();
    let [a, b, c] = [2, 3, 4].map(|id| layout.position(NodeId::new(id)).unwrap());
    assert!(a.x < b.x && b.x < c.x);
    assert_eq!(a.y, b.y);
    assert_eq!(b.y, c.y);
}

#[test]
fn wide_tree_has_no_overlaps() {
    // Three levels, four children each: lots of competing slots.
    let mut nodes = vec![Node::root(1, "root")];
    let mut next = 2;
    let mut frontier = vec![1];
    for _ in 0..3 {
        let mut children = Vec::new();
        for &parent in &frontier {
            for _ in 0..4 {
                nodes.push(Node::child(next, parent, "x".repeat((next as usize * 17) % 160)));
                children.push(next);
                next += 1;
            }
        }
        frontier = children;
    }
    let layout = compute_layout(&nodes, &LayoutConfig::default()).unwrap();
    assert_eq!(layout.len(), 85);
    assert_eq!(layout.first_overlap(), None);
}
