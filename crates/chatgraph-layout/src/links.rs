#![forbid(unsafe_code)]

//! Parent-child connector segments.

use chatgraph_core::{Node, NodeId, Position};

use crate::engine::Layout;

/// A straight connector from a child's top edge to its parent's bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub child: NodeId,
    pub parent: NodeId,
    /// Top-center of the child box.
    pub from: Position,
    /// Bottom-center of the parent box.
    pub to: Position,
}

impl Layout {
    /// One link per node whose parent is present in this layout, in snapshot
    /// order.
    pub fn links<'a>(&'a self, nodes: &'a [Node]) -> impl Iterator<Item = Link> + 'a {
        nodes.iter().filter_map(move |node| {
            let parent = node.parent?;
            let child_rect = self.rect(node.id)?;
            let parent_rect = self.rect(parent)?;
            Some(Link {
                child: node.id,
                parent,
                from: child_rect.top_center(),
                to: parent_rect.bottom_center(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::engine::compute_layout;

    #[test]
    fn links_connect_centers() {
        let nodes = [Node::root(1, "a"), Node::child(2, 1, "b"), Node::child(3, 1, "c")];
        let layout = compute_layout(&nodes, &LayoutConfig::default()).unwrap();
        let links: Vec<Link> = layout.links(&nodes).collect();
        assert_eq!(links.len(), 2);
        assert_eq!(
            links[0],
            Link {
                child: NodeId::new(2),
                parent: NodeId::new(1),
                from: Position::new(170, 170),
                to: Position::new(170, 130),
            }
        );
        assert_eq!(links[1].from, Position::new(470, 170));
        assert_eq!(links[1].to, Position::new(170, 130));
    }

    #[test]
    fn dangling_parent_has_no_link() {
        let nodes = [Node::root(1, "a"), Node::child(3, 2, "orphan")];
        let layout = compute_layout(&nodes, &LayoutConfig::default()).unwrap();
        assert_eq!(layout.links(&nodes).count(), 0);
    }
}
