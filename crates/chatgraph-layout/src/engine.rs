#![forbid(unsafe_code)]

//! Parent-relative placement with collision repair.
//!
//! # Algorithm
//!
//! Nodes are processed in snapshot order. Placing a node first places its
//! unplaced ancestors, top-down:
//!
//! - A node whose parent resolves goes one row below the parent
//!   (`parent.y + h(parent) + vertical_gap`) in the parent's next free child
//!   slot (`parent.x + k * column_step`, `k` counting children already
//!   placed under that parent).
//! - Any other node starts at `origin`. Multiple roots are not offset from
//!   each other; collision repair separates them.
//!
//! Before a node is committed it is shifted right by `column_step` until it
//! overlaps no previously committed box. A final global pass then repeats
//! over all ordered pairs, shifting the first member of any overlapping pair,
//! until a pass is clean.
//!
//! Only `x` is ever adjusted, so every child stays strictly below its parent.
//!
//! # Termination
//!
//! Ancestor walks keep a visited set and report a revisit as
//! [`LayoutError::Cycle`]. Both repair loops are capped at `n²` iterations
//! and report [`LayoutError::Nonconvergence`] past that; for a valid config
//! neither cap is reachable.
//!
//! Coordinates never saturate. A slot or shift that would push a box edge
//! past `i32` is reported as [`LayoutError::CoordinateOverflow`].
//!
//! # State
//!
//! All bookkeeping lives in a [`Placer`] owned by one call. Nothing survives
//! between calls, so identical snapshots produce identical layouts.

use std::fmt;

use chatgraph_core::{CyclicParentError, Node, NodeId, Position, Rect};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::LayoutConfig;
use crate::sizing::node_height;

// ============================================================================
// Errors
// ============================================================================

/// Layout computation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// An ancestor walk revisited a node.
    Cycle(CyclicParentError),
    /// The snapshot contains the same id twice.
    DuplicateNode(NodeId),
    /// Collision repair hit its iteration cap.
    ///
    /// Indicates a geometry bug or an invalid config (e.g. a non-positive
    /// column step), never a valid tree shape.
    Nonconvergence { nodes: usize, iterations: usize },
    /// Placing `id` would move a box edge outside the `i32` canvas.
    CoordinateOverflow { id: NodeId },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle(err) => write!(f, "layout aborted: {err}"),
            Self::DuplicateNode(id) => write!(f, "duplicate node {id} in layout snapshot"),
            Self::Nonconvergence { nodes, iterations } => write!(
                f,
                "collision repair did not converge for {nodes} nodes after {iterations} iterations"
            ),
            Self::CoordinateOverflow { id } => {
                write!(f, "placing node {id} overflows the canvas coordinate range")
            }
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cycle(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CyclicParentError> for LayoutError {
    fn from(err: CyclicParentError) -> Self {
        Self::Cycle(err)
    }
}

// ============================================================================
// Layout
// ============================================================================

/// A placed node box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub id: NodeId,
    pub rect: Rect,
}

/// Positions for every node of one snapshot.
///
/// Placements are stored in snapshot order; lookups by id go through an
/// index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    placements: Vec<Placement>,
    index: FxHashMap<NodeId, usize>,
}

impl Layout {
    pub(crate) fn from_placements(placements: Vec<Placement>) -> Self {
        let index = placements
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();
        Self { placements, index }
    }

    /// Top-left corner of `id`'s box.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.rect(id).map(|r| r.origin())
    }

    /// Full box of `id`.
    #[must_use]
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.index.get(&id).map(|&i| self.placements[i].rect)
    }

    /// All placements in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.placements.iter()
    }

    /// Number of placed nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether nothing was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Bounding box of every placement; `None` when empty.
    ///
    /// Renderers size their canvas from this.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.placements
            .iter()
            .map(|p| p.rect)
            .reduce(|acc, r| acc.union(&r))
    }

    /// First pair of overlapping boxes, if any.
    #[must_use]
    pub fn first_overlap(&self) -> Option<(NodeId, NodeId)> {
        for (i, a) in self.placements.iter().enumerate() {
            for b in &self.placements[i + 1..] {
                if a.rect.overlaps(&b.rect) {
                    return Some((a.id, b.id));
                }
            }
        }
        None
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Layout engine bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out a snapshot. See [`compute_layout`].
    pub fn compute(&self, nodes: &[Node]) -> Result<Layout, LayoutError> {
        compute_layout(nodes, &self.config)
    }
}

/// Place every node of `nodes` without overlaps.
///
/// Total for any forest; returns an error instead of a partial layout when
/// the snapshot has duplicate ids or a parent cycle, or when repair does not
/// converge.
pub fn compute_layout(nodes: &[Node], config: &LayoutConfig) -> Result<Layout, LayoutError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("compute_layout", nodes = nodes.len()).entered();

    let mut placer = Placer::new(nodes, config)?;
    for i in 0..nodes.len() {
        placer.resolve(i)?;
    }
    placer.repair_all()?;

    let placements = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| Placement {
            id: node.id,
            rect: placer.rect(i),
        })
        .collect();
    Ok(Layout::from_placements(placements))
}

// ============================================================================
// Placer
// ============================================================================

/// Per-call placement state.
struct Placer<'a> {
    nodes: &'a [Node],
    config: &'a LayoutConfig,
    index: FxHashMap<NodeId, usize>,
    heights: Vec<i32>,
    placed: Vec<Option<Position>>,
    /// Indices in commit order.
    committed: Vec<usize>,
    /// Next child slot per parent index.
    child_slots: FxHashMap<usize, i32>,
    /// Iteration cap for both repair loops.
    cap: usize,
}

impl<'a> Placer<'a> {
    fn new(nodes: &'a [Node], config: &'a LayoutConfig) -> Result<Self, LayoutError> {
        let mut index = FxHashMap::default();
        index.reserve(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id, i).is_some() {
                return Err(LayoutError::DuplicateNode(node.id));
            }
        }
        Ok(Self {
            nodes,
            config,
            index,
            heights: nodes.iter().map(|n| node_height(n, config)).collect(),
            placed: vec![None; nodes.len()],
            committed: Vec::with_capacity(nodes.len()),
            child_slots: FxHashMap::default(),
            cap: nodes.len().saturating_mul(nodes.len()).max(1),
        })
    }

    fn parent_index(&self, i: usize) -> Option<usize> {
        self.nodes[i]
            .parent
            .and_then(|parent| self.index.get(&parent).copied())
    }

    /// Box for a node that has been placed.
    fn rect(&self, i: usize) -> Rect {
        let origin = self.placed[i].unwrap_or_default();
        Rect::at(origin, self.config.node_width, self.heights[i])
    }

    /// Box for `i` at `pos`, if its edges fit in `i32`.
    fn checked_rect(&self, i: usize, pos: Position) -> Result<Rect, LayoutError> {
        let rect = Rect::at(pos, self.config.node_width, self.heights[i]);
        if rect.is_representable() {
            Ok(rect)
        } else {
            Err(self.overflow(i))
        }
    }

    /// Place `start` and any unplaced ancestors.
    fn resolve(&mut self, start: usize) -> Result<(), LayoutError> {
        if self.placed[start].is_some() {
            return Ok(());
        }

        // Walk up to the nearest placed ancestor or a root.
        let mut pending = vec![start];
        let mut on_chain = FxHashSet::default();
        on_chain.insert(start);
        let mut cursor = start;
        while let Some(parent) = self.parent_index(cursor) {
            if self.placed[parent].is_some() {
                break;
            }
            if !on_chain.insert(parent) {
                return Err(LayoutError::Cycle(CyclicParentError {
                    start: self.nodes[start].id,
                    revisited: self.nodes[parent].id,
                }));
            }
            pending.push(parent);
            cursor = parent;
        }

        let mut anchor = self
            .parent_index(cursor)
            .and_then(|p| self.placed[p].map(|pos| (p, pos)));
        for &i in pending.iter().rev() {
            let pos = self.place(i, anchor)?;
            anchor = Some((i, pos));
        }
        Ok(())
    }

    /// Compute the initial slot for `i`, shift it clear of committed boxes,
    /// and commit it.
    fn place(&mut self, i: usize, anchor: Option<(usize, Position)>) -> Result<Position, LayoutError> {
        let step = self.config.column_step();
        let start = match anchor {
            Some((parent, parent_pos)) => {
                let slot = self.child_slots.entry(parent).or_insert(0);
                let x = slot
                    .checked_mul(step)
                    .and_then(|offset| parent_pos.x.checked_add(offset));
                *slot += 1;
                let y = parent_pos
                    .y
                    .checked_add(self.heights[parent])
                    .and_then(|y| y.checked_add(self.config.vertical_gap));
                match (x, y) {
                    (Some(x), Some(y)) => Position::new(x, y),
                    _ => return Err(self.overflow(i)),
                }
            }
            None => self.config.origin,
        };

        let mut rect = self.checked_rect(i, start)?;
        let mut shifts = 0;
        while self.collides_with_committed(rect) {
            shifts += 1;
            if shifts > self.cap {
                return Err(self.nonconvergence());
            }
            rect = rect
                .checked_shifted_x(step)
                .ok_or_else(|| self.overflow(i))?;
            #[cfg(feature = "tracing")]
            tracing::trace!(id = self.nodes[i].id.raw(), x = rect.x, "shifted clear of collision");
        }

        let pos = rect.origin();
        self.placed[i] = Some(pos);
        self.committed.push(i);
        Ok(pos)
    }

    fn collides_with_committed(&self, candidate: Rect) -> bool {
        self.committed
            .iter()
            .any(|&j| self.rect(j).overlaps(&candidate))
    }

    /// Global pass over all ordered pairs until no pair overlaps.
    fn repair_all(&mut self) -> Result<(), LayoutError> {
        let step = self.config.column_step();
        let n = self.nodes.len();
        let mut passes = 0;
        loop {
            passes += 1;
            if passes > self.cap {
                return Err(self.nonconvergence());
            }

            let mut moved = false;
            for i in 0..n {
                for j in 0..n {
                    if i != j && self.rect(i).overlaps(&self.rect(j)) {
                        let shifted = self
                            .rect(i)
                            .checked_shifted_x(step)
                            .ok_or_else(|| self.overflow(i))?;
                        self.placed[i] = Some(shifted.origin());
                        moved = true;
                    }
                }
            }
            if !moved {
                return Ok(());
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(pass = passes, "global collision pass moved nodes");
        }
    }

    fn overflow(&self, i: usize) -> LayoutError {
        #[cfg(feature = "tracing")]
        tracing::error!(id = self.nodes[i].id.raw(), "layout coordinate overflow");
        LayoutError::CoordinateOverflow {
            id: self.nodes[i].id,
        }
    }

    fn nonconvergence(&self) -> LayoutError {
        #[cfg(feature = "tracing")]
        tracing::error!(
            nodes = self.nodes.len(),
            cap = self.cap,
            "collision repair did not converge"
        );
        LayoutError::Nonconvergence {
            nodes: self.nodes.len(),
            iterations: self.cap,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
