#![forbid(unsafe_code)]

//! Geometric primitives for the conversation diagram.
//!
//! Coordinates are signed canvas units with the origin at the top-left and
//! `y` growing downward. A [`Rect`] is only meaningful while both far edges
//! fit in `i32`; [`Rect::is_representable`] checks that and
//! [`Rect::checked_shifted_x`] refuses to move a box past it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Top-left corner of a node box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned node box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in canvas units.
    pub width: i32,
    /// Height in canvas units.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle anchored at `origin`.
    #[inline]
    pub const fn at(origin: Position, width: i32, height: i32) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Midpoint of the top edge.
    #[inline]
    pub const fn top_center(&self) -> Position {
        Position::new(self.x.saturating_add(self.width / 2), self.y)
    }

    /// Midpoint of the bottom edge.
    #[inline]
    pub const fn bottom_center(&self) -> Position {
        Position::new(self.x.saturating_add(self.width / 2), self.bottom())
    }

    /// Strict overlap test on both axes.
    ///
    /// Boxes that only share an edge do not overlap.
    #[inline]
    pub const fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether the right and bottom edges fit in `i32`.
    ///
    /// [`right`](Self::right) and [`bottom`](Self::bottom) saturate, so
    /// overlap tests are only exact for representable boxes.
    #[inline]
    pub const fn is_representable(&self) -> bool {
        self.x.checked_add(self.width).is_some() && self.y.checked_add(self.height).is_some()
    }

    /// Return a copy moved horizontally by `dx`, or `None` if the moved box
    /// would not be representable.
    #[inline]
    #[must_use]
    pub const fn checked_shifted_x(&self, dx: i32) -> Option<Self> {
        let Some(x) = self.x.checked_add(dx) else {
            return None;
        };
        let moved = Self::new(x, self.y, self.width, self.height);
        if moved.is_representable() {
            Some(moved)
        } else {
            None
        }
    }

    /// Smallest rectangle containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }
}
