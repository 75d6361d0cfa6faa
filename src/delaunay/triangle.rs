//! Triangle, vertex, and flag types for the Delaunay tree (component 4.C).
//!
//! Transcribed from `examples/original_source/include/geostructs/delaunaytree.hpp`
//! and `src/geostructs/delaunaytree.cpp`. Pointer identity becomes arena-index
//! identity: vertices and triangles are never compared or looked up by coordinate,
//! only by [`VertexId`]/[`TriangleId`] — matching spec §3's "equality is by pointer
//! identity inside the Delaunay tree, never by coordinate value."

use crate::geom::point::Point;

/// Index into a [`crate::delaunay::tree::DelaunayTree`]'s vertex arena.
///
/// Follows `petgraph`'s `IndexType`/`DefaultIx` convention
/// (`examples/petgraph-petgraph/src/graph_impl/mod.rs`): a small `Copy` newtype over
/// `u32`, not a pointer, since the tree is grow-only and never frees (spec §9,
/// "arena + free list never used").
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub u32);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into a [`crate::delaunay::tree::DelaunayTree`]'s triangle arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriangleId(pub u32);

impl TriangleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A stored vertex: its 2D position plus an integer label (`-1` = unlabeled /
/// sentinel). The three "points at infinity" created by the tree's root use this same
/// representation with `label == UNLABELED`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexRecord {
    pub point: Point,
    pub label: i32,
}

/// Sentinel label for "unlabeled" vertices, matching the original's default
/// `Vertex(double, double)` two-argument constructor.
pub const UNLABELED: i32 = -1;

impl VertexRecord {
    pub fn new(point: Point, label: i32) -> Self {
        VertexRecord { point, label }
    }

    pub fn unlabeled(point: Point) -> Self {
        VertexRecord { point, label: UNLABELED }
    }
}

/// Disjoint-meaning bitfield for a triangle: dead/alive, infinite-degree (0–4), and
/// last-finite disambiguation. Bit layout transcribed directly from
/// `TriangleFlag`'s `flag |= 16` / `flag & 7` / `flag |= 8` encoding in
/// `delaunaytree.cpp` — not a general `bitflags`-crate type, since these three fields
/// occupy disjoint, differently-sized bit ranges the same way the original packs
/// them (a hand-rolled newtype over `u8` is the faithful choice; see DESIGN.md).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TriangleFlag(u8);

const DEAD_BIT: u8 = 16;
const LAST_FINITE_BIT: u8 = 8;
const INFINITE_MASK: u8 = 7;

impl TriangleFlag {
    pub fn new() -> Self {
        TriangleFlag(0)
    }

    /// Marks the triangle dead. Monotonic: never cleared (spec §3).
    #[inline]
    pub fn kill(&mut self) {
        self.0 |= DEAD_BIT;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.0 & DEAD_BIT != 0
    }

    /// Sets the infinite-degree value. Exactly one call is made per triangle, at
    /// creation (spec §3).
    #[inline]
    pub fn set_infinite(&mut self, i: u8) {
        self.0 |= i;
    }

    #[inline]
    pub fn infinite(&self) -> u8 {
        self.0 & INFINITE_MASK
    }

    #[inline]
    pub fn set_last_finite(&mut self) {
        self.0 |= LAST_FINITE_BIT;
    }

    #[inline]
    pub fn is_last_finite(&self) -> bool {
        self.0 & LAST_FINITE_BIT != 0
    }
}

/// A triangle in the Delaunay tree's history DAG.
///
/// A leaf has `!flag.is_dead()` and empty `sons`; an internal node has
/// `flag.is_dead()` and non-empty `sons` covering its territory (spec §3).
#[derive(Clone, Debug)]
pub struct Triangle {
    pub vertices: [VertexId; 3],
    pub neighbors: [Option<TriangleId>; 3],
    pub flag: TriangleFlag,
    /// Traversal token: the last walk (see `DelaunayTree::token`) that visited this
    /// triangle, used to avoid revisiting during recursive walks (spec §3).
    pub token: u32,
    /// Child triangles produced when this triangle was split by vertex insertion.
    /// A triangle may be a son of up to two parents (the dead conflicting triangle it
    /// replaces, and the live neighbor across the boundary edge) — spec §9's
    /// "multi-parent DAG".
    pub sons: Vec<TriangleId>,
}

impl Triangle {
    /// `cwNeighbor`: the neighbor index directly clockwise from vertex `v` (`v` must
    /// be one of this triangle's three vertices). Transcribed from
    /// `Triangle::cwNeighbor`.
    pub fn cw_neighbor(&self, v: VertexId) -> usize {
        if v == self.vertices[0] {
            2
        } else if v == self.vertices[1] {
            0
        } else {
            1
        }
    }

    /// `NeighborIndex`: which neighbor slot holds triangle `t`.
    pub fn neighbor_index(&self, t: TriangleId) -> usize {
        if self.neighbors[0] == Some(t) {
            0
        } else if self.neighbors[1] == Some(t) {
            1
        } else {
            2
        }
    }
}
