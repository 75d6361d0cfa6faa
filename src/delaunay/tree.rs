//! The Delaunay tree itself: construction, vertex insertion, and the two
//! neighbor-pair queries (component 4.C).
//!
//! Transcribed from `DelaunayTree`/`Triangle` in
//! `examples/original_source/src/geostructs/delaunaytree.cpp`. The C++ walks raw
//! `Triangle*`/`Vertex*` pointers; here every step re-indexes through the arena
//! (`self.triangles[id.index()]`) rather than holding a borrowed reference across a
//! recursive or mutating call, which is the idiomatic way to port pointer-chasing
//! code into Rust's arena pattern (see `examples/petgraph-petgraph/src/graph_impl/mod.rs`).

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::delaunay::triangle::{
    Triangle, TriangleFlag, TriangleId, VertexId, VertexRecord, UNLABELED,
};
use crate::error::{CoreError, CoreResult};
use crate::geom::point::Point;
use crate::geom::predicates::{collinear, cross, dot, in_circumcircle};

/// The Delaunay tree: a history DAG of triangles over an incrementally inserted
/// vertex set, supporting point-location, batch insertion, and adjacency queries.
pub struct DelaunayTree {
    vertices: Vec<VertexRecord>,
    triangles: Vec<Triangle>,
    root: TriangleId,
    /// Monotonic counter; a fresh value is stamped as the "current walk" token
    /// before each recursive traversal (spec §3).
    token: u32,
}

impl Default for DelaunayTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DelaunayTree {
    /// Builds the root triangle (three symbolic points at infinity, `flag.infinite()
    /// == 3`, always in conflict) and its three permanent "ghost" neighbors
    /// (`flag.infinite() == 4`, never in conflict), stitched into a ring — the fixed
    /// universe every subsequent vertex is inserted into.
    pub fn new() -> Self {
        let mut tree = DelaunayTree {
            vertices: Vec::new(),
            triangles: Vec::new(),
            root: TriangleId(0),
            token: 0,
        };

        let s0 = tree.push_vertex(VertexRecord::unlabeled(Point::new(1.0, 0.0)));
        let s1 = tree.push_vertex(VertexRecord::unlabeled(Point::new(-0.5, 0.8660254)));
        let s2 = tree.push_vertex(VertexRecord::unlabeled(Point::new(-0.5, -0.8660254)));

        let mut root_flag = TriangleFlag::new();
        root_flag.set_infinite(3);
        let root = tree.push_triangle(Triangle {
            vertices: [s0, s1, s2],
            neighbors: [None, None, None],
            flag: root_flag,
            token: 0,
            sons: Vec::new(),
        });
        tree.root = root;

        let g0 = tree.push_ghost(root, 0);
        let g1 = tree.push_ghost(root, 1);
        let g2 = tree.push_ghost(root, 2);

        tree.triangles[g0.index()].neighbors[1] = Some(g1);
        tree.triangles[g0.index()].neighbors[2] = Some(g2);
        tree.triangles[g1.index()].neighbors[0] = Some(g0);
        tree.triangles[g1.index()].neighbors[2] = Some(g2);
        tree.triangles[g2.index()].neighbors[0] = Some(g0);
        tree.triangles[g2.index()].neighbors[1] = Some(g1);

        tree
    }

    fn push_vertex(&mut self, record: VertexRecord) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(record);
        id
    }

    fn push_triangle(&mut self, triangle: Triangle) -> TriangleId {
        let id = TriangleId(self.triangles.len() as u32);
        self.triangles.push(triangle);
        id
    }

    /// `Triangle(DelaunayTree*, Triangle*, int)`: a permanent never-in-conflict
    /// triangle sharing the root's three vertices, threaded in at edge `edge`.
    fn push_ghost(&mut self, root: TriangleId, edge: usize) -> TriangleId {
        let verts = self.triangles[root.index()].vertices;
        let mut flag = TriangleFlag::new();
        flag.set_infinite(4);
        let id = self.push_triangle(Triangle {
            vertices: verts,
            neighbors: [None, None, None],
            flag,
            token: 0,
            sons: Vec::new(),
        });
        self.triangles[id.index()].neighbors[edge] = Some(root);
        self.triangles[root.index()].neighbors[edge] = Some(id);
        id
    }

    pub fn vertex_point(&self, id: VertexId) -> Point {
        self.vertices[id.index()].point
    }

    pub fn vertex_label(&self, id: VertexId) -> i32 {
        self.vertices[id.index()].label
    }

    pub fn vertex_count(&self) -> usize {
        // the three symbolic points at infinity are not user vertices.
        self.vertices.len() - 3
    }

    /// `Triangle::Conflict`: does `v` lie inside this triangle's (possibly
    /// infinite) circumcircle / half-plane?
    fn conflict(&self, t: TriangleId, v: Point) -> bool {
        let tri = &self.triangles[t.index()];
        let p = |vid: VertexId| self.vertices[vid.index()].point;
        let v0 = p(tri.vertices[0]);

        match tri.flag.infinite() {
            4 => false,
            3 => true,
            2 => {
                let v1 = p(tri.vertices[1]);
                let v2 = p(tri.vertices[2]);
                dot(v - v0, v1 + v2) >= 0.0
            }
            1 => {
                if tri.flag.is_last_finite() {
                    let v2 = p(tri.vertices[2]);
                    cross(v - v2, v2 - v0) >= 0.0
                } else {
                    let v1 = p(tri.vertices[1]);
                    cross(v - v0, v0 - v1) >= 0.0
                }
            }
            _ => {
                let v1 = p(tri.vertices[1]);
                let v2 = p(tri.vertices[2]);
                in_circumcircle(v0, v1, v2, v)
            }
        }
    }

    /// `Triangle::findConflict`: walks down from `t`, returning the unique live leaf
    /// in conflict with `v`, or `None` if `v` falls outside the universe (never
    /// happens in practice since the root always conflicts, but mirrors the original's
    /// `NULL`-returning contract).
    fn find_conflict(&mut self, t: TriangleId, v: Point) -> Option<TriangleId> {
        if !self.conflict(t, v) {
            return None;
        }
        let (dead, sons, this_token) = {
            let tri = &self.triangles[t.index()];
            (tri.flag.is_dead(), tri.sons.clone(), tri.token)
        };
        if !dead {
            return Some(t);
        }
        for son in sons {
            if self.triangles[son.index()].token != this_token {
                self.triangles[son.index()].token = this_token;
                if let Some(found) = self.find_conflict(son, v) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// `Triangle(DelaunayTree*, Triangle*, Vertex*, int)`: the apex-triangle
    /// constructor. `parent` is the dead triangle being replaced at boundary edge
    /// `i`; the new triangle's opposite edge is `parent`'s live neighbor across `i`.
    fn new_apex_triangle(&mut self, parent: TriangleId, apex: VertexId, i: usize) -> TriangleId {
        let parent_infinite = self.triangles[parent.index()].flag.infinite();
        let parent_last_finite = self.triangles[parent.index()].flag.is_last_finite();

        let mut flag = TriangleFlag::new();
        match parent_infinite {
            0 => flag.set_infinite(0),
            1 => {
                let inf = if parent_last_finite {
                    if i == 1 {
                        0
                    } else {
                        1
                    }
                } else if i == 2 {
                    0
                } else {
                    1
                };
                flag.set_infinite(inf);
                if flag.infinite() != 0 {
                    if parent_last_finite {
                        if i == 0 {
                            flag.set_last_finite();
                        }
                    } else if i == 1 {
                        flag.set_last_finite();
                    }
                }
            }
            2 => {
                flag.set_infinite(if i == 0 { 2 } else { 1 });
                if i == 1 {
                    flag.set_last_finite();
                }
            }
            3 => flag.set_infinite(2),
            other => unreachable!("apex triangle built from flag.infinite() == {other}"),
        }

        let parent_vertices = self.triangles[parent.index()].vertices;
        let neighbor_across = self.triangles[parent.index()].neighbors[i]
            .expect("a dead triangle's boundary edge always has a live neighbor");

        let (v1, v2) = match i {
            0 => (parent_vertices[1], parent_vertices[2]),
            1 => (parent_vertices[2], parent_vertices[0]),
            _ => (parent_vertices[0], parent_vertices[1]),
        };

        let new_id = self.push_triangle(Triangle {
            vertices: [apex, v1, v2],
            neighbors: [Some(neighbor_across), None, None],
            flag,
            token: 0,
            sons: Vec::new(),
        });

        self.triangles[parent.index()].sons.push(new_id);
        self.triangles[neighbor_across.index()].sons.push(new_id);
        let slot = self.triangles[neighbor_across.index()].neighbor_index(parent);
        self.triangles[neighbor_across.index()].neighbors[slot] = Some(new_id);

        new_id
    }

    /// The first `while(neighbor(cwNeighbor(q)).Conflict(v))` walk in `addVertex`:
    /// starting from the just-killed conflicting leaf, walk clockwise around `q`
    /// killing conflicting neighbors until a live boundary is reached.
    fn first_boundary(&mut self, mut n: TriangleId, q: VertexId, v: Point) -> (TriangleId, usize) {
        loop {
            let i = self.triangles[n.index()].cw_neighbor(q);
            let neighbor = self.triangles[n.index()].neighbors[i]
                .expect("conflicting leaf always has three live or dead neighbors");
            if self.conflict(neighbor, v) {
                self.triangles[neighbor.index()].flag.kill();
                n = neighbor;
            } else {
                return (n, i);
            }
        }
    }

    /// The subsequent boundary-search `while(true)` loops in `addVertex`: same idea,
    /// but also skips over already-dead neighbors (triangles killed earlier in this
    /// same insertion) without re-testing conflict.
    fn next_boundary(&mut self, mut n: TriangleId, r: VertexId, v: Point) -> (TriangleId, usize) {
        loop {
            let i = self.triangles[n.index()].cw_neighbor(r);
            let neighbor = self.triangles[n.index()].neighbors[i]
                .expect("boundary search never runs off the ghost ring");
            if self.triangles[neighbor.index()].flag.is_dead() {
                n = neighbor;
                continue;
            }
            if self.conflict(neighbor, v) {
                self.triangles[neighbor.index()].flag.kill();
                n = neighbor;
                continue;
            }
            return (n, i);
        }
    }

    /// Inserts one labeled point. Returns its [`VertexId`]. A point identical to an
    /// already-inserted vertex, or lying outside the fixed universe (never happens in
    /// practice), is a [`CoreError::DegenerateInput`] and the tree is left unchanged.
    pub fn add_vertex(&mut self, point: Point, label: i32) -> CoreResult<VertexId> {
        self.token += 1;
        let token = self.token;
        self.triangles[self.root.index()].token = token;

        let n = self.find_conflict(self.root, point).ok_or_else(|| {
            log::warn!(
                "rejecting vertex ({}, {}): outside the triangulated universe",
                point.x,
                point.y
            );
            CoreError::DegenerateInput(format!(
                "point ({}, {}) lies outside the triangulated universe",
                point.x, point.y
            ))
        })?;

        self.triangles[n.index()].flag.kill();

        let finite_count = 3 - self.triangles[n.index()].flag.infinite() as usize;
        for slot in 0..finite_count {
            let vid = self.triangles[n.index()].vertices[slot];
            if self.vertices[vid.index()].point == point {
                log::warn!("rejecting duplicate vertex at ({}, {})", point.x, point.y);
                return Err(CoreError::DegenerateInput(format!(
                    "duplicate vertex at ({}, {})",
                    point.x, point.y
                )));
            }
        }

        let v = self.push_vertex(VertexRecord::new(point, label));
        let q = self.triangles[n.index()].vertices[0];

        let (n, i) = self.first_boundary(n, q, point);
        let first = self.new_apex_triangle(n, v, i);
        let mut last = first;

        let r = self.triangles[n.index()].vertices[(i + 2) % 3];
        let (mut n, mut i) = self.next_boundary(n, r, point);

        loop {
            let created = self.new_apex_triangle(n, v, i);
            self.triangles[created.index()].neighbors[2] = Some(last);
            self.triangles[last.index()].neighbors[1] = Some(created);
            last = created;

            let r = self.triangles[n.index()].vertices[(i + 2) % 3];
            if r == q {
                break;
            }
            let next = self.next_boundary(n, r, point);
            n = next.0;
            i = next.1;
        }

        self.triangles[first.index()].neighbors[2] = Some(last);
        self.triangles[last.index()].neighbors[1] = Some(first);

        Ok(v)
    }

    /// Inserts `points` in a random order (spec §4.C: randomized insertion order
    /// keeps the tree's expected depth logarithmic regardless of input order).
    /// Returns each point's [`VertexId`] in the *original* `points` order.
    pub fn add_vertices<R: Rng + ?Sized>(
        &mut self,
        points: &[(Point, i32)],
        rng: &mut R,
    ) -> CoreResult<Vec<VertexId>> {
        let mut order: Vec<usize> = (0..points.len()).collect();
        order.shuffle(rng);

        let mut ids = vec![VertexId(0); points.len()];
        for idx in order {
            let (point, label) = points[idx];
            ids[idx] = self.add_vertex(point, label)?;
        }
        Ok(ids)
    }

    /// The finalized triangulation: every live, finite (`flag.infinite() == 0`)
    /// triangle's three vertex positions. This is what a caller actually wants out of
    /// the tree once all points are inserted (spec §4.C's public `triangulate` entry
    /// point).
    pub fn finite_triangles(&self) -> Vec<(Point, Point, Point)> {
        let p = |vid: VertexId| self.vertices[vid.index()].point;
        self.triangles
            .iter()
            .filter(|t| !t.flag.is_dead() && t.flag.infinite() == 0)
            .map(|t| (p(t.vertices[0]), p(t.vertices[1]), p(t.vertices[2])))
            .collect()
    }

    /// `DelaunayTree::neighboringLabels`: every adjacent pair of *labeled* finite
    /// vertices (label `!= -1`), from non-collinear finite triangles, canonicalized
    /// smaller-label-first.
    pub fn neighboring_labels(&mut self) -> BTreeMap<i32, BTreeSet<i32>> {
        self.token += 1;
        let token = self.token;
        self.triangles[self.root.index()].token = token;
        let mut map = BTreeMap::new();
        self.collect_neighboring_labels(self.root, &mut map);
        map
    }

    fn collect_neighboring_labels(&mut self, t: TriangleId, map: &mut BTreeMap<i32, BTreeSet<i32>>) {
        let dead = self.triangles[t.index()].flag.is_dead();
        let token = self.triangles[t.index()].token;
        if dead {
            let sons = self.triangles[t.index()].sons.clone();
            for son in sons {
                if self.triangles[son.index()].token != token {
                    self.triangles[son.index()].token = token;
                    self.collect_neighboring_labels(son, map);
                }
            }
            return;
        }

        let verts = self.triangles[t.index()].vertices;
        let pts = [
            self.vertices[verts[0].index()].point,
            self.vertices[verts[1].index()].point,
            self.vertices[verts[2].index()].point,
        ];
        let labels = [
            self.vertices[verts[0].index()].label,
            self.vertices[verts[1].index()].label,
            self.vertices[verts[2].index()].label,
        ];
        if collinear(pts[0], pts[1], pts[2]) || labels.iter().any(|&l| l == UNLABELED) {
            return;
        }
        for &(a, b) in &[(0usize, 1usize), (1, 2), (2, 0)] {
            let (la, lb) = (labels[a], labels[b]);
            if la < lb {
                map.entry(la).or_default().insert(lb);
            } else if la > lb {
                map.entry(lb).or_default().insert(la);
            }
        }
    }

    /// `DelaunayTree::neighboringVertices`: the same adjacency as
    /// [`Self::neighboring_labels`], keyed by [`VertexId`] instead of label (so it
    /// also covers unlabeled vertices) — canonicalized by [`VertexId`]'s arbitrary
    /// but deterministic order, the way the original canonicalizes by raw pointer
    /// value.
    pub fn neighboring_vertices(&mut self) -> BTreeMap<VertexId, BTreeSet<VertexId>> {
        self.token += 1;
        let token = self.token;
        self.triangles[self.root.index()].token = token;
        let mut map = BTreeMap::new();
        self.collect_neighboring_vertices(self.root, &mut map);
        map
    }

    fn collect_neighboring_vertices(
        &mut self,
        t: TriangleId,
        map: &mut BTreeMap<VertexId, BTreeSet<VertexId>>,
    ) {
        let dead = self.triangles[t.index()].flag.is_dead();
        let token = self.triangles[t.index()].token;
        if dead {
            let sons = self.triangles[t.index()].sons.clone();
            for son in sons {
                if self.triangles[son.index()].token != token {
                    self.triangles[son.index()].token = token;
                    self.collect_neighboring_vertices(son, map);
                }
            }
            return;
        }

        let verts = self.triangles[t.index()].vertices;
        let pts = [
            self.vertices[verts[0].index()].point,
            self.vertices[verts[1].index()].point,
            self.vertices[verts[2].index()].point,
        ];
        if collinear(pts[0], pts[1], pts[2]) {
            return;
        }
        for &(a, b) in &[(0usize, 1usize), (1, 2), (2, 0)] {
            let (va, vb) = (verts[a], verts[b]);
            if va < vb {
                map.entry(va).or_default().insert(vb);
            } else if va > vb {
                map.entry(vb).or_default().insert(va);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_vertex_produces_no_finite_triangle() {
        let mut tree = DelaunayTree::new();
        tree.add_vertex(Point::new(0.0, 0.0), 0).unwrap();
        assert!(tree.finite_triangles().is_empty());
    }

    #[test]
    fn unit_square_triangulates_into_two_triangles() {
        let mut tree = DelaunayTree::new();
        tree.add_vertex(Point::new(0.0, 0.0), 0).unwrap();
        tree.add_vertex(Point::new(1.0, 0.0), 1).unwrap();
        tree.add_vertex(Point::new(1.0, 1.0), 2).unwrap();
        tree.add_vertex(Point::new(0.0, 1.0), 3).unwrap();

        let tris = tree.finite_triangles();
        assert_eq!(tris.len(), 2);
    }

    #[test]
    fn duplicate_vertex_is_rejected() {
        let mut tree = DelaunayTree::new();
        tree.add_vertex(Point::new(0.0, 0.0), 0).unwrap();
        tree.add_vertex(Point::new(1.0, 0.0), 1).unwrap();
        tree.add_vertex(Point::new(0.0, 1.0), 2).unwrap();
        let err = tree.add_vertex(Point::new(0.0, 0.0), 3).unwrap_err();
        assert!(matches!(err, CoreError::DegenerateInput(_)));
    }

    #[test]
    fn unit_square_neighboring_labels_cover_all_pairs_once() {
        let mut tree = DelaunayTree::new();
        tree.add_vertex(Point::new(0.0, 0.0), 0).unwrap();
        tree.add_vertex(Point::new(1.0, 0.0), 1).unwrap();
        tree.add_vertex(Point::new(1.0, 1.0), 2).unwrap();
        tree.add_vertex(Point::new(0.0, 1.0), 3).unwrap();

        let neighbors = tree.neighboring_labels();
        let total_pairs: usize = neighbors.values().map(|s| s.len()).sum();
        // 2 triangles x 3 edges, minus the shared diagonal counted twice = 5 distinct pairs.
        assert_eq!(total_pairs, 5);
    }

    #[test]
    fn batch_insertion_with_fixed_seed_matches_sequential() {
        use rand::rngs::mock::StepRng;

        let points = [
            (Point::new(0.0, 0.0), 0),
            (Point::new(2.0, 0.0), 1),
            (Point::new(2.0, 2.0), 2),
            (Point::new(0.0, 2.0), 3),
            (Point::new(1.0, 1.0), 4),
        ];

        let mut tree = DelaunayTree::new();
        let mut rng = StepRng::new(0, 1);
        let ids = tree.add_vertices(&points, &mut rng).unwrap();
        assert_eq!(ids.len(), points.len());
        assert!(!tree.finite_triangles().is_empty());
    }
}
