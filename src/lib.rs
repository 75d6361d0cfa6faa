//! `planar-graph-core`: the geometric-graph core of an image-processing library.
//!
//! Transforms a planar set of labeled points (extracted from connected components in
//! a labeled image) into an adjacency graph and assigns each component a color such
//! that no two adjacent components share a color. Three subsystems do the hard work:
//!
//! - [`delaunay`]: a randomized Delaunay tree (history DAG) over labeled 2D vertices.
//! - [`coloring`]: a balanced, linear-time planar-graph vertex coloring
//!   ("6-COLOR"/Matula-Shiloach-Tarjan), producing an equitable coloring.
//! - [`geom::convex_hull`] + [`geom::kdtree`]: Graham-scan convex hull and k-d-tree
//!   nearest-neighbor search, composed in [`fourier`] into shape-descriptor features.
//!
//! Image I/O, pixel-plane extraction, palette generation, rasterization, flood fill,
//! and contour tracing are out of scope — external collaborators supply this core
//! with labeled points, a labeled raster, or a contour point sequence (see
//! [`neighbors::LabeledRaster`]).

pub mod algo;
pub mod coloring;
pub mod delaunay;
pub mod error;
pub mod fourier;
pub mod geom;
pub mod graph;
pub mod neighbors;
mod scored;

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

pub use coloring::{colorize, is_valid_coloring, Coloring};
pub use error::{CoreError, CoreResult};
pub use geom::{convex_hull, Hull, Point};
pub use graph::{AdjGraph, GraphFlags};

use delaunay::DelaunayTree;

/// `triangulate`: builds a Delaunay triangulation over `points` (coordinate + label
/// pairs) and returns the neighbor-label map (smaller label -> set of larger labels
/// it's adjacent to). Points are inserted in a caller-supplied random order (spec
/// §4.C: randomization is essential for the expected `O(N log N)` bound).
///
/// `DegenerateInput` if two points coincide exactly (the Delaunay tree rejects
/// duplicate vertices). Fewer than 3 points degenerates gracefully to an empty map —
/// there is no finite triangle to extract adjacency from.
pub fn triangulate<R: Rng + ?Sized>(
    points: &[(Point, i32)],
    rng: &mut R,
) -> CoreResult<BTreeMap<i32, BTreeSet<i32>>> {
    let mut tree = DelaunayTree::new();
    tree.add_vertices(points, rng)?;
    Ok(tree.neighboring_labels())
}

/// `graph_from_label_pairs`: builds an undirected [`AdjGraph`] from a neighbor-label
/// map (as produced by [`triangulate`] or [`neighbors`]'s extractors), one node per
/// label, one edge per pair.
pub fn graph_from_label_pairs(pairs: &BTreeMap<i32, BTreeSet<i32>>) -> AdjGraph<i32, ()> {
    let mut g = AdjGraph::new(GraphFlags::default());
    for (&a, larger) in pairs {
        g.add_node(a);
        for &b in larger {
            g.add_edge(a, b, None, None);
        }
    }
    g
}

/// `min_spanning_tree`: Kruskal's minimum spanning forest over `graph` (component
/// 4.I). Thin re-export of [`algo::mst::minimum_spanning_tree`] at the crate's public
/// API surface (spec §6).
pub fn min_spanning_tree<N, L>(graph: &AdjGraph<N, L>) -> AdjGraph<N, L>
where
    N: Copy + Ord + std::hash::Hash,
    L: Clone,
{
    algo::mst::minimum_spanning_tree(graph)
}

/// `shortest_paths`: single-source Dijkstra over `graph` from `root` (component 4.I).
/// Thin re-export of [`algo::dijkstra::shortest_paths`] at the crate's public API
/// surface (spec §6).
pub fn shortest_paths<N, L>(
    graph: &AdjGraph<N, L>,
    root: N,
) -> indexmap::IndexMap<N, algo::dijkstra::PathInfo<N>>
where
    N: Copy + Ord + std::hash::Hash,
{
    algo::dijkstra::shortest_paths(graph, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn triangulate_unit_square_yields_some_diagonal() {
        let points = [
            (Point::new(0.0, 0.0), 1),
            (Point::new(1.0, 0.0), 2),
            (Point::new(0.0, 1.0), 3),
            (Point::new(1.0, 1.0), 4),
        ];
        let mut rng = StepRng::new(0, 1);
        let pairs = triangulate(&points, &mut rng).unwrap();

        // The four corners of a unit square triangulate into two triangles sharing a
        // diagonal; which diagonal depends on insertion order, but every edge of the
        // square itself must appear, plus exactly one diagonal.
        let total_pairs: usize = pairs.values().map(|s| s.len()).sum();
        assert_eq!(total_pairs, 5);
    }

    #[test]
    fn graph_from_label_pairs_builds_expected_edges() {
        let mut pairs: BTreeMap<i32, BTreeSet<i32>> = BTreeMap::new();
        pairs.entry(1).or_default().insert(2);
        pairs.entry(1).or_default().insert(3);
        pairs.entry(2).or_default().insert(3);

        let g = graph_from_label_pairs(&pairs);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert!(g.contains_edge(1, 2));
        assert!(g.contains_edge(2, 3));
    }

    #[test]
    fn end_to_end_triangulate_color_and_span() {
        let points = [
            (Point::new(0.0, 0.0), 1),
            (Point::new(2.0, 0.0), 2),
            (Point::new(2.0, 2.0), 3),
            (Point::new(0.0, 2.0), 4),
            (Point::new(1.0, 1.0), 5),
        ];
        let mut rng = StepRng::new(1, 1);
        let pairs = triangulate(&points, &mut rng).unwrap();
        let g = graph_from_label_pairs(&pairs);

        let coloring = colorize(&g, 6).unwrap();
        assert!(is_valid_coloring(&g, &coloring));

        let mst = min_spanning_tree(&g);
        assert_eq!(mst.node_count(), g.node_count());

        let paths = shortest_paths(&g, 1);
        assert!(paths.contains_key(&1));
    }
}
