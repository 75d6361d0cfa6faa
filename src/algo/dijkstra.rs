//! Single-source and all-pairs Dijkstra shortest paths (component 4.I).
//!
//! Grounded on `examples/petgraph-petgraph/src/algo/dijkstra.rs`'s shape (a
//! `BinaryHeap<MinScored<_, _>>` frontier, a `HashMap` of best-known distances) but
//! over [`AdjGraph`] instead of petgraph's visitor traits, and additionally threading
//! predecessors to reconstruct the path (spec §4.E: "distance, predecessor chain").
//! `all_pairs` (added) is the repeated-single-source wrapper
//! `dijkstra_all_pairs_shortest_path` exposes in
//! `examples/original_source/src/graph/graphmodule/graphobject_algorithm.hpp`.

use std::collections::BinaryHeap;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::graph::AdjGraph;
use crate::scored::MinScored;

/// One node's shortest-path result: its distance from the source and the preceding
/// node on the shortest path (`None` for the source itself).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathInfo<N> {
    pub distance: f64,
    pub predecessor: Option<N>,
}

/// Runs single-source Dijkstra from `root`, assuming non-negative edge costs
/// (negative costs are undefined behavior per spec §4.E). Missing edge costs are
/// treated as `1.0`. Unreachable nodes are absent from the result map.
pub fn shortest_paths<N, L>(graph: &AdjGraph<N, L>, root: N) -> IndexMap<N, PathInfo<N>>
where
    N: Copy + Ord + Hash,
{
    let mut result: IndexMap<N, PathInfo<N>> = IndexMap::new();
    if !graph.contains_node(root) {
        return result;
    }

    let mut heap = BinaryHeap::new();
    heap.push(MinScored(0.0f64, root));
    result.insert(
        root,
        PathInfo {
            distance: 0.0,
            predecessor: None,
        },
    );

    while let Some(MinScored(dist, u)) = heap.pop() {
        if dist > result[&u].distance {
            continue;
        }
        for &w in graph.neighbors(u) {
            let edge_cost = graph.edge_cost(u, w).unwrap_or(1.0);
            let next_dist = dist + edge_cost;
            let better = result
                .get(&w)
                .map(|info| next_dist < info.distance)
                .unwrap_or(true);
            if better {
                result.insert(
                    w,
                    PathInfo {
                        distance: next_dist,
                        predecessor: Some(u),
                    },
                );
                heap.push(MinScored(next_dist, w));
            }
        }
    }

    result
}

/// Reconstructs the path from `root` to `target` (inclusive of both ends) from a
/// [`shortest_paths`] result, or `None` if `target` is unreachable.
pub fn reconstruct_path<N>(paths: &IndexMap<N, PathInfo<N>>, target: N) -> Option<Vec<N>>
where
    N: Copy + Eq + Hash,
{
    let mut path = vec![target];
    let mut current = target;
    while let Some(info) = paths.get(&current) {
        match info.predecessor {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => {
                path.reverse();
                return Some(path);
            }
        }
    }
    None
}

/// `dijkstra_all_pairs_shortest_path`: single-source Dijkstra from every node.
pub fn all_pairs<N, L>(graph: &AdjGraph<N, L>) -> IndexMap<N, IndexMap<N, PathInfo<N>>>
where
    N: Copy + Ord + Hash,
{
    graph
        .nodes()
        .map(|root| (root, shortest_paths(graph, root)))
        .collect()
}
