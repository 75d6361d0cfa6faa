//! Kruskal's minimum spanning tree (component 4.I).
//!
//! Grounded on `examples/petgraph-petgraph/src/algo/min_spanning_tree.rs`'s
//! `min_spanning_tree` (sort edges into a `BinaryHeap<MinScored<_, _>>`, union-find to
//! reject edges that would close a cycle) and on
//! `examples/original_source/src/graph/graphmodule/graphobject_algorithm.hpp`'s
//! `create_minimum_spanning_tree` naming/contract: missing edge costs are treated as
//! `1.0`, matching [`crate::algo::dijkstra`]'s convention.

use std::collections::BinaryHeap;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::algo::union_find::UnionFind;
use crate::graph::{AdjGraph, GraphFlags};
use crate::scored::MinScored;

/// Builds a minimum spanning forest of `graph` (one tree per connected component),
/// using Kruskal's algorithm over the edge set ordered by ascending cost. The result
/// contains every node of `graph` and, within each component, exactly `|component| -
/// 1` edges whose total cost is minimal among that component's spanning trees.
pub fn minimum_spanning_tree<N, L>(graph: &AdjGraph<N, L>) -> AdjGraph<N, L>
where
    N: Copy + Ord + Hash,
    L: Clone,
{
    let mut flags = GraphFlags::default();
    flags.check_on_insert = false;
    let mut mst = AdjGraph::new(flags);
    for v in graph.nodes() {
        mst.add_node(v);
    }

    let index: IndexMap<N, usize> = graph
        .nodes()
        .enumerate()
        .map(|(i, n)| (n, i))
        .collect();
    let mut uf = UnionFind::new(index.len());

    let mut heap = BinaryHeap::with_capacity(graph.edge_count());
    for (u, v, data) in graph.edges() {
        if u == v {
            continue;
        }
        heap.push(MinScored(data.cost.unwrap_or(1.0), (u, v, data.label.clone())));
    }

    while let Some(MinScored(cost, (u, v, label))) = heap.pop() {
        if uf.union(index[&u], index[&v]) {
            mst.add_edge(u, v, Some(cost), label);
        }
    }

    mst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mst_of_triangle_drops_heaviest_edge() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        g.add_edge(0, 1, Some(1.0), None);
        g.add_edge(1, 2, Some(2.0), None);
        g.add_edge(0, 2, Some(5.0), None);

        let mst = minimum_spanning_tree(&g);
        assert_eq!(mst.node_count(), 3);
        assert_eq!(mst.edge_count(), 2);
        assert!(mst.contains_edge(0, 1));
        assert!(mst.contains_edge(1, 2));
        assert!(!mst.contains_edge(0, 2));
    }

    #[test]
    fn mst_of_disconnected_graph_is_a_forest() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        g.add_edge(0, 1, Some(1.0), None);
        g.add_edge(2, 3, Some(1.0), None);

        let mst = minimum_spanning_tree(&g);
        assert_eq!(mst.node_count(), 4);
        assert_eq!(mst.edge_count(), 2);
    }

    #[test]
    fn total_cost_is_minimal() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        g.add_edge(0, 1, Some(2.0), None);
        g.add_edge(0, 3, Some(4.0), None);
        g.add_edge(1, 2, Some(1.0), None);
        g.add_edge(2, 4, Some(5.0), None);
        g.add_edge(4, 5, Some(1.0), None);
        g.add_edge(3, 4, Some(1.0), None);
        g.add_edge(1, 5, Some(7.0), None);

        let mst = minimum_spanning_tree(&g);
        let total: f64 = mst.edges().filter_map(|(_, _, d)| d.cost).sum();
        assert_eq!(total, 1.0 + 1.0 + 1.0 + 2.0 + 4.0);
    }
}
