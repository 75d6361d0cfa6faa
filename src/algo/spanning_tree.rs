//! `create_spanning_tree`: a (possibly non-optimal) DFS spanning tree rooted at a
//! given node (component 4.I).
//!
//! Grounded on `examples/original_source/src/graph/graphmodule/
//! graphobject_algorithm.hpp`'s `create_spanning_tree` doc ("a new graph which is a
//! probably non-optimal spanning tree of all nodes reachable from the given node.
//! This tree is created using DFS").

use std::hash::Hash;

use indexmap::IndexSet;

use crate::graph::{AdjGraph, GraphFlags};

/// Returns a new graph containing every node reachable from `root` and, for each,
/// the single DFS tree edge that first discovered it — `|reachable| - 1` edges total.
/// `root` itself is included even if absent from `graph` (a graph with just `root` and
/// no edges is returned in that case).
pub fn spanning_tree<N, L>(graph: &AdjGraph<N, L>, root: N) -> AdjGraph<N, L>
where
    N: Copy + Ord + Hash,
    L: Clone,
{
    let mut flags = GraphFlags::default();
    flags.check_on_insert = false;
    let mut tree = AdjGraph::new(flags);
    tree.add_node(root);

    if !graph.contains_node(root) {
        return tree;
    }

    let mut visited: IndexSet<N> = IndexSet::new();
    visited.insert(root);
    let mut stack = vec![root];
    while let Some(u) = stack.pop() {
        for &w in graph.neighbors(u).iter().rev() {
            if visited.insert(w) {
                let cost = graph.edge_cost(u, w);
                tree.add_edge(u, w, cost, None);
                stack.push(w);
            }
        }
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanning_tree_covers_every_reachable_node() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        g.add_edge(1, 2, None, None);
        g.add_edge(1, 3, None, None);
        g.add_edge(2, 4, None, None);
        g.add_edge(5, 6, None, None); // disconnected from 1

        let tree = spanning_tree(&g, 1);
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.edge_count(), 3);
        assert!(!tree.contains_node(5));
    }

    #[test]
    fn spanning_tree_of_isolated_root_has_no_edges() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        g.add_node(1);
        let tree = spanning_tree(&g, 1);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.edge_count(), 0);
    }

    #[test]
    fn spanning_tree_of_absent_root_is_singleton() {
        let g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        let tree = spanning_tree(&g, 99);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.edge_count(), 0);
    }
}
