//! Adjacency graph over opaque, totally-ordered node values (component 4.E).
//!
//! Structurally grounded on `examples/petgraph-petgraph/src/graphmap.rs`'s
//! `GraphMap<N, E, Ty>`: nodes keyed by value (not by arena index), an adjacency list
//! per node, and a canonical `edge_key(a, b)` for the undirected edge map. Modernized
//! (no `Hash<Hasher>`-era syntax) and generalized with the admissibility-flag
//! bitfield and stitching/removal semantics the original C++ `GraphObject` exposes.

use std::collections::VecDeque;
use std::hash::Hash;

use indexmap::IndexMap;
use indexmap::IndexSet;

use crate::error::{CoreError, CoreResult};

/// Data carried by one edge: an optional numeric cost (used by shortest-path/MST
/// algorithms) and an opaque label.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData<L> {
    pub cost: Option<f64>,
    pub label: Option<L>,
}

impl<L> EdgeData<L> {
    pub fn new(cost: Option<f64>, label: Option<L>) -> Self {
        EdgeData { cost, label }
    }
}

/// Admissibility flags constraining which edges `add_edge` accepts. Defaults match a
/// generic simple undirected graph: no self-loops, no multi-edges, cycles allowed,
/// not tree-enforced, checked on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphFlags {
    pub directed: bool,
    pub allow_cyclic: bool,
    pub allow_multi_edge: bool,
    pub allow_self_loop: bool,
    /// When set, rejects an edge that would connect two already-connected
    /// components as well as one that would close a cycle within one (spec §4.E:
    /// both conditions reduce to "are the endpoints already reachable from each
    /// other", so this flag and `!allow_cyclic` share one reachability check — see
    /// DESIGN.md).
    pub tree: bool,
    pub check_on_insert: bool,
}

impl Default for GraphFlags {
    fn default() -> Self {
        GraphFlags {
            directed: false,
            allow_cyclic: true,
            allow_multi_edge: false,
            allow_self_loop: false,
            tree: false,
            check_on_insert: true,
        }
    }
}

/// A value-keyed graph: nodes of type `N` (`Copy + Ord + Hash`), edges carrying
/// `EdgeData<L>`.
#[derive(Debug, Clone)]
pub struct AdjGraph<N, L = ()>
where
    N: Copy + Ord + Hash,
{
    flags: GraphFlags,
    nodes: IndexMap<N, Vec<N>>,
    edges: IndexMap<(N, N), EdgeData<L>>,
}

fn edge_key<N: Ord>(a: N, b: N) -> (N, N) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl<N, L> AdjGraph<N, L>
where
    N: Copy + Ord + Hash,
{
    pub fn new(flags: GraphFlags) -> Self {
        AdjGraph {
            flags,
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }

    pub fn flags(&self) -> GraphFlags {
        self.flags
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, v: N) -> bool {
        self.nodes.contains_key(&v)
    }

    pub fn contains_edge(&self, u: N, v: N) -> bool {
        let key = if self.flags.directed {
            (u, v)
        } else {
            edge_key(u, v)
        };
        self.edges.contains_key(&key)
    }

    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.nodes.keys().copied()
    }

    /// Neighbors of `v`: out-neighbors if directed, all incident neighbors otherwise.
    /// Empty slice if `v` is absent.
    pub fn neighbors(&self, v: N) -> &[N] {
        self.nodes.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge_cost(&self, u: N, v: N) -> Option<f64> {
        let key = if self.flags.directed {
            (u, v)
        } else {
            edge_key(u, v)
        };
        self.edges.get(&key).and_then(|e| e.cost)
    }

    pub fn edges(&self) -> impl Iterator<Item = (N, N, &EdgeData<L>)> + '_ {
        self.edges.iter().map(|(&(a, b), data)| (a, b, data))
    }

    /// Inserts `v` if absent. Returns whether it was newly inserted.
    pub fn add_node(&mut self, v: N) -> bool {
        if self.nodes.contains_key(&v) {
            false
        } else {
            self.nodes.insert(v, Vec::new());
            true
        }
    }

    /// Adds an edge `(u, v)`, creating either endpoint if absent. Returns `false`
    /// without modifying the graph if `check_on_insert` rejects the edge (spec §4.E:
    /// rejection is silent, not an error).
    pub fn add_edge(&mut self, u: N, v: N, cost: Option<f64>, label: Option<L>) -> bool {
        if self.flags.check_on_insert {
            if !self.flags.allow_self_loop && u == v {
                return false;
            }
            if !self.flags.allow_multi_edge && self.contains_edge(u, v) {
                return false;
            }
            if (!self.flags.allow_cyclic || self.flags.tree) && u != v && self.has_path(u, v) {
                return false;
            }
        }

        self.add_node(u);
        self.add_node(v);

        let key = if self.flags.directed {
            (u, v)
        } else {
            edge_key(u, v)
        };
        self.edges.insert(key, EdgeData::new(cost, label));

        self.nodes.get_mut(&u).unwrap().push(v);
        if !self.flags.directed && u != v {
            self.nodes.get_mut(&v).unwrap().push(u);
        }
        true
    }

    fn unlink(&mut self, u: N, v: N) {
        if let Some(adj) = self.nodes.get_mut(&u) {
            adj.retain(|&w| w != v);
        }
        if !self.flags.directed {
            if let Some(adj) = self.nodes.get_mut(&v) {
                adj.retain(|&w| w != u);
            }
        }
    }

    /// Removes edge `(u, v)`. `ConstraintViolation` if absent.
    pub fn remove_edge(&mut self, u: N, v: N) -> CoreResult<EdgeData<L>> {
        let key = if self.flags.directed {
            (u, v)
        } else {
            edge_key(u, v)
        };
        let data = self
            .edges
            .shift_remove(&key)
            .ok_or_else(|| CoreError::ConstraintViolation("edge not present".to_string()))?;
        self.unlink(u, v);
        Ok(data)
    }

    /// Removes `v` and all incident edges, with no stitching. `ConstraintViolation`
    /// if `v` is absent.
    pub fn remove_node_and_edges(&mut self, v: N) -> CoreResult<()> {
        let neighbors = self
            .nodes
            .shift_remove(&v)
            .ok_or_else(|| CoreError::ConstraintViolation("node not present".to_string()))?;
        for w in neighbors {
            self.unlink_one_direction(w, v);
            let key = if self.flags.directed { (v, w) } else { edge_key(v, w) };
            self.edges.shift_remove(&key);
            let key_rev = if self.flags.directed { (w, v) } else { edge_key(v, w) };
            self.edges.shift_remove(&key_rev);
        }
        Ok(())
    }

    fn unlink_one_direction(&mut self, holder: N, target: N) {
        if let Some(adj) = self.nodes.get_mut(&holder) {
            adj.retain(|&w| w != target);
        }
    }

    /// Removes `v`, first stitching: every pair `(a, b)` with `a != b` both adjacent
    /// to `v` gets an edge inserted (respecting admissibility flags), then `v` and its
    /// incident edges are deleted. `ConstraintViolation` if `v` is absent.
    pub fn remove_node(&mut self, v: N) -> CoreResult<()> {
        if !self.nodes.contains_key(&v) {
            return Err(CoreError::ConstraintViolation("node not present".to_string()));
        }
        let neighbors: Vec<N> = self.neighbors(v).to_vec();
        for i in 0..neighbors.len() {
            for j in (i + 1)..neighbors.len() {
                let (a, b) = (neighbors[i], neighbors[j]);
                if a != b {
                    self.add_edge(a, b, None, None);
                }
            }
        }
        self.remove_node_and_edges(v)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// BFS reachability from `a`, stopping early once `b` is found.
    pub fn has_path(&self, a: N, b: N) -> bool {
        if a == b {
            return self.nodes.contains_key(&a);
        }
        if !self.nodes.contains_key(&a) {
            return false;
        }
        let mut visited: IndexSet<N> = IndexSet::new();
        let mut queue = VecDeque::new();
        visited.insert(a);
        queue.push_back(a);
        while let Some(u) = queue.pop_front() {
            for &w in self.neighbors(u) {
                if w == b {
                    return true;
                }
                if visited.insert(w) {
                    queue.push_back(w);
                }
            }
        }
        false
    }

    /// One representative node per connected component, in node insertion order
    /// (undirected adjacency view, even for a directed graph — spec §4.E).
    pub fn subgraph_roots(&self) -> Vec<N> {
        let mut seen: IndexSet<N> = IndexSet::new();
        let mut roots = Vec::new();
        for root in self.nodes.keys().copied() {
            if seen.contains(&root) {
                continue;
            }
            roots.push(root);
            let mut queue = VecDeque::new();
            queue.push_back(root);
            seen.insert(root);
            while let Some(u) = queue.pop_front() {
                for &w in self.neighbors(u) {
                    if seen.insert(w) {
                        queue.push_back(w);
                    }
                }
                if self.flags.directed {
                    // undirected reachability view: also cross in-edges.
                    for (&(a, b), _) in self.edges.iter() {
                        if b == u && seen.insert(a) {
                            queue.push_back(a);
                        }
                    }
                }
            }
        }
        roots
    }

    /// Lazy BFS iterator from `root`; out-edges only if directed.
    pub fn bfs(&self, root: N) -> Bfs<'_, N, L> {
        let mut visited = IndexSet::new();
        let mut queue = VecDeque::new();
        if self.nodes.contains_key(&root) {
            visited.insert(root);
            queue.push_back(root);
        }
        Bfs {
            graph: self,
            visited,
            queue,
        }
    }

    /// Lazy DFS iterator from `root`; out-edges only if directed.
    pub fn dfs(&self, root: N) -> Dfs<'_, N, L> {
        let mut visited = IndexSet::new();
        let mut stack = Vec::new();
        if self.nodes.contains_key(&root) {
            visited.insert(root);
            stack.push(root);
        }
        Dfs {
            graph: self,
            visited,
            stack,
        }
    }

    /// Converts to an undirected graph, merging opposing directed edges and keeping
    /// the smaller cost on merge (spec §4.E).
    pub fn into_undirected(self) -> AdjGraph<N, L>
    where
        L: Clone,
    {
        if !self.flags.directed {
            return self;
        }
        let mut flags = self.flags;
        flags.directed = false;
        let mut out = AdjGraph::new(flags);
        for v in self.nodes.keys().copied() {
            out.add_node(v);
        }
        for (&(a, b), data) in self.edges.iter() {
            let key = edge_key(a, b);
            let keep_existing = match (out.edges.get(&key).and_then(|e| e.cost), data.cost) {
                (Some(existing), Some(new)) => existing <= new,
                (Some(_), None) => true,
                _ => false,
            };
            if !keep_existing {
                out.edges.insert(key, data.clone());
            }
            out.add_node(a);
            out.add_node(b);
            if !out.nodes.get(&a).unwrap().contains(&b) {
                out.nodes.get_mut(&a).unwrap().push(b);
            }
            if a != b && !out.nodes.get(&b).unwrap().contains(&a) {
                out.nodes.get_mut(&b).unwrap().push(a);
            }
        }
        out
    }
}

/// Lazy breadth-first iterator over an [`AdjGraph`]. Each node is yielded exactly
/// once.
pub struct Bfs<'a, N, L>
where
    N: Copy + Ord + Hash,
{
    graph: &'a AdjGraph<N, L>,
    visited: IndexSet<N>,
    queue: VecDeque<N>,
}

impl<'a, N, L> Iterator for Bfs<'a, N, L>
where
    N: Copy + Ord + Hash,
{
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let u = self.queue.pop_front()?;
        for &w in self.graph.neighbors(u) {
            if self.visited.insert(w) {
                self.queue.push_back(w);
            }
        }
        Some(u)
    }
}

/// Lazy depth-first iterator over an [`AdjGraph`]. Each node is yielded exactly once.
pub struct Dfs<'a, N, L>
where
    N: Copy + Ord + Hash,
{
    graph: &'a AdjGraph<N, L>,
    visited: IndexSet<N>,
    stack: Vec<N>,
}

impl<'a, N, L> Iterator for Dfs<'a, N, L>
where
    N: Copy + Ord + Hash,
{
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let u = self.stack.pop()?;
        for &w in self.graph.neighbors(u).iter().rev() {
            if self.visited.insert(w) {
                self.stack.push(w);
            }
        }
        Some(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_rejects_duplicate() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        assert!(g.add_node(1));
        assert!(!g.add_node(1));
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn add_edge_creates_endpoints() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        assert!(g.add_edge(1, 2, Some(3.0), None));
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_cost(1, 2), Some(3.0));
        assert_eq!(g.edge_cost(2, 1), Some(3.0));
    }

    #[test]
    fn self_loop_rejected_by_default() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        assert!(!g.add_edge(1, 1, None, None));
    }

    #[test]
    fn multi_edge_rejected_by_default() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        assert!(g.add_edge(1, 2, None, None));
        assert!(!g.add_edge(1, 2, None, None));
    }

    #[test]
    fn acyclic_flag_rejects_closing_edge() {
        let mut flags = GraphFlags::default();
        flags.allow_cyclic = false;
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(flags);
        assert!(g.add_edge(1, 2, None, None));
        assert!(g.add_edge(2, 3, None, None));
        assert!(!g.add_edge(3, 1, None, None));
    }

    #[test]
    fn remove_node_stitches_neighbors() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        g.add_edge(1, 2, None, None);
        g.add_edge(2, 3, None, None);
        g.remove_node(2).unwrap();
        assert!(!g.contains_node(2));
        assert!(g.contains_edge(1, 3));
    }

    #[test]
    fn remove_node_and_edges_does_not_stitch() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        g.add_edge(1, 2, None, None);
        g.add_edge(2, 3, None, None);
        g.remove_node_and_edges(2).unwrap();
        assert!(!g.contains_edge(1, 3));
    }

    #[test]
    fn remove_absent_node_is_constraint_violation() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        let err = g.remove_node(99).unwrap_err();
        assert!(matches!(err, CoreError::ConstraintViolation(_)));
    }

    #[test]
    fn has_path_and_subgraph_roots() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        g.add_edge(1, 2, None, None);
        g.add_edge(3, 4, None, None);
        assert!(g.has_path(1, 2));
        assert!(!g.has_path(1, 3));
        let roots = g.subgraph_roots();
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn bfs_and_dfs_visit_each_node_once() {
        let mut g: AdjGraph<u32, ()> = AdjGraph::new(GraphFlags::default());
        g.add_edge(1, 2, None, None);
        g.add_edge(1, 3, None, None);
        g.add_edge(2, 4, None, None);

        let bfs_order: Vec<u32> = g.bfs(1).collect();
        assert_eq!(bfs_order.len(), 4);

        let dfs_order: Vec<u32> = g.dfs(1).collect();
        assert_eq!(dfs_order.len(), 4);
    }
}
