//! Partitioning / shortest-paths utilities built on top of [`crate::graph::AdjGraph`]
//! (component 4.I).

pub mod dijkstra;
pub mod mst;
pub mod partition;
pub mod spanning_tree;
pub mod union_find;

pub use dijkstra::{all_pairs, reconstruct_path, shortest_paths, PathInfo};
pub use mst::minimum_spanning_tree;
pub use partition::{best_partition, Criterion};
pub use spanning_tree::spanning_tree;
pub use union_find::UnionFind;
