//! The Delaunay tree: incremental triangulation with full history (component 4.C).

pub mod tree;
pub mod triangle;

pub use tree::DelaunayTree;
pub use triangle::{Triangle, TriangleFlag, TriangleId, VertexId, VertexRecord, UNLABELED};
