//! Geometric primitives: predicates (4.A), k-d tree (4.B), convex hull (4.D).

pub mod convex_hull;
pub mod kdtree;
pub mod point;
pub mod predicates;

pub use convex_hull::{convex_hull, Hull};
pub use kdtree::{KdNode, KdTree, Neighbor};
pub use point::Point;
pub use predicates::{collinear, cross, dot, in_circumcircle, orientation, COLLINEAR_EPSILON};
