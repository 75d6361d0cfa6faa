//! The plain 2D point type shared by every geometric component (4.A–4.D, 4.G).

use core::ops::{Add, Sub};

/// A point in the plane.
///
/// Distinct from [`crate::delaunay::triangle::Vertex`]: `Point` carries no label and
/// no identity — it is a pure value, freely copied, used by the hull/k-d-tree/Fourier
/// pipeline (4.B, 4.D, 4.G) which never needs labels or pointer identity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn squared_distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.squared_distance(other).sqrt()
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}
