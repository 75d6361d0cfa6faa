//! Geometric predicates (component 4.A).
//!
//! Transcribed from `Gamera::Delaunaytree`'s `operator^`/`operator*` and
//! `three_points_collinear`, plus `clockwise_orientation`/`polar_angle` from the hull
//! code — all free functions over [`Point`], matching the original's style.

use super::point::Point;

/// 2D cross product `ax*by - ay*bx`, used for signed area and orientation tests.
#[inline]
pub fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// 2D dot product `ax*bx + ay*by`.
#[inline]
pub fn dot(a: Point, b: Point) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Positive iff `p0 -> p1 -> p2` is a clockwise turn; zero iff collinear; negative iff
/// counter-clockwise. Mirrors `clockwise_orientation` in `geometry.hpp`.
#[inline]
pub fn orientation(p0: Point, p1: Point, p2: Point) -> f64 {
    cross(p1 - p0, p2 - p0)
}

/// The fixed epsilon used by [`collinear`], matching the original's hard-coded
/// `1.0e-07F`. The caller is expected to pass integer-valued coordinates for
/// deterministic behavior (spec §4.A).
pub const COLLINEAR_EPSILON: f64 = 1.0e-7;

/// True iff `p1`, `p2`, `p3` are collinear within [`COLLINEAR_EPSILON`] (compared
/// against twice the signed area, exactly as `three_points_collinear` does).
#[inline]
pub fn collinear(p1: Point, p2: Point, p3: Point) -> bool {
    let area2 =
        p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y);
    area2.abs() < COLLINEAR_EPSILON
}

/// Exact algebraic in-circumcircle test for a finite triangle `(t0, t1, t2)` against
/// point `v`: after translating `t0` to the origin, `alpha*x + beta*y + gamma*(x^2+y^2)
/// <= 0` with `(alpha, beta, gamma)` derived from the other two translated vertices.
/// Mirrors `Triangle::Conflict`'s case 0 in `delaunaytree.cpp` exactly.
#[inline]
pub fn in_circumcircle(t0: Point, t1: Point, t2: Point, v: Point) -> bool {
    let x1 = t1.x - t0.x;
    let y1 = t1.y - t0.y;
    let x2 = t2.x - t0.x;
    let y2 = t2.y - t0.y;
    let x = v.x - t0.x;
    let y = v.y - t0.y;

    let z1 = x1 * x1 + y1 * y1;
    let z2 = x2 * x2 + y2 * y2;

    let alpha = y1 * z2 - z1 * y2;
    let beta = x2 * z1 - x1 * z2;
    let gamma = x1 * y2 - y1 * x2;

    alpha * x + beta * y + gamma * (x * x + y * y) <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_of_axes_is_one() {
        assert_eq!(cross(Point::new(1.0, 0.0), Point::new(0.0, 1.0)), 1.0);
    }

    #[test]
    fn orientation_detects_clockwise_turn() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(1.0, 0.0);
        let p2 = Point::new(1.0, -1.0);
        assert!(orientation(p0, p1, p2) > 0.0);
    }

    #[test]
    fn orientation_detects_counter_clockwise_turn() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(1.0, 0.0);
        let p2 = Point::new(1.0, 1.0);
        assert!(orientation(p0, p1, p2) < 0.0);
    }

    #[test]
    fn collinear_points_detected() {
        assert!(collinear(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0)
        ));
        assert!(!collinear(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 3.0)
        ));
    }

    #[test]
    fn circumcircle_rejects_point_far_outside() {
        // Unit right triangle at the origin; (10, 10) is far outside its circumcircle.
        let t0 = Point::new(0.0, 0.0);
        let t1 = Point::new(1.0, 0.0);
        let t2 = Point::new(0.0, 1.0);
        assert!(!in_circumcircle(t0, t1, t2, Point::new(10.0, 10.0)));
    }

    #[test]
    fn circumcircle_accepts_center() {
        let t0 = Point::new(0.0, 0.0);
        let t1 = Point::new(1.0, 0.0);
        let t2 = Point::new(0.0, 1.0);
        assert!(in_circumcircle(t0, t1, t2, Point::new(0.3, 0.3)));
    }
}
