//! Graham-scan convex hull (component 4.D).
//!
//! Transcribed from `convex_hull_from_points` in
//! `examples/original_source/include/plugins/geometry.hpp`: pick the pivot (min-x,
//! then min-y), bucket the rest by polar angle keeping only the farther point on
//! ties, then scan in ascending angle order popping non-left-turns.

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::geom::point::Point;
use crate::geom::predicates::orientation;

/// A convex hull: a CCW polygon with the leftmost-lowest point first, no duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Hull {
    pub vertices: Vec<Point>,
}

/// A total order over polar angle suitable for use as a `BTreeMap` key. `f64` has no
/// `Ord` impl because of NaN, but polar angles from `atan2` on finite, non-degenerate
/// input are never NaN; bit-pattern ordering on non-NaN floats agrees with numeric
/// ordering for all values produced here (mirrors the original's
/// `std::map<double, Point>`, which relies on the same "no NaN in practice" contract).
#[derive(Copy, Clone, PartialEq)]
struct OrderedAngle(f64);

impl Eq for OrderedAngle {}
impl PartialOrd for OrderedAngle {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for OrderedAngle {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.partial_cmp(&other.0).expect("angle must not be NaN")
    }
}

fn polar_angle(origin: Point, p: Point) -> f64 {
    (p.y - origin.y).atan2(p.x - origin.x)
}

/// Returns `true` iff `p1` is farther from `origin` than `p2` (squared-distance
/// compare, matching `greater_distance` in `geometry.hpp`).
fn farther(origin: Point, p1: Point, p2: Point) -> bool {
    origin.squared_distance(&p1) > origin.squared_distance(&p2)
}

/// Computes the convex hull of `points` via a Graham scan.
///
/// Fewer than 3 distinct points degenerate gracefully: the unique points are returned
/// as-is (spec §4.D). An empty input is a [`CoreError::DegenerateInput`].
pub fn convex_hull(points: &[Point]) -> CoreResult<Hull> {
    if points.is_empty() {
        return Err(CoreError::DegenerateInput(
            "convex_hull requires at least one point".into(),
        ));
    }

    // Pivot: minimum x, ties broken by minimum y.
    let pivot_index = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.x.partial_cmp(&b.x)
                .unwrap()
                .then(a.y.partial_cmp(&b.y).unwrap())
        })
        .map(|(i, _)| i)
        .unwrap();
    let origin = points[pivot_index];

    // Bucket the rest by polar angle, keeping only the farther point on ties.
    let mut by_angle: BTreeMap<OrderedAngle, Point> = BTreeMap::new();
    for (i, &p) in points.iter().enumerate() {
        if i == pivot_index || p == origin {
            continue;
        }
        let angle = OrderedAngle(polar_angle(origin, p));
        match by_angle.get(&angle) {
            Some(&existing) if !farther(origin, p, existing) => {}
            _ => {
                by_angle.insert(angle, p);
            }
        }
    }

    let mut distinct: Vec<Point> = by_angle.into_values().collect();

    if distinct.is_empty() {
        // A single distinct point.
        return Ok(Hull {
            vertices: vec![origin],
        });
    }
    if distinct.len() == 1 {
        return Ok(Hull {
            vertices: vec![origin, distinct[0]],
        });
    }

    let mut stack = vec![origin];
    stack.push(distinct.remove(0));
    stack.push(distinct.remove(0));

    for p in distinct {
        while stack.len() > 2
            && orientation(stack[stack.len() - 2], stack[stack.len() - 1], p) <= 0.0
        {
            stack.pop();
        }
        stack.push(p);
    }

    Ok(Hull { vertices: stack })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_with_interior_point() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
            Point::new(1.0, 1.0),
        ];
        let hull = convex_hull(&pts).unwrap();
        assert_eq!(
            hull.vertices,
            vec![
                Point::new(0.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(2.0, 2.0),
                Point::new(0.0, 2.0),
            ]
        );
    }

    #[test]
    fn hull_contains_all_input_points() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 3.0),
        ];
        let hull = convex_hull(&pts).unwrap();
        // every hull vertex must be one of the input points
        for v in &hull.vertices {
            assert!(pts.contains(v));
        }
    }

    #[test]
    fn idempotent_on_its_own_vertices() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 3.0),
            Point::new(0.0, 3.0),
        ];
        let hull1 = convex_hull(&pts).unwrap();
        let hull2 = convex_hull(&hull1.vertices).unwrap();
        assert_eq!(hull1, hull2);
    }

    #[test]
    fn fewer_than_three_points_degenerate() {
        let pts = [Point::new(0.0, 0.0)];
        let hull = convex_hull(&pts).unwrap();
        assert_eq!(hull.vertices, vec![Point::new(0.0, 0.0)]);

        let pts2 = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let hull2 = convex_hull(&pts2).unwrap();
        assert_eq!(hull2.vertices.len(), 2);
    }

    #[test]
    fn empty_input_errors() {
        assert!(convex_hull(&[]).is_err());
    }

    #[test]
    fn collinear_input_degenerates_to_two_extremes() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        ];
        let hull = convex_hull(&pts).unwrap();
        assert_eq!(hull.vertices.len(), 2);
        assert_eq!(hull.vertices[0], Point::new(0.0, 0.0));
        assert_eq!(hull.vertices[1], Point::new(3.0, 0.0));
    }
}
