//! Fourier shape-feature pipeline (component 4.G).
//!
//! Transcribed from `examples/original_source/include/plugins/fourier_features.hpp`:
//! `interpolatePoints`/`interpolatePolygonPoints`, `minimumContourHullDistances`,
//! `cutComplexDftAbs`, `getCrMax`, and `floatFourierDescriptorBrokenA`. The Open
//! Questions in spec §9 are resolved here: `fourier_features`'s public `n` is the
//! even output length; the internal DFT cutoff always receives `n + 1` (odd), so the
//! original's "even numCoeff is an error" branch is unreachable from this entry point
//! by construction.

use crate::error::{CoreError, CoreResult};
use crate::geom::convex_hull::convex_hull;
use crate::geom::kdtree::{KdNode, KdTree};
use crate::geom::point::Point;

/// A minimal complex number, matching `std::complex<double>`'s four arithmetic ops and
/// `abs()` — the only operations the original ever needs from it.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }

    fn from_angle(theta: f64) -> Self {
        Complex::new(theta.cos(), theta.sin())
    }

    fn mul(self, other: Complex) -> Complex {
        Complex::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }

    fn add(self, other: Complex) -> Complex {
        Complex::new(self.re + other.re, self.im + other.im)
    }

    fn scale(self, factor: f64) -> Complex {
        Complex::new(self.re * factor, self.im * factor)
    }

    fn abs(self) -> f64 {
        (self.re * self.re + self.im * self.im).sqrt()
    }
}

/// `interpolatePoints`: equally spaced points between `a` and `b`, inclusive of `b`,
/// exclusive of `a`, one point per whole unit of distance.
fn interpolate_points(a: Point, b: Point) -> Vec<Point> {
    let dist = a.distance(&b) as i64;
    let mut out = Vec::with_capacity(dist.max(1) as usize);
    if dist <= 0 {
        out.push(b);
        return out;
    }
    let step = Point::new((b.x - a.x) / dist as f64, (b.y - a.y) / dist as f64);
    let mut q = a;
    for _ in 1..dist {
        q = Point::new(q.x + step.x, q.y + step.y);
        out.push(q);
    }
    out.push(b);
    out
}

/// `interpolatePolygonPoints`: interpolates every edge of a closed polygon, walking
/// `(i-1, i)` for each vertex so the edge from the last vertex back to the first is
/// included.
fn interpolate_polygon_points(polygon: &[Point]) -> Vec<Point> {
    let n = polygon.len();
    let mut out = Vec::new();
    for i in 0..n {
        let a = polygon[(i + n - 1) % n];
        let b = polygon[i];
        out.extend(interpolate_points(a, b));
    }
    out
}

/// `minimumContourHullDistances`: for each `hull_points[i]`, the Euclidean distance to
/// its nearest neighbor in `contour_points`, clamped to `0.0` below `1.0`.
fn min_contour_hull_distances(hull_points: &[Point], contour_points: &[Point]) -> Vec<f64> {
    let nodes: Vec<KdNode<()>> = contour_points.iter().map(|&p| KdNode::new(p, ())).collect();
    let tree = KdTree::build(nodes);
    hull_points
        .iter()
        .map(|&p| {
            let nearest = tree.k_nearest(p, 1);
            let dist = nearest.first().map(|n| n.distance).unwrap_or(0.0);
            if dist < 1.0 {
                0.0
            } else {
                dist
            }
        })
        .collect()
}

/// `cutComplexDftAbs`: the magnitude of the first and last `num_coeff/2` DFT
/// coefficients of `z` (direct summation), plus the DC term, wrapping at Nyquist when
/// `z` is shorter than `num_coeff`. `num_coeff` must be odd (the caller always passes
/// `n + 1` for even `n`).
fn cut_complex_dft_abs(z: &[Complex], num_coeff: usize) -> Vec<f64> {
    debug_assert!(num_coeff % 2 == 1, "cut_complex_dft_abs requires an odd coefficient count");

    let dft_size = z.len();
    let mut c_k = vec![0.0f64; num_coeff];
    let num_coeff_half = if dft_size < num_coeff {
        dft_size / 2
    } else {
        num_coeff / 2
    };

    let dft_term = |k: usize| -> f64 {
        let expfac = Complex::from_angle(-2.0 * std::f64::consts::PI * k as f64 / dft_size as f64);
        let mut sum = Complex::new(0.0, 0.0);
        let mut prod = Complex::new(1.0, 0.0);
        for &zt in z {
            sum = sum.add(zt.mul(prod));
            prod = prod.mul(expfac);
        }
        sum.scale(1.0 / dft_size as f64).abs()
    };

    let mut target_idx = 0;
    for k in 0..=num_coeff_half {
        c_k[target_idx] = dft_term(k);
        target_idx += 1;
    }

    if dft_size < num_coeff {
        target_idx = num_coeff - num_coeff_half;
    }
    for k in (dft_size - num_coeff_half)..dft_size {
        c_k[target_idx] = dft_term(k);
        target_idx += 1;
    }

    c_k
}

/// `getCrMax`: the maximum of `c_k[start..end]` (default whole slice beyond `start`).
fn cr_max(c_k: &[f64], start: usize, end: usize) -> f64 {
    c_k[start..end].iter().copied().fold(0.0, f64::max)
}

/// Computes a length-`n` Fourier shape-descriptor feature vector for a connected
/// component's contour, per spec §4.G. `n` must be even (`InvalidArgument` otherwise);
/// internally the DFT cutoff is invoked with `n + 1` (always odd), resolving spec §9's
/// Open Question.
///
/// Degenerate contours: zero points returns all zeros; one point returns `[1, 0, 0,
/// ...]` (`floatFourierDescriptorBrokenA`'s documented special cases).
pub fn fourier_features(contour: &[Point], n: usize) -> CoreResult<Vec<f64>> {
    if n == 0 || n % 2 != 0 {
        return Err(CoreError::InvalidArgument(
            "fourier_features requires a positive even coefficient count".to_string(),
        ));
    }

    if contour.is_empty() {
        return Ok(vec![0.0; n]);
    }
    if contour.len() == 1 {
        let mut out = vec![0.0; n];
        out[0] = 1.0;
        return Ok(out);
    }

    let hull = convex_hull(contour)?;
    let interpolated = interpolate_polygon_points(&hull.vertices);
    let distances = min_contour_hull_distances(&interpolated, contour);

    let count = interpolated.len() as f64;
    let (sum_x, sum_y) = interpolated
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let (mean_x, mean_y) = (sum_x / count, sum_y / count);

    let z: Vec<Complex> = interpolated
        .iter()
        .zip(distances.iter())
        .map(|(p, &d)| {
            let dx = p.x - mean_x;
            let dy = p.y - mean_y;
            Complex::new((dx * dx + dy * dy).sqrt(), d)
        })
        .collect();

    let c_k = cut_complex_dft_abs(&z, n + 1);
    let half = n / 2;
    let cr = cr_max(&c_k, 0, half);
    // A perfectly symmetric contour can drive every retained coefficient to zero;
    // normalizing by 1.0 in that case yields an all-zero vector instead of NaN.
    let cr = if cr == 0.0 { 1.0 } else { cr };

    let mut out = vec![0.0; n];
    for k in 0..half {
        out[2 * k] = c_k[k] / cr;
        out[2 * k + 1] = c_k[n - k] / cr;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_contour_is_all_zero() {
        let features = fourier_features(&[], 8).unwrap();
        assert_eq!(features, vec![0.0; 8]);
    }

    #[test]
    fn single_point_contour_is_impulse() {
        let features = fourier_features(&[Point::new(3.0, 4.0)], 8).unwrap();
        assert_eq!(features[0], 1.0);
        assert!(features[1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn odd_n_is_invalid_argument() {
        let err = fourier_features(&[Point::new(0.0, 0.0)], 7).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn square_contour_produces_normalized_bounded_vector() {
        let contour: Vec<Point> = (0..10)
            .map(|i| Point::new((i % 5) as f64, (i / 5) as f64))
            .collect();
        let features = fourier_features(&contour, 8).unwrap();
        assert_eq!(features.len(), 8);
        assert!(features.iter().all(|&v| v.is_finite() && v >= 0.0));
    }

    #[test]
    fn interpolate_points_excludes_start_includes_end() {
        let pts = interpolate_points(Point::new(0.0, 0.0), Point::new(3.0, 0.0));
        assert_eq!(*pts.last().unwrap(), Point::new(3.0, 0.0));
        assert!(!pts.contains(&Point::new(0.0, 0.0)));
    }
}
