//! Curve generators: line, exponential arc, ellipse

use ndarray::{s, Array1, Array2};
use std::f64::consts::PI;

use super::{Point2, Points};

/// Exponent range sampled by [`exp_arc`]
pub const DEFAULT_EXP_RANGE: (f64, f64) = (4.0, 7.0);

/// `n` evenly spaced values from `start` to `stop`, both included
///
/// The last value is `stop` exactly. `n = 1` yields `[start]`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values = Array1::from_shape_fn(n, |i| start + step * i as f64);
            values[n - 1] = stop;
            values
        }
    }
}

fn stack(xs: &Array1<f64>, ys: &Array1<f64>) -> Points {
    let mut points = Array2::zeros((xs.len(), 2));
    points.column_mut(0).assign(xs);
    points.column_mut(1).assign(ys);
    points
}

/// Straight segment from `start` to `stop` with `n` points
pub fn line(start: Point2, stop: Point2, n: usize) -> Points {
    let xs = linspace(start[0], stop[0], n);
    let ys = linspace(start[1], stop[1], n);
    stack(&xs, &ys)
}

/// Exponential leg from `start` to `stop` over the default exponent range
pub fn exp_arc(start: Point2, stop: Point2, n: usize) -> Points {
    exp_arc_with_range(start, stop, DEFAULT_EXP_RANGE, n)
}

/// Exponential leg from `start` to `stop`
///
/// Samples eᵗ for t evenly spaced over `exp_range`, then maps the sampled
/// values affinely onto the vertical span of the endpoints while x is
/// interpolated linearly. The curve is always built from the component-wise
/// lower endpoint; when `start` is not that endpoint the two are swapped and
/// the result reversed, so row 0 is always `start`.
pub fn exp_arc_with_range(start: Point2, stop: Point2, exp_range: (f64, f64), n: usize) -> Points {
    if n == 0 {
        return Array2::zeros((0, 2));
    }

    let reverse = start[0] > stop[0] || start[1] > stop[1];
    let (from, to) = if reverse { (stop, start) } else { (start, stop) };

    let e = linspace(exp_range.0, exp_range.1, n).mapv(f64::exp);
    let raw_span = e[n - 1] - e[0];

    let ys = if raw_span != 0.0 && raw_span.is_finite() {
        let scale = (to[1] - from[1]) / raw_span;
        let mut ys = e.mapv(|v| from[1] + (v - e[0]) * scale);
        ys[n - 1] = to[1];
        ys
    } else {
        // Flat exponent range, nothing to shape
        linspace(from[1], to[1], n)
    };
    let xs = linspace(from[0], to[0], n);

    let points = stack(&xs, &ys);
    if reverse {
        return points.slice(s![..;-1, ..]).to_owned();
    }
    points
}

/// Full parametric turn of an ellipse with semi-axes `r1` (x) and `r2` (y)
///
/// φ is sampled evenly over [0, 2π] inclusive, so the last point closes the
/// loop. All points are translated so that the first one is `anchor`.
pub fn ellipse(r1: f64, r2: f64, anchor: Point2, n: usize) -> Points {
    let phi = linspace(0.0, 2.0 * PI, n);
    // First sample is (r1, 0)
    let xs = phi.mapv(|p| anchor[0] + (r1 * p.cos() - r1));
    let ys = phi.mapv(|p| anchor[1] + r2 * p.sin());
    let mut points = stack(&xs, &ys);
    if n > 0 {
        points[[0, 0]] = anchor[0];
        points[[0, 1]] = anchor[1];
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() < tol, "{} vs {}", a, b);
    }

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(-1.0, 2.0, 7);
        assert_eq!(v.len(), 7);
        assert_eq!(v[0], -1.0);
        assert_eq!(v[6], 2.0);
        assert_close(v[2], 0.0, 1e-15);

        assert_eq!(linspace(3.0, 5.0, 1).to_vec(), vec![3.0]);
        assert!(linspace(3.0, 5.0, 0).is_empty());
    }

    #[test]
    fn test_line_inclusive() {
        let pts = line([10.0, 10.0], [20.0, 10.0], 40);
        assert_eq!(pts.dim(), (40, 2));
        assert_eq!(pts.row(0).to_vec(), vec![10.0, 10.0]);
        assert_eq!(pts.row(39).to_vec(), vec![20.0, 10.0]);

        // Uniform spacing
        let dx = pts[[1, 0]] - pts[[0, 0]];
        for i in 1..40 {
            assert_close(pts[[i, 0]] - pts[[i - 1, 0]], dx, 1e-12);
            assert_eq!(pts[[i, 1]], 10.0);
        }
    }

    #[test]
    fn test_exp_arc_hits_endpoints() {
        let pts = exp_arc([0.0, 0.0], [10.0, 10.0], 80);
        assert_eq!(pts.dim(), (80, 2));
        assert_eq!(pts.row(0).to_vec(), vec![0.0, 0.0]);
        assert_eq!(pts.row(79).to_vec(), vec![10.0, 10.0]);

        // Convex: y lags x until the end
        assert!(pts[[40, 1]] < pts[[40, 0]]);
        for i in 1..80 {
            assert!(pts[[i, 1]] >= pts[[i - 1, 1]]);
        }
    }

    #[test]
    fn test_exp_arc_offset_endpoints() {
        let pts = exp_arc([1.0, 3.0], [4.0, 9.0], 25);
        assert_eq!(pts.row(0).to_vec(), vec![1.0, 3.0]);
        assert_eq!(pts.row(24).to_vec(), vec![4.0, 9.0]);
    }

    #[test]
    fn test_exp_arc_reversed_starts_at_start() {
        let pts = exp_arc([20.0, 10.0], [10.0, 0.0], 80);
        assert_eq!(pts.row(0).to_vec(), vec![20.0, 10.0]);
        assert_eq!(pts.row(79).to_vec(), vec![10.0, 0.0]);
    }

    #[test]
    fn test_exp_arc_order_invariant() {
        let a = [2.0, -1.0];
        let b = [8.0, 5.0];
        let forward = exp_arc(a, b, 33);
        let backward = exp_arc(b, a, 33);

        for i in 0..33 {
            for j in 0..2 {
                assert_close(forward[[i, j]], backward[[32 - i, j]], 1e-12);
            }
        }
    }

    #[test]
    fn test_exp_arc_flat_range() {
        let pts = exp_arc_with_range([0.0, 0.0], [4.0, 8.0], (5.0, 5.0), 5);
        assert_close(pts[[2, 0]], 2.0, 1e-12);
        assert_close(pts[[2, 1]], 4.0, 1e-12);
    }

    #[test]
    fn test_ellipse_anchor_exact() {
        let anchor = [0.1, -3.7];
        let pts = ellipse(2.0, 4.0, anchor, 120);
        assert_eq!(pts.dim(), (120, 2));
        assert_eq!(pts[[0, 0]], anchor[0]);
        assert_eq!(pts[[0, 1]], anchor[1]);

        // Closed loop
        assert_close(pts[[119, 0]], anchor[0], 1e-12);
        assert_close(pts[[119, 1]], anchor[1], 1e-12);
    }

    #[test]
    fn test_ellipse_extent() {
        let pts = ellipse(2.0, 4.0, [0.0, 0.0], 361);
        let min_x = pts.column(0).fold(f64::INFINITY, |m, &v| m.min(v));
        let max_y = pts.column(1).fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        let min_y = pts.column(1).fold(f64::INFINITY, |m, &v| m.min(v));

        // Anchored at the rightmost point, so the loop spans x ∈ [-2r1, 0]
        assert_close(min_x, -4.0, 1e-9);
        assert_close(max_y, 4.0, 1e-9);
        assert_close(min_y, -4.0, 1e-9);
    }
}
