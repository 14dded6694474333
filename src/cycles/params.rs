//! Shape parameters for the planar cycles

use serde::{Deserialize, Serialize};

use crate::curves::Point2;

/// Carnot-like loop: four corners joined by arc, line, arc, line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarnotParams {
    /// Corners s0, s1, s2, s3 in traversal order
    pub corners: [Point2; 4],
    /// Total point budget for the loop (should be divisible by 6)
    pub num_points: usize,
}

impl Default for CarnotParams {
    fn default() -> Self {
        Self {
            corners: [[0.0, 0.0], [10.0, 10.0], [20.0, 10.0], [10.0, 0.0]],
            num_points: 240,
        }
    }
}

impl CarnotParams {
    /// Points in each exponential leg
    pub fn arc_points(&self) -> usize {
        self.num_points / 3
    }

    /// Points in each straight leg
    pub fn line_points(&self) -> usize {
        self.arc_points() / 2
    }

    /// Rows actually produced (equals `num_points` when divisible by 6)
    pub fn total_points(&self) -> usize {
        2 * self.arc_points() + 2 * self.line_points()
    }
}

/// Double-ellipse loop: radii (r1, r2) followed by (r2, r1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseParams {
    /// Semi-axis along x of the first ellipse
    pub r1: f64,
    /// Semi-axis along y of the first ellipse
    pub r2: f64,
    /// Point both ellipses start from
    pub center: Point2,
    /// Points per ellipse
    pub num_points: usize,
}

impl Default for EllipseParams {
    fn default() -> Self {
        Self {
            r1: 2.0,
            r2: 4.0,
            center: [0.0, 0.0],
            num_points: 120,
        }
    }
}

impl EllipseParams {
    /// Rows produced by the double-ellipse loop
    pub fn total_points(&self) -> usize {
        2 * self.num_points
    }
}
