//! Cycle Composer: Planar Loops Lifted to the Full State Space
//!
//! An n-dimensional state (n even) is split into n/2 planes: plane i owns
//! columns 2i and 2i+1. Each plane runs its own closed 2D loop, and the
//! loops are placed side by side to form one waypoint per row:
//!
//! ```text
//!   plane 0   plane 1        plane n/2-1
//!  ┌───────┬───────┬─ ... ─┬───────┐
//!  │ x₀ y₀ │ x₁ y₁ │       │ x  y  │   row t = waypoint t
//!  └───────┴───────┴─ ... ─┴───────┘
//! ```
//!
//! All loops must have the same number of rows.

use ndarray::{s, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::params::{CarnotParams, EllipseParams};
use crate::curves::{ellipse, exp_arc, line, Points};
use crate::error::{SynthError, SynthResult};

/// Loop shape run on one plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneKind {
    /// Two exponential arcs and two lines
    Carnot,
    /// Two ellipses with swapped radii
    DoubleEllipse,
}

/// How plane kinds are chosen for a cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanePolicy {
    /// First `carnot_planes` planes are Carnot, the rest double-ellipse.
    /// `None` means half of the planes (rounded down).
    Split { carnot_planes: Option<usize> },
    /// Each plane is Carnot with probability `carnot_probability`
    Random { carnot_probability: f64 },
    /// One kind per plane, in plane order
    Explicit { planes: Vec<PlaneKind> },
}

impl Default for PlanePolicy {
    fn default() -> Self {
        PlanePolicy::Split { carnot_planes: None }
    }
}

impl PlanePolicy {
    /// Check the policy against a state dimension
    pub fn validate(&self, dim: usize) -> SynthResult<()> {
        let planes = plane_count(dim)?;
        match self {
            PlanePolicy::Split { carnot_planes: Some(c) } if *c > planes => {
                Err(SynthError::InvalidParameter(format!(
                    "{} Carnot planes requested but dimension {} has only {} planes",
                    c, dim, planes
                )))
            }
            PlanePolicy::Random { carnot_probability: p } if !(0.0..=1.0).contains(p) => {
                Err(SynthError::InvalidParameter(format!(
                    "Carnot probability must lie in [0, 1], got {}",
                    p
                )))
            }
            PlanePolicy::Explicit { planes: kinds } if kinds.len() != planes => {
                Err(SynthError::ShapeMismatch(format!(
                    "{} plane kinds given for dimension {} ({} planes)",
                    kinds.len(),
                    dim,
                    planes
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Number of planes in an even dimension
pub fn plane_count(dim: usize) -> SynthResult<usize> {
    if dim == 0 || dim % 2 != 0 {
        return Err(SynthError::InvalidParameter(format!(
            "state dimension must be even and positive, got {}",
            dim
        )));
    }
    Ok(dim / 2)
}

/// Carnot-like loop s0 → s1 → s2 → s3 → s0
///
/// Legs: arc, line, arc, line. Arcs get `num_points / 3` points and lines
/// half of that; a budget not divisible by 6 is truncated with a warning.
pub fn carnot_cycle(params: &CarnotParams) -> Points {
    if params.num_points % 6 != 0 {
        warn!(
            num_points = params.num_points,
            produced = params.total_points(),
            "Carnot point budget is not divisible by 6, leg sizes truncated"
        );
    }

    let [s0, s1, s2, s3] = params.corners;
    let n_arc = params.arc_points();
    let n_line = params.line_points();

    chain(&[
        exp_arc(s0, s1, n_arc),
        line(s1, s2, n_line),
        exp_arc(s2, s3, n_arc),
        line(s3, s0, n_line),
    ])
}

/// Two ellipses from the same point: radii (r1, r2), then (r2, r1)
pub fn double_ellipse_cycle(params: &EllipseParams) -> Points {
    let first = ellipse(params.r1, params.r2, params.center, params.num_points);
    let second = ellipse(params.r2, params.r1, params.center, params.num_points);

    chain(&[first, second])
}

/// Stack planar curves end to end
fn chain(parts: &[Points]) -> Points {
    let total: usize = parts.iter().map(|p| p.nrows()).sum();
    let mut out = Array2::zeros((total, 2));
    let mut offset = 0;
    for part in parts {
        out.slice_mut(s![offset..offset + part.nrows(), ..]).assign(part);
        offset += part.nrows();
    }
    out
}

/// Builds full-dimensional waypoint loops from planar cycles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleComposer {
    pub carnot: CarnotParams,
    pub ellipse: EllipseParams,
    pub policy: PlanePolicy,
}

impl CycleComposer {
    pub fn new(carnot: CarnotParams, ellipse: EllipseParams, policy: PlanePolicy) -> Self {
        Self { carnot, ellipse, policy }
    }

    /// Choose a loop kind for every plane of a `dim`-dimensional state
    pub fn plane_kinds<R: Rng + ?Sized>(&self, dim: usize, rng: &mut R) -> SynthResult<Vec<PlaneKind>> {
        self.policy.validate(dim)?;
        let planes = dim / 2;

        let kinds = match &self.policy {
            PlanePolicy::Split { carnot_planes } => {
                let n_carnot = carnot_planes.unwrap_or(planes / 2);
                (0..planes)
                    .map(|i| if i < n_carnot { PlaneKind::Carnot } else { PlaneKind::DoubleEllipse })
                    .collect()
            }
            PlanePolicy::Random { carnot_probability } => (0..planes)
                .map(|_| {
                    if rng.random_bool(*carnot_probability) {
                        PlaneKind::Carnot
                    } else {
                        PlaneKind::DoubleEllipse
                    }
                })
                .collect(),
            PlanePolicy::Explicit { planes: kinds } => kinds.clone(),
        };

        Ok(kinds)
    }

    /// Rows produced by one plane of the given kind
    pub fn plane_points(&self, kind: PlaneKind) -> usize {
        match kind {
            PlaneKind::Carnot => self.carnot.total_points(),
            PlaneKind::DoubleEllipse => self.ellipse.total_points(),
        }
    }

    /// One waypoint loop with plane kinds chosen by the policy
    pub fn compose<R: Rng + ?Sized>(&self, dim: usize, rng: &mut R) -> SynthResult<Points> {
        let kinds = self.plane_kinds(dim, rng)?;
        self.compose_planes(&kinds)
    }

    /// One waypoint loop with the given plane kinds
    ///
    /// # Errors
    /// `ShapeMismatch` if the planar loops differ in length. The check runs
    /// before any loop is generated.
    pub fn compose_planes(&self, kinds: &[PlaneKind]) -> SynthResult<Points> {
        if kinds.is_empty() {
            return Err(SynthError::InvalidParameter(
                "at least one plane is required".to_string(),
            ));
        }

        let expected = self.plane_points(kinds[0]);
        for (i, &kind) in kinds.iter().enumerate().skip(1) {
            let found = self.plane_points(kind);
            if found != expected {
                return Err(SynthError::ShapeMismatch(format!(
                    "plane {} ({:?}) has {} points, plane 0 ({:?}) has {}",
                    i, kind, found, kinds[0], expected
                )));
            }
        }

        // Each kind is generated once and reused across planes
        let carnot = kinds
            .contains(&PlaneKind::Carnot)
            .then(|| carnot_cycle(&self.carnot));
        let ellipses = kinds
            .contains(&PlaneKind::DoubleEllipse)
            .then(|| double_ellipse_cycle(&self.ellipse));

        let mut waypoints = Array2::zeros((expected, 2 * kinds.len()));
        for (i, &kind) in kinds.iter().enumerate() {
            let plane = match kind {
                PlaneKind::Carnot => carnot.as_ref(),
                PlaneKind::DoubleEllipse => ellipses.as_ref(),
            };
            if let Some(plane) = plane {
                waypoints
                    .slice_mut(s![.., 2 * i..2 * i + 2])
                    .assign(plane);
            }
        }

        let n_carnot = kinds.iter().filter(|&&k| k == PlaneKind::Carnot).count();
        debug!(
            planes = kinds.len(),
            carnot = n_carnot,
            double_ellipse = kinds.len() - n_carnot,
            points = expected,
            "composed waypoint cycle"
        );

        Ok(waypoints)
    }
}
