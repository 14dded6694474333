//! Linear Time-Invariant Model: Exact Control Inversion
//!
//! The discrete-time system
//!
//!   x[k+1] = A·x[k] + B·u[k]
//!
//! with A, B ∈ ℝⁿˣⁿ and B invertible. Because B is square and invertible,
//! every prescribed transition x → x' is realized by exactly one control:
//!
//!   u = B⁻¹·(x' − A·x)
//!
//! B⁻¹ is computed once at construction and reused for every step.
//!
//! ## Path Synthesis
//!
//! A path is a sequence of waypoints. Each waypoint is perturbed by
//! Gaussian noise, then every segment between consecutive (noisy) waypoints
//! is cut into equal sub-steps and the control for each sub-step is solved
//! exactly. The final waypoint is only ever a control target, never an
//! emitted state.

use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::linalg::invert;
use super::traits::ControlledSystem;
use crate::error::{SynthError, SynthResult};

/// Sub-step counts for the segments of a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Steps {
    /// Same count for every segment
    Uniform(usize),
    /// One count per segment (waypoints − 1 entries)
    PerSegment(Vec<usize>),
}

impl Default for Steps {
    fn default() -> Self {
        Steps::Uniform(1)
    }
}

impl Steps {
    /// Expand to one count per segment for a path of `n_waypoints` points
    pub fn per_segment(&self, n_waypoints: usize) -> SynthResult<Vec<usize>> {
        let n_segments = n_waypoints.saturating_sub(1);
        let counts = match self {
            Steps::Uniform(k) => vec![*k; n_segments],
            Steps::PerSegment(counts) => {
                if counts.len() != n_segments {
                    return Err(SynthError::ShapeMismatch(format!(
                        "{} waypoints need {} step counts, got {}",
                        n_waypoints,
                        n_segments,
                        counts.len()
                    )));
                }
                counts.clone()
            }
        };
        self.validate()?;
        Ok(counts)
    }

    /// Every count must be at least one
    pub fn validate(&self) -> SynthResult<()> {
        let has_zero = match self {
            Steps::Uniform(k) => *k == 0,
            Steps::PerSegment(counts) => counts.iter().any(|&k| k == 0),
        };
        if has_zero {
            return Err(SynthError::InvalidParameter(
                "step count per segment must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Total number of emitted states for a path of `n_waypoints` points
    pub fn total(&self, n_waypoints: usize) -> SynthResult<usize> {
        Ok(self.per_segment(n_waypoints)?.iter().sum())
    }
}

/// Check a noise standard deviation
pub fn validate_noise(noise: f64) -> SynthResult<()> {
    if !noise.is_finite() || noise < 0.0 {
        return Err(SynthError::InvalidParameter(format!(
            "noise standard deviation must be finite and non-negative, got {}",
            noise
        )));
    }
    Ok(())
}

/// States visited by a path and the controls that realize each step
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Emitted states, one row per time step
    pub states: Array2<f64>,
    /// Control applied at each emitted state
    pub controls: Array2<f64>,
}

impl Trajectory {
    /// Number of time steps
    pub fn len(&self) -> usize {
        self.states.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.states.nrows() == 0
    }

    /// Observation table: each row is the state followed by its control
    pub fn observations(&self) -> Array2<f64> {
        let n = self.states.ncols();
        let mut obs = Array2::zeros((self.states.nrows(), 2 * n));
        obs.slice_mut(ndarray::s![.., ..n]).assign(&self.states);
        obs.slice_mut(ndarray::s![.., n..]).assign(&self.controls);
        obs
    }
}

/// Linear time-invariant system x' = A·x + B·u
#[derive(Debug, Clone)]
pub struct LinearSystem {
    /// State transition matrix A
    a: Array2<f64>,
    /// Control coupling matrix B
    b: Array2<f64>,
    /// Cached B⁻¹
    b_inv: Array2<f64>,
    /// State dimension n
    n: usize,
}

impl LinearSystem {
    /// Create a model from its matrices
    ///
    /// # Errors
    /// * `ShapeMismatch` if A or B is not square or their shapes differ
    /// * `InvalidModel` if B is singular
    pub fn new(a: Array2<f64>, b: Array2<f64>) -> SynthResult<Self> {
        let n = a.nrows();
        if n == 0 || a.ncols() != n {
            return Err(SynthError::ShapeMismatch(format!(
                "state matrix must be square and non-empty, got {}x{}",
                a.nrows(),
                a.ncols()
            )));
        }
        if b.dim() != (n, n) {
            return Err(SynthError::ShapeMismatch(format!(
                "control matrix must be {}x{}, got {}x{}",
                n,
                n,
                b.nrows(),
                b.ncols()
            )));
        }

        let b_inv = invert(&b).ok_or_else(|| {
            SynthError::InvalidModel("control matrix B is not invertible".to_string())
        })?;

        Ok(Self { a, b, b_inv, n })
    }

    /// Random model of dimension `dim`
    ///
    /// A is uniform on [-5, 12), B uniform on [0, 10), entry-wise.
    pub fn random<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> SynthResult<Self> {
        let a_dist = Uniform::new(-5.0, 12.0)
            .map_err(|e| SynthError::InvalidParameter(e.to_string()))?;
        let b_dist = Uniform::new(0.0, 10.0)
            .map_err(|e| SynthError::InvalidParameter(e.to_string()))?;

        let a = Array2::from_shape_fn((dim, dim), |_| a_dist.sample(rng));
        let b = Array2::from_shape_fn((dim, dim), |_| b_dist.sample(rng));

        Self::new(a, b)
    }

    pub fn a(&self) -> &Array2<f64> {
        &self.a
    }

    pub fn b(&self) -> &Array2<f64> {
        &self.b
    }

    pub fn b_inverse(&self) -> &Array2<f64> {
        &self.b_inv
    }

    /// State dimension n
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Control that drives `x` to `next_x` in one step: B⁻¹·(next_x − A·x)
    ///
    /// Both vectors must have length n; see [`Self::try_next_u`] for a
    /// checked variant.
    pub fn next_u(&self, x: ArrayView1<f64>, next_x: ArrayView1<f64>) -> Array1<f64> {
        let residual = &next_x - &self.a.dot(&x);
        self.b_inv.dot(&residual)
    }

    /// [`Self::next_u`] with a dimension check
    pub fn try_next_u(
        &self,
        x: ArrayView1<f64>,
        next_x: ArrayView1<f64>,
    ) -> SynthResult<Array1<f64>> {
        if x.len() != self.n || next_x.len() != self.n {
            return Err(SynthError::ShapeMismatch(format!(
                "state vectors must have length {}, got {} and {}",
                self.n,
                x.len(),
                next_x.len()
            )));
        }
        Ok(self.next_u(x, next_x))
    }

    /// Evolve the system through noisy waypoints
    ///
    /// # Arguments
    /// * `waypoints` - m×n table, one waypoint per row
    /// * `steps` - sub-steps per segment (uniform or m−1 counts)
    /// * `noise` - standard deviation of the Gaussian added to each waypoint
    /// * `rng` - random source for the noise
    ///
    /// Returns Σkᵢ states and the same number of controls. The last
    /// waypoint is a control target only.
    pub fn make_path<R: Rng + ?Sized>(
        &self,
        waypoints: &Array2<f64>,
        steps: &Steps,
        noise: f64,
        rng: &mut R,
    ) -> SynthResult<Trajectory> {
        if waypoints.ncols() != self.n {
            return Err(SynthError::ShapeMismatch(format!(
                "waypoints have {} columns, system dimension is {}",
                waypoints.ncols(),
                self.n
            )));
        }
        let counts = steps.per_segment(waypoints.nrows())?;
        validate_noise(noise)?;

        let normal = Normal::new(0.0, noise)
            .map_err(|e| SynthError::InvalidParameter(e.to_string()))?;

        let mut points = waypoints.to_owned();
        points.mapv_inplace(|p| p + normal.sample(rng));

        let total: usize = counts.iter().sum();
        let mut states = Array2::zeros((total, self.n));
        let mut controls = Array2::zeros((total, self.n));

        let mut offset = 0;
        for (i, &k) in counts.iter().enumerate() {
            self.segment(
                points.row(i),
                points.row(i + 1),
                k,
                &mut states,
                &mut controls,
                offset,
            );
            offset += k;
        }

        debug!(
            waypoints = waypoints.nrows(),
            steps = total,
            noise,
            "evolved path"
        );

        Ok(Trajectory { states, controls })
    }

    /// Fill `k` rows starting at `offset` with the sub-steps from `x` to `next_x`
    fn segment(
        &self,
        x: ArrayView1<f64>,
        next_x: ArrayView1<f64>,
        k: usize,
        states: &mut Array2<f64>,
        controls: &mut Array2<f64>,
        offset: usize,
    ) {
        let step = (&next_x - &x) / k as f64;

        for j in 0..k {
            let state = &x + &(&step * j as f64);
            states.row_mut(offset + j).assign(&state);
        }

        for j in 0..k {
            let u = if j + 1 < k {
                self.next_u(states.row(offset + j), states.row(offset + j + 1))
            } else {
                self.next_u(states.row(offset + j), next_x)
            };
            controls.row_mut(offset + j).assign(&u);
        }
    }
}

impl ControlledSystem for LinearSystem {
    fn state_dimension(&self) -> usize {
        self.n
    }

    fn transition(&self, x: ArrayView1<f64>, u: ArrayView1<f64>) -> Array1<f64> {
        self.a.dot(&x) + self.b.dot(&u)
    }

    fn required_control(&self, x: ArrayView1<f64>, next_x: ArrayView1<f64>) -> Array1<f64> {
        self.next_u(x, next_x)
    }
}
