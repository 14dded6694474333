//! Controlled System Trait: Standardized API for Discrete-Time Models
//!
//! Any model that can be driven between prescribed states implements this
//! trait so that trajectories produced by the synthesizer can be replayed
//! and checked independently of how the controls were obtained.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   ControlledSystem Trait                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + state_dimension()    - Dimension of state space          │
//! │  + transition(x, u)     - One discrete step x → x'          │
//! │  + required_control()   - Control realizing x → x'          │
//! │  + evolve(x0, us)       - Replay a control sequence         │
//! │  + replay_error(traj)   - Max deviation of a trajectory     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use ndarray::{Array1, Array2, ArrayView1};

use super::linear::Trajectory;

/// Trait for discrete-time systems driven by an additive control input
pub trait ControlledSystem {
    /// Dimension of state (and control) space
    fn state_dimension(&self) -> usize;

    /// Advance one discrete step from `x` under control `u`
    fn transition(&self, x: ArrayView1<f64>, u: ArrayView1<f64>) -> Array1<f64>;

    /// Control that moves the system from `x` to exactly `next_x` in one step
    fn required_control(&self, x: ArrayView1<f64>, next_x: ArrayView1<f64>) -> Array1<f64>;

    /// Replay a control sequence from `x0`
    ///
    /// Returns the visited states, one row per control, starting with `x0`.
    /// The state reached after the last control is not included, matching
    /// the layout of [`Trajectory`].
    fn evolve(&self, x0: ArrayView1<f64>, controls: &Array2<f64>) -> Array2<f64> {
        let n = self.state_dimension();
        let mut states = Array2::zeros((controls.nrows(), n));
        let mut x = x0.to_owned();

        for (i, u) in controls.rows().into_iter().enumerate() {
            states.row_mut(i).assign(&x);
            x = self.transition(x.view(), u);
        }

        states
    }

    /// Largest absolute deviation between the recorded next state and the
    /// state produced by applying the recorded control
    ///
    /// Only interior transitions are checked (the final target state of a
    /// trajectory is not stored). Zero for a trajectory of fewer than two rows.
    fn replay_error(&self, trajectory: &Trajectory) -> f64 {
        let states = &trajectory.states;
        let controls = &trajectory.controls;
        let mut worst = 0.0f64;

        for i in 0..states.nrows().saturating_sub(1) {
            let reached = self.transition(states.row(i), controls.row(i));
            for (r, e) in reached.iter().zip(states.row(i + 1).iter()) {
                worst = worst.max((r - e).abs());
            }
        }

        worst
    }
}
