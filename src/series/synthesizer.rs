//! Series Synthesizer: Observation Tables from Repeated Cycles
//!
//! One cycle = one composed waypoint loop pushed through the linear model.
//! Every row of the output is an observation vector
//!
//!   [ x₁ … xₙ | u₁ … uₙ ]
//!
//! and cycles are appended in chronological order. Cycles share nothing
//! but the model matrices: each draws its own plane kinds (under a random
//! policy) and its own waypoint noise.

use ndarray::{concatenate, Array2, Axis};
use rand::Rng;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::cycles::{plane_count, CycleComposer};
use crate::error::{SynthError, SynthResult};
use crate::systems::{validate_noise, LinearSystem, Steps};

/// Per-run synthesis settings
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    /// Standard deviation of waypoint noise
    pub noise: f64,
    /// Sub-steps between consecutive waypoints
    pub steps: Steps,
    /// Cycle shapes and plane-kind policy
    pub composer: CycleComposer,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            noise: 0.3,
            steps: Steps::Uniform(1),
            composer: CycleComposer::default(),
        }
    }
}

/// Drives a fixed linear model through freshly composed cycles
#[derive(Debug, Clone)]
pub struct SeriesSynthesizer {
    system: LinearSystem,
    config: SynthesisConfig,
}

impl SeriesSynthesizer {
    /// # Errors
    /// `InvalidParameter` for an odd dimension, invalid noise or zero steps,
    /// or a plane policy that does not fit the dimension.
    pub fn new(system: LinearSystem, config: SynthesisConfig) -> SynthResult<Self> {
        let dim = system.dimension();
        plane_count(dim)?;
        validate_noise(config.noise)?;
        config.steps.validate()?;
        config.composer.policy.validate(dim)?;

        Ok(Self { system, config })
    }

    pub fn system(&self) -> &LinearSystem {
        &self.system
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Columns of an observation row (2n)
    pub fn observation_width(&self) -> usize {
        2 * self.system.dimension()
    }

    /// One cycle of observations, shape [T × 2n]
    pub fn create_cycle<R: Rng + ?Sized>(&self, rng: &mut R) -> SynthResult<Array2<f64>> {
        let waypoints = self
            .config
            .composer
            .compose(self.system.dimension(), rng)?;

        let trajectory = self
            .system
            .make_path(&waypoints, &self.config.steps, self.config.noise, rng)?;

        Ok(trajectory.observations())
    }

    /// `num_cycles` independent cycles, concatenated in order
    pub fn create_series<R: Rng + ?Sized>(
        &self,
        num_cycles: usize,
        rng: &mut R,
    ) -> SynthResult<Array2<f64>> {
        if num_cycles == 0 {
            return Ok(Array2::zeros((0, self.observation_width())));
        }

        let cycles = (0..num_cycles)
            .map(|_| self.create_cycle(rng))
            .collect::<SynthResult<Vec<_>>>()?;
        let views: Vec<_> = cycles.iter().map(|c| c.view()).collect();

        let series = concatenate(Axis(0), &views)
            .map_err(|e| SynthError::ShapeMismatch(e.to_string()))?;

        debug!(
            cycles = num_cycles,
            rows = series.nrows(),
            cols = series.ncols(),
            "synthesized series"
        );

        Ok(series)
    }
}

/// Random model plus series, as configured
///
/// The RNG is seeded from `config.seed` when present, otherwise from OS
/// entropy.
pub fn generate_time_series(config: &GeneratorConfig) -> SynthResult<Array2<f64>> {
    config.validate()?;
    let mut rng = config.rng();

    let system = LinearSystem::random(config.dimension, &mut rng)?;
    let synthesizer = SeriesSynthesizer::new(system, config.synthesis())?;

    info!(
        dimension = config.dimension,
        cycles = config.num_cycles,
        noise = config.noise,
        "generating time series"
    );

    synthesizer.create_series(config.num_cycles, &mut rng)
}
