//! Generation run configuration
//!
//! Everything a run needs, loadable from JSON. Missing fields take their
//! defaults, so `{}` is a valid configuration.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cycles::{plane_count, CarnotParams, CycleComposer, EllipseParams, PlanePolicy};
use crate::error::{SynthError, SynthResult};
use crate::logging::LogConfig;
use crate::series::SynthesisConfig;
use crate::systems::{validate_noise, Steps};

/// Configuration of one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// State dimension n (even); observations have 2n columns
    pub dimension: usize,
    /// Number of cycles in the series
    pub num_cycles: usize,
    /// Standard deviation of waypoint noise
    pub noise: f64,
    /// RNG seed; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Sub-steps between consecutive waypoints
    pub steps_per_segment: Steps,
    /// Carnot-like loop shape
    pub carnot: CarnotParams,
    /// Double-ellipse loop shape
    pub ellipse: EllipseParams,
    /// Plane-kind policy
    pub policy: PlanePolicy,
    /// Logging setup for binaries
    pub log: LogConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dimension: 10,
            num_cycles: 1,
            noise: 0.3,
            seed: None,
            steps_per_segment: Steps::Uniform(1),
            carnot: CarnotParams::default(),
            ellipse: EllipseParams::default(),
            policy: PlanePolicy::default(),
            log: LogConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> SynthResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> SynthResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check everything that can be checked without a model
    pub fn validate(&self) -> SynthResult<()> {
        plane_count(self.dimension)?;
        validate_noise(self.noise)?;
        self.steps_per_segment.validate()?;
        self.policy.validate(self.dimension)?;

        if self.carnot.num_points < 6 {
            return Err(SynthError::InvalidParameter(format!(
                "Carnot loop needs at least 6 points, got {}",
                self.carnot.num_points
            )));
        }
        if self.ellipse.num_points < 2 {
            return Err(SynthError::InvalidParameter(format!(
                "ellipse needs at least 2 points, got {}",
                self.ellipse.num_points
            )));
        }
        Ok(())
    }

    /// Seeded RNG when `seed` is set, entropy-seeded otherwise
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Settings handed to the synthesizer
    pub fn synthesis(&self) -> SynthesisConfig {
        SynthesisConfig {
            noise: self.noise,
            steps: self.steps_per_segment.clone(),
            composer: CycleComposer::new(
                self.carnot.clone(),
                self.ellipse.clone(),
                self.policy.clone(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycles::PlaneKind;

    #[test]
    fn test_empty_json_is_default() {
        let config = GeneratorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_overrides() {
        let json = r#"{
            "dimension": 4,
            "noise": 0.0,
            "seed": 99,
            "steps_per_segment": 3,
            "ellipse": { "r1": 1.0, "r2": 5.0, "center": [2.0, 2.0], "num_points": 120 },
            "policy": { "kind": "explicit", "planes": ["carnot", "double_ellipse"] }
        }"#;
        let config = GeneratorConfig::from_json_str(json).unwrap();

        assert_eq!(config.dimension, 4);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.steps_per_segment, Steps::Uniform(3));
        assert_eq!(config.ellipse.r2, 5.0);
        assert_eq!(
            config.policy,
            PlanePolicy::Explicit {
                planes: vec![PlaneKind::Carnot, PlaneKind::DoubleEllipse]
            }
        );
        assert!(config.validate().is_ok());

        let synthesis = config.synthesis();
        assert_eq!(synthesis.noise, 0.0);
        assert_eq!(synthesis.composer.ellipse.center, [2.0, 2.0]);
    }

    #[test]
    fn test_per_segment_steps_from_json() {
        let config = GeneratorConfig::from_json_str(r#"{ "steps_per_segment": [1, 2, 3] }"#).unwrap();
        assert_eq!(config.steps_per_segment, Steps::PerSegment(vec![1, 2, 3]));
    }

    #[test]
    fn test_validation_failures() {
        let odd = GeneratorConfig {
            dimension: 7,
            ..GeneratorConfig::default()
        };
        assert!(matches!(odd.validate(), Err(SynthError::InvalidParameter(_))));

        let noisy = GeneratorConfig {
            noise: f64::NAN,
            ..GeneratorConfig::default()
        };
        assert!(matches!(noisy.validate(), Err(SynthError::InvalidParameter(_))));

        assert!(matches!(
            GeneratorConfig::from_json_str("{ \"dimension\": \"ten\" }"),
            Err(SynthError::Json(_))
        ));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;

        let config = GeneratorConfig {
            seed: Some(5),
            ..GeneratorConfig::default()
        };
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_synthesis_settings() {
        let synthesis = GeneratorConfig::default().synthesis();
        assert_eq!(synthesis, SynthesisConfig::default());
        assert_eq!(synthesis.composer, CycleComposer::default());
    }
}
