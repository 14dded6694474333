//! # LTI-Cycle-Synth
//!
//! Synthetic Multi-Sensor Streams from Linear Systems Driven Through
//! Closed Reference Cycles
//!
//! ## Model
//!
//! An unknown plant is represented by a discrete-time linear system
//!
//!   x[k+1] = A·x[k] + B·u[k],   A, B ∈ ℝⁿˣⁿ,  B invertible
//!
//! The state is steered along a reference loop by solving, at every step,
//! for the unique control that lands exactly on the next reference point.
//! Each emitted observation is the pair (x[k], u[k]), giving 2n sensor
//! channels per time step.
//!
//! ## Reference Loops
//!
//! The n-dimensional state is cut into n/2 planes. Each plane traces a
//! closed 2D loop:
//!
//! - **Carnot-like**: exponential expansion, isobar, exponential
//!   compression, return line
//! - **Double ellipse**: two ellipses through one point with swapped radii
//!
//! The loops run side by side, one row per waypoint. Waypoints are jittered
//! with Gaussian noise before the controls are solved, so no two cycles are
//! identical while the underlying dynamics stay fixed.
//!
//! ## Pipeline
//!
//! ```text
//!  curves ──► cycles ──► waypoints ──► LinearSystem::make_path ──► [x | u] rows
//!                                                              └─► series (C cycles)
//! ```
//!
//! All randomness is drawn from an RNG passed in by the caller.

pub mod config;
pub mod curves;
pub mod cycles;
pub mod error;
pub mod logging;
pub mod output;
pub mod series;
pub mod systems;

pub use error::{SynthError, SynthResult};

// Re-exports from systems
pub use systems::{
    ControlledSystem,
    LinearSystem,
    Steps,
    Trajectory,
};

// Re-exports from curves
pub use curves::{
    ellipse,
    exp_arc,
    line,
    Point2,
    Points,
};

// Re-exports from cycles
pub use cycles::{
    carnot_cycle,
    double_ellipse_cycle,
    CarnotParams,
    CycleComposer,
    EllipseParams,
    PlaneKind,
    PlanePolicy,
};

// Re-exports from series
pub use series::{
    generate_time_series,
    SeriesSynthesizer,
    SynthesisConfig,
};

pub use config::GeneratorConfig;
