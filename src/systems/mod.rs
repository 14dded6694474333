//! Systems Module: Controlled Linear Dynamics
//!
//! - **LinearSystem**: x' = A·x + B·u with exact control inversion
//! - **ControlledSystem**: replay/verification API shared by models
//!
//! The model is the only stateful numeric object of a generation run;
//! waypoints and trajectories passing through it are transient.

mod linalg;
mod linear;
mod traits;

pub use linalg::{invert, SINGULAR_TOLERANCE};
pub use linear::{validate_noise, LinearSystem, Steps, Trajectory};
pub use traits::ControlledSystem;
