//! Cycles Module: Closed Reference Loops
//!
//! - **Carnot-like**: two exponential arcs joined by two lines, in the
//!   shape of a thermodynamic cycle diagram
//! - **Double ellipse**: two ellipses through a common point with swapped radii
//!
//! The composer assigns one loop per dimension pair and stacks them into
//! full-dimensional waypoints.

mod composer;
mod params;

pub use composer::{
    carnot_cycle,
    double_ellipse_cycle,
    plane_count,
    CycleComposer,
    PlaneKind,
    PlanePolicy,
};
pub use params::{CarnotParams, EllipseParams};
