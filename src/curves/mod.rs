//! Curves Module: Planar Reference Curves
//!
//! Pure generators over 2D points. Every generator returns an `N×2`
//! table, one point per row, in traversal order:
//!
//! - **line**: uniform interpolation, both endpoints included
//! - **exp_arc**: exponential leg rescaled onto two endpoints
//! - **ellipse**: full parametric turn anchored at a given point

mod generators;

pub use generators::{
    ellipse,
    exp_arc,
    exp_arc_with_range,
    line,
    linspace,
    DEFAULT_EXP_RANGE,
};

/// Ordered point table, one point per row
pub type Points = ndarray::Array2<f64>;

/// A point in the plane
pub type Point2 = [f64; 2];
