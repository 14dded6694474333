//! Series Module: Labeled Observation Streams
//!
//! Repeats cycle composition and path evolution to produce a dense
//! [time × 2n] table of state-and-control observations.

mod synthesizer;

pub use synthesizer::{generate_time_series, SeriesSynthesizer, SynthesisConfig};
