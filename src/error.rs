//! Error types shared by the model, the composers and the synthesizer.

use thiserror::Error;

/// Root error type for all synthesis failures.
#[derive(Error, Debug)]
pub enum SynthError {
    /// Control matrix has no inverse (or matrices are unusable as a model).
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Sequence lengths or matrix/vector dimensions disagree.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A scalar parameter is out of its admissible range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failure writing output or reading configuration.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure writing a CSV table.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON configuration or record.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SynthResult<T> = Result<T, SynthError>;
