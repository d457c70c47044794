use thiserror::Error;

/// Errors raised by the microstate sampling engine.
///
/// Every variant is raised synchronously at the point of detection;
/// construction and validation are fail-fast and leave no partially usable
/// object behind. Unusual but workable thread counts are reported as stderr
/// warnings instead.
#[derive(Debug, Error)]
pub enum MicrostateError {
    /// Invalid microstate structure, storage strategy, or sampling bounds.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Incompatible dataset shapes, or a dataset/window dimensionality mismatch.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A recurrence test required a parameter that was not supplied.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    /// The run finished without collecting a single valid sample.
    #[error("estimation failed: {0}")]
    Estimation(&'static str),

    /// A coordinate tuple does not match the tensor shape.
    #[error("index error: {0}")]
    Index(String),
}

pub type Result<T> = core::result::Result<T, MicrostateError>;
