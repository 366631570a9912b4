//! Error types for tensa-ml

use tensa_core::TensorError;
use thiserror::Error;

/// Result type for tensa-ml operations
pub type Result<T> = std::result::Result<T, TensaMlError>;

/// tensa-ml error types
#[derive(Error, Debug)]
pub enum TensaMlError {
    #[error(transparent)]
    Tensor(#[from] TensorError),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Parameter/gradient count mismatch: {params} parameters, {grads} gradients")]
    ParameterCountMismatch { params: usize, grads: usize },

    #[error("Parameter set changed between optimizer steps: {0}")]
    ParameterSetChanged(String),

    #[error("Transform not fitted: {0}")]
    NotFitted(String),

    #[error("Length mismatch: {0}")]
    LengthMismatch(String),

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for TensaMlError {
    fn from(err: serde_json::Error) -> Self {
        TensaMlError::SerializationError(err.to_string())
    }
}
