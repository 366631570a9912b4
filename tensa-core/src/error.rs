//! Error types for tensa-core

use thiserror::Error;

/// Result type for tensa-core operations
pub type Result<T> = std::result::Result<T, TensorError>;

/// tensa-core error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Index arity mismatch: tensor has rank {rank}, got {arity} indices")]
    IndexArity { rank: usize, arity: usize },

    #[error("Index {index} out of range for dimension {dim} of size {size}")]
    IndexOutOfRange {
        index: usize,
        dim: usize,
        size: usize,
    },

    #[error("Rank mismatch: expected rank {expected}, got {actual}")]
    RankMismatch { expected: usize, actual: usize },

    #[error("Incompatible dimensions: {0}")]
    IncompatibleDimensions(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Format a shape for error messages
pub(crate) fn shape_string(shape: &[usize]) -> String {
    let dims: Vec<String> = shape.iter().map(|d| d.to_string()).collect();
    format!("[{}]", dims.join(", "))
}
