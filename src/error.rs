use thiserror::Error;

/// Main error type for tensor construction and arithmetic
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// A sequence-based constructor received nothing to build from
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Declared or implied extents disagree with the data
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Integer division by zero; float division follows IEEE and never errors
    #[error("Division by zero in integer arithmetic")]
    DivisionByZero,
}

impl TensorError {
    /// Create a shape error describing expected vs. actual extents
    pub fn shape_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        TensorError::ShapeMismatch(format!("expected {}, got {}", expected.into(), got.into()))
    }

    /// Create an empty-input error naming the offending constructor input
    pub fn empty_input(what: impl Into<String>) -> Self {
        TensorError::EmptyInput(what.into())
    }
}

/// Result type for tensor operations
pub type TensorResult<T> = Result<T, TensorError>;
