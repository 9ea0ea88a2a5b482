//! Error types for symbolic condensation

use thiserror::Error;

/// Main error type for condensation operations
#[derive(Error, Debug)]
pub enum CondenseError {
    #[error("System size must be a positive integer, got {0}")]
    InvalidSize(usize),

    #[error("Hinge indices must be given in ascending order, got {0:?}")]
    UnsortedHinges(Vec<usize>),

    #[error("Hinge index {0} is given more than once")]
    DuplicateHinge(usize),

    #[error("Hinge index {index} is out of range for a system of size {size}")]
    HingeOutOfRange { index: usize, size: usize },

    #[error("All {0} degrees of freedom are hinged - at least one must be retained")]
    NoRetainedDofs(usize),

    #[error("Singular hinge block - the hinged degrees of freedom cannot be eliminated")]
    SingularHingeBlock,

    #[error("Stiffness matrix is not symmetric at ({0}, {1})")]
    NotSymmetric(usize, usize),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Element '{element}' has {expected} degrees of freedom, but size is {size}")]
    ElementSizeMismatch {
        element: String,
        expected: usize,
        size: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for condensation operations
pub type CondenseResult<T> = Result<T, CondenseError>;
