//! Error types for the linalg crate.

use thiserror::Error;

/// Errors produced by normalization and the dense linear-algebra helpers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LinalgError {
    /// Shapes of the inputs do not describe a square system.
    #[error("Dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Which input the mismatch was found in.
        context: &'static str,
        /// The dimension the operation required.
        expected: usize,
        /// The dimension actually supplied.
        got: usize,
    },

    /// The system matrix is singular to working precision.
    #[error("Matrix is singular: pivot {pivot:.3e} in column {column}")]
    Singular {
        /// Column at which elimination broke down.
        column: usize,
        /// Magnitude of the best available pivot.
        pivot: f64,
    },

    /// An operation that needs a Hermitian matrix was given a non-Hermitian one.
    #[error("Matrix is not Hermitian (max deviation {deviation:.3e})")]
    NotHermitian {
        /// Largest entry-wise |A - A†|.
        deviation: f64,
    },

    /// The eigensolver did not converge.
    #[error("Eigendecomposition of a {dim}x{dim} matrix did not converge")]
    NoConvergence {
        /// Dimension of the matrix.
        dim: usize,
    },

    /// A scalar argument is outside its valid range.
    #[error("Invalid {name}: {value}")]
    InvalidParameter {
        /// Which argument was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl LinalgError {
    pub(crate) fn mismatch(context: &'static str, expected: usize, got: usize) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            got,
        }
    }
}

/// Result type for linalg operations.
pub type LinalgResult<T> = Result<T, LinalgError>;
