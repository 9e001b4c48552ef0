//! Linear-system normalization for register-based eigenvalue solvers.
//!
//! Eigenvalue-estimation solvers only accept a Hermitian matrix whose
//! dimension is a power of two (at least 2). [`Normalizer`] maps an arbitrary
//! square system `A x = b` onto such a system and records what it changed so
//! the solution can be cut back down with [`NormalizationResult::restore`].
//!
//! Two structural adjustments are applied, in order:
//!
//! 1. **Hermitian embedding.** A non-Hermitian `A` (size `n`) becomes
//!
//!    ```text
//!    H = | 0   A |      b' = | b |
//!        | A†  0 |           | 0 |
//!    ```
//!
//!    `H [y; x] = [b; 0]` gives `A x = b`, so the original unknowns sit in the
//!    second half of the doubled solution.
//!
//! 2. **Register padding.** A dimension `m` that is not `2^k` (or is 1) is
//!    padded with an identity block and zero right-hand side up to the next
//!    power of two. The padded unknowns solve `I z = 0` and are always zero.
//!
//! # Example
//!
//! ```rust
//! use qlsys_linalg::{normalize, real_matrix, real_vector};
//!
//! let a = real_matrix(&[&[1.0, 0.0], &[0.0, 2.0]]).unwrap();
//! let b = real_vector(&[1.0, 4.0]);
//!
//! let result = normalize(&a, &b).unwrap();
//! assert!(!result.truncate_hermitian);
//! assert!(!result.truncate_powerdim);
//! assert_eq!(result.matrix, a);
//! ```

use ndarray::{Array1, Array2, s};
use num_complex::Complex64;
use tracing::debug;

use crate::error::{LinalgError, LinalgResult};
use crate::matrix::{
    HERMITIAN_TOLERANCE, Matrix, Vector, adjoint, check_rhs, hermitian_deviation,
    is_register_dimension, register_dimension, square_dim,
};

/// Output of [`Normalizer::normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationResult {
    /// Hermitian matrix with power-of-two dimension.
    pub matrix: Matrix,
    /// Right-hand side matching `matrix`.
    pub vector: Vector,
    /// The matrix was padded to reach a power-of-two dimension.
    pub truncate_powerdim: bool,
    /// The matrix was not Hermitian and was embedded into a doubled system.
    pub truncate_hermitian: bool,
    /// Dimension `n` of the system before normalization.
    pub original_dim: usize,
}

impl NormalizationResult {
    /// Dimension of the normalized system.
    pub fn dim(&self) -> usize {
        self.vector.len()
    }

    /// True if the input was returned unchanged.
    pub fn is_unchanged(&self) -> bool {
        !self.truncate_powerdim && !self.truncate_hermitian
    }

    /// Dimension after the Hermitian embedding but before padding.
    fn embedded_dim(&self) -> usize {
        if self.truncate_hermitian {
            2 * self.original_dim
        } else {
            self.original_dim
        }
    }

    /// Map a solution of the normalized system back onto the original unknowns.
    ///
    /// Drops the padded tail first, then keeps the half of the Hermitian
    /// embedding that carries `x`. The input must have length [`Self::dim`].
    pub fn restore(&self, solution: &Vector) -> LinalgResult<Vector> {
        if solution.len() != self.dim() {
            return Err(LinalgError::mismatch(
                "solution length",
                self.dim(),
                solution.len(),
            ));
        }

        let mut restored = solution.clone();
        if self.truncate_powerdim {
            restored = restored.slice(s![..self.embedded_dim()]).to_owned();
        }
        if self.truncate_hermitian {
            let n = self.original_dim;
            restored = restored.slice(s![n..2 * n]).to_owned();
        }
        Ok(restored)
    }
}

/// Prepares linear systems for a Hermitian, power-of-two eigenvalue solver.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    /// Entry-wise tolerance used to decide Hermiticity.
    pub tolerance: f64,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            tolerance: HERMITIAN_TOLERANCE,
        }
    }
}

impl Normalizer {
    /// Create a normalizer with the default Hermiticity tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Hermiticity tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Normalize `A x = b`.
    ///
    /// Fails with [`LinalgError::DimensionMismatch`] if `matrix` is empty or
    /// not square, or if `vector` does not match its dimension. Singular
    /// matrices are passed through; invertibility is not checked here.
    pub fn normalize(&self, matrix: &Matrix, vector: &Vector) -> LinalgResult<NormalizationResult> {
        let n = square_dim(matrix)?;
        check_rhs(vector, n)?;

        let mut out_matrix = matrix.clone();
        let mut out_vector = vector.clone();

        let deviation = hermitian_deviation(matrix);
        let truncate_hermitian = deviation > self.tolerance;
        if truncate_hermitian {
            debug!(n, deviation, "embedding non-Hermitian matrix");
            out_matrix = hermitian_embedding(matrix);
            out_vector = pad_zeros(vector, 2 * n);
        }

        let m = out_vector.len();
        let truncate_powerdim = !is_register_dimension(m);
        if truncate_powerdim {
            let target = register_dimension(m);
            debug!(from = m, to = target, "padding to register dimension");
            out_matrix = pad_identity(&out_matrix, target);
            out_vector = pad_zeros(&out_vector, target);
        }

        Ok(NormalizationResult {
            matrix: out_matrix,
            vector: out_vector,
            truncate_powerdim,
            truncate_hermitian,
            original_dim: n,
        })
    }
}

/// Normalize with the default tolerance. See [`Normalizer::normalize`].
pub fn normalize(matrix: &Matrix, vector: &Vector) -> LinalgResult<NormalizationResult> {
    Normalizer::new().normalize(matrix, vector)
}

/// `[[0, A], [A†, 0]]`.
fn hermitian_embedding(matrix: &Matrix) -> Matrix {
    let n = matrix.nrows();
    let mut h = Array2::<Complex64>::zeros((2 * n, 2 * n));
    h.slice_mut(s![..n, n..]).assign(matrix);
    h.slice_mut(s![n.., ..n]).assign(&adjoint(matrix));
    h
}

/// Block-diagonal `diag(A, I)` of size `target`.
fn pad_identity(matrix: &Matrix, target: usize) -> Matrix {
    let m = matrix.nrows();
    let mut padded = Array2::<Complex64>::eye(target);
    padded.slice_mut(s![..m, ..m]).assign(matrix);
    padded
}

fn pad_zeros(vector: &Vector, target: usize) -> Vector {
    let mut padded = Array1::<Complex64>::zeros(target);
    padded.slice_mut(s![..vector.len()]).assign(vector);
    padded
}
