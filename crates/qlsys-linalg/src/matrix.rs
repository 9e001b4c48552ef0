//! Dense complex matrices and vectors.
//!
//! Systems are stored as `ndarray` arrays of [`Complex64`]. Real-valued
//! inputs are lifted with [`real_matrix`] / [`real_vector`].

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{LinalgError, LinalgResult};

/// A dense complex matrix, row-major.
pub type Matrix = Array2<Complex64>;

/// A dense complex vector.
pub type Vector = Array1<Complex64>;

/// Default entry-wise tolerance for the Hermiticity check.
pub const HERMITIAN_TOLERANCE: f64 = 1e-10;

/// Smallest register dimension accepted by the eigenvalue-estimation stage.
pub const MIN_REGISTER_DIM: usize = 2;

/// Build a matrix from nested rows.
///
/// All rows must have the same length as the first one. The result need not
/// be square; squareness is checked by the operations that need it.
pub fn matrix_from_rows(rows: Vec<Vec<Complex64>>) -> LinalgResult<Matrix> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);

    let mut flat = Vec::with_capacity(n_rows * n_cols);
    for row in rows {
        if row.len() != n_cols {
            return Err(LinalgError::mismatch("matrix row", n_cols, row.len()));
        }
        flat.extend(row);
    }

    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|_| LinalgError::mismatch("matrix storage", n_rows * n_cols, 0))
}

/// Build a complex matrix from real rows.
pub fn real_matrix(rows: &[&[f64]]) -> LinalgResult<Matrix> {
    matrix_from_rows(
        rows.iter()
            .map(|row| row.iter().map(|&x| Complex64::new(x, 0.0)).collect())
            .collect(),
    )
}

/// Build a complex vector from real values.
pub fn real_vector(values: &[f64]) -> Vector {
    values.iter().map(|&x| Complex64::new(x, 0.0)).collect()
}

/// Conjugate transpose A†.
pub fn adjoint(matrix: &Matrix) -> Matrix {
    matrix.t().mapv(|z| z.conj())
}

/// Largest entry-wise deviation |A[i,j] - conj(A[j,i])|.
///
/// Returns `f64::INFINITY` for non-square input or any non-finite entry pair.
pub fn hermitian_deviation(matrix: &Matrix) -> f64 {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return f64::INFINITY;
    }
    let mut worst = 0.0_f64;
    for i in 0..rows {
        for j in i..cols {
            let d = (matrix[[i, j]] - matrix[[j, i]].conj()).norm();
            if !d.is_finite() {
                return f64::INFINITY;
            }
            worst = worst.max(d);
        }
    }
    worst
}

/// True if `matrix` equals its conjugate transpose within `tol`.
pub fn is_hermitian(matrix: &Matrix, tol: f64) -> bool {
    hermitian_deviation(matrix) <= tol
}

/// True if `dim` is a register size the solver accepts: `2^k` with `k ≥ 1`.
pub fn is_register_dimension(dim: usize) -> bool {
    dim >= MIN_REGISTER_DIM && dim.is_power_of_two()
}

/// Smallest register size `2^k ≥ max(dim, 2)`.
pub fn register_dimension(dim: usize) -> usize {
    dim.max(MIN_REGISTER_DIM).next_power_of_two()
}

/// Euclidean norm of a complex vector.
pub fn norm(vector: &Vector) -> f64 {
    vector.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt()
}

/// Check that `matrix` is a non-empty square matrix and return its dimension.
pub(crate) fn square_dim(matrix: &Matrix) -> LinalgResult<usize> {
    let (rows, cols) = matrix.dim();
    if rows == 0 {
        return Err(LinalgError::mismatch("matrix rows", 1, 0));
    }
    if rows != cols {
        return Err(LinalgError::mismatch("matrix columns", rows, cols));
    }
    Ok(rows)
}

/// Check that `vector` matches a system of dimension `n`.
pub(crate) fn check_rhs(vector: &Vector, n: usize) -> LinalgResult<()> {
    if vector.len() != n {
        return Err(LinalgError::mismatch("vector length", n, vector.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_rejected() {
        let err = real_matrix(&[&[1.0, 2.0], &[3.0]]).unwrap_err();
        assert!(matches!(
            err,
            LinalgError::DimensionMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_adjoint_conjugates_and_transposes() {
        let m = matrix_from_rows(vec![
            vec![Complex64::new(1.0, 1.0), Complex64::new(2.0, -3.0)],
            vec![Complex64::new(0.0, 4.0), Complex64::new(5.0, 0.0)],
        ])
        .unwrap();
        let a = adjoint(&m);
        assert_eq!(a[[0, 1]], Complex64::new(0.0, -4.0));
        assert_eq!(a[[1, 0]], Complex64::new(2.0, 3.0));
        assert_eq!(a[[0, 0]], Complex64::new(1.0, -1.0));
    }

    #[test]
    fn test_hermitian_detection() {
        let h = matrix_from_rows(vec![
            vec![Complex64::new(2.0, 0.0), Complex64::new(1.0, -1.0)],
            vec![Complex64::new(1.0, 1.0), Complex64::new(3.0, 0.0)],
        ])
        .unwrap();
        assert!(is_hermitian(&h, HERMITIAN_TOLERANCE));

        // Symmetric but complex: not Hermitian.
        let s = matrix_from_rows(vec![
            vec![Complex64::new(2.0, 0.0), Complex64::new(1.0, 1.0)],
            vec![Complex64::new(1.0, 1.0), Complex64::new(3.0, 0.0)],
        ])
        .unwrap();
        assert!(!is_hermitian(&s, HERMITIAN_TOLERANCE));

        // Imaginary diagonal breaks Hermiticity.
        let d = matrix_from_rows(vec![vec![Complex64::new(1.0, 0.5)]]).unwrap();
        assert!(!is_hermitian(&d, HERMITIAN_TOLERANCE));
    }

    #[test]
    fn test_non_square_never_hermitian() {
        let m = real_matrix(&[&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]]).unwrap();
        assert!(hermitian_deviation(&m).is_infinite());
    }

    #[test]
    fn test_nan_entry_never_hermitian() {
        let m = real_matrix(&[&[1.0, f64::NAN], &[f64::NAN, 1.0]]).unwrap();
        assert!(hermitian_deviation(&m).is_infinite());
        assert!(!is_hermitian(&m, HERMITIAN_TOLERANCE));

        let diag = real_matrix(&[&[f64::NAN, 0.0], &[0.0, 1.0]]).unwrap();
        assert!(!is_hermitian(&diag, f64::MAX));
    }

    #[test]
    fn test_register_dimension() {
        assert!(!is_register_dimension(0));
        assert!(!is_register_dimension(1));
        assert!(is_register_dimension(2));
        assert!(!is_register_dimension(3));
        assert!(is_register_dimension(8));
        assert_eq!(register_dimension(1), 2);
        assert_eq!(register_dimension(3), 4);
        assert_eq!(register_dimension(4), 4);
        assert_eq!(register_dimension(9), 16);
    }
}
