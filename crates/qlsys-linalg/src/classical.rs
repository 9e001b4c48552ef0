//! Classical reference solver and state comparison.

use faer::prelude::Solve;
use num_complex::Complex64;
use tracing::trace;

use crate::dense::{column_to_faer, from_faer, to_faer};
use crate::error::{LinalgError, LinalgResult};
use crate::matrix::{Matrix, Vector, check_rhs, norm, square_dim};

/// Relative pivot threshold below which a matrix is treated as singular.
const SINGULAR_RTOL: f64 = 1e-12;

/// Solve `A x = b` through an LU factorization with partial pivoting.
///
/// Returns [`LinalgError::Singular`] when a pivot of `U` is negligible
/// relative to the largest entry of `A`.
pub fn solve(matrix: &Matrix, vector: &Vector) -> LinalgResult<Vector> {
    let n = square_dim(matrix)?;
    check_rhs(vector, n)?;

    let scale = matrix.iter().map(|z| z.norm()).fold(0.0_f64, f64::max);
    let threshold = SINGULAR_RTOL * scale.max(f64::MIN_POSITIVE);

    let lu = to_faer(matrix).partial_piv_lu();
    let u = lu.U();
    for column in 0..n {
        let pivot = from_faer(&u[(column, column)]).norm();
        if !(pivot > threshold) {
            return Err(LinalgError::Singular { column, pivot });
        }
    }

    let x = lu.solve(&column_to_faer(vector));
    trace!(n, "classical solve complete");
    Ok((0..n).map(|i| from_faer(&x[(i, 0)])).collect())
}

/// Squared overlap `|⟨â|b̂⟩|²` of two vectors after normalization.
///
/// Returns 0 if either vector is zero. Vectors of different length are
/// compared over the shorter prefix.
pub fn state_fidelity(a: &Vector, b: &Vector) -> f64 {
    let na = norm(a);
    let nb = norm(b);
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    let overlap: Complex64 = a.iter().zip(b.iter()).map(|(x, y)| x.conj() * y).sum();
    (overlap.norm() / (na * nb)).powi(2)
}

/// Euclidean residual `‖A x − b‖`.
pub fn residual(matrix: &Matrix, solution: &Vector, vector: &Vector) -> LinalgResult<f64> {
    let n = square_dim(matrix)?;
    check_rhs(solution, n)?;
    check_rhs(vector, n)?;
    let r = matrix.dot(solution) - vector;
    Ok(norm(&r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{matrix_from_rows, real_matrix, real_vector};
    use approx::assert_relative_eq;

    #[test]
    fn test_solve_diagonal() {
        let a = real_matrix(&[&[1.0, 0.0], &[0.0, 2.0]]).unwrap();
        let x = solve(&a, &real_vector(&[1.0, 4.0])).unwrap();
        assert_relative_eq!(x[0].re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1].re, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_needs_pivoting() {
        let a = real_matrix(&[&[0.0, 1.0], &[1.0, 0.0]]).unwrap();
        let x = solve(&a, &real_vector(&[3.0, 5.0])).unwrap();
        assert_relative_eq!(x[0].re, 5.0, epsilon = 1e-12);
        assert_relative_eq!(x[1].re, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_complex() {
        let i = Complex64::new(0.0, 1.0);
        let one = Complex64::new(1.0, 0.0);
        let a = matrix_from_rows(vec![vec![one, i], vec![-i, 2.0 * one]]).unwrap();
        let b = Vector::from(vec![one + i, one]);
        let x = solve(&a, &b).unwrap();
        assert!(residual(&a, &x, &b).unwrap() < 1e-12);
    }

    #[test]
    fn test_solve_singular() {
        let a = real_matrix(&[&[1.0, 2.0], &[2.0, 4.0]]).unwrap();
        let err = solve(&a, &real_vector(&[1.0, 1.0])).unwrap_err();
        assert!(matches!(err, LinalgError::Singular { column: 1, .. }));
    }

    #[test]
    fn test_solve_zero_matrix_is_singular() {
        let a = real_matrix(&[&[0.0, 0.0], &[0.0, 0.0]]).unwrap();
        assert!(solve(&a, &real_vector(&[1.0, 1.0])).is_err());
    }

    #[test]
    fn test_fidelity_ignores_scale_and_phase() {
        let a = real_vector(&[1.0, 2.0]);
        let b = a.mapv(|z| z * Complex64::new(0.0, -3.0));
        assert_relative_eq!(state_fidelity(&a, &b), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fidelity_orthogonal() {
        let a = real_vector(&[1.0, 0.0]);
        let b = real_vector(&[0.0, 1.0]);
        assert_relative_eq!(state_fidelity(&a, &b), 0.0);
        assert_relative_eq!(state_fidelity(&a, &real_vector(&[0.0, 0.0])), 0.0);
    }
}
