//! Hermitian eigendecomposition.
//!
//! [`HermitianSpectrum`] holds `A = U diag(λ) U†` with real eigenvalues in
//! ascending order and orthonormal complex eigenvectors, computed by `faer`'s
//! self-adjoint eigensolver.

use faer::Side;
use ndarray::Array1;
use tracing::trace;

use crate::dense::{from_faer, to_faer};
use crate::error::{LinalgError, LinalgResult};
use crate::matrix::{
    HERMITIAN_TOLERANCE, Matrix, Vector, adjoint, check_rhs, hermitian_deviation, square_dim,
};

/// Spectral decomposition of a Hermitian matrix.
#[derive(Debug, Clone)]
pub struct HermitianSpectrum {
    values: Array1<f64>,
    vectors: Matrix,
}

impl HermitianSpectrum {
    /// Decompose a Hermitian matrix.
    ///
    /// Fails with [`LinalgError::NotHermitian`] beyond [`HERMITIAN_TOLERANCE`].
    pub fn new(matrix: &Matrix) -> LinalgResult<Self> {
        Self::with_tolerance(matrix, HERMITIAN_TOLERANCE)
    }

    /// Decompose a matrix that is Hermitian within `tolerance`.
    ///
    /// Only the lower triangle is read, so a matrix slightly off Hermitian is
    /// decomposed as its lower-triangle reflection.
    pub fn with_tolerance(matrix: &Matrix, tolerance: f64) -> LinalgResult<Self> {
        let n = square_dim(matrix)?;
        let deviation = hermitian_deviation(matrix);
        if deviation > tolerance {
            return Err(LinalgError::NotHermitian { deviation });
        }

        let evd = to_faer(matrix)
            .self_adjoint_eigen(Side::Lower)
            .map_err(|_| LinalgError::NoConvergence { dim: n })?;
        let s = evd.S().column_vector();
        let u = evd.U();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| s[a].re.total_cmp(&s[b].re));

        let values: Array1<f64> = order.iter().map(|&k| s[k].re).collect();
        let vectors = Matrix::from_shape_fn((n, n), |(i, j)| from_faer(&u[(i, order[j])]));
        trace!(n, "Hermitian eigendecomposition complete");

        Ok(Self { values, vectors })
    }

    /// Dimension `n` of the Hermitian matrix.
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// The `n` eigenvalues, ascending, with multiplicity.
    pub fn eigenvalues(&self) -> Vec<f64> {
        self.values.to_vec()
    }

    /// Orthonormal eigenvectors, one per column, ordered like the eigenvalues.
    pub fn eigenvectors(&self) -> &Matrix {
        &self.vectors
    }

    /// Coefficients `U† b` of `b` over the eigenbasis.
    ///
    /// For a unit `b` the squared magnitudes sum to 1.
    pub fn coefficients(&self, vector: &Vector) -> LinalgResult<Vector> {
        check_rhs(vector, self.dim())?;
        Ok(adjoint(&self.vectors).dot(vector))
    }

    /// Reassemble `U c` from eigenbasis coefficients.
    pub fn synthesize(&self, coefficients: &Vector) -> LinalgResult<Vector> {
        if coefficients.len() != self.dim() {
            return Err(LinalgError::mismatch(
                "coefficient count",
                self.dim(),
                coefficients.len(),
            ));
        }
        Ok(self.vectors.dot(coefficients))
    }

    /// Apply `f(A)` to `b`, with `f` evaluated on every eigenvalue.
    pub fn apply<F>(&self, vector: &Vector, f: F) -> LinalgResult<Vector>
    where
        F: Fn(f64) -> f64,
    {
        let mut coeffs = self.coefficients(vector)?;
        for (c, &lambda) in coeffs.iter_mut().zip(self.values.iter()) {
            *c *= f(lambda);
        }
        self.synthesize(&coeffs)
    }

    /// `|λ|max / |λ|min`; infinite for a singular matrix.
    pub fn condition_number(&self) -> f64 {
        let (min, max) = self
            .values
            .iter()
            .map(|l| l.abs())
            .fold((f64::INFINITY, 0.0_f64), |(lo, hi), a| (lo.min(a), hi.max(a)));
        if min == 0.0 { f64::INFINITY } else { max / min }
    }
}

/// Eigenvalues of a Hermitian matrix, ascending.
pub fn eigvalsh(matrix: &Matrix) -> LinalgResult<Vec<f64>> {
    Ok(HermitianSpectrum::new(matrix)?.eigenvalues())
}

/// Condition number of a Hermitian matrix.
pub fn condition_number(matrix: &Matrix) -> LinalgResult<f64> {
    Ok(HermitianSpectrum::new(matrix)?.condition_number())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{matrix_from_rows, real_matrix, real_vector};
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    #[test]
    fn test_symmetric_2x2() {
        let a = real_matrix(&[&[2.0, 1.0], &[1.0, 2.0]]).unwrap();
        let spectrum = HermitianSpectrum::new(&a).unwrap();
        let values = spectrum.eigenvalues();
        assert_relative_eq!(values[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(values[1], 3.0, epsilon = 1e-12);

        // A u = λ u for each column.
        for k in 0..2 {
            let u = spectrum.eigenvectors().column(k).to_owned();
            let au = a.dot(&u);
            for i in 0..2 {
                assert_relative_eq!(au[i].re, values[k] * u[i].re, epsilon = 1e-12);
                assert_relative_eq!(au[i].im, values[k] * u[i].im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_complex_hermitian_eigenvalues() {
        // [[2, -i], [i, 2]] has eigenvalues 1 and 3.
        let i = Complex64::new(0.0, 1.0);
        let two = Complex64::new(2.0, 0.0);
        let a = matrix_from_rows(vec![vec![two, -i], vec![i, two]]).unwrap();
        let values = eigvalsh(&a).unwrap();
        assert_eq!(values.len(), 2);
        assert_relative_eq!(values[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(values[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_eigenvalues_ascending_with_negative() {
        let a = real_matrix(&[&[1.0, 3.0], &[3.0, 2.0]]).unwrap();
        let values = eigvalsh(&a).unwrap();
        let root = 37.0_f64.sqrt();
        assert_relative_eq!(values[0], (3.0 - root) / 2.0, epsilon = 1e-12);
        assert_relative_eq!(values[1], (3.0 + root) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_apply_inverse_matches_solution() {
        let a = real_matrix(&[&[1.0, 3.0], &[3.0, 2.0]]).unwrap();
        let b = real_vector(&[1.0, 1.0]);
        let spectrum = HermitianSpectrum::new(&a).unwrap();
        let x = spectrum.apply(&b, |l| 1.0 / l).unwrap();
        let ax = a.dot(&x);
        for k in 0..2 {
            assert_relative_eq!(ax[k].re, b[k].re, epsilon = 1e-10);
            assert_relative_eq!(ax[k].im, 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_coefficients_are_unit_for_unit_vector() {
        let a = real_matrix(&[&[4.0, 1.0, 0.0], &[1.0, 3.0, 1.0], &[0.0, 1.0, 2.0]]).unwrap();
        let b = real_vector(&[0.6, 0.0, 0.8]);
        let spectrum = HermitianSpectrum::new(&a).unwrap();
        let coeffs = spectrum.coefficients(&b).unwrap();
        assert_relative_eq!(coeffs.iter().map(|c| c.norm_sqr()).sum::<f64>(), 1.0, epsilon = 1e-12);

        let back = spectrum.synthesize(&coeffs).unwrap();
        for k in 0..3 {
            assert_relative_eq!(back[k].re, b[k].re, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_condition_number() {
        let a = real_matrix(&[&[1.0, 0.0], &[0.0, 4.0]]).unwrap();
        assert_relative_eq!(condition_number(&a).unwrap(), 4.0, epsilon = 1e-12);

        let singular = real_matrix(&[&[1.0, 0.0], &[0.0, 0.0]]).unwrap();
        assert!(condition_number(&singular).unwrap().is_infinite());
    }

    #[test]
    fn test_rejects_non_hermitian() {
        let a = real_matrix(&[&[1.0, 2.0], &[0.0, 1.0]]).unwrap();
        assert!(matches!(
            HermitianSpectrum::new(&a),
            Err(LinalgError::NotHermitian { .. })
        ));
        assert!(matches!(
            HermitianSpectrum::new(&real_matrix(&[&[1.0, 2.0]]).unwrap()),
            Err(LinalgError::DimensionMismatch { .. })
        ));
    }
}
