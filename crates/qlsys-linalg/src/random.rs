//! Random test systems.

use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;

use crate::error::{LinalgError, LinalgResult};
use crate::matrix::{Matrix, adjoint};

/// Random Hermitian matrix with eigenvalues in `[lo, hi]`.
///
/// The extreme eigenvalues are pinned to `lo` and `hi` (for `n ≥ 2`), so the
/// condition number is `max(|lo|, |hi|) / min |λ|` by construction. The
/// eigenbasis is a random unitary from Gram-Schmidt on a uniform complex
/// matrix.
///
/// Fails with [`LinalgError::InvalidParameter`] if either bound, or the
/// width of the range, is not finite.
pub fn random_hermitian<R: Rng + ?Sized>(
    n: usize,
    eigen_range: (f64, f64),
    rng: &mut R,
) -> LinalgResult<Matrix> {
    if n == 0 {
        return Err(LinalgError::mismatch("matrix rows", 1, 0));
    }
    for value in [eigen_range.0, eigen_range.1] {
        if !value.is_finite() {
            return Err(LinalgError::InvalidParameter {
                name: "eigenvalue bound",
                value,
            });
        }
    }
    let (lo, hi) = if eigen_range.0 <= eigen_range.1 {
        eigen_range
    } else {
        (eigen_range.1, eigen_range.0)
    };
    if !(hi - lo).is_finite() {
        return Err(LinalgError::InvalidParameter {
            name: "eigenvalue range width",
            value: hi - lo,
        });
    }

    let mut eigenvalues: Vec<f64> = (0..n).map(|_| rng.gen_range(lo..=hi)).collect();
    eigenvalues[0] = lo;
    if n > 1 {
        eigenvalues[n - 1] = hi;
    }

    let q = random_unitary(n, rng);
    let mut scaled = q.clone();
    for (j, &lambda) in eigenvalues.iter().enumerate() {
        scaled.column_mut(j).mapv_inplace(|z| z * lambda);
    }
    let h = scaled.dot(&adjoint(&q));

    // Exact Hermitian symmetry regardless of rounding in the product.
    Ok((&h + &adjoint(&h)).mapv(|z| z * 0.5))
}

/// Random unitary via modified Gram-Schmidt on uniform complex columns.
fn random_unitary<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Matrix {
    let mut q = Array2::<Complex64>::zeros((n, n));
    let mut j = 0;
    while j < n {
        let mut col: Vec<Complex64> = (0..n)
            .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();

        for k in 0..j {
            let proj: Complex64 = (0..n).map(|i| q[[i, k]].conj() * col[i]).sum();
            for (i, entry) in col.iter_mut().enumerate() {
                *entry -= proj * q[[i, k]];
            }
        }

        let len = col.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt();
        if len < 1e-8 {
            // Draw was numerically dependent on earlier columns.
            continue;
        }
        for (i, entry) in col.into_iter().enumerate() {
            q[[i, j]] = entry / len;
        }
        j += 1;
    }
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{HERMITIAN_TOLERANCE, is_hermitian};
    use crate::spectrum::eigvalsh;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_hermitian_is_hermitian() {
        let mut rng = StdRng::seed_from_u64(7);
        let h = random_hermitian(8, (1.0, 10.0), &mut rng).unwrap();
        assert_eq!(h.dim(), (8, 8));
        assert!(is_hermitian(&h, 0.0));
    }

    #[test]
    fn test_random_hermitian_spectrum() {
        let mut rng = StdRng::seed_from_u64(11);
        let h = random_hermitian(4, (0.5, 2.0), &mut rng).unwrap();
        let values = eigvalsh(&h).unwrap();
        assert_relative_eq!(values[0], 0.5, epsilon = 1e-9);
        assert_relative_eq!(values[3], 2.0, epsilon = 1e-9);
        assert!(values.iter().all(|&l| (0.5 - 1e-9..=2.0 + 1e-9).contains(&l)));
        assert!(is_hermitian(&h, HERMITIAN_TOLERANCE));
    }

    #[test]
    fn test_random_hermitian_seeded_is_reproducible() {
        let a = random_hermitian(3, (1.0, 3.0), &mut StdRng::seed_from_u64(3)).unwrap();
        let b = random_hermitian(3, (1.0, 3.0), &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_hermitian_rejects_non_finite_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        for range in [
            (f64::NAN, 1.0),
            (0.0, f64::NAN),
            (1.0, f64::INFINITY),
            (-f64::MAX, f64::MAX),
        ] {
            assert!(matches!(
                random_hermitian(4, range, &mut rng),
                Err(LinalgError::InvalidParameter { .. })
            ));
        }
    }
}
