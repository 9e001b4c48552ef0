//! Conversions between `ndarray` storage and `faer` kernels.

use faer::{Mat, c64};
use num_complex::Complex64;

use crate::matrix::{Matrix, Vector};

pub(crate) fn to_faer(matrix: &Matrix) -> Mat<c64> {
    Mat::from_fn(matrix.nrows(), matrix.ncols(), |i, j| {
        let z = matrix[[i, j]];
        c64::new(z.re, z.im)
    })
}

/// `vector` as an `n × 1` right-hand side.
pub(crate) fn column_to_faer(vector: &Vector) -> Mat<c64> {
    Mat::from_fn(vector.len(), 1, |i, _| {
        let z = vector[i];
        c64::new(z.re, z.im)
    })
}

pub(crate) fn from_faer(z: &c64) -> Complex64 {
    Complex64::new(z.re, z.im)
}
