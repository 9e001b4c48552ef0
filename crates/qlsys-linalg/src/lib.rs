//! `qlsys-linalg` — linear-system preparation for eigenvalue-based solvers.
//!
//! Register-based eigenvalue estimation (as used by HHL) only works on a
//! Hermitian operator whose dimension is a power of two. This crate turns an
//! arbitrary square system `A x = b` into that shape and back:
//!
//! - [`normalize`] / [`Normalizer`] embed non-Hermitian matrices and pad to a
//!   power-of-two dimension, reporting what they changed
//! - [`NormalizationResult::restore`] cuts a solution of the normalized
//!   system back to the original unknowns
//!
//! It also carries the dense helpers the solver pipeline needs around that
//! step: a classical reference [`solve`], [`state_fidelity`], a Hermitian
//! eigendecomposition ([`HermitianSpectrum`]) and [`random_hermitian`] test
//! systems.
//!
//! # Quick start
//!
//! ```rust
//! use qlsys_linalg::{normalize, real_matrix, real_vector, solve};
//!
//! // Non-Hermitian 3x3: embedded to 6x6, then padded to 8x8.
//! let a = real_matrix(&[&[2.0, 1.0, 0.0], &[0.0, 2.0, 1.0], &[0.0, 0.0, 2.0]]).unwrap();
//! let b = real_vector(&[1.0, 2.0, 3.0]);
//!
//! let prepared = normalize(&a, &b).unwrap();
//! assert_eq!(prepared.dim(), 8);
//! assert!(prepared.truncate_hermitian && prepared.truncate_powerdim);
//!
//! let big = solve(&prepared.matrix, &prepared.vector).unwrap();
//! let x = prepared.restore(&big).unwrap();
//! assert_eq!(x.len(), 3);
//! ```

pub mod classical;
mod dense;
pub mod error;
pub mod matrix;
pub mod normalize;
pub mod random;
pub mod spectrum;

pub use classical::{residual, solve, state_fidelity};
pub use error::{LinalgError, LinalgResult};
pub use matrix::{
    HERMITIAN_TOLERANCE, Matrix, Vector, adjoint, is_hermitian, is_register_dimension,
    matrix_from_rows, norm, real_matrix, real_vector, register_dimension,
};
pub use normalize::{NormalizationResult, Normalizer, normalize};
pub use random::random_hermitian;
pub use spectrum::{HermitianSpectrum, condition_number, eigvalsh};
