//! `qlsys-hhl` — HHL linear-system solving over a pluggable estimator.
//!
//! The quantum part of HHL (state preparation, phase estimation, the
//! controlled rotation and post-selection) sits behind the
//! [`EigenEstimator`] trait. [`HhlSolver`] prepares the system with
//! [`qlsys_linalg::Normalizer`], drives the estimator, undoes the
//! normalization on the result and compares it with a classical solve.
//!
//! [`SpectralEstimator`] is an in-process estimator that emulates a finite
//! eigenvalue register on top of an exact eigendecomposition.
//!
//! # Quick start
//!
//! ```rust
//! use qlsys_hhl::{HhlSolver, SolverContext, estimator_for};
//! use qlsys_linalg::{real_matrix, real_vector};
//!
//! let context = SolverContext::default();
//! let mut estimator = estimator_for(&context);
//!
//! let a = real_matrix(&[&[1.0, 0.0], &[0.0, 2.0]]).unwrap();
//! let b = real_vector(&[1.0, 4.0]);
//!
//! let result = HhlSolver::new(context).solve(estimator.as_mut(), &a, &b).unwrap();
//! assert_eq!(result.solution.len(), 2);
//! assert!(result.fidelity.unwrap() > 0.9);
//! ```

pub mod config;
pub mod error;
pub mod estimator;
pub mod solver;
pub mod spectral;

pub use config::{BackendKind, ConfigError, SolverContext};
pub use error::{HhlError, HhlResult};
pub use estimator::{EigenEstimator, Measurement, PhaseSettings, estimator_for};
pub use solver::{HhlSolution, HhlSolver, auto_evolution_time};
pub use spectral::SpectralEstimator;
