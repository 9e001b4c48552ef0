//! Error types for the HHL pipeline.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced while solving a linear system through an estimator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HhlError {
    /// Normalization or reference linear algebra failed.
    #[error("Linear algebra error: {0}")]
    Linalg(#[from] qlsys_linalg::LinalgError),

    /// Solver context is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Estimator stages were invoked out of order.
    #[error("Estimator '{estimator}' cannot {stage}: {reason}")]
    Pipeline {
        /// Name of the estimator.
        estimator: String,
        /// The stage that was attempted.
        stage: &'static str,
        /// Why the stage could not run.
        reason: String,
    },

    /// The right-hand side is the zero vector and cannot be loaded as a state.
    #[error("Right-hand side has zero norm")]
    ZeroVector,

    /// No eigenvalue was estimated as nonzero, so nothing can be inverted.
    #[error("All {0} estimated eigenvalues are zero")]
    DegenerateSpectrum(usize),

    /// A signed eigenvalue register was requested with too few qubits.
    #[error("Signed eigenvalue register needs at least 2 qubits, got {0}")]
    RegisterTooSmall(u32),

    /// Post-selection on the ancilla never succeeds.
    #[error("Ancilla success probability is zero")]
    ZeroProbability,
}

/// Result type for HHL operations.
pub type HhlResult<T> = Result<T, HhlError>;
