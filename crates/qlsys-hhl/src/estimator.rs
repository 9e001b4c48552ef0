//! Eigenvalue-estimation backend interface.
//!
//! The [`EigenEstimator`] trait is the boundary between the HHL driver and
//! whatever executes the quantum part of the algorithm: a circuit simulator,
//! hardware, or the classical [`SpectralEstimator`](crate::SpectralEstimator).
//! The driver calls the stages in order for each solve:
//!
//! ```text
//! prepare_state → estimate_phase → apply_rotation → measure
//! ```
//!
//! Implementations must reject stages called out of order with
//! [`HhlError::Pipeline`](crate::HhlError::Pipeline).

use qlsys_linalg::{Matrix, Vector};

use crate::config::{BackendKind, SolverContext};
use crate::error::HhlResult;
use crate::spectral::SpectralEstimator;

/// How the eigenvalue register is read during phase estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSettings {
    /// Evolution time `t` of the controlled `exp(iAt)`.
    pub evolution_time: f64,
    /// Interpret the register in two's complement.
    pub signed: bool,
}

/// Output of [`EigenEstimator::measure`].
#[derive(Debug, Clone)]
pub struct Measurement {
    /// Normalized amplitudes of the solution register after post-selection.
    pub amplitudes: Vector,
    /// Probability that the ancilla post-selection succeeds.
    pub probability: f64,
}

/// A backend able to run the quantum stages of HHL.
pub trait EigenEstimator {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Eigenvalue register size in qubits, `None` for exact estimation.
    fn register_size(&self) -> Option<u32>;

    /// Load `|b⟩ = b / ‖b‖` into the solution register.
    fn prepare_state(&mut self, vector: &Vector) -> HhlResult<()>;

    /// Run phase estimation of `exp(iAt)` on the prepared state.
    ///
    /// Returns the eigenvalue each eigenvector of `matrix` is read out as.
    fn estimate_phase(&mut self, matrix: &Matrix, settings: &PhaseSettings)
    -> HhlResult<Vec<f64>>;

    /// Rotate the ancilla by `scale / λ̃` for every estimated eigenvalue `λ̃`.
    ///
    /// `scale` must not exceed the smallest nonzero `|λ̃|`.
    fn apply_rotation(&mut self, scale: f64) -> HhlResult<()>;

    /// Post-select the ancilla and return the solution register.
    fn measure(&mut self) -> HhlResult<Measurement>;
}

/// Build the estimator selected by `context`.
pub fn estimator_for(context: &SolverContext) -> Box<dyn EigenEstimator> {
    match context.backend {
        BackendKind::Spectral => Box::new(
            SpectralEstimator::new(context.phase_qubits)
                .with_tolerance(context.hermitian_tolerance),
        ),
        BackendKind::Exact => {
            Box::new(SpectralEstimator::exact().with_tolerance(context.hermitian_tolerance))
        }
    }
}
