//! HHL driver.
//!
//! [`HhlSolver`] turns `A x = b` into a Hermitian power-of-two system, runs
//! the four estimator stages on it, rescales the post-selected amplitudes to
//! the actual solution and cuts it back to the original unknowns. A classical
//! solve of the original system is attached for comparison.
//!
//! `A` is divided by its largest entry magnitude `α` before normalization,
//! so the unit eigenvalues of the identity padding sit on the same scale as
//! the spectrum of `A`. Reported eigenvalues and evolution time are in the
//! units of the original `A`; a configured evolution time is too.

use std::f64::consts::TAU;

use qlsys_linalg::{
    HermitianSpectrum, LinalgError, Matrix, Normalizer, Vector, norm, solve, state_fidelity,
};
use tracing::{debug, info, warn};

use crate::config::SolverContext;
use crate::error::{HhlError, HhlResult};
use crate::estimator::{EigenEstimator, PhaseSettings};

/// Result of one HHL solve.
#[derive(Debug, Clone)]
pub struct HhlSolution {
    /// Solution of the original system (length `n`).
    pub solution: Vector,
    /// Solution of the normalized system, before truncation.
    pub raw_solution: Vector,
    /// Ancilla post-selection success probability.
    pub probability: f64,
    /// Eigenvalues as read from the register, in units of `A`.
    pub eigenvalues: Vec<f64>,
    /// Evolution time of `exp(iAt)` used for phase estimation.
    pub evolution_time: f64,
    /// Whether the register was read as signed.
    pub signed: bool,
    /// Classical solution, `None` if the matrix is singular.
    pub reference: Option<Vector>,
    /// Fidelity between `solution` and `reference`.
    pub fidelity: Option<f64>,
    /// The normalized system was padded to a power of two.
    pub truncate_powerdim: bool,
    /// The normalized system is a Hermitian embedding.
    pub truncate_hermitian: bool,
    /// Name of the estimator that ran the quantum stages.
    pub estimator: String,
}

/// Evolution time that maps the largest eigenvalue onto the top register value.
///
/// For a `b`-qubit register this is `2π (1 − 2^−b) / λ_max`, or
/// `2π (1/2 − 2^−b) / λ_max` when the register is signed. An exact register
/// uses the full range.
pub fn auto_evolution_time(lambda_max: f64, register: Option<u32>, signed: bool) -> f64 {
    let span = if signed { 0.5 } else { 1.0 };
    let headroom = register.map_or(0.0, |bits| 2_f64.powi(-(bits as i32)));
    TAU * (span - headroom) / lambda_max
}

/// Drives an [`EigenEstimator`] through one HHL solve.
#[derive(Debug, Clone, Default)]
pub struct HhlSolver {
    context: SolverContext,
}

impl HhlSolver {
    /// Create a solver for the given context.
    pub fn new(context: SolverContext) -> Self {
        Self { context }
    }

    /// The solver's context.
    pub fn context(&self) -> &SolverContext {
        &self.context
    }

    /// Solve `A x = b` through `estimator`.
    pub fn solve<E>(
        &self,
        estimator: &mut E,
        matrix: &Matrix,
        vector: &Vector,
    ) -> HhlResult<HhlSolution>
    where
        E: EigenEstimator + ?Sized,
    {
        self.context.validate()?;

        let alpha = matrix.iter().map(|z| z.norm()).fold(0.0_f64, f64::max);
        let unit = if alpha > 0.0 && alpha.is_finite() {
            matrix.mapv(|z| z / alpha)
        } else {
            matrix.clone()
        };
        let alpha = if alpha > 0.0 && alpha.is_finite() { alpha } else { 1.0 };

        let normalized = Normalizer::new()
            .with_tolerance(self.context.hermitian_tolerance)
            .normalize(&unit, vector)?;
        debug!(
            n = normalized.original_dim,
            dim = normalized.dim(),
            alpha,
            truncate_hermitian = normalized.truncate_hermitian,
            truncate_powerdim = normalized.truncate_powerdim,
            "system normalized"
        );

        let b_norm = norm(&normalized.vector);
        if b_norm == 0.0 {
            return Err(HhlError::ZeroVector);
        }

        let spectrum =
            HermitianSpectrum::with_tolerance(&normalized.matrix, self.context.hermitian_tolerance)?;
        let exact = spectrum.eigenvalues();
        let lambda_max = exact.iter().map(|l| l.abs()).fold(0.0_f64, f64::max);
        if lambda_max == 0.0 {
            return Err(HhlError::DegenerateSpectrum(exact.len()));
        }

        let has_negative = exact.iter().any(|&l| l < -self.context.hermitian_tolerance);
        let signed = self.context.negative_evals || has_negative;
        let register = estimator.register_size();
        if signed {
            if let Some(bits) = register.filter(|&b| b < 2) {
                return Err(HhlError::RegisterTooSmall(bits));
            }
        }

        let evolution_time = self
            .context
            .evolution_time
            .map(|t| t * alpha)
            .unwrap_or_else(|| auto_evolution_time(lambda_max, register, signed));
        debug!(
            lambda_max,
            condition = spectrum.condition_number(),
            evolution_time,
            signed,
            "phase estimation parameters"
        );

        estimator.prepare_state(&normalized.vector)?;
        let eigenvalues = estimator.estimate_phase(
            &normalized.matrix,
            &PhaseSettings {
                evolution_time,
                signed,
            },
        )?;

        let scale = eigenvalues
            .iter()
            .map(|l| l.abs())
            .filter(|&l| l > 0.0)
            .fold(f64::INFINITY, f64::min);
        if scale.is_infinite() {
            return Err(HhlError::DegenerateSpectrum(eigenvalues.len()));
        }
        if eigenvalues.iter().any(|&l| l == 0.0) {
            warn!("eigenvalue read as zero; its component is dropped from the solution");
        }

        estimator.apply_rotation(scale)?;
        let measurement = estimator.measure()?;

        let factor = b_norm * measurement.probability.sqrt() / (scale * alpha);
        let raw_solution = measurement.amplitudes.mapv(|z| z * factor);
        let solution = normalized.restore(&raw_solution)?;

        let reference = match solve(matrix, vector) {
            Ok(x) => Some(x),
            Err(LinalgError::Singular { column, pivot }) => {
                warn!(column, pivot, "matrix is singular; no classical reference");
                None
            }
            Err(e) => return Err(e.into()),
        };
        let fidelity = reference.as_ref().map(|r| state_fidelity(&solution, r));

        info!(
            estimator = estimator.name(),
            n = normalized.original_dim,
            probability = measurement.probability,
            fidelity = fidelity.unwrap_or(f64::NAN),
            "HHL solve complete"
        );

        Ok(HhlSolution {
            solution,
            raw_solution,
            probability: measurement.probability,
            eigenvalues: eigenvalues.iter().map(|l| l * alpha).collect(),
            evolution_time: evolution_time / alpha,
            signed,
            reference,
            fidelity,
            truncate_powerdim: normalized.truncate_powerdim,
            truncate_hermitian: normalized.truncate_hermitian,
            estimator: estimator.name().to_string(),
        })
    }
}
