//! Classical spectral emulation of the HHL quantum stages.
//!
//! Instead of simulating gates, [`SpectralEstimator`] works directly in the
//! eigenbasis of the Hermitian matrix:
//!
//! - **Phase estimation** reads every eigenvalue `λ` through an `n_l`-qubit
//!   register: `k = round(λ t 2^n_l / 2π) mod 2^n_l`, optionally as a signed
//!   two's-complement integer, giving `λ̃ = 2π k / (t 2^n_l)`.
//! - **Rotation** scales each eigencomponent by `C / λ̃`.
//! - **Measurement** post-selects the ancilla: the success probability is
//!   `Σ |β_j|² (C / λ̃_j)²`.
//!
//! With an exact register (`n_l = ∞`) the post-selected state is exactly
//! `A⁻¹ b` up to normalization. With a finite register the eigenvalue
//! rounding error shows up in the fidelity, as it does on a real device.

use std::f64::consts::TAU;

use ndarray::Array1;
use num_complex::Complex64;
use qlsys_linalg::{HERMITIAN_TOLERANCE, HermitianSpectrum, Matrix, Vector, norm};
use tracing::{debug, trace};

use crate::error::{HhlError, HhlResult};
use crate::estimator::{EigenEstimator, Measurement, PhaseSettings};

/// Estimates below this fraction of the largest are treated as zero.
const ZERO_EIGENVALUE_RTOL: f64 = 1e-10;

/// Pipeline position of the estimator.
#[derive(Debug, Clone)]
enum Stage {
    Idle,
    Prepared {
        state: Vector,
    },
    Estimated {
        spectrum: HermitianSpectrum,
        coefficients: Vector,
        estimates: Array1<f64>,
    },
    Rotated {
        spectrum: HermitianSpectrum,
        coefficients: Vector,
        estimates: Array1<f64>,
        scale: f64,
    },
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Prepared { .. } => "prepared",
            Stage::Estimated { .. } => "estimated",
            Stage::Rotated { .. } => "rotated",
        }
    }
}

/// Eigenvalue estimator backed by a classical eigendecomposition.
#[derive(Debug, Clone)]
pub struct SpectralEstimator {
    /// Register size in qubits; `None` reads eigenvalues exactly.
    phase_qubits: Option<u32>,
    /// Hermiticity tolerance accepted by `estimate_phase`.
    tolerance: f64,
    stage: Stage,
}

impl SpectralEstimator {
    /// Estimator with an `phase_qubits`-qubit eigenvalue register.
    pub fn new(phase_qubits: u32) -> Self {
        Self {
            phase_qubits: Some(phase_qubits),
            tolerance: HERMITIAN_TOLERANCE,
            stage: Stage::Idle,
        }
    }

    /// Estimator that reads eigenvalues without rounding.
    pub fn exact() -> Self {
        Self {
            phase_qubits: None,
            tolerance: HERMITIAN_TOLERANCE,
            stage: Stage::Idle,
        }
    }

    /// Set the Hermiticity tolerance for matrices passed to `estimate_phase`.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn out_of_order(&self, stage: &'static str) -> HhlError {
        HhlError::Pipeline {
            estimator: self.name().to_string(),
            stage,
            reason: format!("estimator is {}", self.stage.name()),
        }
    }

    /// The eigenvalue the register reports for `lambda`.
    pub fn read_register(&self, lambda: f64, settings: &PhaseSettings) -> f64 {
        let Some(bits) = self.phase_qubits else {
            return lambda;
        };
        let size = 2_f64.powi(bits as i32);
        let t = settings.evolution_time;

        let mut k = (lambda * t / TAU * size).round().rem_euclid(size);
        if settings.signed && k >= size / 2.0 {
            k -= size;
        }
        k * TAU / (t * size)
    }
}

impl EigenEstimator for SpectralEstimator {
    fn name(&self) -> &str {
        if self.phase_qubits.is_some() {
            "spectral"
        } else {
            "exact"
        }
    }

    fn register_size(&self) -> Option<u32> {
        self.phase_qubits
    }

    fn prepare_state(&mut self, vector: &Vector) -> HhlResult<()> {
        let length = norm(vector);
        if length == 0.0 || !length.is_finite() {
            return Err(HhlError::ZeroVector);
        }
        trace!(dim = vector.len(), norm = length, "preparing state");
        self.stage = Stage::Prepared {
            state: vector.mapv(|z| z / length),
        };
        Ok(())
    }

    fn estimate_phase(
        &mut self,
        matrix: &Matrix,
        settings: &PhaseSettings,
    ) -> HhlResult<Vec<f64>> {
        let Stage::Prepared { state } = &self.stage else {
            return Err(self.out_of_order("estimate phase"));
        };
        if !(settings.evolution_time.is_finite() && settings.evolution_time > 0.0) {
            return Err(HhlError::Pipeline {
                estimator: self.name().to_string(),
                stage: "estimate phase",
                reason: format!("evolution time {} is not positive", settings.evolution_time),
            });
        }
        if let Some(bits) = self.phase_qubits {
            if settings.signed && bits < 2 {
                return Err(HhlError::RegisterTooSmall(bits));
            }
        }

        let spectrum = HermitianSpectrum::with_tolerance(matrix, self.tolerance)?;
        let coefficients = spectrum.coefficients(state)?;
        let mut estimates: Array1<f64> = spectrum
            .eigenvalues()
            .into_iter()
            .map(|lambda| self.read_register(lambda, settings))
            .collect();
        let cutoff = ZERO_EIGENVALUE_RTOL * estimates.iter().fold(0.0_f64, |m, l| m.max(l.abs()));
        estimates.mapv_inplace(|l| if l.abs() <= cutoff { 0.0 } else { l });
        let readout = estimates.to_vec();
        debug!(
            estimator = self.name(),
            dim = spectrum.dim(),
            t = settings.evolution_time,
            signed = settings.signed,
            "phase estimation complete"
        );

        self.stage = Stage::Estimated {
            spectrum,
            coefficients,
            estimates,
        };
        Ok(readout)
    }

    fn apply_rotation(&mut self, scale: f64) -> HhlResult<()> {
        let Stage::Estimated {
            spectrum,
            coefficients,
            estimates,
        } = &self.stage
        else {
            return Err(self.out_of_order("apply rotation"));
        };

        let smallest = estimates
            .iter()
            .map(|l| l.abs())
            .filter(|&l| l > 0.0)
            .fold(f64::INFINITY, f64::min);
        if smallest.is_infinite() {
            return Err(HhlError::DegenerateSpectrum(spectrum.dim()));
        }
        if !(scale.is_finite() && scale > 0.0) || scale > smallest * (1.0 + 1e-12) {
            return Err(HhlError::Pipeline {
                estimator: self.name().to_string(),
                stage: "apply rotation",
                reason: format!("scale {scale} must be in (0, {smallest}]"),
            });
        }

        self.stage = Stage::Rotated {
            spectrum: spectrum.clone(),
            coefficients: coefficients.clone(),
            estimates: estimates.clone(),
            scale,
        };
        Ok(())
    }

    fn measure(&mut self) -> HhlResult<Measurement> {
        let Stage::Rotated {
            spectrum,
            coefficients,
            estimates,
            scale,
        } = &self.stage
        else {
            return Err(self.out_of_order("measure"));
        };

        let rotated: Vector = coefficients
            .iter()
            .zip(estimates.iter())
            .map(|(&c, &l)| {
                if l == 0.0 {
                    Complex64::new(0.0, 0.0)
                } else {
                    c * (scale / l)
                }
            })
            .collect();
        let probability: f64 = rotated.iter().map(Complex64::norm_sqr).sum();
        if probability == 0.0 {
            return Err(HhlError::ZeroProbability);
        }

        let amplitudes = spectrum.synthesize(&rotated.mapv(|a| a / probability.sqrt()))?;
        debug!(estimator = self.name(), probability, "ancilla post-selected");

        self.stage = Stage::Idle;
        Ok(Measurement {
            amplitudes,
            probability,
        })
    }
}
