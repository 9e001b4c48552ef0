//! HHL runner for the demo problems.

use std::time::{Duration, Instant};

use qlsys_hhl::{BackendKind, HhlResult, HhlSolution, HhlSolver, SolverContext, estimator_for};
use serde_json::{Value, json};
use tracing::info;

use crate::problems::LinearProblem;

/// Result of running one problem.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Problem name.
    pub problem: &'static str,
    /// Pipeline output.
    pub solution: HhlSolution,
    /// Wall-clock time of the solve.
    pub elapsed: Duration,
}

impl RunReport {
    /// Machine-readable summary.
    pub fn to_json(&self) -> Value {
        let complex = |v: &qlsys_linalg::Vector| -> Vec<[f64; 2]> {
            v.iter().map(|z| [z.re, z.im]).collect()
        };
        let s = &self.solution;
        json!({
            "problem": self.problem,
            "estimator": s.estimator,
            "solution": complex(&s.solution),
            "reference": s.reference.as_ref().map(complex),
            "fidelity": s.fidelity,
            "probability": s.probability,
            "eigenvalues": s.eigenvalues,
            "evolution_time": s.evolution_time,
            "signed": s.signed,
            "truncate_hermitian": s.truncate_hermitian,
            "truncate_powerdim": s.truncate_powerdim,
            "elapsed_ms": self.elapsed.as_secs_f64() * 1e3,
        })
    }
}

/// Runs demo problems through [`HhlSolver`].
#[derive(Debug, Clone, Default)]
pub struct HhlRunner {
    /// Context every solve runs under.
    pub context: SolverContext,
}

impl HhlRunner {
    /// Create a runner for the given context.
    pub fn new(context: SolverContext) -> Self {
        Self { context }
    }

    /// Set the eigenvalue register size and switch to the spectral backend.
    pub fn with_phase_qubits(mut self, bits: u32) -> Self {
        self.context.phase_qubits = bits;
        self.context.backend = BackendKind::Spectral;
        self
    }

    /// Set the backend.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.context.backend = backend;
        self
    }

    /// Fix the evolution time.
    pub fn with_evolution_time(mut self, t: f64) -> Self {
        self.context.evolution_time = Some(t);
        self
    }

    /// Solve one problem.
    pub fn run(&self, problem: &LinearProblem) -> HhlResult<RunReport> {
        let start = Instant::now();
        let mut estimator = estimator_for(&self.context);
        let solution = HhlSolver::new(self.context.clone()).solve(
            estimator.as_mut(),
            &problem.matrix,
            &problem.vector,
        )?;
        let elapsed = start.elapsed();
        info!(problem = problem.name, ?elapsed, "demo problem solved");
        Ok(RunReport {
            problem: problem.name,
            solution,
            elapsed,
        })
    }

    /// Fidelity against the classical solution for each register size in `bits`.
    ///
    /// Entries are `None` when the matrix is singular.
    pub fn register_sweep<I>(
        &self,
        problem: &LinearProblem,
        bits: I,
    ) -> HhlResult<Vec<(u32, Option<f64>)>>
    where
        I: IntoIterator<Item = u32>,
    {
        bits.into_iter()
            .map(|b| {
                let report = self.clone().with_phase_qubits(b).run(problem)?;
                Ok((b, report.solution.fidelity))
            })
            .collect()
    }
}
