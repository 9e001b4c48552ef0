//! Solver-invocation context.
//!
//! Everything a solve depends on besides the system itself (seed, tolerances,
//! register size, backend choice, log level) lives in a [`SolverContext`]
//! that is passed in explicitly.
//!
//! Sources, highest precedence first:
//! 1. Environment variables (`QLSYS_` prefix)
//! 2. Configuration file (YAML or JSON)
//! 3. Default values

use std::fmt;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Largest eigenvalue register the spectral backend accepts.
pub const MAX_PHASE_QUBITS: u32 = 24;

/// Which eigenvalue-estimation backend to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Spectral emulation with a finite phase register.
    #[default]
    Spectral,
    /// Spectral emulation with exact eigenvalues (infinite register).
    Exact,
}

impl BackendKind {
    /// Backend name as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Spectral => "spectral",
            BackendKind::Exact => "exact",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spectral" => Ok(BackendKind::Spectral),
            "exact" => Ok(BackendKind::Exact),
            other => Err(ConfigError::ValidationError(format!(
                "Unknown backend: {other}"
            ))),
        }
    }
}

/// Parameters of one solver invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverContext {
    /// Seed for every random choice made on behalf of the solve.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Entry-wise tolerance for the Hermiticity check.
    #[serde(default = "default_hermitian_tolerance")]
    pub hermitian_tolerance: f64,

    /// Backend used to estimate eigenvalues.
    #[serde(default)]
    pub backend: BackendKind,

    /// Eigenvalue register size in qubits (spectral backend only).
    #[serde(default = "default_phase_qubits")]
    pub phase_qubits: u32,

    /// Fixed evolution time; chosen from the spectrum when unset.
    #[serde(default)]
    pub evolution_time: Option<f64>,

    /// Always read the eigenvalue register as signed.
    ///
    /// The solver switches to a signed register on its own when the
    /// normalized matrix has a negative eigenvalue.
    #[serde(default)]
    pub negative_evals: bool,

    /// `tracing` filter directive for binaries that honor the context.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_seed() -> u64 {
    42
}

fn default_hermitian_tolerance() -> f64 {
    qlsys_linalg::HERMITIAN_TOLERANCE
}

fn default_phase_qubits() -> u32 {
    6
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SolverContext {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            hermitian_tolerance: default_hermitian_tolerance(),
            backend: BackendKind::default(),
            phase_qubits: default_phase_qubits(),
            evolution_time: None,
            negative_evals: false,
            log_level: default_log_level(),
        }
    }
}

impl SolverContext {
    /// Load a context from a YAML (`.yaml`/`.yml`) or JSON (`.json`) file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let context: SolverContext = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
            Some("yaml" | "yml") | None => serde_yaml_ng::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
            Some(other) => {
                return Err(ConfigError::ParseError(format!(
                    "Unsupported config extension: .{other}"
                )));
            }
        };

        context.validate()?;
        Ok(context)
    }

    /// Defaults overridden by `QLSYS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply `QLSYS_*` environment variables on top of this context.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Recognized keys: `QLSYS_SEED`, `QLSYS_BACKEND`, `QLSYS_PHASE_QUBITS`,
    /// `QLSYS_EVOLUTION_TIME`, `QLSYS_NEGATIVE_EVALS`, `QLSYS_LOG`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("QLSYS_SEED") {
            self.seed = parse_value("QLSYS_SEED", &seed)?;
        }
        if let Some(backend) = lookup("QLSYS_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(qubits) = lookup("QLSYS_PHASE_QUBITS") {
            self.phase_qubits = parse_value("QLSYS_PHASE_QUBITS", &qubits)?;
        }
        if let Some(t) = lookup("QLSYS_EVOLUTION_TIME") {
            self.evolution_time = Some(parse_value("QLSYS_EVOLUTION_TIME", &t)?);
        }
        if let Some(flag) = lookup("QLSYS_NEGATIVE_EVALS") {
            self.negative_evals = parse_value("QLSYS_NEGATIVE_EVALS", &flag)?;
        }
        if let Some(level) = lookup("QLSYS_LOG") {
            self.log_level = level;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate the context.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hermitian_tolerance.is_finite() && self.hermitian_tolerance >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "Hermitian tolerance must be finite and non-negative, got {}",
                self.hermitian_tolerance
            )));
        }

        if self.backend == BackendKind::Spectral {
            if self.phase_qubits == 0 || self.phase_qubits > MAX_PHASE_QUBITS {
                return Err(ConfigError::ValidationError(format!(
                    "phase_qubits must be in 1..={MAX_PHASE_QUBITS}, got {}",
                    self.phase_qubits
                )));
            }
            if self.negative_evals && self.phase_qubits < 2 {
                return Err(ConfigError::ValidationError(
                    "a signed eigenvalue register needs at least 2 phase qubits".to_string(),
                ));
            }
        }

        if let Some(t) = self.evolution_time {
            if !(t.is_finite() && t > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "evolution_time must be positive, got {t}"
                )));
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }

    /// Register size the configured backend uses, `None` for exact estimation.
    pub fn register_size(&self) -> Option<u32> {
        match self.backend {
            BackendKind::Spectral => Some(self.phase_qubits),
            BackendKind::Exact => None,
        }
    }

    /// A deterministic RNG seeded from [`Self::seed`].
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::ParseError(format!("Invalid value for {key}: {raw}")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
