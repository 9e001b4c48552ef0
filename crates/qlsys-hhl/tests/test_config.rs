//! Tests for loading solver contexts from disk.

use std::io::Write;

use qlsys_hhl::{BackendKind, ConfigError, SolverContext};
use tempfile::NamedTempFile;

fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_yaml_context() {
    let file = write_config(
        ".yaml",
        "seed: 7\nbackend: exact\nevolution_time: 1.5\nlog_level: debug\n",
    );
    let ctx = SolverContext::from_file(file.path()).unwrap();

    assert_eq!(ctx.seed, 7);
    assert_eq!(ctx.backend, BackendKind::Exact);
    assert_eq!(ctx.evolution_time, Some(1.5));
    assert_eq!(ctx.log_level, "debug");
    // Unset keys keep their defaults.
    assert_eq!(ctx.phase_qubits, 6);
    assert!(!ctx.negative_evals);
}

#[test]
fn load_json_context() {
    let file = write_config(
        ".json",
        r#"{"phase_qubits": 10, "negative_evals": true, "hermitian_tolerance": 1e-8}"#,
    );
    let ctx = SolverContext::from_file(file.path()).unwrap();

    assert_eq!(ctx.phase_qubits, 10);
    assert!(ctx.negative_evals);
    assert_eq!(ctx.hermitian_tolerance, 1e-8);
    assert_eq!(ctx.backend, BackendKind::Spectral);
}

#[test]
fn empty_json_object_is_default() {
    let file = write_config(".json", "{}");
    let ctx = SolverContext::from_file(file.path()).unwrap();
    assert_eq!(ctx, SolverContext::default());
}

#[test]
fn context_roundtrips_through_yaml() {
    let original = SolverContext {
        seed: 1234,
        backend: BackendKind::Exact,
        evolution_time: Some(0.25),
        ..SolverContext::default()
    };
    let file = write_config(".yml", &serde_yaml_ng::to_string(&original).unwrap());
    assert_eq!(SolverContext::from_file(file.path()).unwrap(), original);
}

#[test]
fn unsupported_extension() {
    let file = write_config(".toml", "seed = 1\n");
    assert!(matches!(
        SolverContext::from_file(file.path()),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn malformed_file() {
    let file = write_config(".json", "{ not json");
    assert!(matches!(
        SolverContext::from_file(file.path()),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn unknown_backend_in_file() {
    let file = write_config(".yaml", "backend: hardware\n");
    assert!(matches!(
        SolverContext::from_file(file.path()),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn invalid_values_fail_validation() {
    let file = write_config(".yaml", "phase_qubits: 99\n");
    assert!(matches!(
        SolverContext::from_file(file.path()),
        Err(ConfigError::ValidationError(_))
    ));

    let file = write_config(".yaml", "log_level: loud\n");
    assert!(matches!(
        SolverContext::from_file(file.path()),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        SolverContext::from_file(dir.path().join("absent.yaml")),
        Err(ConfigError::IoError(_))
    ));
}
