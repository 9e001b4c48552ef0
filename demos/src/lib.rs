//! HHL Demo Suite
//!
//! Small linear systems pushed through the HHL pipeline, from the textbook
//! 2×2 diagonal case to an 8×8 random Hermitian matrix:
//!
//! - **diagonal**: Hermitian, power-of-two, passes normalization untouched
//! - **symmetric**: one negative eigenvalue, forces a signed register
//! - **random8**: seeded random Hermitian with a controlled spectrum
//! - **nonhermitian**: solved through the Hermitian embedding
//! - **triple**: 3×3 tridiagonal, padded to 4
//!
//! ```no_run
//! use qlsys_demos::problems::diagonal_2x2;
//! use qlsys_demos::runners::HhlRunner;
//! use qlsys_hhl::SolverContext;
//!
//! let runner = HhlRunner::new(SolverContext::default()).with_phase_qubits(8);
//! let report = runner.run(&diagonal_2x2()).unwrap();
//! println!("fidelity = {:?}", report.solution.fidelity);
//! ```

pub mod problems;
pub mod runners;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use num_complex::Complex64;

/// Create a progress bar for demo operations.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), message);
}

/// Render a complex vector compactly, dropping negligible imaginary parts.
pub fn format_vector<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a Complex64>,
{
    let parts: Vec<String> = values.into_iter().map(format_complex).collect();
    format!("[{}]", parts.join(", "))
}

fn format_complex(z: &Complex64) -> String {
    if z.im.abs() < 1e-9 {
        format!("{:.4}", z.re)
    } else {
        format!("{:.4}{:+.4}i", z.re, z.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vector() {
        let v = [Complex64::new(1.0, 0.0), Complex64::new(0.5, -0.25)];
        assert_eq!(format_vector(&v), "[1.0000, 0.5000-0.2500i]");
    }

    #[test]
    fn test_format_vector_empty() {
        assert_eq!(format_vector(&[]), "[]");
    }
}
