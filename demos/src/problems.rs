//! Linear systems used by the demos.
//!
//! Each problem exercises a different path through normalization:
//! untouched, padded, embedded, or with a signed spectrum.

use num_complex::Complex64;
use qlsys_hhl::SolverContext;
use qlsys_linalg::{LinalgResult, Matrix, Vector, random_hermitian, real_vector};

/// Names accepted by [`problem_by_name`], in presentation order.
pub const PROBLEM_NAMES: [&str; 5] = ["diagonal", "symmetric", "random8", "nonhermitian", "triple"];

/// A named system `A x = b`.
#[derive(Debug, Clone)]
pub struct LinearProblem {
    /// Short identifier.
    pub name: &'static str,
    /// One-line description for the console.
    pub description: &'static str,
    /// Coefficient matrix `A`.
    pub matrix: Matrix,
    /// Right-hand side `b`.
    pub vector: Vector,
}

impl LinearProblem {
    /// Number of unknowns.
    pub fn dim(&self) -> usize {
        self.vector.len()
    }
}

/// `diag(1, 2) x = (1, 4)`, solution `(1, 2)`.
pub fn diagonal_2x2() -> LinearProblem {
    LinearProblem {
        name: "diagonal",
        description: "2×2 diagonal, Hermitian and power-of-two",
        matrix: Matrix::from_diag(&real_vector(&[1.0, 2.0])),
        vector: real_vector(&[1.0, 4.0]),
    }
}

/// Real symmetric 2×2 with eigenvalues of both signs.
pub fn symmetric_2x2() -> LinearProblem {
    LinearProblem {
        name: "symmetric",
        description: "2×2 symmetric with a negative eigenvalue",
        matrix: real_square([[1.0, 3.0], [3.0, 2.0]]),
        vector: real_vector(&[1.0, 1.0]),
    }
}

/// Seeded 8×8 random Hermitian matrix with eigenvalues in `[1, 10]`.
pub fn random_hermitian_8(context: &SolverContext) -> LinalgResult<LinearProblem> {
    let matrix = random_hermitian(8, (1.0, 10.0), &mut context.rng())?;
    Ok(LinearProblem {
        name: "random8",
        description: "8×8 random Hermitian, κ = 10",
        matrix,
        vector: real_vector(&[1.0; 8]),
    })
}

/// Upper-triangular 2×2, solved through the Hermitian embedding.
pub fn non_hermitian_2x2() -> LinearProblem {
    LinearProblem {
        name: "nonhermitian",
        description: "2×2 upper-triangular, needs the Hermitian embedding",
        matrix: real_square([[1.0, 2.0], [0.0, 3.0]]),
        vector: real_vector(&[1.0, 1.0]),
    }
}

/// Discrete 1-D Laplacian on three points, padded to four.
pub fn tridiagonal_3x3() -> LinearProblem {
    LinearProblem {
        name: "triple",
        description: "3×3 tridiagonal Laplacian, padded to 4",
        matrix: real_square([[2.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0]]),
        vector: real_vector(&[1.0, 0.0, 1.0]),
    }
}

/// Look up a problem by name. Returns `Ok(None)` for unknown names.
pub fn problem_by_name(name: &str, context: &SolverContext) -> LinalgResult<Option<LinearProblem>> {
    let problem = match name.to_lowercase().as_str() {
        "diagonal" => diagonal_2x2(),
        "symmetric" => symmetric_2x2(),
        "random8" => random_hermitian_8(context)?,
        "nonhermitian" => non_hermitian_2x2(),
        "triple" => tridiagonal_3x3(),
        _ => return Ok(None),
    };
    Ok(Some(problem))
}

/// Every demo problem, in presentation order.
pub fn all_problems(context: &SolverContext) -> LinalgResult<Vec<LinearProblem>> {
    Ok(vec![
        diagonal_2x2(),
        symmetric_2x2(),
        random_hermitian_8(context)?,
        non_hermitian_2x2(),
        tridiagonal_3x3(),
    ])
}

fn real_square<const N: usize>(rows: [[f64; N]; N]) -> Matrix {
    Matrix::from_shape_fn((N, N), |(i, j)| Complex64::new(rows[i][j], 0.0))
}
