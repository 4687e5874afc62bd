//! Square-matrix inversion primitive

use ndarray::{s, Array2};
use tracing::{debug, warn};

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;
use crate::solve::SolveOptions;
use crate::validation::MatrixValidator;

/// Pivots within this factor of the singularity threshold are reported as
/// ill-conditioned.
const ILL_CONDITIONED_FACTOR: f64 = 1e4;

/// A routine that inverts a square matrix, or solves `A X = B` when the
/// options carry a right-hand side.
pub trait Inverter {
    /// Name used in log output
    fn name(&self) -> &'static str;

    /// Invert `matrix`, or solve against `options.rhs()` when present
    fn invert(&self, matrix: &Matrix, options: &SolveOptions) -> Result<Matrix>;
}

/// Gauss-Jordan elimination with partial pivoting
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussJordan;

impl GaussJordan {
    /// Creates the default inverter
    pub fn new() -> Self {
        Self
    }
}

impl Inverter for GaussJordan {
    fn name(&self) -> &'static str {
        "gauss-jordan"
    }

    fn invert(&self, matrix: &Matrix, options: &SolveOptions) -> Result<Matrix> {
        MatrixValidator::validate_options(options)?;
        let shape = MatrixValidator::validate_square(matrix, "inverse")?;
        MatrixValidator::validate_finite(matrix, "inverse")?;

        let n = shape.rows();
        let rhs = match options.rhs() {
            Some(rhs) => {
                MatrixValidator::validate_rhs(&shape, rhs)?;
                MatrixValidator::validate_finite(rhs, "linear solve")?;
                rhs.clone()
            }
            None => Array2::eye(n),
        };
        let width = n + rhs.ncols();

        let scale = matrix.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
        let threshold = options.tolerance();
        if scale == 0.0 {
            return Err(MatrixError::singular(
                "MATRIX_SINGULAR",
                "Matrix is all zeros and cannot be inverted",
                0,
                0.0,
                threshold,
                "Check that the rows of the matrix are linearly independent",
            ));
        }
        debug!(n, rhs_cols = rhs.ncols(), scale, threshold, "gauss-jordan elimination");

        // [A / scale | B], reduced in place to [I | scale * A^-1 B]
        let mut aug = Array2::<f64>::zeros((n, width));
        aug.slice_mut(s![.., ..n]).assign(&matrix.mapv(|v| v / scale));
        aug.slice_mut(s![.., n..]).assign(&rhs);

        for col in 0..n {
            let (pivot_row, pivot) = (col..n)
                .map(|r| (r, aug[[r, col]].abs()))
                .fold((col, -1.0), |best, cand| if cand.1 > best.1 { cand } else { best });

            if pivot == 0.0 || pivot <= threshold {
                return Err(MatrixError::singular(
                    "MATRIX_SINGULAR",
                    "Matrix is singular and cannot be inverted",
                    col,
                    pivot,
                    threshold,
                    "Check that the rows of the matrix are linearly independent",
                ));
            }
            if pivot <= threshold * ILL_CONDITIONED_FACTOR {
                warn!(col, pivot, threshold, "pivot close to singularity threshold");
            }

            if pivot_row != col {
                for j in 0..width {
                    aug.swap([col, j], [pivot_row, j]);
                }
            }

            let p = aug[[col, col]];
            for j in 0..width {
                aug[[col, j]] /= p;
            }

            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = aug[[r, col]];
                if factor == 0.0 {
                    continue;
                }
                for j in 0..width {
                    aug[[r, j]] -= factor * aug[[col, j]];
                }
            }
        }

        // undo the equilibration; dividing keeps representable results finite
        let result = aug.slice(s![.., n..]).mapv(|v| v / scale);
        MatrixValidator::validate_finite(&result, "inverse")?;
        Ok(result)
    }
}
