//! Matrix validation utilities
//!
//! Checks shared by the inversion primitive and the matrix operations so
//! that every failure surfaces as a structured [`MatrixError`].

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;
use crate::shape::Shape;
use crate::solve::SolveOptions;

/// Matrix validation utilities
pub struct MatrixValidator;

impl MatrixValidator {
    /// Validate that a matrix is square and non-empty
    pub fn validate_square(matrix: &Matrix, operation: &str) -> Result<Shape> {
        let shape = Shape::of(matrix);

        if !shape.is_square() {
            return Err(MatrixError::dimension_mismatch(
                "MATRIX_NOT_SQUARE",
                format!("{} requires a square matrix", operation),
                format!("[{}, {}] or [{}, {}]", shape.rows(), shape.rows(), shape.cols(), shape.cols()),
                shape.to_string(),
                operation,
                "Only square matrices have an inverse",
            ));
        }

        if shape.is_empty() {
            return Err(MatrixError::invalid_shape(
                "MATRIX_EMPTY",
                format!("{} received an empty matrix", operation),
                shape.to_string(),
                operation,
                "The matrix has no elements",
                "Install a matrix with set_matrix before solving",
            ));
        }

        Ok(shape)
    }

    /// Validate a right-hand side against the coefficient matrix shape
    pub fn validate_rhs(matrix_shape: &Shape, rhs: &Matrix) -> Result<Shape> {
        let rhs_shape = Shape::of(rhs);

        if rhs_shape.rows() != matrix_shape.rows() {
            return Err(MatrixError::dimension_mismatch(
                "SOLVE_RHS_ROW_MISMATCH",
                "Right-hand side row count must match the matrix",
                format!("[{}, k]", matrix_shape.rows()),
                rhs_shape.to_string(),
                "linear solve",
                format!("Provide a right-hand side with {} rows", matrix_shape.rows()),
            ));
        }

        if rhs_shape.cols() == 0 {
            return Err(MatrixError::invalid_shape(
                "SOLVE_RHS_EMPTY",
                "Right-hand side has no columns",
                rhs_shape.to_string(),
                "linear solve",
                "Zero columns to solve for",
                "Provide at least one right-hand side column",
            ));
        }

        Ok(rhs_shape)
    }

    /// Validate that every entry is finite
    pub fn validate_finite(matrix: &Matrix, operation: &str) -> Result<()> {
        if let Some(((row, col), value)) = matrix.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(MatrixError::non_finite(
                "MATRIX_NON_FINITE",
                format!("Matrix contains non-finite value {}", value),
                row,
                col,
                operation,
                "Replace NaN and infinite entries before solving",
            ));
        }
        Ok(())
    }

    /// Validate solve options
    pub fn validate_options(options: &SolveOptions) -> Result<()> {
        let tolerance = options.tolerance();
        if !tolerance.is_finite() {
            return Err(MatrixError::invalid_option(
                "SOLVE_NON_FINITE_TOLERANCE",
                "Tolerance must be finite",
                "tolerance",
                tolerance.to_string(),
                "Use a small positive tolerance such as 1e-12",
            ));
        }
        if tolerance < 0.0 {
            return Err(MatrixError::invalid_option(
                "SOLVE_NEGATIVE_TOLERANCE",
                "Tolerance must be non-negative",
                "tolerance",
                tolerance.to_string(),
                "Use a small positive tolerance such as 1e-12",
            ));
        }
        Ok(())
    }

    /// Validate matrix multiplication shapes, returning the output shape
    pub fn validate_matmul_shapes(left: &Shape, right: &Shape) -> Result<Shape> {
        if left.cols() != right.rows() {
            return Err(MatrixError::dimension_mismatch(
                "MATMUL_INNER_DIM_MISMATCH",
                "Inner dimensions must match for matrix multiplication",
                format!("[{}, {}] @ [{}, n]", left.rows(), left.cols(), left.cols()),
                format!("{} @ {}", left, right),
                "matrix multiplication",
                format!(
                    "Ensure left matrix columns ({}) equal right matrix rows ({})",
                    left.cols(),
                    right.rows()
                ),
            ));
        }
        Ok(Shape::new(left.rows(), right.cols()))
    }
}
