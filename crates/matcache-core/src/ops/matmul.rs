//! Matrix multiplication and identity checks

use crate::error::Result;
use crate::matrix::Matrix;
use crate::shape::Shape;
use crate::validation::MatrixValidator;

/// General matrix multiplication (GEMM)
pub struct Gemm;

impl Gemm {
    /// Validates shapes for matrix multiplication
    pub fn validate_shapes(a_shape: &Shape, b_shape: &Shape) -> Result<Shape> {
        MatrixValidator::validate_matmul_shapes(a_shape, b_shape)
    }

    /// Computes `A @ B`
    pub fn compute(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        Self::validate_shapes(&Shape::of(a), &Shape::of(b))?;
        Ok(a.dot(b))
    }
}

/// Computes `A @ B` after validating the inner dimensions
pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    Gemm::compute(a, b)
}

/// Returns whether `matrix` is the identity within `eps` element-wise
pub fn is_identity(matrix: &Matrix, eps: f64) -> bool {
    Shape::of(matrix).is_square()
        && matrix.indexed_iter().all(|((r, c), v)| {
            let target = if r == c { 1.0 } else { 0.0 };
            (v - target).abs() <= eps
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_matmul() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let b = array![[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]];
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c, array![[58.0, 64.0], [139.0, 154.0]]);
    }

    #[test]
    fn test_matmul_mismatch() {
        let a = Array2::<f64>::zeros((2, 3));
        let b = Array2::<f64>::zeros((2, 3));
        let err = matmul(&a, &b).unwrap_err();
        assert_eq!(err.code(), "MATMUL_INNER_DIM_MISMATCH");
    }

    #[test]
    fn test_is_identity() {
        assert!(is_identity(&Array2::eye(4), 0.0));
        assert!(is_identity(&array![[1.0, 1e-12], [0.0, 1.0]], 1e-9));
        assert!(!is_identity(&array![[1.0, 0.1], [0.0, 1.0]], 1e-9));
        assert!(!is_identity(&Array2::zeros((2, 3)), 1e-9));
    }
}
