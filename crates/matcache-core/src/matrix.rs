//! Dense matrix type and conversions from nested rows

use ndarray::Array2;

use crate::error::{MatrixError, Result};

/// Dense row-major matrix of `f64`
pub type Matrix = Array2<f64>;

/// Builds a matrix from nested rows.
///
/// An empty outer vector yields the `0x0` matrix. Rows of differing length
/// are rejected.
pub fn matrix_from_rows(rows: Vec<Vec<f64>>) -> Result<Matrix> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);

    if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        return Err(MatrixError::invalid_shape(
            "MATRIX_RAGGED_ROWS",
            "Rows have differing lengths",
            format!("row 0 has {} columns, row {} has {}", ncols, index, row.len()),
            "matrix construction",
            "Every row of a matrix must have the same number of columns",
            "Pad or trim the rows so they all have equal length",
        ));
    }

    let data: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), data).map_err(|e| {
        MatrixError::invalid_shape(
            "MATRIX_FROM_ROWS_FAILED",
            "Could not build matrix from rows",
            format!("[{}, {}]", nrows, ncols),
            "matrix construction",
            e.to_string(),
            "Check the row data",
        )
    })
}

/// Converts a matrix back into nested rows
pub fn matrix_to_rows(matrix: &Matrix) -> Vec<Vec<f64>> {
    matrix.rows().into_iter().map(|row| row.to_vec()).collect()
}

/// The `n x n` identity matrix
pub fn identity(n: usize) -> Matrix {
    Array2::eye(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_rows() {
        let m = matrix_from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m, array![[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_from_rows_empty() {
        let m = matrix_from_rows(Vec::new()).unwrap();
        assert_eq!(m.dim(), (0, 0));
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = matrix_from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err.code(), "MATRIX_RAGGED_ROWS");
    }

    #[test]
    fn test_to_rows() {
        let rows = vec![vec![1.0, 0.5, 2.0], vec![0.0, 1.0, 4.0]];
        let m = matrix_from_rows(rows.clone()).unwrap();
        assert_eq!(matrix_to_rows(&m), rows);
    }

    #[test]
    fn test_identity() {
        let i = identity(3);
        assert_eq!(i[[0, 0]], 1.0);
        assert_eq!(i[[0, 1]], 0.0);
        assert_eq!(i.dim(), (3, 3));
    }
}
