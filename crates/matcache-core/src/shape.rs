//! Shape type for two-dimensional matrices

use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Row and column counts of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    /// Creates a shape with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Creates an `n x n` shape
    pub fn square(n: usize) -> Self {
        Self { rows: n, cols: n }
    }

    /// Reads the shape of an array
    pub fn of(matrix: &Array2<f64>) -> Self {
        let (rows, cols) = matrix.dim();
        Self { rows, cols }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the total number of elements
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns whether the shape has no elements
    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    /// Returns whether rows equal columns
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self::new(rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_creation() {
        let shape = Shape::new(2, 3);
        assert_eq!(shape.rows(), 2);
        assert_eq!(shape.cols(), 3);
        assert_eq!(shape.numel(), 6);
        assert!(!shape.is_square());

        let square = Shape::square(4);
        assert!(square.is_square());
        assert_eq!(square, Shape::from((4, 4)));
    }

    #[test]
    fn test_shape_of_array() {
        let m = Array2::<f64>::zeros((3, 5));
        assert_eq!(Shape::of(&m), Shape::new(3, 5));

        let empty = Array2::<f64>::zeros((0, 0));
        assert!(Shape::of(&empty).is_empty());
        assert!(Shape::of(&empty).is_square());
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(Shape::new(2, 7).to_string(), "[2, 7]");
    }
}
