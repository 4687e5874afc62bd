//! Error types for matrix operations

use std::fmt::Debug;
use thiserror::Error;

/// Errors that can occur while validating or inverting a matrix
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// The matrix has no inverse
    #[error("Singular matrix [{code}]: {message}\nPivot index: {pivot_index}, Pivot: {pivot:e}, Tolerance: {tolerance:e}\nSuggestion: {suggestion}")]
    SingularMatrix {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// Column at which elimination found no usable pivot
        pivot_index: usize,
        /// Best pivot candidate, relative to the largest absolute entry
        pivot: f64,
        /// Threshold the pivot was compared against
        tolerance: f64,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// Matrix dimensions are incompatible with the operation
    #[error("Dimension mismatch [{code}]: {message}\nExpected: {expected}\nActual: {actual}\nOperation: {operation}\nSuggestion: {suggestion}")]
    DimensionMismatch {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions description
        actual: String,
        /// The operation that failed
        operation: String,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// The shape is invalid for the operation
    #[error("Invalid shape [{code}]: {message}\nShape: {shape}\nOperation: {operation}\nReason: {reason}\nSuggestion: {suggestion}")]
    InvalidShape {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// String representation of the invalid shape
        shape: String,
        /// The operation that failed
        operation: String,
        /// Reason why the shape is invalid
        reason: String,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// A solve option is out of range
    #[error("Invalid option [{code}]: {message}\nOption: {option}\nValue: {value}\nSuggestion: {suggestion}")]
    InvalidOption {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// Name of the offending option
        option: String,
        /// Rejected value
        value: String,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// The matrix contains NaN or an infinite entry
    #[error("Non-finite value [{code}]: {message}\nRow: {row}, Col: {col}\nOperation: {operation}\nSuggestion: {suggestion}")]
    NonFinite {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// Row of the first non-finite entry
        row: usize,
        /// Column of the first non-finite entry
        col: usize,
        /// The operation that failed
        operation: String,
        /// Suggested fix for the error
        suggestion: String,
    },
}

/// Convenient result type for matrix operations
pub type Result<T> = std::result::Result<T, MatrixError>;

impl MatrixError {
    /// Create a singular matrix error
    pub fn singular<S1, S2>(
        code: &'static str,
        message: S1,
        pivot_index: usize,
        pivot: f64,
        tolerance: f64,
        suggestion: S2,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::SingularMatrix {
            code,
            message: message.into(),
            pivot_index,
            pivot,
            tolerance,
            suggestion: suggestion.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<S1, S2, S3, S4, S5>(
        code: &'static str,
        message: S1,
        expected: S2,
        actual: S3,
        operation: S4,
        suggestion: S5,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
        S5: Into<String>,
    {
        Self::DimensionMismatch {
            code,
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
            operation: operation.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create an invalid shape error
    pub fn invalid_shape<S1, S2, S3, S4, S5>(
        code: &'static str,
        message: S1,
        shape: S2,
        operation: S3,
        reason: S4,
        suggestion: S5,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
        S5: Into<String>,
    {
        Self::InvalidShape {
            code,
            message: message.into(),
            shape: shape.into(),
            operation: operation.into(),
            reason: reason.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option<S1, S2, S3, S4>(
        code: &'static str,
        message: S1,
        option: S2,
        value: S3,
        suggestion: S4,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
    {
        Self::InvalidOption {
            code,
            message: message.into(),
            option: option.into(),
            value: value.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a non-finite value error
    pub fn non_finite<S1, S2, S3>(
        code: &'static str,
        message: S1,
        row: usize,
        col: usize,
        operation: S2,
        suggestion: S3,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::NonFinite {
            code,
            message: message.into(),
            row,
            col,
            operation: operation.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Get the error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            Self::SingularMatrix { code, .. } => code,
            Self::DimensionMismatch { code, .. } => code,
            Self::InvalidShape { code, .. } => code,
            Self::InvalidOption { code, .. } => code,
            Self::NonFinite { code, .. } => code,
        }
    }

    /// Check if this is a shape-related error
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. } | Self::InvalidShape { .. })
    }

    /// Check if this error comes from the numerical content of the matrix
    pub fn is_numerical_error(&self) -> bool {
        matches!(self, Self::SingularMatrix { .. } | Self::NonFinite { .. })
    }
}
