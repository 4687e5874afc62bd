//! Matrix holder with a single-slot inverse cache
//!
//! [`CachedMatrix`] owns a matrix and, optionally, the inverse computed for
//! it. Replacing the matrix always empties the slot, so a populated slot
//! belongs to the matrix currently installed.

use tracing::debug;

use crate::matrix::Matrix;
use crate::shape::Shape;

/// State of the inverse slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No inverse for the current matrix
    Empty,
    /// Holds an inverse for the current matrix
    Populated,
}

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Solves answered from the slot
    pub hits: u64,
    /// Solves that ran the inversion primitive successfully
    pub misses: u64,
    /// Solves where the inversion primitive failed
    pub failures: u64,
}

impl CacheStats {
    /// Fraction of solves answered from the slot
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.failures;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A matrix together with its lazily computed inverse
#[derive(Debug, Clone)]
pub struct CachedMatrix {
    matrix: Matrix,
    inverse: Option<Matrix>,
    generation: u64,
    stats: CacheStats,
}

impl Default for CachedMatrix {
    /// Holds the empty `0x0` placeholder matrix
    fn default() -> Self {
        Self::new(Matrix::zeros((0, 0)))
    }
}

impl CachedMatrix {
    /// Creates a holder with an empty inverse slot
    pub fn new(matrix: Matrix) -> Self {
        Self {
            matrix,
            inverse: None,
            generation: 0,
            stats: CacheStats::default(),
        }
    }

    /// Replaces the matrix and clears the cached inverse.
    ///
    /// Any two-dimensional array is accepted; squareness is checked when
    /// the inverse is computed.
    pub fn set_matrix(&mut self, matrix: Matrix) {
        self.matrix = matrix;
        self.inverse = None;
        self.generation += 1;
        debug!(generation = self.generation, shape = %self.shape(), "matrix replaced, inverse invalidated");
    }

    /// The current matrix
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Stores `inverse` in the slot, overwriting any previous value.
    ///
    /// The caller guarantees that `inverse` was computed from
    /// [`matrix`](Self::matrix); nothing here checks it.
    pub fn set_cached_inverse(&mut self, inverse: Matrix) {
        self.inverse = Some(inverse);
    }

    /// The cached inverse, or `None` if it has not been computed for the
    /// current matrix
    pub fn cached_inverse(&self) -> Option<&Matrix> {
        self.inverse.as_ref()
    }

    /// State of the inverse slot
    pub fn state(&self) -> CacheState {
        if self.inverse.is_some() {
            CacheState::Populated
        } else {
            CacheState::Empty
        }
    }

    /// Whether the slot currently holds an inverse
    pub fn is_cached(&self) -> bool {
        self.inverse.is_some()
    }

    /// Number of times the matrix has been replaced
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Shape of the current matrix
    pub fn shape(&self) -> Shape {
        Shape::of(&self.matrix)
    }

    /// Hit and miss counters
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Resets the hit and miss counters
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    pub(crate) fn record_hit(&mut self) {
        self.stats.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.stats.misses += 1;
    }

    pub(crate) fn record_failure(&mut self) {
        self.stats.failures += 1;
    }
}

impl From<Matrix> for CachedMatrix {
    fn from(matrix: Matrix) -> Self {
        Self::new(matrix)
    }
}
