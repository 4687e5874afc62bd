//! Matcache: a matrix holder that remembers its inverse
//!
//! [`CachedMatrix`] owns a matrix and a single-slot cache for its inverse.
//! [`cache_solve`] fills the slot on first use and answers from it until the
//! matrix is replaced with [`CachedMatrix::set_matrix`], which empties it.
//!
//! # Example
//!
//! ```rust
//! use matcache_core::{cache_solve, CachedMatrix, SolveOptions};
//! use ndarray::array;
//!
//! let mut holder = CachedMatrix::new(array![[4.0, 7.0], [2.0, 6.0]]);
//!
//! // computed and stored
//! let inverse = cache_solve(&mut holder, &SolveOptions::default())?;
//!
//! // answered from the cache
//! let again = cache_solve(&mut holder, &SolveOptions::default())?;
//! assert_eq!(inverse, again);
//!
//! // replacing the matrix invalidates the cache
//! holder.set_matrix(array![[1.0, 0.0], [0.0, 1.0]]);
//! assert!(holder.cached_inverse().is_none());
//! # Ok::<(), matcache_core::MatrixError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod holder;
pub mod matrix;
pub mod ops;
pub mod shape;
pub mod solve;
pub mod validation;

// Re-export main types
pub use error::{MatrixError, Result};
pub use holder::{CacheState, CacheStats, CachedMatrix};
pub use matrix::{identity, matrix_from_rows, matrix_to_rows, Matrix};
pub use ops::{is_identity, matmul, GaussJordan, Inverter};
pub use shape::Shape;
pub use solve::{cache_solve, cache_solve_with, SolveConfig, SolveOptions, DEFAULT_TOLERANCE};
pub use validation::MatrixValidator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        cache_solve, cache_solve_with, CacheState, CachedMatrix, GaussJordan, Inverter, Matrix,
        MatrixError, Result, Shape, SolveOptions,
    };
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
