//! Cached inversion
//!
//! [`cache_solve`] answers from the holder's inverse slot when it is
//! populated and otherwise runs the inversion primitive, storing the result
//! only after it succeeds.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::holder::CachedMatrix;
use crate::matrix::Matrix;
use crate::ops::{GaussJordan, Inverter};

/// Default pivot tolerance, relative to the largest absolute entry
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Options forwarded to the inversion primitive
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOptions {
    rhs: Option<Matrix>,
    tolerance: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            rhs: None,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolveOptions {
    /// Options for a plain inverse with the default tolerance
    pub fn new() -> Self {
        Self::default()
    }

    /// Solve `A X = rhs` instead of computing `A^-1`
    pub fn with_rhs(mut self, rhs: Matrix) -> Self {
        self.rhs = Some(rhs);
        self
    }

    /// Override the pivot tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Right-hand side, if any
    pub fn rhs(&self) -> Option<&Matrix> {
        self.rhs.as_ref()
    }

    /// Pivot tolerance
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

/// Serializable solve settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveConfig {
    /// Pivot tolerance, relative to the largest absolute entry
    pub tolerance: f64,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolveConfig {
    /// Options carrying these settings and no right-hand side
    pub fn to_options(&self) -> SolveOptions {
        SolveOptions::new().with_tolerance(self.tolerance)
    }
}

/// Returns the inverse of the held matrix using Gauss-Jordan elimination,
/// computing it only when the slot is empty.
pub fn cache_solve(holder: &mut CachedMatrix, options: &SolveOptions) -> Result<Matrix> {
    cache_solve_with(holder, &GaussJordan, options)
}

/// Returns the inverse of the held matrix, computing it with `inverter`
/// only when the slot is empty.
///
/// A populated slot is returned as is; `options` are ignored in that case.
/// On failure the error is returned unchanged and the slot stays empty.
pub fn cache_solve_with<I>(holder: &mut CachedMatrix, inverter: &I, options: &SolveOptions) -> Result<Matrix>
where
    I: Inverter + ?Sized,
{
    if let Some(inverse) = holder.cached_inverse() {
        let inverse = inverse.clone();
        info!("getting cached data");
        holder.record_hit();
        return Ok(inverse);
    }

    debug!(
        inverter = inverter.name(),
        generation = holder.generation(),
        shape = %holder.shape(),
        "inverse cache miss"
    );

    let inverse = match inverter.invert(holder.matrix(), options) {
        Ok(inverse) => inverse,
        Err(e) => {
            holder.record_failure();
            debug!(code = e.code(), "inversion failed, cache left empty");
            return Err(e);
        }
    };

    holder.set_cached_inverse(inverse.clone());
    holder.record_miss();
    Ok(inverse)
}
