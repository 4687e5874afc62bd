//! Command implementations for Matcache CLI

pub mod config;
pub mod invert;
pub mod replay;
pub mod solve;

use anyhow::Result;
use matcache_core::SolveOptions;

/// Trait for CLI command execution
pub trait Command {
    /// Execute the command
    fn execute(&self, config: &crate::config::Config, json_output: bool) -> Result<()>;
}

/// Solve options from the configuration, with an optional tolerance override
pub(crate) fn solve_options(config: &crate::config::Config, tolerance: Option<f64>) -> SolveOptions {
    let options = config.solve.to_options();
    match tolerance {
        Some(tolerance) => options.with_tolerance(tolerance),
        None => options,
    }
}
