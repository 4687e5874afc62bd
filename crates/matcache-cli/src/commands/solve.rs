//! Solve command implementation

use anyhow::{Context, Result};
use clap::Args;
use matcache_core::{cache_solve, matrix_to_rows, CachedMatrix};
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::commands::{solve_options, Command};
use crate::config::Config;
use crate::utils::{print_json, print_matrix, read_matrix};

#[derive(Args, Debug)]
pub struct SolveCommand {
    /// Path to the coefficient matrix A (JSON array of rows)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to the right-hand side B (JSON array of rows)
    #[arg(short = 'b', long)]
    pub rhs: PathBuf,

    /// Override the configured pivot tolerance
    #[arg(long)]
    pub tolerance: Option<f64>,
}

impl Command for SolveCommand {
    fn execute(&self, config: &Config, json_output: bool) -> Result<()> {
        debug!("Executing solve command with config: {:?}", self);

        let mut holder = CachedMatrix::new(read_matrix(&self.input)?);
        let rhs = read_matrix(&self.rhs)?;
        info!("Solving {} system against {} right-hand side", holder.shape(), matcache_core::Shape::of(&rhs));

        let options = solve_options(config, self.tolerance).with_rhs(rhs);
        let solution = cache_solve(&mut holder, &options).context("Failed to solve linear system")?;

        if json_output {
            print_json(&json!({ "solution": matrix_to_rows(&solution) }))?;
        } else {
            print_matrix("Solution:", &solution, config.output.precision);
        }

        Ok(())
    }
}
