//! Invert command implementation
//!
//! Requests the inverse of one matrix several times through a single
//! `CachedMatrix`, so the first request computes and the rest hit the cache.

use anyhow::{Context, Result};
use clap::Args;
use matcache_core::{cache_solve, is_identity, matmul, matrix_to_rows, CachedMatrix};
use serde_json::json;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use crate::commands::{solve_options, Command};
use crate::config::Config;
use crate::utils::{format_duration, print_json, print_matrix, print_stats, print_success, read_matrix, stats_json};

/// Largest element-wise deviation from the identity accepted by `--verify`
const VERIFY_EPSILON: f64 = 1e-9;

#[derive(Args, Debug)]
pub struct InvertCommand {
    /// Path to the matrix (JSON array of rows)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of inverse requests against the same holder
    #[arg(short, long, default_value_t = 2)]
    pub repeat: usize,

    /// Check that the matrix times its inverse is the identity
    #[arg(long)]
    pub verify: bool,

    /// Override the configured pivot tolerance
    #[arg(long)]
    pub tolerance: Option<f64>,
}

impl Command for InvertCommand {
    fn execute(&self, config: &Config, json_output: bool) -> Result<()> {
        debug!("Executing invert command with config: {:?}", self);

        let mut holder = CachedMatrix::new(read_matrix(&self.input)?);
        info!("Inverting {} matrix from {}", holder.shape(), self.input.display());

        let options = solve_options(config, self.tolerance);

        let mut timings = Vec::with_capacity(self.repeat.max(1));
        let mut inverse = None;
        for _ in 0..self.repeat.max(1) {
            let start = Instant::now();
            let result = cache_solve(&mut holder, &options).context("Failed to invert matrix")?;
            timings.push(start.elapsed());
            inverse = Some(result);
        }
        let inverse = inverse.context("No inverse was computed")?;

        let verified = if self.verify {
            let product = matmul(holder.matrix(), &inverse)?;
            if !is_identity(&product, VERIFY_EPSILON) {
                anyhow::bail!("Verification failed: matrix times inverse is not the identity");
            }
            Some(true)
        } else {
            None
        };

        let stats = holder.stats();
        if json_output {
            print_json(&json!({
                "inverse": matrix_to_rows(&inverse),
                "stats": stats_json(&stats),
                "timings_us": timings.iter().map(|t| t.as_micros() as u64).collect::<Vec<_>>(),
                "verified": verified,
            }))?;
        } else {
            print_matrix("Inverse:", &inverse, config.output.precision);
            print_stats(&stats);
            for (i, t) in timings.iter().enumerate() {
                let kind = if i == 0 { "computed" } else { "cached" };
                println!("  request {}: {} ({})", i + 1, format_duration(*t), kind);
            }
            if verified.is_some() {
                print_success("matrix times inverse is the identity");
            }
        }

        Ok(())
    }
}
