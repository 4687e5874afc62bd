//! Replay command implementation
//!
//! Runs a scripted session against one `CachedMatrix`. A script is a JSON
//! array of steps:
//!
//! ```json
//! [
//!   {"op": "set", "matrix": [[2, 0], [0, 4]]},
//!   {"op": "solve"},
//!   {"op": "solve"},
//!   {"op": "show"}
//! ]
//! ```

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use matcache_core::{cache_solve, matrix_from_rows, matrix_to_rows, CachedMatrix, SolveOptions};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::commands::{solve_options, Command};
use crate::config::Config;
use crate::utils::{format_matrix, print_json, print_stats, stats_json};

#[derive(Args, Debug)]
pub struct ReplayCommand {
    /// Path to the session script (JSON array of steps)
    #[arg(short, long)]
    pub script: PathBuf,

    /// Continue after a failed solve instead of stopping
    #[arg(long)]
    pub keep_going: bool,

    /// Override the configured pivot tolerance
    #[arg(long)]
    pub tolerance: Option<f64>,
}

/// One step of a session script
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    /// Replace the held matrix
    Set {
        /// New matrix as rows
        matrix: Vec<Vec<f64>>,
    },
    /// Request the inverse
    Solve,
    /// Report the matrix and the cache slot
    Show,
}

impl Command for ReplayCommand {
    fn execute(&self, config: &Config, json_output: bool) -> Result<()> {
        debug!("Executing replay command with config: {:?}", self);

        let content = std::fs::read_to_string(&self.script)
            .with_context(|| format!("Failed to read script: {}", self.script.display()))?;
        let steps: Vec<Step> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse script: {}", self.script.display()))?;

        let options = solve_options(config, self.tolerance);
        let mut holder = CachedMatrix::default();
        let mut results = Vec::with_capacity(steps.len());

        for (index, step) in steps.into_iter().enumerate() {
            let result = run_step(&mut holder, step, &options)
                .with_context(|| format!("Step {} failed", index + 1))?;

            if !json_output {
                print_step(index + 1, &result, config.output.precision);
            }

            let failed = result.get("error").is_some();
            results.push(result);
            if failed && !self.keep_going {
                if json_output {
                    print_json(&json!({ "steps": results, "stats": stats_json(&holder.stats()) }))?;
                }
                anyhow::bail!("Step {} failed to solve", index + 1);
            }
        }

        if json_output {
            print_json(&json!({ "steps": results, "stats": stats_json(&holder.stats()) }))?;
        } else {
            print_stats(&holder.stats());
        }

        Ok(())
    }
}

/// Applies one step to the holder and describes the outcome
fn run_step(holder: &mut CachedMatrix, step: Step, options: &SolveOptions) -> Result<Value> {
    match step {
        Step::Set { matrix } => {
            holder.set_matrix(matrix_from_rows(matrix)?);
            Ok(json!({
                "op": "set",
                "shape": holder.shape().to_string(),
                "generation": holder.generation(),
            }))
        }
        Step::Solve => {
            let cached = holder.is_cached();
            match cache_solve(holder, options) {
                Ok(inverse) => Ok(json!({
                    "op": "solve",
                    "cached": cached,
                    "result": matrix_to_rows(&inverse),
                })),
                Err(e) => {
                    warn!("solve failed: {}", e.code());
                    Ok(json!({
                        "op": "solve",
                        "cached": false,
                        "error": e.code(),
                        "message": e.to_string(),
                    }))
                }
            }
        }
        Step::Show => Ok(json!({
            "op": "show",
            "matrix": matrix_to_rows(holder.matrix()),
            "cached_inverse": holder.cached_inverse().map(matrix_to_rows),
        })),
    }
}

fn print_step(number: usize, result: &Value, precision: usize) {
    let op = result["op"].as_str().unwrap_or_default();
    println!("{} {}", style(format!("[{}]", number)).dim(), style(op).bold());

    if let Some(code) = result.get("error").and_then(Value::as_str) {
        println!("  {} {}", style("failed:").red(), code);
        return;
    }

    match op {
        "set" => println!("  matrix {} (generation {})", result["shape"].as_str().unwrap_or_default(), result["generation"]),
        "solve" => {
            let source = if result["cached"].as_bool().unwrap_or(false) { "cached" } else { "computed" };
            println!("  {}", source);
            print_rows(&result["result"], precision);
        }
        "show" => {
            println!("  matrix:");
            print_rows(&result["matrix"], precision);
            if result["cached_inverse"].is_null() {
                println!("  cached inverse: none");
            } else {
                println!("  cached inverse:");
                print_rows(&result["cached_inverse"], precision);
            }
        }
        _ => {}
    }
}

fn print_rows(rows: &Value, precision: usize) {
    let parsed: Option<Vec<Vec<f64>>> = serde_json::from_value(rows.clone()).ok();
    if let Some(matrix) = parsed.and_then(|rows| matrix_from_rows(rows).ok()) {
        for line in format_matrix(&matrix, precision).lines() {
            println!("    {}", line);
        }
    }
}
