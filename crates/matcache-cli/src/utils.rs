//! Utility functions for Matcache CLI

use anyhow::{Context, Result};
use console::style;
use matcache_core::{matrix_from_rows, CacheStats, Matrix};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;

/// Read a matrix stored as a JSON array of rows
pub fn read_matrix(path: &Path) -> Result<Matrix> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read matrix file: {}", path.display()))?;
    parse_matrix(&content).with_context(|| format!("Invalid matrix in {}", path.display()))
}

/// Parse a matrix from a JSON array of rows
pub fn parse_matrix(content: &str) -> Result<Matrix> {
    let rows: Vec<Vec<f64>> = serde_json::from_str(content).context("Expected a JSON array of number arrays")?;
    Ok(matrix_from_rows(rows)?)
}

/// Format a matrix as aligned rows
pub fn format_matrix(matrix: &Matrix, precision: usize) -> String {
    let cells: Vec<Vec<String>> = matrix
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|v| format!("{:.*}", precision, v)).collect())
        .collect();
    let width = cells.iter().flatten().map(String::len).max().unwrap_or(0);

    cells
        .iter()
        .map(|row| {
            let line: Vec<String> = row.iter().map(|c| format!("{:>width$}", c, width = width)).collect();
            format!("[ {} ]", line.join("  "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cache statistics as JSON
pub fn stats_json(stats: &CacheStats) -> Value {
    json!({
        "hits": stats.hits,
        "misses": stats.misses,
        "failures": stats.failures,
        "hit_rate": stats.hit_rate(),
    })
}

/// Format duration in human-readable format
pub fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();
    if micros >= 1_000_000 {
        format!("{:.3}s", duration.as_secs_f64())
    } else if micros >= 1_000 {
        format!("{:.3}ms", micros as f64 / 1_000.0)
    } else {
        format!("{}µs", micros)
    }
}

/// Print JSON output
pub fn print_json(data: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print a labelled matrix
pub fn print_matrix(label: &str, matrix: &Matrix, precision: usize) {
    println!("{}", style(label).bold());
    println!("{}", format_matrix(matrix, precision));
}

/// Print cache statistics
pub fn print_stats(stats: &CacheStats) {
    println!(
        "{} hits: {}, misses: {}, failures: {}, hit rate: {:.1}%",
        style("Cache:").bold(),
        stats.hits,
        stats.misses,
        stats.failures,
        stats.hit_rate() * 100.0
    );
}

/// Print success message with styling
pub fn print_success(message: &str) {
    println!("{} {}", style("Success:").green().bold(), message);
}
