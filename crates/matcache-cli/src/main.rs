//! Matcache CLI - Command Line Interface for the matcache inverse cache
//!
//! Inverts matrices through a `CachedMatrix`, solves linear systems and
//! replays scripted sessions that show cache hits and invalidation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

mod commands;
mod config;
mod utils;

use commands::{
    config::ConfigCommand, invert::InvertCommand, replay::ReplayCommand, solve::SolveCommand,
    Command,
};

#[derive(Parser)]
#[command(
    name = "matcache",
    version = env!("CARGO_PKG_VERSION"),
    about = "Matrix inversion with a cached inverse",
    long_about = "Invert matrices and solve linear systems through a holder that caches the inverse until the matrix changes."
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MATCACHE_CONFIG")]
    config: Option<PathBuf>,

    /// JSON output format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Invert a matrix, repeating the request against the cache
    #[command(name = "invert", alias = "inv")]
    Invert(InvertCommand),

    /// Solve A X = B
    #[command(name = "solve", alias = "s")]
    Solve(SolveCommand),

    /// Replay a scripted session of set/solve/show steps
    #[command(name = "replay", alias = "r")]
    Replay(ReplayCommand),

    /// Show or initialize the configuration
    #[command(name = "config")]
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli)?;

    debug!("Matcache CLI v{} starting", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = config::Config::load(cli.config.as_deref())?;
    debug!("Configuration loaded: {:?}", config);

    // Execute command
    let result = match &cli.command {
        Commands::Invert(cmd) => cmd.execute(&config, cli.json),
        Commands::Solve(cmd) => cmd.execute(&config, cli.json),
        Commands::Replay(cmd) => cmd.execute(&config, cli.json),
        Commands::Config(cmd) => cmd.execute(&config, cli.json),
    };

    match result {
        Ok(_) => {
            if !cli.quiet {
                info!("Command completed successfully");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    // RUST_LOG directives take precedence over the flags
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
