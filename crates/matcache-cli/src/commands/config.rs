//! Config command implementation

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use crate::commands::Command;
use crate::config::Config;
use crate::utils::{print_json, print_success};

#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Write the effective configuration to the config path
    #[arg(long)]
    pub init: bool,
}

impl Command for ConfigCommand {
    fn execute(&self, config: &Config, json_output: bool) -> Result<()> {
        if self.init {
            config.save(config.path())?;
        }

        if json_output {
            print_json(&json!({
                "path": config.path().display().to_string(),
                "config": serde_json::to_value(config).context("Failed to serialize configuration")?,
            }))?;
        } else {
            println!("# {}", config.path().display());
            print!("{}", toml::to_string_pretty(config).context("Failed to serialize configuration")?);
            if self.init {
                print_success(&format!("wrote {}", config.path().display()));
            }
        }

        Ok(())
    }
}
