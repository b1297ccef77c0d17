//! CLI for hashrep.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hashrep_core::config::{self, HashrepConfig};
use std::path::PathBuf;

use commands::{run_config_path, run_lookup, run_validate, LookupArgs};

/// Top-level CLI for hashrep.
#[derive(Debug, Parser)]
#[command(name = "hashrep")]
#[command(about = "hashrep: file-hash reputation lookups", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/hashrep/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Look up MD5/SHA1/SHA256 hashes (and the SHA-256 of local files).
    Lookup {
        /// Hashes to look up.
        hashes: Vec<String>,

        /// Hash a local file with SHA-256 and look it up (repeatable).
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,

        /// Print results as JSON instead of a table.
        #[arg(long)]
        json: bool,

        /// Override the service base URL.
        #[arg(long)]
        url: Option<String>,

        /// Override the API key.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Check the configured options and report problems.
    Validate {
        /// Override the API key.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Print the config file location.
    ConfigPath,
}

fn load_config(path: Option<&PathBuf>) -> Result<HashrepConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    /// Parse arguments and dispatch. Returns the process exit code.
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();

        if let CliCommand::ConfigPath = cli.command {
            run_config_path(cli.config.as_deref())?;
            return Ok(0);
        }

        let mut cfg = load_config(cli.config.as_ref())?;
        tracing::debug!("loaded config: url={} max_concurrent={}", cfg.url, cfg.max_concurrent());

        match cli.command {
            CliCommand::Lookup {
                hashes,
                files,
                json,
                url,
                api_key,
            } => {
                if let Some(url) = url {
                    cfg.url = url;
                }
                if let Some(key) = api_key {
                    cfg.api_key = key;
                }
                let args = LookupArgs {
                    hashes,
                    files,
                    json,
                };
                run_lookup(&cfg, &args).await
            }
            CliCommand::Validate { api_key } => {
                if let Some(key) = api_key {
                    cfg.api_key = key;
                }
                Ok(run_validate(&cfg))
            }
            CliCommand::ConfigPath => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests;
