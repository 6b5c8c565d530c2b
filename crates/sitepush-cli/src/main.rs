//! Sitepush CLI
//!
//! Packages a static site directory and pushes it to a deployment
//! environment.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use sitepush_core::DeployError;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "sitepush")]
#[command(author, version, about = "Sitepush - deploy static sites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Package the public folder and push it to a deployment environment
    Push {
        /// Target environment (staging or production); defaults to the
        /// environment named in the configuration file
        env: Option<String>,

        /// Path to the configuration file
        #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
        conf: PathBuf,

        /// Skip TLS certificate verification (local/staging debugging only)
        #[arg(long, hide = true)]
        insecure: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A malformed invocation prints usage and ends the process quietly;
    // it is not an error worth an exit code.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            return Ok(());
        }
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose {
            "sitepush_cli=debug,sitepush_core=debug"
        } else {
            "sitepush_cli=info"
        })
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let result = match cli.command {
        Commands::Push {
            env,
            conf,
            insecure,
        } => commands::push::run(env.as_deref(), &conf, insecure).await,
    };

    if let Err(ref e) = result {
        error!("Command failed: {}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        let code = e
            .downcast_ref::<DeployError>()
            .map(DeployError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }

    result
}
