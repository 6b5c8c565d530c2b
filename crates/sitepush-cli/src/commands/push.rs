//! Push command - package the site and upload it

use crate::config;
use anyhow::Result;
use colored::Colorize;
use sitepush_core::{DeployError, DeployOutcome, Deployer, Environment};
use std::path::Path;

pub async fn run(env: Option<&str>, conf: &Path, insecure: bool) -> Result<()> {
    if !conf.exists() {
        connect_banner(conf);
        return Ok(());
    }

    let config = config::load(conf)?;

    let target: Environment = match env {
        Some(name) => name.parse()?,
        None => config.environment,
    };

    println!("{}", "🚀 Deploying static site".cyan().bold());
    println!("   Site:   {}", config.site_id.cyan());
    println!("   Target: {}", target.to_string().cyan());
    println!("   Folder: {}", config.public_folder.display().to_string().dimmed());
    println!();
    println!("{}", "📦 Compressing and uploading, please wait...".dimmed());

    let deployer = Deployer::new().insecure(insecure);
    match deployer.run(&config, target).await? {
        DeployOutcome::Released(info) => {
            println!();
            println!(
                "{}",
                format!("✅ Version {} is now active", info.version)
                    .green()
                    .bold()
            );
            if !info.staging_url.is_empty() {
                println!("   Visit {}", info.staging_url.cyan());
            }
            Ok(())
        }
        DeployOutcome::Rejected { status, body } => {
            // The service's diagnostic goes out verbatim, then the status.
            println!();
            println!("{body}");
            println!("{}", format!("⚠️  Upload failed ({status})").yellow().bold());
            Err(DeployError::UploadRejected { status, body }.into())
        }
    }
}

/// Onboarding banner shown when no configuration file exists yet.
fn connect_banner(conf: &Path) {
    println!("{}", "===================================".dimmed());
    println!("{}", "Connect your static site to Sitepush".blue().bold());
    println!("{}", "===================================".dimmed());
    println!();
    println!("No configuration found at {}.", conf.display());
    println!("Create it with your site details:");
    println!();
    println!("    environment   = \"staging\"");
    println!("    site_id       = \"example.com\"");
    println!("    upload_key    = \"<your upload key>\"");
    println!("    public_folder = \"public\"");
}
