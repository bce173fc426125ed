mod cli;
mod config;
mod error;
mod fetcher;
mod mirror;
mod parser;
mod runlog;
mod types;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use colored::*;
use log::{error, info};
use mirror::Mirror;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    info!("Starting hero skin mirror");

    let cli = Cli::parse();
    let config = cli.into_config();
    info!(
        "Mirroring into {} with assets {:?}",
        config.layout.root.display(),
        config.assets
    );
    let root = config.layout.root.clone();

    match Mirror::new(config).run().await {
        Ok(stats) => {
            println!("\n{}", "Mirror Summary:".bold());
            println!("Heroes processed: {}", stats.entities_processed);
            println!(
                "Skins downloaded: {}",
                stats.skins_downloaded.to_string().green()
            );
            println!(
                "Assets transferred: {:.2} MB",
                stats.bytes_downloaded as f64 / 1_048_576.0
            );

            if stats.not_found_count() > 0 {
                println!(
                    "\n{} ({})",
                    "Files not found:".yellow().bold(),
                    stats.not_found_count()
                );
                for entry in &stats.not_found {
                    println!("✗ {}", entry.path.display().to_string().yellow());
                    println!("  URL: {}", entry.url);
                }
            } else {
                println!("\n{}", "All files found".green());
            }
            Ok(())
        }
        Err(e) => {
            error!("Mirror run failed: {}", e);
            eprintln!("{}", "Mirror run aborted".red());
            Err(e).with_context(|| format!("mirroring into {} aborted", root.display()))
        }
    }
}
