//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `insider_transactions` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output and exit status
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use insider_transactions::initialization::init_logger_with;
use insider_transactions::{run_lookups, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load RUST_LOG and friends from .env, if present
    let _ = dotenvy::dotenv();

    let config = Config::from(Cli::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_lookups(config).await {
        Ok(report) => {
            if report.aborted {
                println!("Exiting");
                return Ok(());
            }
            println!(
                "Saved {} of {} issuer{} ({} without transactions) in {:.1}s",
                report.downloaded,
                report.requested,
                if report.requested == 1 { "" } else { "s" },
                report.no_results,
                report.elapsed_seconds
            );
            if report.downloaded > 0 {
                println!("Results saved in {}", report.output_dir.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("insider_transactions error: {:#}", e);
            process::exit(1);
        }
    }
}
