//! Tabular dataset profiling tool.
//!
//! This binary reads a CSV file and reports its shape, duplicate rows,
//! per-column completeness, missing-value breakdown and free-text search
//! hits. It runs fully offline and never modifies its input.

use clap::Parser;
use tabsurveyor::{Cli, Command, run_excluded, run_profile};
use tabsurveyor_core::{Result, init_logging};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.global.verbose, cli.global.quiet, cli.global.log_format)?;

    match &cli.command {
        Command::Profile(args) => run_profile(args).await.map_err(|e| {
            error!("Profiling {} failed: {}", args.file.display(), e);
            e
        }),
        Command::Excluded(args) => run_excluded(args).await.map_err(|e| {
            error!("Failed to resolve excluded columns: {}", e);
            e
        }),
    }
}
