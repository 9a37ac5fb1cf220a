//! Library module for the tabsurveyor binary.
//!
//! This module exposes the command-line interface and the command
//! implementations so they can be tested without spawning the binary.
//! The entry point itself is in main.rs.

pub mod config;
pub mod output;
pub mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tabsurveyor_core::{LogFormat, Profiler, Result, read_csv_path};
use tracing::info;

use crate::config::{ConfigOverrides, SurveyorConfig};
use crate::report::{Preview, ReportFormat, render_report};

/// CLI argument structure
#[derive(Parser)]
#[command(name = "tabsurveyor")]
#[command(about = "Tabular dataset profiling tool")]
#[command(version)]
#[command(long_about = "
TabSurveyor - Offline CSV dataset profiling

Reports for a CSV file:
- Row and column counts, exact duplicate rows
- Missing cells overall and per column
- Complete columns and per-column completion rates
- Case-insensitive search for a word across all cell values

Bookkeeping columns (CreatedAt, ModifiedAt, DeletedAt, IsDeleted,
CreatedById, ModifiedById, DeletedById, Governorate) are left out of the
completeness table and the word search by default.

EXAMPLES:
  tabsurveyor profile books.csv
  tabsurveyor profile books.csv --columns date --word cairo
  tabsurveyor profile books.csv --format markdown --output report.md
  tabsurveyor excluded
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand)]
pub enum Command {
    /// Profile a CSV file
    Profile(ProfileArgs),
    /// Print the effective excluded-column set
    Excluded(ExcludedArgs),
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress all log output except errors"
    )]
    pub quiet: bool,

    /// Log record format
    #[arg(long, global = true, default_value = "text", help = "Log format (text or json)")]
    pub log_format: LogFormat,
}

/// Options shared by commands that build a configuration.
#[derive(Args, Clone, Default)]
pub struct ConfigArgs {
    /// Configuration file
    #[arg(
        long,
        env = "TABSURVEYOR_CONFIG",
        value_name = "FILE",
        help = "JSON configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Extra excluded columns
    #[arg(
        long,
        env = "TABSURVEYOR_EXCLUDE",
        value_delimiter = ',',
        help = "Comma-separated column names to exclude in addition to the configured set"
    )]
    pub exclude: Vec<String>,

    /// Drop the configured excluded set
    #[arg(long, help = "Do not exclude the default bookkeeping columns")]
    pub no_default_excludes: bool,
}

#[derive(Args)]
pub struct ProfileArgs {
    /// CSV file to profile
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Column-name filter
    #[arg(long, default_value = "", help = "Show only columns whose name contains this text")]
    pub columns: String,

    /// Word to search for
    #[arg(long, default_value = "", help = "Count cells containing this text (case-insensitive)")]
    pub word: String,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Output file path
    #[arg(short, long, value_name = "FILE", help = "Write the report to a file instead of stdout")]
    pub output: Option<PathBuf>,

    /// Preview rows
    #[arg(long, value_name = "N", help = "Number of leading rows to preview (0 disables)")]
    pub preview: Option<usize>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Overall example cap
    #[arg(long, value_name = "N", help = "Maximum word-search examples overall")]
    pub max_examples: Option<usize>,

    /// Per-column example cap
    #[arg(long, value_name = "N", help = "Maximum word-search examples per column")]
    pub max_examples_per_column: Option<usize>,

    /// Field delimiter
    #[arg(long, value_name = "CHAR", help = "Field delimiter (default ',')")]
    pub delimiter: Option<char>,
}

#[derive(Args)]
pub struct ExcludedArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl ConfigArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            exclude: self.exclude.clone(),
            no_default_excludes: self.no_default_excludes,
            ..ConfigOverrides::default()
        }
    }
}

impl ProfileArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            max_examples: self.max_examples,
            max_examples_per_column: self.max_examples_per_column,
            delimiter: self.delimiter,
            preview_rows: self.preview,
            ..self.config.overrides()
        }
    }
}

/// Loads the configuration and applies flag overrides.
async fn load_config(args: &ConfigArgs, overrides: &ConfigOverrides) -> Result<SurveyorConfig> {
    SurveyorConfig::load(args.config.as_deref())
        .await?
        .with_overrides(overrides)
}

/// Profiles the file named by `args` and renders the report.
///
/// Queries are trimmed before profiling.
pub async fn build_profile_report(args: &ProfileArgs) -> Result<String> {
    let config = load_config(&args.config, &args.overrides()).await?;

    info!("Profiling {}", args.file.display());
    let dataset = read_csv_path(&args.file, &config.ingest)?;
    info!(
        "Loaded {} rows x {} columns",
        dataset.num_rows(),
        dataset.num_columns()
    );

    let profiler = Profiler::new(config.profiler);
    let profile = profiler.profile(&dataset, args.columns.trim(), args.word.trim());

    if profile.num_duplicates > 0 {
        info!("Found {} duplicate rows", profile.num_duplicates);
    }

    let preview = (config.preview_rows > 0)
        .then(|| Preview::from_dataset(&dataset, config.preview_rows));
    render_report(&profile, preview.as_ref(), args.format)
}

/// Lists the effective excluded-column set, one name per line.
pub async fn build_excluded_report(args: &ExcludedArgs) -> Result<String> {
    let config = load_config(&args.config, &args.config.overrides()).await?;
    let mut report = String::new();
    for name in config.profiler.excluded_columns.iter() {
        report.push_str(name);
        report.push('\n');
    }
    Ok(report)
}

/// Runs the `profile` command.
pub async fn run_profile(args: &ProfileArgs) -> Result<()> {
    let report = build_profile_report(args).await?;
    output::write_report(&report, args.output.as_deref()).await
}

/// Runs the `excluded` command.
pub async fn run_excluded(args: &ExcludedArgs) -> Result<()> {
    let report = build_excluded_report(args).await?;
    output::write_report(&report, None).await
}
