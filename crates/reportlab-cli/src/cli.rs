//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reportlab CLI - Extract, store and summarize visit reports.
#[derive(Debug, Parser)]
#[command(name = "reportlab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path (default: ~/.reportlab/config.toml)
    #[arg(short, long, global = true, env = "REPORTLAB_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (filenames only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract records from report files
    Extract(ExtractArgs),

    /// Extract records and store the ones not stored yet
    Upload(UploadArgs),

    /// List stored reports, newest first
    Reports(ReportsArgs),

    /// Summarize stored reports
    Stats(StatsArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Report files or directories (directories are scanned for .xlsx/.csv)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Write the extracted records to a consolidated CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the upload command.
#[derive(Debug, Parser)]
pub struct UploadArgs {
    /// Report files or directories (directories are scanned for .xlsx/.csv)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Arguments for the reports command.
#[derive(Debug, Parser)]
pub struct ReportsArgs {
    /// Maximum number of reports
    #[arg(short, long, default_value = "50")]
    pub limit: usize,
}

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Only visits on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Only visits on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
