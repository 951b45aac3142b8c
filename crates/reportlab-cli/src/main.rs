//! Reportlab CLI - Command-line interface for visit-report extraction.

use clap::Parser;
use reportlab_cli::commands;
use reportlab_cli::{Cli, Command, Config, Formatter};
use reportlab_extractor::Extractor;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> reportlab_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Load config, falling back to defaults when the file is absent
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    }
    .with_env_overrides();

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let extractor = Extractor::new(config.extractor.clone());

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &extractor, &formatter)?,
        Command::Upload(args) => {
            commands::execute_upload(args, &extractor, &config, &formatter)?
        }
        Command::Reports(args) => commands::execute_reports(args, &config, &formatter)?,
        Command::Stats(args) => commands::execute_stats(args, &config, &formatter)?,
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for table and JSON output.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
