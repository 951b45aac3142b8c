//! Reportlab API server
//!
//! Starts the HTTP server for report extraction and storage.

use anyhow::Context;
use reportlab_api::{config::ApiConfig, start_server};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        ApiConfig::from_file(config_path)
            .with_context(|| format!("loading {}", config_path))?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        return Ok(());
    } else {
        ApiConfig::default()
    };

    start_server(config.with_env_overrides()).await?;

    Ok(())
}

fn print_help() {
    println!("Reportlab API - visit report extraction and storage");
    println!();
    println!("USAGE:");
    println!("    reportlab-api [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    REPORTLAB_DATABASE_PATH    SQLite database file (overrides store.database_path)");
    println!("    REPORTLAB_REPORTS_TABLE    Reports table (overrides store.table_name)");
    println!("    RUST_LOG                   Log filter (default: info)");
    println!();
}
