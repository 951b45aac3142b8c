//! Stats command implementation.

use super::open_store;
use crate::cli::StatsArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::NaiveDate;
use reportlab_domain::compute_stats;
use reportlab_domain::traits::{ReportQuery, ReportStore};

/// Execute the stats command.
pub fn execute_stats(args: StatsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let query = ReportQuery {
        start_date: args.start_date.map(check_date).transpose()?,
        end_date: args.end_date.map(check_date).transpose()?,
        limit: None,
    };

    let store = open_store(config)?;
    let reports = store.query(&query)?;
    let current_month = chrono::Local::now().format("%Y-%m").to_string();
    let stats = compute_stats(&reports, &current_month);

    println!("{}", formatter.format_stats(&stats)?);
    Ok(())
}

fn check_date(value: String) -> Result<String> {
    match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
        Ok(_) => Ok(value),
        Err(_) => Err(CliError::InvalidInput(format!(
            "Expected YYYY-MM-DD, got '{}'",
            value
        ))),
    }
}
