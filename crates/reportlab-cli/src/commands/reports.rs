//! Reports command implementation.

use super::open_store;
use crate::cli::ReportsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use reportlab_domain::traits::ReportStore;

/// Execute the reports command.
pub fn execute_reports(args: ReportsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = open_store(config)?;
    let reports = store.recent(args.limit)?;

    println!("{}", formatter.format_reports(&reports)?);
    Ok(())
}
