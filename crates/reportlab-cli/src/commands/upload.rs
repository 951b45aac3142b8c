//! Upload command implementation.

use super::extract::collect_files;
use super::open_store;
use crate::cli::UploadArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use reportlab_extractor::{upload_records, Extractor};

/// Execute the upload command.
///
/// Files that fail extraction are reported and left out; the rest go
/// through the dedup-before-insert upload.
pub fn execute_upload(
    args: UploadArgs,
    extractor: &Extractor,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let files = collect_files(&args.paths)?;
    let batch = extractor.run_batch(&files);

    for failure in batch.failures() {
        eprintln!("{}", formatter.error(&format!("{}: {}", failure.file, failure.error)));
    }

    let mut store = open_store(config)?;
    let outcome = upload_records(&mut store, batch.records())?;

    println!("{}", formatter.upload_result(&outcome));
    Ok(())
}
