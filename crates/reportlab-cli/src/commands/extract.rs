//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use reportlab_domain::{UploadedFile, VisitRecord};
use reportlab_extractor::{Extractor, FileFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Files whose name starts with this are consolidated outputs, not reports.
const OUTPUT_PREFIX: &str = "Reporte_";

/// Execute the extract command.
pub fn execute_extract(
    args: ExtractArgs,
    extractor: &Extractor,
    formatter: &Formatter,
) -> Result<()> {
    let files = collect_files(&args.paths)?;
    let batch = extractor.run_batch(&files);

    println!("{}", formatter.format_batch(&batch)?);

    if let Some(output) = args.output {
        write_consolidated_csv(&output, batch.records())?;
        eprintln!(
            "{}",
            formatter.success(&format!(
                "Wrote {} records to {}",
                batch.records().len(),
                output.display()
            ))
        );
    }

    Ok(())
}

/// Read every report named by `paths`.
///
/// Files are taken as given, whatever their extension, so unsupported ones
/// show up as batch failures. Directories contribute their `.xlsx` and
/// `.csv` files (not recursive), sorted by name, skipping consolidated
/// outputs.
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<UploadedFile>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_report_file(p))
                .collect();
            entries.sort();
            debug!("Found {} report files in {}", entries.len(), path.display());

            for entry in entries {
                files.push(read_file(&entry)?);
            }
        } else if path.is_file() {
            files.push(read_file(path)?);
        } else {
            return Err(CliError::InvalidInput(format!(
                "No such file or directory: {}",
                path.display()
            )));
        }
    }

    Ok(files)
}

fn is_report_file(path: &Path) -> bool {
    let name = file_name(path);
    FileFormat::from_filename(&name).is_some() && !name.starts_with(OUTPUT_PREFIX)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_file(path: &Path) -> Result<UploadedFile> {
    Ok(UploadedFile::new(file_name(path), fs::read(path)?))
}

/// Write records as CSV with the report headers.
pub fn write_consolidated_csv(path: &Path, records: &[VisitRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(VisitRecord::HEADERS)?;
    for record in records {
        writer.write_record(record.values())?;
    }
    writer.flush()?;
    Ok(())
}
