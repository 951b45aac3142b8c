//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use reportlab_domain::{BatchResult, ReportStats, StoredReport, VisitRecord};
use reportlab_extractor::UploadOutcome;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the outcome of a batch extraction.
    pub fn format_batch(&self, batch: &BatchResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(batch)?),
            OutputFormat::Quiet => Ok(batch
                .records()
                .iter()
                .map(|r| r.file.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut lines = Vec::new();
                if batch.records().is_empty() {
                    lines.push(self.colorize("No records extracted.", "yellow"));
                } else {
                    lines.push(records_table(batch.records()).to_string());
                }
                for failure in batch.failures() {
                    lines.push(self.error(&format!("{}: {}", failure.file, failure.error)));
                }
                lines.push(self.info(&format!(
                    "Processed {} of {} files",
                    batch.succeeded(),
                    batch.total()
                )));
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format stored reports.
    pub fn format_reports(&self, reports: &[StoredReport]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
            OutputFormat::Quiet => Ok(reports
                .iter()
                .map(|r| r.row.archivo.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if reports.is_empty() {
                    return Ok(self.colorize("No reports found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Archivo", "Sede", "Fecha", "Responsable", "Riesgo", "Cargado"]);
                for report in reports {
                    builder.push_record([
                        report.id.to_string().as_str(),
                        &report.row.archivo,
                        &report.row.sede,
                        &report.row.fecha,
                        &report.row.nombre_responsable_visita,
                        &report.row.clasificacion_riesgo,
                        &report.created_at,
                    ]);
                }
                Ok(styled(builder.build()).to_string())
            }
        }
    }

    /// Format report statistics.
    pub fn format_stats(&self, stats: &ReportStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Quiet => Ok(stats.total_visits.to_string()),
            OutputFormat::Table => {
                let mut summary = Builder::default();
                summary.push_record(["Metric", "Value"]);
                for (name, value) in [
                    ("Total visits", stats.total_visits),
                    ("Sites", stats.sedes_count),
                    ("Risks detected", stats.risks_detected),
                    ("Visits this month", stats.visits_this_month),
                    ("High risk", stats.risks_distribution.alto),
                    ("Moderate risk", stats.risks_distribution.moderado),
                    ("Low risk", stats.risks_distribution.bajo),
                ] {
                    summary.push_record([name.to_string(), value.to_string()]);
                }

                let mut output = styled(summary.build()).to_string();

                if !stats.visits_by_personnel.is_empty() {
                    let mut personnel = Builder::default();
                    personnel.push_record(["Responsable", "Visitas"]);
                    for entry in &stats.visits_by_personnel {
                        personnel.push_record([entry.nombre.clone(), entry.cantidad.to_string()]);
                    }
                    output.push('\n');
                    output.push_str(&styled(personnel.build()).to_string());
                }

                Ok(output)
            }
        }
    }

    /// Format the outcome of an upload.
    pub fn upload_result(&self, outcome: &UploadOutcome) -> String {
        match outcome {
            UploadOutcome::Inserted { .. } => self.success(&outcome.message()),
            UploadOutcome::NothingNew { .. } => self.warning(&outcome.message()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn records_table(records: &[VisitRecord]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Archivo", "Sede", "Fecha", "Reciben", "Responsable", "Calificación", "Riesgo"]);
    for record in records {
        builder.push_record([
            record.file.as_str(),
            &record.site,
            &record.date,
            &record.receiving_names,
            &record.responsible_name,
            &record.rating,
            &record.risk_classification,
        ]);
    }
    styled(builder.build())
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table
}
