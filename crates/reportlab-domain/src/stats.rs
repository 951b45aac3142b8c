//! Aggregate statistics over stored reports

use crate::record::StoredReport;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Number of responsible persons and recent reports included in the summary
const TOP_N: usize = 10;

/// Count of reports per risk bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    /// Classification mentions "alto"
    pub alto: usize,
    /// Neither "alto" nor "bajo"
    pub moderado: usize,
    /// Classification mentions "bajo"
    pub bajo: usize,
}

/// Number of visits led by one responsible person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelCount {
    /// Responsible person name
    pub nombre: String,
    /// Number of visits
    pub cantidad: usize,
}

/// Dashboard summary of stored reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    /// Number of reports considered
    pub total_visits: usize,
    /// Number of distinct sites
    pub sedes_count: usize,
    /// Reports classified high or moderate risk
    pub risks_detected: usize,
    /// Reports dated in the current month
    pub visits_this_month: usize,
    /// Per-bucket risk counts
    pub risks_distribution: RiskDistribution,
    /// Top responsible persons by visit count
    pub visits_by_personnel: Vec<PersonnelCount>,
    /// First reports of the input, in input order
    pub recent_reports: Vec<StoredReport>,
}

/// Summarize `reports`.
///
/// `current_month` is a `YYYY-MM` prefix; reports whose date starts with it
/// count as visits this month. Callers pass reports already ordered the way
/// they want `recent_reports` to read, usually newest date first.
pub fn compute_stats(reports: &[StoredReport], current_month: &str) -> ReportStats {
    if reports.is_empty() {
        return ReportStats::default();
    }

    let sedes: HashSet<&str> = reports.iter().map(|r| r.row.sede.as_str()).collect();

    let mut risks = RiskDistribution::default();
    for report in reports {
        let risk = report.row.clasificacion_riesgo.to_lowercase();
        if risk.contains("alto") {
            risks.alto += 1;
        } else if risk.contains("bajo") {
            risks.bajo += 1;
        } else {
            risks.moderado += 1;
        }
    }

    let visits_this_month = reports
        .iter()
        .filter(|r| r.row.fecha.starts_with(current_month))
        .count();

    ReportStats {
        total_visits: reports.len(),
        sedes_count: sedes.len(),
        risks_detected: risks.alto + risks.moderado,
        visits_this_month,
        risks_distribution: risks,
        visits_by_personnel: count_by_personnel(reports),
        recent_reports: reports.iter().take(TOP_N).cloned().collect(),
    }
}

/// Visit counts per responsible person, highest first; ties keep first appearance
fn count_by_personnel(reports: &[StoredReport]) -> Vec<PersonnelCount> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for report in reports {
        let name = report.row.nombre_responsable_visita.as_str();
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }

    let mut ranked: Vec<PersonnelCount> = order
        .into_iter()
        .map(|name| PersonnelCount {
            nombre: name.to_string(),
            cantidad: counts[name],
        })
        .collect();
    // stable sort keeps first-appearance order among equal counts
    ranked.sort_by(|a, b| b.cantidad.cmp(&a.cantidad));
    ranked.truncate(TOP_N);
    ranked
}
