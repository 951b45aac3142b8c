//! Visit records and their persistence-facing shape

use crate::normalize::NOT_AVAILABLE;
use serde::{Deserialize, Serialize};

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// The extracted, flattened content of one visit report file.
///
/// Field order and the serialized key names match the columns consumers of
/// the report already expect, so they must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Original filename as supplied by the caller
    #[serde(rename = "ARCHIVO", default = "not_available")]
    pub file: String,

    /// Site or client visited
    #[serde(rename = "Sede", default = "not_available")]
    pub site: String,

    /// Visit date, `YYYY-MM-DD` when the source held a date
    #[serde(rename = "Fecha", default = "not_available")]
    pub date: String,

    /// Receiving personnel names joined with `" | "`
    #[serde(rename = "NOMBRE PROFESIONALES QUE RECIBEN", default = "not_available")]
    pub receiving_names: String,

    /// Receiving personnel roles joined with `" | "`, same order as the names
    #[serde(rename = "CARGO PROFESIONALES QUE RECIBEN", default = "not_available")]
    pub receiving_roles: String,

    /// Person responsible for the visit
    #[serde(rename = "NOMBRE RESPONSABLE DE VISITA", default = "not_available")]
    pub responsible_name: String,

    /// Role of the person responsible for the visit
    #[serde(rename = "CARGO RESPONSABLE DE VISITA", default = "not_available")]
    pub responsible_role: String,

    /// Obtained rating
    #[serde(rename = "CALIFICACIÓN OBTENIDA", default = "not_available")]
    pub rating: String,

    /// Risk classification
    #[serde(rename = "CLASIFICACIÓN POR RIESGO", default = "not_available")]
    pub risk_classification: String,
}

impl VisitRecord {
    /// Column headers, in serialization order
    pub const HEADERS: [&'static str; 9] = [
        "ARCHIVO",
        "Sede",
        "Fecha",
        "NOMBRE PROFESIONALES QUE RECIBEN",
        "CARGO PROFESIONALES QUE RECIBEN",
        "NOMBRE RESPONSABLE DE VISITA",
        "CARGO RESPONSABLE DE VISITA",
        "CALIFICACIÓN OBTENIDA",
        "CLASIFICACIÓN POR RIESGO",
    ];

    /// File identity used for deduplication
    pub fn identifier(&self) -> &str {
        &self.file
    }

    /// Field values, in the same order as [`VisitRecord::HEADERS`]
    pub fn values(&self) -> [&str; 9] {
        [
            &self.file,
            &self.site,
            &self.date,
            &self.receiving_names,
            &self.receiving_roles,
            &self.responsible_name,
            &self.responsible_role,
            &self.rating,
            &self.risk_classification,
        ]
    }
}

/// Persistence-facing record: the same nine fields under lower-case keys.
///
/// No value transformation happens between a [`VisitRecord`] and its row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// File identity
    pub archivo: String,
    /// Site
    pub sede: String,
    /// Visit date
    pub fecha: String,
    /// Receiving personnel names
    pub nombre_profesionales_que_reciben: String,
    /// Receiving personnel roles
    pub cargo_profesionales_que_reciben: String,
    /// Responsible person name
    pub nombre_responsable_visita: String,
    /// Responsible person role
    pub cargo_responsable_visita: String,
    /// Obtained rating
    pub calificacion_obtenida: String,
    /// Risk classification
    pub clasificacion_riesgo: String,
}

impl From<&VisitRecord> for ReportRow {
    fn from(record: &VisitRecord) -> Self {
        Self {
            archivo: record.file.clone(),
            sede: record.site.clone(),
            fecha: record.date.clone(),
            nombre_profesionales_que_reciben: record.receiving_names.clone(),
            cargo_profesionales_que_reciben: record.receiving_roles.clone(),
            nombre_responsable_visita: record.responsible_name.clone(),
            cargo_responsable_visita: record.responsible_role.clone(),
            calificacion_obtenida: record.rating.clone(),
            clasificacion_riesgo: record.risk_classification.clone(),
        }
    }
}

/// A row as read back from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReport {
    /// Store-assigned identifier, increasing with insertion order
    pub id: i64,

    /// Insertion timestamp as recorded by the store
    pub created_at: String,

    /// Stored field values
    #[serde(flatten)]
    pub row: ReportRow,
}
