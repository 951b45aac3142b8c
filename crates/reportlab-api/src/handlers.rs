//! HTTP request handlers for the report API.
//!
//! Extraction and SQLite work run on the blocking pool; handlers only move
//! buffered bytes and results in and out.

use crate::error::ApiError;
use crate::store::StoreHandle;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use reportlab_domain::traits::{ReportQuery, ReportStore};
use reportlab_domain::{
    compute_stats, BatchResult, ReportStats, StoredReport, UploadedFile, VisitRecord,
};
use reportlab_extractor::{upload_records, Extractor, ExtractorError, UploadOutcome};
use reportlab_store::SqliteStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task;

/// Default number of reports returned by `GET /api/reports`
const DEFAULT_REPORTS_LIMIT: usize = 50;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Report extractor
    pub extractor: Arc<Extractor>,
    /// Lazily opened report store
    pub store: Arc<StoreHandle>,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server answers
    pub status: String,
}

/// Body of `POST /api/upload-results`
#[derive(Debug, Deserialize)]
pub struct UploadResultsPayload {
    /// Records to persist, usually the `results` of a batch
    #[serde(default)]
    pub results: Vec<VisitRecord>,
}

/// Outcome of `POST /api/upload-results`
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Whether anything was inserted
    pub ok: bool,
    /// Rows inserted; absent when nothing was new
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted: Option<usize>,
    /// Records skipped as duplicates
    pub skipped: usize,
    /// Human-readable summary
    pub message: String,
}

impl From<UploadOutcome> for UploadResponse {
    fn from(outcome: UploadOutcome) -> Self {
        match outcome {
            UploadOutcome::Inserted { inserted, skipped } => Self {
                ok: true,
                inserted: Some(inserted),
                skipped,
                message: outcome.message(),
            },
            UploadOutcome::NothingNew { skipped } => Self {
                ok: false,
                inserted: None,
                skipped,
                message: outcome.message(),
            },
        }
    }
}

/// Query string of `GET /api/reports`
#[derive(Debug, Deserialize)]
pub struct ReportsParams {
    /// Maximum number of reports (default 50)
    pub limit: Option<usize>,
}

/// Query string of `GET /api/stats`
#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    /// Inclusive lower bound on the visit date
    pub start_date: Option<String>,
    /// Inclusive upper bound on the visit date
    pub end_date: Option<String>,
}

/// Run `f` against the store on the blocking pool
async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteStore) -> Result<T, ApiError> + Send + 'static,
{
    let handle = state.store.clone();
    task::spawn_blocking(move || {
        let store = handle.get()?;
        let mut guard = store
            .lock()
            .map_err(|_| ApiError::Internal("store lock poisoned".to_string()))?;
        f(&mut guard)
    })
    .await?
}

/// GET /api/health - Liveness check
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// POST /api/process-excel - Extract one file (multipart field `file`)
async fn process_excel(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<VisitRecord>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            upload = Some(UploadedFile::new(filename, bytes.to_vec()));
            break;
        }
    }
    let upload =
        upload.ok_or_else(|| ApiError::BadRequest("missing multipart field 'file'".to_string()))?;

    let extractor = state.extractor.clone();
    let record =
        task::spawn_blocking(move || extractor.extract(&upload.bytes, &upload.filename)).await??;

    Ok(Json(record))
}

/// POST /api/process-batch - Extract every `files` field; failures are reported per file
async fn process_batch(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResult>, ApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("files") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            files.push(UploadedFile::new(filename, bytes.to_vec()));
        }
    }

    let extractor = state.extractor.clone();
    let batch = task::spawn_blocking(move || extractor.run_batch(&files)).await?;

    Ok(Json(batch))
}

/// POST /api/upload-results - Persist records not stored yet
///
/// Answers 409 when every record is a duplicate.
async fn upload_results(
    State(state): State<AppState>,
    Json(payload): Json<UploadResultsPayload>,
) -> Result<Response, ApiError> {
    if payload.results.is_empty() {
        return Err(ExtractorError::InvalidInput("No results to save".to_string()).into());
    }

    let outcome = with_store(&state, move |store| {
        Ok(upload_records(store, &payload.results)?)
    })
    .await?;

    let status = match outcome {
        UploadOutcome::Inserted { .. } => StatusCode::OK,
        UploadOutcome::NothingNew { .. } => StatusCode::CONFLICT,
    };
    Ok((status, Json(UploadResponse::from(outcome))).into_response())
}

/// GET /api/reports - Most recently stored reports
async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<ReportsParams>,
) -> Result<Json<Vec<StoredReport>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_REPORTS_LIMIT);
    let reports = with_store(&state, move |store| Ok(store.recent(limit)?)).await?;
    Ok(Json(reports))
}

/// GET /api/stats - Dashboard statistics over an optional date range
async fn stats(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<ReportStats>, ApiError> {
    let query = ReportQuery {
        start_date: params.start_date,
        end_date: params.end_date,
        limit: None,
    };
    let reports = with_store(&state, move |store| Ok(store.query(&query)?)).await?;

    let current_month = chrono::Local::now().format("%Y-%m").to_string();
    Ok(Json(compute_stats(&reports, &current_month)))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/process-excel", post(process_excel))
        .route("/api/process-batch", post(process_batch))
        .route("/api/upload-results", post(upload_results))
        .route("/api/reports", get(list_reports))
        .route("/api/stats", get(stats))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
