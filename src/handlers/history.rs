//! History handlers: filtered view, filter options, and the two downloads.

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::logic::history::export;
use crate::logic::history::query::{self, LocationSelector};
use crate::logic::history::PredictionRecord;
use crate::middleware::session::SessionId;
use crate::{AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    /// Exact-match location filter; absent or "Semua Lokasi" means no filter.
    pub lokasi: Option<String>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub records: Vec<PredictionRecord>,
}

fn filtered(state: &AppState, session: SessionId, params: &HistoryParams) -> Vec<PredictionRecord> {
    let snapshot = state.sessions.snapshot(session.0);
    let selector = LocationSelector::from_param(params.lokasi.as_deref());
    query::filter(&snapshot, &selector)
}

/// Filtered session history, sorted by cluster for display.
pub async fn list(
    State(state): State<AppState>,
    session: SessionId,
    Query(params): Query<HistoryParams>,
) -> Json<HistoryResponse> {
    let records = filtered(&state, session, &params);
    Json(HistoryResponse {
        count: records.len(),
        records,
    })
}

/// Distinct locations in the session history, for the filter control.
pub async fn locations(State(state): State<AppState>, session: SessionId) -> Json<Vec<String>> {
    let snapshot = state.sessions.snapshot(session.0);
    Json(query::distinct_locations(&snapshot))
}

/// CSV download of the filtered history.
pub async fn export_csv(
    State(state): State<AppState>,
    session: SessionId,
    Query(params): Query<HistoryParams>,
) -> AppResult<Response> {
    let records = filtered(&state, session, &params);
    let bytes = export::to_csv(&records)?;
    download(bytes, "text/csv; charset=utf-8", export::CSV_FILENAME)
}

/// XLSX download of the filtered history.
pub async fn export_xlsx(
    State(state): State<AppState>,
    session: SessionId,
    Query(params): Query<HistoryParams>,
) -> AppResult<Response> {
    let records = filtered(&state, session, &params);
    let bytes = export::to_xlsx(&records)?;
    download(
        bytes,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        export::XLSX_FILENAME,
    )
}

fn download(
    bytes: Vec<u8>,
    content_type: &'static str,
    filename: &'static str,
) -> AppResult<Response> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .map_err(|e| crate::AppError::InternalError(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
