//! Dataset view handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::logic::artifacts::dataset::DatasetRow;
use crate::AppState;

const DEFAULT_PAGE_SIZE: usize = 100;
const MAX_PAGE_SIZE: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Serialize)]
pub struct DatasetPage {
    pub total: usize,
    pub offset: usize,
    pub rows: Vec<DatasetRow>,
}

/// A page of reference-dataset rows.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Json<DatasetPage> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0);

    Json(DatasetPage {
        total: state.bundle.dataset.len(),
        offset,
        rows: state.bundle.dataset.page(offset, limit).to_vec(),
    })
}

#[derive(Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub phasecount_median: f64,
    pub azimuth_gap_median: f64,
}

/// Row count and the medians backing the prediction form defaults.
pub async fn summary(State(state): State<AppState>) -> Json<DatasetSummary> {
    Json(DatasetSummary {
        rows: state.bundle.dataset.len(),
        phasecount_median: state.bundle.defaults.phasecount_median,
        azimuth_gap_median: state.bundle.defaults.azimuth_gap_median,
    })
}
