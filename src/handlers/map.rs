//! Map data handler.
//!
//! Serves the marker rows the cluster map draws; rows without coordinates
//! are skipped. The drawing itself happens client-side.

use axum::{extract::State, Json};

use crate::logic::artifacts::dataset::MapPoint;
use crate::AppState;

pub async fn points(State(state): State<AppState>) -> Json<Vec<MapPoint>> {
    Json(state.bundle.dataset.map_points())
}
