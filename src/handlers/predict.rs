//! Prediction handler: the boundary of the classification pipeline.
//!
//! Range constraints are enforced here, before any vector is built; the
//! pipeline below never sees an out-of-range value.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::logic::features::FeatureVector;
use crate::logic::history::PredictionRecord;
use crate::logic::predictor;
use crate::middleware::session::SessionId;
use crate::{AppResult, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(range(min = 0.0, max = 10.0, message = "magnitude must be between 0 and 10"))]
    pub magnitude: f64,

    #[validate(range(min = 0.0, max = 700.0, message = "depth must be between 0 and 700 km"))]
    pub depth: f64,

    /// Defaults to the dataset median when omitted.
    #[validate(range(min = 0, max = 200, message = "phasecount must be between 0 and 200"))]
    pub phasecount: Option<u32>,

    /// Defaults to the dataset median when omitted.
    #[validate(range(min = 0.0, max = 360.0, message = "azimuth gap must be between 0 and 360 degrees"))]
    pub azimuth_gap: Option<f64>,

    /// Free-text region name, not a model input.
    #[serde(default)]
    pub lokasi: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub cluster: u32,
    pub label: String,
    pub message: String,
    pub record: PredictionRecord,
    pub recording_degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub async fn predict(
    State(state): State<AppState>,
    SessionId(session): SessionId,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<PredictResponse>> {
    req.validate()?;

    let vector = FeatureVector::build(
        &state.bundle.defaults,
        req.magnitude,
        req.depth,
        req.phasecount,
        req.azimuth_gap,
    );
    let assignment = predictor::assign(&state.bundle, &vector);

    let lokasi = req.lokasi.unwrap_or_default();
    let record = PredictionRecord {
        lokasi: lokasi.clone(),
        magnitude: req.magnitude,
        depth: req.depth,
        phasecount: req.phasecount.unwrap_or(state.bundle.defaults.phasecount),
        azimuth_gap: req.azimuth_gap.unwrap_or(state.bundle.defaults.azimuth_gap),
        cluster: assignment.cluster_id,
    };

    // Session history first; the durable append must never undo it
    state.sessions.append(session, record.clone());

    let notice = match state.prediction_log.append(&record) {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(session = %session, "durable prediction log degraded: {}", e);
            Some("prediction kept in session history only; durable log append failed".to_string())
        }
    };

    let wilayah = if lokasi.trim().is_empty() {
        "Tidak diisi".to_string()
    } else {
        lokasi.trim().to_string()
    };
    let message = format!(
        "Gempa yang terjadi di wilayah {} termasuk ke dalam Klaster {} ({})",
        wilayah, assignment.cluster_id, assignment.label
    );

    Ok(Json(PredictResponse {
        cluster: assignment.cluster_id,
        label: assignment.label,
        message,
        record,
        recording_degraded: notice.is_some(),
        notice,
    }))
}
