//! QuakeZone Dashboard Server
//!
//! Backend for the earthquake hazard-zone clustering dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   QUAKEZONE SERVER                         │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌─────────────────────┐  │
//! │  │  API      │  │  Prediction  │  │  Session History    │  │
//! │  │  (Axum)   │  │  Pipeline    │  │  + Durable CSV Log  │  │
//! │  └─────┬─────┘  └──────┬───────┘  └──────────┬──────────┘  │
//! │        └───────────────┼─────────────────────┘             │
//! │                        ▼                                   │
//! │              ┌──────────────────┐                          │
//! │              │  ArtifactBundle  │  (model, scaler,         │
//! │              │  (read-only)     │   dataset, medians)      │
//! │              └──────────────────┘                          │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;
mod middleware;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logic::artifacts::ArtifactBundle;
use logic::history::{PredictionLog, SessionRegistry};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quakezone_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("QuakeZone dashboard server starting...");
    tracing::info!("Model: {}", config.model_path.display());
    tracing::info!("Dataset: {}", config.dataset_path.display());

    // Load artifacts once; fatal if anything is missing or malformed
    let bundle = ArtifactBundle::load(&config.artifact_paths())
        .context("cannot serve predictions without the model artifacts")?;

    // Build application state
    let state = AppState {
        bundle: Arc::new(bundle),
        sessions: Arc::new(SessionRegistry::new()),
        prediction_log: Arc::new(PredictionLog::new(config.prediction_log_path.clone())),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind server port")?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub bundle: Arc<ArtifactBundle>,
    pub sessions: Arc<SessionRegistry>,
    pub prediction_log: Arc<PredictionLog>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        // Dashboard pages
        .route("/api/v1/info", get(handlers::info::info))
        .route("/api/v1/dataset", get(handlers::dataset::list))
        .route("/api/v1/dataset/summary", get(handlers::dataset::summary))
        .route("/api/v1/map/points", get(handlers::map::points))
        // Prediction pipeline
        .route("/api/v1/predict", post(handlers::predict::predict))
        // Session history
        .route("/api/v1/history", get(handlers::history::list))
        .route("/api/v1/history/locations", get(handlers::history::locations))
        .route("/api/v1/history/export/csv", get(handlers::history::export_csv))
        .route("/api/v1/history/export/xlsx", get(handlers::history::export_xlsx))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use crate::logic::artifacts::dataset::ReferenceDataset;
    use crate::logic::artifacts::model::KMeansModel;
    use crate::logic::artifacts::scaler::StandardScaler;
    use crate::logic::features::FEATURE_LAYOUT;
    use std::collections::BTreeMap;
    use tempfile::TempDir;
    use tower::ServiceExt;
    use uuid::Uuid;

    const DATASET_CSV: &str = "\
magnitude,depth,phasecount,azimuth_gap,latitude,longitude,location
5.0,10.0,30,120.0,-8.1,110.3,Kabupaten Bantul
4.2,35.0,20,90.0,-2.5,118.0,Sulawesi Barat
6.1,50.0,40,150.0,,,Laut Banda
";

    fn test_state(log_dir: &TempDir) -> AppState {
        let dataset = ReferenceDataset::from_reader(DATASET_CSV.as_bytes()).unwrap();
        let defaults = dataset.defaults().unwrap();
        let bundle = ArtifactBundle {
            model: KMeansModel {
                n_clusters: 3,
                feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
                centroids: vec![
                    [-1.0, -1.0, -1.0, -1.0],
                    [0.0, 0.0, 0.0, 0.0],
                    [1.0, 1.0, 1.0, 1.0],
                ],
                labels: BTreeMap::from([
                    (0, "Risiko Rendah".to_string()),
                    (1, "Risiko Sedang".to_string()),
                    (2, "Risiko Tinggi".to_string()),
                ]),
                unknown_label: "Tidak diketahui".to_string(),
            },
            scaler: StandardScaler {
                feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
                mean: [5.0, 30.0, 30.0, 120.0],
                scale: [1.0, 20.0, 10.0, 30.0],
            },
            dataset,
            defaults,
        };

        AppState {
            bundle: Arc::new(bundle),
            sessions: Arc::new(SessionRegistry::new()),
            prediction_log: Arc::new(PredictionLog::new(
                log_dir.path().join("log_prediksi_gempa.csv"),
            )),
            config: config::Config::from_env(),
        }
    }

    fn predict_request(session: Uuid, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/predict")
            .header("content-type", "application/json")
            .header("x-session-id", session.to_string())
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_out_of_range_magnitude_is_rejected() {
        let dir = TempDir::new().unwrap();
        let app = create_router(test_state(&dir));

        let response = app
            .oneshot(predict_request(
                Uuid::new_v4(),
                r#"{"magnitude": 12.0, "depth": 10.0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_appends_to_session_history_and_log() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let sessions = state.sessions.clone();
        let log_path = state.prediction_log.path().to_path_buf();
        let app = create_router(state);
        let session = Uuid::new_v4();

        let body = r#"{"magnitude": 5.0, "depth": 10.0, "lokasi": "Kabupaten Bantul"}"#;
        let response = app
            .clone()
            .oneshot(predict_request(session, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(sessions.len(session), 1);

        let response = app.oneshot(predict_request(session, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(sessions.len(session), 2);

        // Durable log: one header plus one row per prediction
        let content = std::fs::read_to_string(log_path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_history_is_scoped_to_session() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let sessions = state.sessions.clone();
        let app = create_router(state);
        let session = Uuid::new_v4();

        let body = r#"{"magnitude": 5.0, "depth": 10.0, "lokasi": "Palu"}"#;
        app.clone()
            .oneshot(predict_request(session, body))
            .await
            .unwrap();
        assert_eq!(sessions.len(session), 1);

        // A different session sees nothing
        let other = Uuid::new_v4();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/history")
                    .header("x-session-id", other.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(sessions.len(other), 0);
    }

    #[tokio::test]
    async fn test_export_downloads_have_attachment_headers() {
        let dir = TempDir::new().unwrap();
        let app = create_router(test_state(&dir));
        let session = Uuid::new_v4();

        for uri in ["/api/v1/history/export/csv", "/api/v1/history/export/xlsx"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri(uri)
                        .header("x-session-id", session.to_string())
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let disposition = response
                .headers()
                .get("content-disposition")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            assert!(disposition.starts_with("attachment"));
        }
    }
}
