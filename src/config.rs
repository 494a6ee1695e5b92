//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::logic::artifacts::ArtifactPaths;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Serialized clustering model
    pub model_path: PathBuf,

    /// Serialized feature scaler
    pub scaler_path: PathBuf,

    /// Reference earthquake dataset
    pub dataset_path: PathBuf,

    /// Append-only durable prediction log
    pub prediction_log_path: PathBuf,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            model_path: env::var("QUAKE_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("kmeans_gempa.json")),

            scaler_path: env::var("QUAKE_SCALER_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("scaler_gempa.json")),

            dataset_path: env::var("QUAKE_DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("indonesia_earthquake.csv")),

            prediction_log_path: env::var("QUAKE_PREDICTION_LOG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("log_prediksi_gempa.csv")),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.model_path.clone(),
            scaler: self.scaler_path.clone(),
            dataset: self.dataset_path.clone(),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
