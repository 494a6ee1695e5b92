//! Standard scaler - normalizes raw features into the coordinate space the
//! clustering model was trained on.
//!
//! The artifact carries the fitted per-column mean and scale. Transform is
//! `(x - mean) / scale` with zero scales guarded.

use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureVector, FEATURE_COUNT};

/// Guard against degenerate (zero-variance) columns.
const MIN_SCALE: f64 = 1e-12;

/// Fitted feature scaler, deserialized from the scaler artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Column names the scaler was fitted with, in order.
    pub feature_names: Vec<String>,
    /// Per-column mean from fitting.
    pub mean: [f64; FEATURE_COUNT],
    /// Per-column scale (standard deviation) from fitting.
    pub scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Transform a raw vector into scaled coordinates.
    pub fn transform(&self, vector: &FeatureVector) -> [f64; FEATURE_COUNT] {
        let mut scaled = [0.0f64; FEATURE_COUNT];
        for (i, value) in vector.values().iter().enumerate() {
            let scale = self.scale[i].max(MIN_SCALE);
            scaled[i] = (value - self.mean[i]) / scale;
        }
        scaled
    }
}
