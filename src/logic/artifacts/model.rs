//! Fitted K-Means clustering model.
//!
//! The artifact carries the centroids in scaled feature space together with
//! the risk-label table for its own clusters, so a retrained model brings its
//! own semantics instead of relying on a table hardcoded here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logic::features::FEATURE_COUNT;

/// Fitted clustering model, deserialized from the model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeansModel {
    /// Number of clusters the model was fitted with.
    pub n_clusters: usize,
    /// Column names the model was fitted with, in order.
    pub feature_names: Vec<String>,
    /// Cluster centers in scaled feature space, one row per cluster.
    pub centroids: Vec<[f64; FEATURE_COUNT]>,
    /// Risk label per cluster id.
    pub labels: BTreeMap<u32, String>,
    /// Label for cluster ids outside the table.
    pub unknown_label: String,
}

impl KMeansModel {
    /// Assign a scaled vector to its nearest centroid (squared Euclidean,
    /// lowest index wins ties). Deterministic for a fitted model.
    pub fn nearest_centroid(&self, scaled: &[f64; FEATURE_COUNT]) -> u32 {
        let mut best = 0usize;
        let mut best_dist = f64::INFINITY;

        for (i, centroid) in self.centroids.iter().enumerate() {
            let dist: f64 = centroid
                .iter()
                .zip(scaled.iter())
                .map(|(c, x)| (c - x) * (c - x))
                .sum();
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }

        best as u32
    }

    /// Risk label for a cluster id, falling back to the unknown sentinel.
    pub fn label_for(&self, cluster_id: u32) -> &str {
        self.labels
            .get(&cluster_id)
            .map(String::as_str)
            .unwrap_or(&self.unknown_label)
    }
}
