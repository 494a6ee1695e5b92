//! Application info handler: the home page's method/cluster/analysis cards.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::logic::features::LayoutInfo;
use crate::AppState;

#[derive(Serialize)]
pub struct AppInfo {
    pub method: &'static str,
    pub analysis: &'static str,
    pub n_clusters: usize,
    pub dataset_rows: usize,
    pub layout: LayoutInfo,
    pub cluster_labels: Vec<ClusterLabel>,
}

#[derive(Serialize)]
pub struct ClusterLabel {
    pub cluster: u32,
    pub label: String,
}

pub async fn info(State(state): State<AppState>) -> Json<AppInfo> {
    let cluster_labels = state
        .bundle
        .model
        .labels
        .iter()
        .map(|(cluster, label)| ClusterLabel {
            cluster: *cluster,
            label: label.clone(),
        })
        .collect();

    Json(AppInfo {
        method: "K-Means",
        analysis: "Unsupervised",
        n_clusters: state.bundle.model.n_clusters,
        dataset_rows: state.bundle.dataset.len(),
        layout: LayoutInfo::current(),
        cluster_labels,
    })
}
