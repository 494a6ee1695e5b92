//! Artifact loading.
//!
//! The fitted model, the fitted scaler, and the reference dataset are
//! pre-provisioned on disk and read exactly once, in `main`. The resulting
//! [`ArtifactBundle`] is shared read-only for the process lifetime; nothing
//! here is reloaded per request.
//!
//! Each artifact may carry a `<file>.sha256` sidecar; when present the file
//! digest is verified before parsing.

pub mod dataset;
pub mod model;
pub mod scaler;

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::logic::features::layout;
use dataset::{DatasetDefaults, ReferenceDataset};
use model::KMeansModel;
use scaler::StandardScaler;

// ============================================================================
// ERRORS
// ============================================================================

/// Startup is aborted on any of these; the server cannot classify without its
/// artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("checksum mismatch for {}: sidecar has {expected}, file is {actual}", .path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("feature layout mismatch in {}: artifact was fitted on {actual:?}, server expects {expected:?}", .path.display())]
    LayoutMismatch {
        path: PathBuf,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("model in {} declares {declared} clusters but has {actual} centroids", .path.display())]
    CentroidCountMismatch {
        path: PathBuf,
        declared: usize,
        actual: usize,
    },

    #[error("cluster label table in {} is empty", .0.display())]
    EmptyLabelTable(PathBuf),

    #[error("reference dataset {} has no rows", .0.display())]
    EmptyDataset(PathBuf),
}

// ============================================================================
// PATHS
// ============================================================================

/// Locations of the three pre-provisioned inputs.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub dataset: PathBuf,
}

// ============================================================================
// BUNDLE
// ============================================================================

/// Everything loaded at startup. Immutable after load; share via `Arc`.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub model: KMeansModel,
    pub scaler: StandardScaler,
    pub dataset: ReferenceDataset,
    pub defaults: DatasetDefaults,
}

impl ArtifactBundle {
    /// Load and validate all artifacts. Idempotent; hold the result instead
    /// of calling again.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let model: KMeansModel = load_json(&paths.model)?;
        validate_model(&model, &paths.model)?;

        let scaler: StandardScaler = load_json(&paths.scaler)?;
        if !layout::names_match_layout(&scaler.feature_names) {
            return Err(ArtifactError::LayoutMismatch {
                path: paths.scaler.clone(),
                expected: layout::FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
                actual: scaler.feature_names.clone(),
            });
        }

        let dataset_bytes = read_verified(&paths.dataset)?;
        let dataset = ReferenceDataset::from_reader(dataset_bytes.as_slice()).map_err(|e| {
            ArtifactError::Parse {
                path: paths.dataset.clone(),
                message: e.to_string(),
            }
        })?;
        let defaults = dataset
            .defaults()
            .ok_or_else(|| ArtifactError::EmptyDataset(paths.dataset.clone()))?;

        tracing::info!(
            clusters = model.n_clusters,
            dataset_rows = dataset.len(),
            "artifacts loaded (feature layout {:08x})",
            layout::layout_hash()
        );

        Ok(Self {
            model,
            scaler,
            dataset,
            defaults,
        })
    }
}

fn validate_model(model: &KMeansModel, path: &Path) -> Result<(), ArtifactError> {
    if !layout::names_match_layout(&model.feature_names) {
        return Err(ArtifactError::LayoutMismatch {
            path: path.to_path_buf(),
            expected: layout::FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
            actual: model.feature_names.clone(),
        });
    }
    if model.centroids.len() != model.n_clusters {
        return Err(ArtifactError::CentroidCountMismatch {
            path: path.to_path_buf(),
            declared: model.n_clusters,
            actual: model.centroids.len(),
        });
    }
    if model.labels.is_empty() {
        return Err(ArtifactError::EmptyLabelTable(path.to_path_buf()));
    }
    Ok(())
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = read_verified(path)?;
    serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read a file, verifying the `<file>.sha256` sidecar when one exists.
fn read_verified(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let sidecar = sidecar_path(path);
    if sidecar.exists() {
        let expected = fs::read_to_string(&sidecar)
            .map_err(|source| ArtifactError::Io {
                path: sidecar.clone(),
                source,
            })?
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        let actual = hex::encode(Sha256::digest(&bytes));
        if actual != expected {
            return Err(ArtifactError::ChecksumMismatch {
                path: path.to_path_buf(),
                expected,
                actual,
            });
        }
        tracing::debug!(path = %path.display(), "artifact checksum verified");
    }

    Ok(bytes)
}

fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".sha256");
    path.with_file_name(name)
}

// ============================================================================
// TESTS
// ============================================================================
