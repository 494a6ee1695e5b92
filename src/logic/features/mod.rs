//! Features Module - the fixed seismic feature schema
//!
//! Everything the scaler and model consume goes through this module so the
//! column order can never drift from the artifacts it was fitted with.

pub mod layout;
pub mod vector;

// Re-export common types
pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::FeatureVector;
