//! Feature Vector - the ordered input to scaler and model
//!
//! Always built through [`FeatureVector::build`] so the values land in
//! [`FEATURE_LAYOUT`] order. Range enforcement happens at the request
//! boundary, before a vector exists.

use serde::{Deserialize, Serialize};

use super::layout::{feature_index, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::logic::artifacts::dataset::DatasetDefaults;

/// Ordered 4-tuple of raw (unscaled) feature values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Assemble a vector in layout order. `phasecount` and `azimuth_gap`
    /// fall back to the reference dataset's medians when not supplied.
    pub fn build(
        defaults: &DatasetDefaults,
        magnitude: f64,
        depth: f64,
        phasecount: Option<u32>,
        azimuth_gap: Option<f64>,
    ) -> Self {
        let phasecount = phasecount.unwrap_or(defaults.phasecount);
        let azimuth_gap = azimuth_gap.unwrap_or(defaults.azimuth_gap);

        Self {
            values: [magnitude, depth, f64::from(phasecount), azimuth_gap],
        }
    }

    /// Create from raw values already in layout order.
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).map(|i| self.values[i])
    }

    /// Named values for logging.
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!(FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.to_string(), *value))
            .collect::<std::collections::BTreeMap<_, _>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> DatasetDefaults {
        DatasetDefaults {
            phasecount: 42,
            azimuth_gap: 97.5,
            phasecount_median: 42.0,
            azimuth_gap_median: 97.5,
        }
    }

    #[test]
    fn test_build_layout_order() {
        let vector = FeatureVector::build(&defaults(), 5.0, 10.0, Some(30), Some(120.0));
        assert_eq!(vector.values(), &[5.0, 10.0, 30.0, 120.0]);
        assert_eq!(vector.get_by_name("magnitude"), Some(5.0));
        assert_eq!(vector.get_by_name("depth"), Some(10.0));
        assert_eq!(vector.get_by_name("phasecount"), Some(30.0));
        assert_eq!(vector.get_by_name("azimuth_gap"), Some(120.0));
    }

    #[test]
    fn test_build_applies_median_defaults() {
        let vector = FeatureVector::build(&defaults(), 5.0, 10.0, None, None);
        assert_eq!(vector.get_by_name("phasecount"), Some(42.0));
        assert_eq!(vector.get_by_name("azimuth_gap"), Some(97.5));
    }

    #[test]
    fn test_get_by_unknown_name() {
        let vector = FeatureVector::from_values([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(vector.get_by_name("latitude"), None);
    }

    #[test]
    fn test_to_log_entry() {
        let vector = FeatureVector::from_values([5.0, 10.0, 30.0, 120.0]);
        let entry = vector.to_log_entry();
        assert_eq!(entry["magnitude"], 5.0);
        assert_eq!(entry["azimuth_gap"], 120.0);
    }
}
