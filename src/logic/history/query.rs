//! History filtering.
//!
//! Location comparisons are on trimmed text; results are sorted ascending by
//! cluster id with insertion order preserved among ties (a presentation
//! convention for the history table, not a property of the store).

use super::record::PredictionRecord;

/// The no-filter sentinel the original filter control exposes.
pub const ALL_LOCATIONS: &str = "Semua Lokasi";

/// Which records to keep.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSelector {
    All,
    Exact(String),
}

impl LocationSelector {
    /// Build from an optional query value; absent or the sentinel means no
    /// filter.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None => Self::All,
            Some(value) if value.trim() == ALL_LOCATIONS => Self::All,
            Some(value) => Self::Exact(value.trim().to_string()),
        }
    }
}

/// Filter a history snapshot and sort it for display.
pub fn filter(records: &[PredictionRecord], selector: &LocationSelector) -> Vec<PredictionRecord> {
    let mut result: Vec<PredictionRecord> = match selector {
        LocationSelector::All => records.to_vec(),
        LocationSelector::Exact(wanted) => records
            .iter()
            .filter(|r| r.lokasi.trim() == wanted)
            .cloned()
            .collect(),
    };

    // Vec::sort_by_key is stable, so ties keep insertion order
    result.sort_by_key(|r| r.cluster);
    result
}

/// Sorted distinct trimmed locations in a snapshot, for the filter control.
pub fn distinct_locations(records: &[PredictionRecord]) -> Vec<String> {
    let mut locations: Vec<String> = records
        .iter()
        .map(|r| r.lokasi.trim().to_string())
        .collect();
    locations.sort();
    locations.dedup();
    locations
}
