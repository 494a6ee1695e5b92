//! The prediction record.
//!
//! Exactly the columns of the durable log file, in its column order:
//! `lokasi,magnitude,depth,phasecount,azimuth_gap,cluster`. Records are
//! immutable once appended; exports carry these fields and nothing else.

use serde::{Deserialize, Serialize};

/// One classified prediction, as stored in the session history, the durable
/// log, and both exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Free-text region name; may be empty when the user left it blank.
    pub lokasi: String,
    pub magnitude: f64,
    /// Depth in km.
    pub depth: f64,
    pub phasecount: u32,
    /// Azimuth gap in degrees.
    pub azimuth_gap: f64,
    /// Assigned cluster id.
    pub cluster: u32,
}

/// Column names of the durable log and both exports, in order.
pub const RECORD_COLUMNS: [&str; 6] = [
    "lokasi",
    "magnitude",
    "depth",
    "phasecount",
    "azimuth_gap",
    "cluster",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_field_order_matches_columns() {
        let record = PredictionRecord {
            lokasi: "Kabupaten Bantul".to_string(),
            magnitude: 5.0,
            depth: 10.0,
            phasecount: 30,
            azimuth_gap: 120.0,
            cluster: 1,
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&record).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let header = text.lines().next().unwrap();
        assert_eq!(header, RECORD_COLUMNS.join(","));
    }
}
