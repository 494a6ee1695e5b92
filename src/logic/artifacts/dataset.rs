//! Reference earthquake dataset.
//!
//! Read once at startup from the pre-provisioned CSV. Feeds three things:
//! median defaults for the prediction form, the dataset browsing endpoints,
//! and the map marker rows.

use std::io::Read;

use serde::{Deserialize, Serialize};

/// One row of the reference dataset. Extra CSV columns (event id, date,
/// magnitude type, ...) are ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRow {
    #[serde(default)]
    pub location: Option<String>,
    pub magnitude: f64,
    pub depth: f64,
    pub phasecount: f64,
    pub azimuth_gap: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Default input values derived from the dataset at load time.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetDefaults {
    /// Median phase count, truncated to the integer the form pre-fills.
    pub phasecount: u32,
    /// Median azimuth gap in degrees.
    pub azimuth_gap: f64,
    pub phasecount_median: f64,
    pub azimuth_gap_median: f64,
}

/// A row with valid coordinates, as consumed by the map page.
#[derive(Debug, Clone, Serialize)]
pub struct MapPoint {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub magnitude: f64,
    pub depth: f64,
}

/// The loaded dataset, read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    rows: Vec<DatasetRow>,
}

impl ReferenceDataset {
    /// Read all rows from CSV.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let rows = csv_reader
            .deserialize()
            .collect::<Result<Vec<DatasetRow>, _>>()?;
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// A page of rows for the dataset view.
    pub fn page(&self, offset: usize, limit: usize) -> &[DatasetRow] {
        let start = offset.min(self.rows.len());
        let end = (start + limit).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Median defaults for the prediction form. `None` when the dataset has
    /// no rows.
    pub fn defaults(&self) -> Option<DatasetDefaults> {
        let phasecount_median = median(self.rows.iter().map(|r| r.phasecount))?;
        let azimuth_gap_median = median(self.rows.iter().map(|r| r.azimuth_gap))?;

        Some(DatasetDefaults {
            phasecount: phasecount_median.max(0.0) as u32,
            azimuth_gap: azimuth_gap_median,
            phasecount_median,
            azimuth_gap_median,
        })
    }

    /// Rows with valid coordinates; rows missing either coordinate are
    /// skipped.
    pub fn map_points(&self) -> Vec<MapPoint> {
        self.rows
            .iter()
            .filter_map(|row| {
                let latitude = row.latitude.filter(|v| v.is_finite())?;
                let longitude = row.longitude.filter(|v| v.is_finite())?;
                Some(MapPoint {
                    location: row.location.clone().unwrap_or_else(|| "-".to_string()),
                    latitude,
                    longitude,
                    magnitude: row.magnitude,
                    depth: row.depth,
                })
            })
            .collect()
    }
}

/// Conventional median: middle element for odd counts, mean of the two middle
/// elements for even counts.
fn median(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}
