//! History exports.
//!
//! Two pure encodings of an already-filtered record sequence: UTF-8 CSV and
//! a single-sheet XLSX workbook. Same columns as the durable log, nothing
//! else. Neither touches the store.

use rust_xlsxwriter::Workbook;
use thiserror::Error;

use super::record::{PredictionRecord, RECORD_COLUMNS};

/// Deterministic download names.
pub const CSV_FILENAME: &str = "riwayat_prediksi_session.csv";
pub const XLSX_FILENAME: &str = "riwayat_prediksi_session.xlsx";

/// Sheet name of the workbook export.
const SHEET_NAME: &str = "Riwayat Prediksi";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    CsvBuffer(String),

    #[error("workbook encoding failed: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

/// Encode records as UTF-8 CSV, header always included.
pub fn to_csv(records: &[PredictionRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(RECORD_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(csv::Error::from)?;

    writer
        .into_inner()
        .map_err(|e| ExportError::CsvBuffer(e.to_string()))
}

/// Encode records as a single-sheet XLSX workbook.
pub fn to_xlsx(records: &[PredictionRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in RECORD_COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, record.lokasi.as_str())?;
        sheet.write_number(row, 1, record.magnitude)?;
        sheet.write_number(row, 2, record.depth)?;
        sheet.write_number(row, 3, f64::from(record.phasecount))?;
        sheet.write_number(row, 4, record.azimuth_gap)?;
        sheet.write_number(row, 5, f64::from(record.cluster))?;
    }

    Ok(workbook.save_to_buffer()?)
}
