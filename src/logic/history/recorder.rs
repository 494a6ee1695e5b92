//! Durable prediction log.
//!
//! Append-only CSV file shared by every session of every process that points
//! at the same path. The header row is written once, when the file is first
//! created; appends are synchronous and flushed. No cross-process lock: this
//! is a best-effort logging channel, not a system of record.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

use super::record::{PredictionRecord, RECORD_COLUMNS};

/// A failed durable append. The caller reports it once and keeps going; the
/// in-memory history is never rolled back.
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("cannot open prediction log {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot append to prediction log {}: {source}", .path.display())]
    Write { path: PathBuf, source: csv::Error },
}

/// Appender for the durable prediction log.
#[derive(Debug)]
pub struct PredictionLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl PredictionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, writing the header first if the file does not yet
    /// exist. Flushed before returning.
    pub fn append(&self, record: &PredictionRecord) -> Result<(), RecorderError> {
        let _guard = self.lock.lock();

        let write_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| RecorderError::Open {
                path: self.path.clone(),
                source,
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        let write = |w: &mut csv::Writer<std::fs::File>| -> Result<(), csv::Error> {
            if write_header {
                w.write_record(RECORD_COLUMNS)?;
            }
            w.serialize(record)?;
            w.flush()?;
            Ok(())
        };

        write(&mut writer).map_err(|source| RecorderError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
