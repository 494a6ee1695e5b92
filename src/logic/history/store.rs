//! Session-scoped history.
//!
//! Each interactive session owns an ordered, append-only, uncapped list of
//! its predictions. The registry is the only mutable cross-request state in
//! the process and is dropped with it; nothing here survives a restart (the
//! durable log does, separately, with no read path back in).

use std::collections::HashMap;

use parking_lot::RwLock;
use uuid::Uuid;

use super::record::PredictionRecord;

/// Ordered prediction history for one session.
#[derive(Debug, Default, Clone)]
pub struct HistoryStore {
    records: Vec<PredictionRecord>,
}

impl HistoryStore {
    pub fn append(&mut self, record: PredictionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// All live session stores, keyed by session id. Unknown ids get a fresh
/// empty store on first append.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, HistoryStore>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the session's store, creating the store if the
    /// session is new.
    pub fn append(&self, session: Uuid, record: PredictionRecord) {
        self.sessions
            .write()
            .entry(session)
            .or_default()
            .append(record);
    }

    /// Snapshot of a session's history, in insertion order. Empty for
    /// unknown sessions.
    pub fn snapshot(&self, session: Uuid) -> Vec<PredictionRecord> {
        self.sessions
            .read()
            .get(&session)
            .map(|store| store.records().to_vec())
            .unwrap_or_default()
    }

    pub fn len(&self, session: Uuid) -> usize {
        self.sessions
            .read()
            .get(&session)
            .map(HistoryStore::len)
            .unwrap_or(0)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}
