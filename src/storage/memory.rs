//! In-memory record store
//!
//! Used when no data directory is configured, and by tests. Payloads are kept
//! encoded so scans go through the same decode path as the file store.

use std::sync::RwLock;

use serde_json::Value;

use super::errors::{StorageError, StorageResult};
use super::record::{decode_all, Record, StoredRecord};
use super::store::RecordStore;

#[derive(Debug)]
struct MemoryState {
    next_id: u64,
    records: Vec<StoredRecord>,
}

/// Record store living entirely in process memory.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    state: RwLock<MemoryState>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                next_id: 1,
                records: Vec::new(),
            }),
        }
    }

    /// Appends an already-encoded record, bypassing payload encoding.
    ///
    /// Returns the assigned id.
    pub fn insert_encoded(&self, dataset: &str, body: Vec<u8>) -> StorageResult<u64> {
        let mut state = self.state.write().map_err(|_| StorageError::Poisoned)?;
        let id = state.next_id;
        state.next_id += 1;
        state.records.push(StoredRecord::new(id, dataset, body));
        Ok(id)
    }

    /// Total records across all datasets.
    pub fn len(&self) -> usize {
        self.state.read().map(|s| s.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn insert(&self, dataset: &str, payload: Value) -> StorageResult<Record> {
        let body = serde_json::to_vec(&payload)?;
        let id = self.insert_encoded(dataset, body)?;

        Ok(Record {
            id,
            dataset_name: dataset.to_string(),
            payload,
        })
    }

    fn fetch_by_dataset(&self, dataset: &str) -> StorageResult<Vec<Record>> {
        let state = self.state.read().map_err(|_| StorageError::Poisoned)?;
        let matching: Vec<StoredRecord> = state
            .records
            .iter()
            .filter(|r| r.dataset_name == dataset)
            .cloned()
            .collect();
        drop(state);

        Ok(decode_all(matching))
    }
}
