//! The record store interface and its file-backed implementation

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use tracing::debug;

use super::errors::{StorageError, StorageResult};
use super::reader::StorageReader;
use super::record::{decode_all, Record, StoredRecord};
use super::writer::StorageWriter;

/// Append-only document store keyed by id and dataset name.
///
/// Implementations assign ids, persist inserts and answer whole-dataset scans.
/// A scan returns records in a consistent order for that call; callers must not
/// rely on anything more.
pub trait RecordStore: Send + Sync {
    /// Persists `payload` under `dataset` and returns the stored record.
    fn insert(&self, dataset: &str, payload: Value) -> StorageResult<Record>;

    /// Returns every readable record of `dataset`.
    ///
    /// Records whose payload no longer parses are skipped and logged.
    fn fetch_by_dataset(&self, dataset: &str) -> StorageResult<Vec<Record>>;
}

/// Record store backed by an append-only file.
pub struct FileRecordStore {
    storage_path: PathBuf,
    writer: Mutex<StorageWriter>,
}

impl FileRecordStore {
    /// Opens (or creates) the store under `data_dir`.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let writer = StorageWriter::open(data_dir)?;
        debug!(
            path = %writer.path().display(),
            records = writer.record_count(),
            "opened record file"
        );

        Ok(Self {
            storage_path: writer.path().to_path_buf(),
            writer: Mutex::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }
}

impl RecordStore for FileRecordStore {
    fn insert(&self, dataset: &str, payload: Value) -> StorageResult<Record> {
        let mut writer = self.writer.lock().map_err(|_| StorageError::Poisoned)?;

        let id = writer.next_id();
        let stored = StoredRecord::encode(id, dataset, &payload)?;
        writer.write(&stored)?;

        Ok(Record {
            id,
            dataset_name: dataset.to_string(),
            payload,
        })
    }

    fn fetch_by_dataset(&self, dataset: &str) -> StorageResult<Vec<Record>> {
        // Opening under the writer lock pins the file size to a record boundary.
        let mut reader = {
            let _writer = self.writer.lock().map_err(|_| StorageError::Poisoned)?;
            StorageReader::open(&self.storage_path)?
        };

        let mut matching = Vec::new();
        while let Some(record) = reader.read_next()? {
            if record.dataset_name == dataset {
                matching.push(record);
            }
        }

        Ok(decode_all(matching))
    }
}
