//! Append-only record writer
//!
//! Records are appended and fsynced before an insert is acknowledged. There are
//! no in-place updates.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::error;

use super::errors::{StorageError, StorageResult};
use super::reader::StorageReader;
use super::record::StoredRecord;

/// File name of the record log under `<data_dir>/data/`
pub const RECORD_FILE: &str = "records.dat";

/// Writer for `<data_dir>/data/records.dat`.
pub struct StorageWriter {
    storage_path: PathBuf,
    file: File,
    current_offset: u64,
    /// Next id to hand out, recovered from the file on open
    next_id: u64,
    record_count: usize,
}

impl StorageWriter {
    /// Opens or creates the record file under `data_dir`.
    ///
    /// Existing records are scanned to recover the next id. A corrupt file
    /// refuses to open.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let data_subdir = data_dir.join("data");
        let storage_path = data_subdir.join(RECORD_FILE);

        if !data_subdir.exists() {
            fs::create_dir_all(&data_subdir).map_err(|e| {
                StorageError::write_failed(
                    format!("Failed to create data directory: {}", data_subdir.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&storage_path)
            .map_err(|e| {
                StorageError::write_failed(
                    format!("Failed to open storage file: {}", storage_path.display()),
                    e,
                )
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StorageError::io_error("Failed to read file metadata", e))?
            .len();

        let (max_id, record_count) = Self::scan_existing(&storage_path, current_offset)?;

        Ok(Self {
            storage_path,
            file,
            current_offset,
            next_id: max_id + 1,
            record_count,
        })
    }

    fn scan_existing(storage_path: &Path, file_size: u64) -> StorageResult<(u64, usize)> {
        if file_size == 0 {
            return Ok((0, 0));
        }

        let mut reader = StorageReader::open(storage_path)?;
        let mut max_id = 0;
        let mut count = 0;
        while let Some(record) = reader.read_next()? {
            max_id = max_id.max(record.id);
            count += 1;
        }
        Ok((max_id, count))
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// The id the next insert will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Appends a record and fsyncs.
    ///
    /// Returns the byte offset the record was written at. On failure the file
    /// is cut back to the last acknowledged record, so a torn append never
    /// sits in front of later ones.
    pub fn write(&mut self, record: &StoredRecord) -> StorageResult<u64> {
        let serialized = record.serialize()?;
        let offset = self.current_offset;

        if let Err(e) = self.file.write_all(&serialized) {
            self.rollback();
            return Err(StorageError::write_failed(
                format!("Failed to write record {}", record.id),
                e,
            ));
        }

        if let Err(e) = self.file.sync_all() {
            self.rollback();
            return Err(StorageError::write_failed(
                format!("fsync failed after writing record {}", record.id),
                e,
            ));
        }

        self.current_offset += serialized.len() as u64;
        self.next_id = self.next_id.max(record.id + 1);
        self.record_count += 1;

        Ok(offset)
    }

    /// Truncates anything past the last acknowledged record.
    fn rollback(&mut self) {
        if let Err(e) = self.file.set_len(self.current_offset) {
            error!(
                path = %self.storage_path.display(),
                offset = self.current_offset,
                error = %e,
                "failed to roll back partial record write"
            );
        }
    }
}
