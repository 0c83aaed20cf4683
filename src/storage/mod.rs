//! Record storage
//!
//! The query layer only sees the [`RecordStore`] interface: insert, and scan by
//! dataset. Two backends are provided:
//!
//! - [`InMemoryRecordStore`]: process-local, lost on exit
//! - [`FileRecordStore`]: append-only file with checksummed, fsynced records
//!
//! # Failure policy
//!
//! - Checksum or framing failures are corruption and fail the whole scan
//! - A checksum-valid record whose JSON payload does not parse is skipped and
//!   logged; the rest of the dataset is still returned

mod checksum;
mod errors;
mod memory;
mod reader;
mod record;
mod store;
mod writer;

pub use checksum::{compute_checksum, verify_checksum};
pub use errors::{StorageError, StorageResult};
pub use memory::InMemoryRecordStore;
pub use reader::StorageReader;
pub use record::{decode_all, Record, StoredRecord, MIN_RECORD_SIZE};
pub use store::{FileRecordStore, RecordStore};
pub use writer::{StorageWriter, RECORD_FILE};
