//! Storage error types
//!
//! I/O and write failures are operational errors. Corruption (bad checksum,
//! truncated tail, impossible lengths) is fatal for the scan that hit it and is
//! never silently skipped. A record whose checksum is valid but whose payload
//! no longer parses as JSON is not an error at this level; see
//! [`StoredRecord::decode`](super::StoredRecord::decode).

use std::io;

use thiserror::Error;

/// Storage failure
#[derive(Debug, Error)]
pub enum StorageError {
    /// Disk I/O failure while opening or reading the store
    #[error("storage I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Append or fsync failed; the record was not acknowledged
    #[error("record write failed: {message}")]
    WriteFailed {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Stored bytes failed validation
    #[error("data corruption at byte offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// Record does not fit the on-disk length fields
    #[error("{field} too large to store: {len} bytes")]
    TooLarge { field: &'static str, len: usize },

    /// Payload could not be encoded for storage
    #[error("payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// A thread panicked while holding the store lock
    #[error("storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::WriteFailed {
            message: message.into(),
            source,
        }
    }

    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Corruption means the file can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Corruption { .. })
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
