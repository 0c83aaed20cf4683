//! Record types and the on-disk record format
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, includes itself and the checksum)
//! +------------------+
//! | Record ID        | (u64 LE)
//! +------------------+
//! | Dataset Name     | (length-prefixed string)
//! +------------------+
//! | Payload          | (length-prefixed JSON bytes)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! Checksum covers all bytes except the checksum itself.
//!
//! Payloads are kept in their encoded JSON form and only parsed when a scan
//! hands records to the query layer.

use std::io::{self, Read};

use serde_json::Value;
use tracing::warn;

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{StorageError, StorageResult};

/// Length + id + dataset length + payload length + checksum
pub const MIN_RECORD_SIZE: usize = 4 + 8 + 4 + 4 + 4;

/// A persisted document with its identity and dataset membership.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Store-assigned id, unique and increasing per store
    pub id: u64,
    /// Dataset the record belongs to
    pub dataset_name: String,
    /// The JSON document as inserted
    pub payload: Value,
}

/// A record as held by a store: payload still encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: u64,
    pub dataset_name: String,
    pub body: Vec<u8>,
}

impl StoredRecord {
    pub fn new(id: u64, dataset_name: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            id,
            dataset_name: dataset_name.into(),
            body,
        }
    }

    /// Encodes a payload for storage.
    pub fn encode(id: u64, dataset_name: &str, payload: &Value) -> StorageResult<Self> {
        Ok(Self::new(id, dataset_name, serde_json::to_vec(payload)?))
    }

    /// Parses the payload back into a [`Record`].
    ///
    /// A payload that no longer parses is logged and dropped. One bad document
    /// must not fail the scan it appears in.
    pub fn decode(self) -> Option<Record> {
        match serde_json::from_slice(&self.body) {
            Ok(payload) => Some(Record {
                id: self.id,
                dataset_name: self.dataset_name,
                payload,
            }),
            Err(e) => {
                warn!(
                    record_id = self.id,
                    dataset = %self.dataset_name,
                    error = %e,
                    "skipping record with malformed payload"
                );
                None
            }
        }
    }

    fn serialize_body(&self) -> StorageResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(8 + 4 + self.dataset_name.len() + 4 + self.body.len());

        buf.extend_from_slice(&self.id.to_le_bytes());

        let dataset_len = frame_len("dataset name", self.dataset_name.len())?;
        buf.extend_from_slice(&dataset_len.to_le_bytes());
        buf.extend_from_slice(self.dataset_name.as_bytes());

        let payload_len = frame_len("payload", self.body.len())?;
        buf.extend_from_slice(&payload_len.to_le_bytes());
        buf.extend_from_slice(&self.body);

        Ok(buf)
    }

    /// Serializes the complete record, length prefix and checksum included.
    ///
    /// Fails if the record does not fit the `u32` length fields.
    pub fn serialize(&self) -> StorageResult<Vec<u8>> {
        let body = self.serialize_body()?;
        let record_length = frame_len("record", 4 + body.len() + 4)?;

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.extend_from_slice(&body);

        let checksum = compute_checksum(&record);
        record.extend_from_slice(&checksum.to_le_bytes());

        Ok(record)
    }

    /// Deserializes one record, verifying its checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Record too short",
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        if !verify_checksum(&data[..checksum_offset], stored_checksum) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    compute_checksum(&data[..checksum_offset]),
                    stored_checksum
                ),
            ));
        }

        let mut cursor = io::Cursor::new(&data[4..checksum_offset]);

        let mut id_buf = [0u8; 8];
        cursor.read_exact(&mut id_buf)?;
        let id = u64::from_le_bytes(id_buf);

        let dataset_name = String::from_utf8(read_bytes(&mut cursor)?).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e))
        })?;
        let body = read_bytes(&mut cursor)?;

        Ok((
            Self {
                id,
                dataset_name,
                body,
            },
            record_length,
        ))
    }
}

fn frame_len(field: &'static str, len: usize) -> StorageResult<u32> {
    u32::try_from(len).map_err(|_| StorageError::TooLarge { field, len })
}

fn read_bytes<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Decodes scanned records in scan order, dropping malformed payloads.
pub fn decode_all(records: impl IntoIterator<Item = StoredRecord>) -> Vec<Record> {
    records.into_iter().filter_map(StoredRecord::decode).collect()
}
