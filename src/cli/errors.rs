//! CLI error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::io;

use thiserror::Error;

use crate::service::ServiceError;
use crate::storage::StorageError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file unreadable, malformed, or incomplete
    #[error("configuration error: {0}")]
    Config(String),

    /// stdin/stdout failure or unreadable input
    #[error("I/O error: {0}")]
    Io(String),

    /// Store could not be opened or the server could not start
    #[error("boot failed: {0}")]
    Boot(String),

    /// A one-shot command was rejected or failed
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::Boot(msg.into())
    }

    /// Stable code for scripts consuming stderr
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "DATASETS_CLI_CONFIG_ERROR",
            Self::Io(_) => "DATASETS_CLI_IO_ERROR",
            Self::Boot(_) => "DATASETS_CLI_BOOT_FAILED",
            Self::Service(e) if e.is_client_error() => "DATASETS_BAD_REQUEST",
            Self::Service(_) => "DATASETS_INTERNAL_ERROR",
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        Self::boot_failed(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(CliError::config_error("x").code(), "DATASETS_CLI_CONFIG_ERROR");
        assert_eq!(
            CliError::from(ServiceError::bad_request("x")).code(),
            "DATASETS_BAD_REQUEST"
        );
        assert_eq!(
            CliError::from(ServiceError::from(StorageError::Poisoned)).code(),
            "DATASETS_INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let err = CliError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert!(err.to_string().contains("pipe closed"));
    }
}
