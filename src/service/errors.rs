//! Service error types

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for dataset service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Dataset service failure
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller supplied an invalid parameter combination
    #[error("{0}")]
    BadRequest(String),

    /// The store failed; the request cannot be answered
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Client errors are the caller's to fix; everything else is internal.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }
}
