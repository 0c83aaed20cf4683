//! HTTP error mapping
//!
//! Errors render as problem details: `{type, title, status, detail}`.
//! Internal failures are logged with their cause and answered with a generic
//! detail so nothing about storage leaks to the client.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::service::ServiceError;

/// Detail sent for every internal failure
pub const INTERNAL_DETAIL: &str = "An unexpected error occurred";

/// Result type for HTTP handlers
pub type RestResult<T> = Result<T, RestError>;

/// HTTP-facing errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Invalid parameter or parameter combination
    #[error("{0}")]
    BadRequest(String),

    /// Request body could not be read as JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Well-formed body failing field validation
    #[error("Validation failed: {0}")]
    Validation(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Anything else; the message is logged, never returned
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RestError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn problem_type(&self) -> (&'static str, &'static str) {
        match self {
            RestError::BadRequest(_) | RestError::InvalidBody(_) => ("/bad-request", "Bad Request"),
            RestError::Validation(_) => ("/validation-error", "Validation Error"),
            RestError::Internal(_) => ("/internal-error", "Internal Server Error"),
        }
    }

    fn detail(&self) -> String {
        match self {
            RestError::Internal(_) => INTERNAL_DETAIL.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ServiceError> for RestError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::BadRequest(message) => RestError::BadRequest(message),
            ServiceError::Storage(e) => RestError::Internal(e.to_string()),
        }
    }
}

/// Problem detail body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetail {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl From<&RestError> for ProblemDetail {
    fn from(err: &RestError) -> Self {
        let (problem_type, title) = err.problem_type();
        Self {
            problem_type: problem_type.to_string(),
            title: title.to_string(),
            status: err.status_code().as_u16(),
            detail: err.detail(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        if let RestError::Internal(cause) = &self {
            error!(error = %cause, "request failed");
        }

        let status = self.status_code();
        let body = Json(ProblemDetail::from(&self));
        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            body,
        )
            .into_response()
    }
}
