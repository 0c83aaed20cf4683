//! Dataset HTTP Routes
//!
//! - `POST /dataset/:name/record`: insert one JSON payload
//! - `GET /dataset/:name/query`: query with optional `groupBy`, `sortBy`, `order`

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::errors::{RestError, RestResult};
use crate::query::{QueryResult, RecordQuery, SortDirection};
use crate::service::{DatasetService, InsertRecordResponse};

// ==================
// Shared State
// ==================

/// Dataset state shared across handlers
pub struct DatasetState {
    pub service: DatasetService,
}

impl DatasetState {
    pub fn new(service: DatasetService) -> Self {
        Self { service }
    }
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct InsertRecordRequest {
    /// Absent and `null` both fail validation
    #[serde(default)]
    pub payload: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRecordsParams {
    #[serde(default)]
    pub group_by: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

impl QueryRecordsParams {
    /// Builds the engine query.
    ///
    /// `groupBy` and `sortBy` are taken as given, empty values included. With
    /// `sortBy` present any `order` other than `desc` means ascending. Without
    /// it a non-blank `order` is passed on so the service can reject it.
    pub fn into_query(self, dataset: String) -> RecordQuery {
        let order = self
            .order
            .filter(|o| !o.trim().is_empty())
            .map(|o| SortDirection::from_param(&o));

        RecordQuery {
            dataset,
            group_by: self.group_by,
            sort_by: self.sort_by,
            order,
        }
    }
}

// ==================
// Dataset Routes
// ==================

/// Create dataset routes
pub fn dataset_routes(state: Arc<DatasetState>) -> Router {
    Router::new()
        .route("/dataset/:name/record", post(insert_record_handler))
        .route("/dataset/:name/query", get(query_records_handler))
        .with_state(state)
}

async fn insert_record_handler(
    State(state): State<Arc<DatasetState>>,
    Path(name): Path<String>,
    request: Result<Json<InsertRecordRequest>, JsonRejection>,
) -> RestResult<Json<InsertRecordResponse>> {
    let Json(request) = request.map_err(|e| RestError::InvalidBody(e.body_text()))?;

    let payload = request
        .payload
        .ok_or_else(|| RestError::Validation("payload: Payload cannot be null".to_string()))?;

    Ok(Json(state.service.insert(&name, payload)?))
}

async fn query_records_handler(
    State(state): State<Arc<DatasetState>>,
    Path(name): Path<String>,
    Query(params): Query<QueryRecordsParams>,
) -> RestResult<Json<QueryResult>> {
    let query = params.into_query(name);
    Ok(Json(state.service.query(&query)?))
}
