//! Dataset service: insert and query orchestration

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::errors::{ServiceError, ServiceResult};
use crate::query::{QueryResult, RecordQuery, RecordQueryEngine};
use crate::storage::RecordStore;

/// Confirmation text returned for every successful insert
pub const INSERT_CONFIRMATION: &str = "Record inserted successfully";

/// Message for `order` supplied without `sortBy`
pub const ORDER_WITHOUT_SORT: &str = "Sort direction specified but no sort field provided. \
     Please provide a sortBy parameter when specifying order.";

/// Outcome of an insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertRecordResponse {
    pub record_id: u64,
    pub dataset: String,
    pub message: String,
}

/// Inserts documents and answers grouped/sorted queries.
#[derive(Clone)]
pub struct DatasetService {
    store: Arc<dyn RecordStore>,
    engine: RecordQueryEngine,
}

impl DatasetService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let engine = RecordQueryEngine::new(Arc::clone(&store));
        Self { store, engine }
    }

    /// Stores `payload` in `dataset`.
    pub fn insert(&self, dataset: &str, payload: Value) -> ServiceResult<InsertRecordResponse> {
        let record = self.store.insert(dataset, payload)?;
        info!(record_id = record.id, dataset = %record.dataset_name, "record inserted");

        Ok(InsertRecordResponse {
            record_id: record.id,
            dataset: record.dataset_name,
            message: INSERT_CONFIRMATION.to_string(),
        })
    }

    /// Validates the parameter combination, then runs the query.
    ///
    /// `order` without `sort_by` is rejected before any storage access.
    pub fn query(&self, query: &RecordQuery) -> ServiceResult<QueryResult> {
        Self::validate(query)?;

        let result = self.engine.execute(query)?;
        debug!(
            dataset = %query.dataset,
            documents = result.document_count(),
            "query complete"
        );
        Ok(result)
    }

    fn validate(query: &RecordQuery) -> ServiceResult<()> {
        if query.order.is_some() && query.sort_by.is_none() {
            return Err(ServiceError::bad_request(ORDER_WITHOUT_SORT));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortDirection;
    use crate::storage::{InMemoryRecordStore, Record, StorageError, StorageResult};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts fetches so tests can tell whether the engine ran.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryRecordStore,
        fetches: AtomicUsize,
    }

    impl RecordStore for CountingStore {
        fn insert(&self, dataset: &str, payload: Value) -> StorageResult<Record> {
            self.inner.insert(dataset, payload)
        }

        fn fetch_by_dataset(&self, dataset: &str) -> StorageResult<Vec<Record>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch_by_dataset(dataset)
        }
    }

    struct FailingStore;

    impl RecordStore for FailingStore {
        fn insert(&self, _dataset: &str, _payload: Value) -> StorageResult<Record> {
            Err(StorageError::Poisoned)
        }

        fn fetch_by_dataset(&self, _dataset: &str) -> StorageResult<Vec<Record>> {
            Err(StorageError::corruption_at_offset(0, "bad record"))
        }
    }

    #[test]
    fn test_insert_returns_confirmation() {
        let service = DatasetService::new(Arc::new(InMemoryRecordStore::new()));

        let response = service.insert("D", json!({"name": "Bob"})).unwrap();
        assert_eq!(response.record_id, 1);
        assert_eq!(response.dataset, "D");
        assert_eq!(response.message, INSERT_CONFIRMATION);
    }

    #[test]
    fn test_insert_response_uses_camel_case() {
        let response = InsertRecordResponse {
            record_id: 4,
            dataset: "D".to_string(),
            message: INSERT_CONFIRMATION.to_string(),
        };
        let body = serde_json::to_value(response).unwrap();
        assert_eq!(body["recordId"], json!(4));
    }

    #[test]
    fn test_order_without_sort_rejected_before_fetch() {
        let store = Arc::new(CountingStore::default());
        let service = DatasetService::new(store.clone());

        for query in [
            RecordQuery::new("D").order(SortDirection::Asc),
            RecordQuery::new("D").group_by("city").order(SortDirection::Desc),
        ] {
            let err = service.query(&query).unwrap_err();
            assert!(err.is_client_error());
            assert_eq!(err.to_string(), ORDER_WITHOUT_SORT);
        }

        assert_eq!(store.fetches.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_valid_query_reaches_store() {
        let store = Arc::new(CountingStore::default());
        let service = DatasetService::new(store.clone());
        service.insert("D", json!({"age": 2})).unwrap();
        service.insert("D", json!({"age": 1})).unwrap();

        let result = service
            .query(&RecordQuery::new("D").sort_by("age").order(SortDirection::Asc))
            .unwrap();

        assert_eq!(
            result,
            QueryResult::Sorted(vec![json!({"age": 1}), json!({"age": 2})])
        );
        assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_storage_failures_propagate() {
        let service = DatasetService::new(Arc::new(FailingStore));

        assert!(!service.insert("D", json!({})).unwrap_err().is_client_error());
        assert!(matches!(
            service.query(&RecordQuery::new("D")),
            Err(ServiceError::Storage(_))
        ));
    }
}
