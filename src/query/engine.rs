//! Record query engine
//!
//! Dispatches on which of `group_by` / `sort_by` are present:
//!
//! | group_by | sort_by | result                                  |
//! |----------|---------|-----------------------------------------|
//! | yes      | yes     | `Grouped`, each bucket sorted           |
//! | yes      | no      | `Grouped`, buckets in fetch order       |
//! | no       | yes     | `Sorted`, whole set sorted              |
//! | no       | no      | `Sorted`, fetch order                   |
//!
//! All work after the fetch is in-memory and synchronous. The engine holds no
//! state besides the store handle.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::grouping::{group_by, GroupedRecords};
use super::params::{RecordQuery, SortSpec};
use super::result::QueryResult;
use super::sorter::ResultSorter;
use crate::storage::{RecordStore, StorageResult};

/// Executes grouped/sorted queries over one store.
#[derive(Clone)]
pub struct RecordQueryEngine {
    store: Arc<dyn RecordStore>,
}

impl RecordQueryEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Runs `query`. Validation of the parameter combination is the caller's.
    pub fn execute(&self, query: &RecordQuery) -> StorageResult<QueryResult> {
        let sort_spec = query.sort_spec();

        debug!(
            dataset = %query.dataset,
            group_by = ?query.group_by,
            sort_by = ?query.sort_by,
            direction = %query.direction(),
            "executing query"
        );

        let result = match (&query.group_by, sort_spec) {
            (Some(group_field), sort_spec) => QueryResult::Grouped(self.group_and_sort(
                &query.dataset,
                group_field,
                sort_spec.as_ref(),
            )?),
            (None, Some(sort_spec)) => {
                QueryResult::Sorted(self.sort_only(&query.dataset, &sort_spec)?)
            }
            (None, None) => QueryResult::Sorted(self.fetch_payloads(&query.dataset)?),
        };

        Ok(result)
    }

    /// Groups a dataset by `group_field`, sorting each bucket if `sort_spec`
    /// is given. Without it buckets keep fetch order.
    pub fn group_and_sort(
        &self,
        dataset: &str,
        group_field: &str,
        sort_spec: Option<&SortSpec>,
    ) -> StorageResult<GroupedRecords> {
        let groups = group_by(self.fetch_payloads(dataset)?, group_field);

        Ok(match sort_spec {
            Some(spec) => groups
                .into_iter()
                .map(|(key, bucket)| (key, ResultSorter::sort(bucket, spec)))
                .collect(),
            None => groups,
        })
    }

    /// Orders a whole dataset.
    pub fn sort_only(&self, dataset: &str, sort_spec: &SortSpec) -> StorageResult<Vec<Value>> {
        Ok(ResultSorter::sort(self.fetch_payloads(dataset)?, sort_spec))
    }

    /// Payloads of a dataset in the store's scan order.
    pub fn fetch_payloads(&self, dataset: &str) -> StorageResult<Vec<Value>> {
        Ok(self
            .store
            .fetch_by_dataset(dataset)?
            .into_iter()
            .map(|record| record.payload)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortDirection;
    use crate::storage::InMemoryRecordStore;
    use serde_json::json;

    fn engine_with_people() -> RecordQueryEngine {
        let store = Arc::new(InMemoryRecordStore::new());
        for payload in [
            json!({"name": "Bob", "age": 25, "city": "LA"}),
            json!({"name": "John", "age": 30, "city": "NYC"}),
            json!({"name": "Jane", "age": 35, "city": "NYC"}),
        ] {
            store.insert("D", payload).unwrap();
        }
        store.insert("other", json!({"name": "Zed"})).unwrap();
        RecordQueryEngine::new(store)
    }

    fn names(docs: &[Value]) -> Vec<&str> {
        docs.iter().map(|d| d["name"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_group_and_sort_descending() {
        let engine = engine_with_people();
        let query = RecordQuery::new("D")
            .group_by("city")
            .sort_by("age")
            .order(SortDirection::Desc);

        let result = engine.execute(&query).unwrap();
        let groups = result.grouped().unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(names(&groups["NYC"]), vec!["Jane", "John"]);
        assert_eq!(names(&groups["LA"]), vec!["Bob"]);
    }

    #[test]
    fn test_group_only_keeps_fetch_order() {
        let engine = engine_with_people();
        let query = RecordQuery::new("D").group_by("city");

        let result = engine.execute(&query).unwrap();
        let groups = result.grouped().unwrap();

        assert_eq!(names(&groups["NYC"]), vec!["John", "Jane"]);
        assert_eq!(names(&groups["LA"]), vec!["Bob"]);
    }

    #[test]
    fn test_sort_only_ascending() {
        let engine = engine_with_people();
        let query = RecordQuery::new("D").sort_by("age");

        let result = engine.execute(&query).unwrap();
        assert_eq!(names(result.sorted().unwrap()), vec!["Bob", "John", "Jane"]);
    }

    #[test]
    fn test_no_parameters_returns_everything_flat() {
        let engine = engine_with_people();
        let result = engine.execute(&RecordQuery::new("D")).unwrap();

        assert!(result.grouped().is_none());
        assert_eq!(names(result.sorted().unwrap()), vec!["Bob", "John", "Jane"]);
    }

    #[test]
    fn test_unknown_dataset_is_empty() {
        let engine = engine_with_people();

        let flat = engine.execute(&RecordQuery::new("nope")).unwrap();
        assert_eq!(flat, QueryResult::Sorted(vec![]));

        let grouped = engine
            .execute(&RecordQuery::new("nope").group_by("city"))
            .unwrap();
        assert_eq!(grouped, QueryResult::Grouped(GroupedRecords::new()));
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let engine = engine_with_people();
        let query = RecordQuery::new("D").group_by("city").sort_by("name");

        let first = engine.execute(&query).unwrap();
        let second = engine.execute(&query).unwrap();
        assert_eq!(first, second);
    }
}
