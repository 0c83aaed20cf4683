//! Query result shape

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::grouping::GroupedRecords;

/// Either grouped buckets or one flat list, never both.
///
/// Serializes as `{"groupedRecords": {...}}` or `{"sortedRecords": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryResult {
    #[serde(rename = "groupedRecords")]
    Grouped(GroupedRecords),
    #[serde(rename = "sortedRecords")]
    Sorted(Vec<Value>),
}

impl QueryResult {
    pub fn grouped(&self) -> Option<&GroupedRecords> {
        match self {
            QueryResult::Grouped(groups) => Some(groups),
            QueryResult::Sorted(_) => None,
        }
    }

    pub fn sorted(&self) -> Option<&[Value]> {
        match self {
            QueryResult::Sorted(documents) => Some(documents),
            QueryResult::Grouped(_) => None,
        }
    }

    /// Number of documents across the result.
    pub fn document_count(&self) -> usize {
        match self {
            QueryResult::Grouped(groups) => groups.values().map(Vec::len).sum(),
            QueryResult::Sorted(documents) => documents.len(),
        }
    }
}
