//! Dataset service
//!
//! Owns the one business rule of the query API (`order` requires `sortBy`)
//! and hands valid queries to the [`RecordQueryEngine`](crate::query::RecordQueryEngine).

mod dataset;
mod errors;

pub use dataset::{DatasetService, InsertRecordResponse, INSERT_CONFIRMATION, ORDER_WITHOUT_SORT};
pub use errors::{ServiceError, ServiceResult};
