//! Record query engine
//!
//! Groups and orders schemaless JSON documents by top-level fields.
//!
//! # Layers (leaves first)
//!
//! 1. [`compare`] / [`compare_keys`]: numeric-first, text-fallback comparison
//!    with missing values as the minimum
//! 2. [`ResultSorter`]: stable ordering of documents by one field
//! 3. [`group_by`]: stable partition into buckets keyed by a field's rendering
//! 4. [`RecordQueryEngine`]: four-way dispatch on the supplied parameters

mod comparator;
mod engine;
mod grouping;
mod params;
mod result;
mod sorter;

pub use comparator::{compare, compare_keys, is_non_scalar, render_text, SortKey};
pub use engine::RecordQueryEngine;
pub use grouping::{group_by, group_key, GroupedRecords, NULL_GROUP_KEY};
pub use params::{ParseDirectionError, RecordQuery, SortDirection, SortSpec};
pub use result::QueryResult;
pub use sorter::ResultSorter;
