//! Ordering documents by a field
//!
//! Two passes produce the same order:
//!
//! - keyed: every document's sort key is rendered and parsed once up front,
//!   then keys are compared
//! - pairwise: keys are derived from the documents on each comparison
//!
//! The keyed pass is used unless some document holds an object or array at
//! the sort field, in which case the pairwise pass takes over. Both call
//! [`compare_keys`], so the ordering of scalar keys and the missing-value
//! policy cannot diverge between them.
//!
//! Both passes are stable merge sorts. Mixing numeric and lexical comparison
//! per pair is not guaranteed to be transitive (`"2" < "10" < "1a" < "2"`), and
//! a merge sort stays well defined on such input.

use std::cmp::Ordering;

use serde_json::Value;
use tracing::debug;

use super::comparator::{compare, compare_keys, is_non_scalar, SortKey};
use super::params::SortSpec;

/// Sorts result documents
pub struct ResultSorter;

impl ResultSorter {
    /// Orders `documents` by `sort_spec`, choosing the pass.
    pub fn sort(documents: Vec<Value>, sort_spec: &SortSpec) -> Vec<Value> {
        if Self::has_non_scalar_keys(&documents, &sort_spec.field) {
            debug!(
                field = %sort_spec.field,
                "non-scalar sort values present, using pairwise pass"
            );
            Self::sort_pairwise(documents, sort_spec)
        } else {
            Self::sort_keyed(documents, sort_spec)
        }
    }

    /// True if any document holds an object or array at `field`.
    pub fn has_non_scalar_keys(documents: &[Value], field: &str) -> bool {
        documents
            .iter()
            .filter_map(|doc| doc.get(field))
            .any(is_non_scalar)
    }

    /// Keyed pass: one key per document, computed once.
    pub fn sort_keyed(documents: Vec<Value>, sort_spec: &SortSpec) -> Vec<Value> {
        let decorated: Vec<(Option<SortKey>, Value)> = documents
            .into_iter()
            .map(|doc| (SortKey::from_value(doc.get(&sort_spec.field)), doc))
            .collect();

        merge_sort_by(decorated, &mut |a, b| {
            compare_keys(a.0.as_ref(), b.0.as_ref(), sort_spec.direction)
        })
        .into_iter()
        .map(|(_, doc)| doc)
        .collect()
    }

    /// Pairwise pass: keys derived from the documents on every comparison.
    pub fn sort_pairwise(documents: Vec<Value>, sort_spec: &SortSpec) -> Vec<Value> {
        let field = sort_spec.field.as_str();
        merge_sort_by(documents, &mut |a, b| {
            compare(a.get(field), b.get(field), sort_spec.direction)
        })
    }
}

/// Stable top-down merge sort.
///
/// Ties keep their input order: an element from the right half only moves
/// ahead of one from the left half when it compares strictly less.
fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };

        let next = if take_right { right.next() } else { left.next() };
        if let Some(item) = next {
            merged.push(item);
        }
    }

    merged
}
