//! Query parameter types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Lenient form used for query-string values: `desc` in any case selects
    /// descending, anything else ascending.
    pub fn from_param(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected `order` value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sort order '{0}', expected 'asc' or 'desc'")]
pub struct ParseDirectionError(pub String);

impl FromStr for SortDirection {
    type Err = ParseDirectionError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if trimmed.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(ParseDirectionError(trimmed.to_string()))
        }
    }
}

/// Field and direction to order by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// A query against one dataset.
///
/// `order` is only meaningful together with `sort_by`; the service layer
/// rejects it otherwise before a query reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordQuery {
    pub dataset: String,
    pub group_by: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<SortDirection>,
}

impl RecordQuery {
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            ..Default::default()
        }
    }

    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.group_by = Some(field.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    pub fn order(mut self, direction: SortDirection) -> Self {
        self.order = Some(direction);
        self
    }

    /// Direction used whenever one is needed; ascending unless given.
    pub fn direction(&self) -> SortDirection {
        self.order.unwrap_or_default()
    }

    /// Sort specification, if a sort field was supplied.
    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort_by
            .as_ref()
            .map(|field| SortSpec::new(field.clone(), self.direction()))
    }
}
