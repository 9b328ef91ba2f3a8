//! Search constraints and sort options for Data API queries.
//!
//! The Data API accepts filters as a JSON array in the `constraints` query
//! parameter and sorting as `sort_field` plus a boolean `descending`
//! parameter. Everything here serializes through serde into a single
//! well-formed query string; no fragments are concatenated by hand.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use bubble_core::error::BubbleResult;

/// Filter operator understood by the Data API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintType {
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "not equal")]
    NotEqual,
}

/// A single filter predicate on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Field name to filter on.
    pub key: String,
    /// Filter operator.
    pub constraint_type: ConstraintType,
    /// Comparison value (string or boolean). Omitted from the wire form
    /// when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Constraint {
    /// Filter records whose `key` equals `value`.
    pub fn equals(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            constraint_type: ConstraintType::Equals,
            value: Some(value.into()),
        }
    }

    /// Filter records whose `key` does not equal `value`.
    pub fn not_equal(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            constraint_type: ConstraintType::NotEqual,
            value: Some(value.into()),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    /// Wire value of the `descending` query parameter.
    pub fn is_descending(self) -> bool {
        matches!(self, SortOrder::Desc)
    }
}

/// Server-side sort on a single field. At most one per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortOption {
    /// Field name to sort by.
    pub key: String,
    /// Sort direction.
    pub order: SortOrder,
}

impl SortOption {
    /// Sort ascending by `key`.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Asc,
        }
    }

    /// Sort descending by `key`.
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Desc,
        }
    }
}

/// Query parameters for a Data API search: constraints plus an optional
/// sort. Cursor offsets are merged in separately by the client so one
/// query value can drive every page of a paginated fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataQuery {
    /// Filter predicates, ANDed together by the server.
    pub constraints: Vec<Constraint>,
    /// Optional server-side sort.
    pub sort: Option<SortOption>,
}

impl DataQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter predicate.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Set the sort option, replacing any previous one.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Render the query as name/value pairs ready for URL encoding.
    ///
    /// Constraints become one `constraints` parameter holding a JSON
    /// array; a sort becomes `sort_field` plus `descending`.
    pub fn query_pairs(&self) -> BubbleResult<Vec<(&'static str, String)>> {
        let mut pairs = Vec::new();
        if !self.constraints.is_empty() {
            pairs.push(("constraints", serde_json::to_string(&self.constraints)?));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort_field", sort.key.clone()));
            pairs.push(("descending", sort.order.is_descending().to_string()));
        }
        Ok(pairs)
    }
}
