//! Normalized query model
//!
//! One `Query` represents a single profiled find operation: its filter
//! predicates, requested sort order, projected output fields and result
//! limit. Queries are immutable once built and compare structurally, so a
//! `Query` can key the estimate cache directly.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;

use super::errors::{QueryError, QueryResult};
use super::predicate::{parse_filter, Predicate};
use crate::candidates::IndexKey;

/// Normalized representation of one filter/sort/projection/limit combination
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    predicates: Vec<Predicate>,
    sort: Vec<String>,
    projection: BTreeSet<String>,
    limit: Option<u64>,
}

impl Query {
    /// Builds a query from a filter document.
    ///
    /// Fails with a validation error on unsupported filter shapes; the
    /// caller is expected to skip the record, not abort.
    pub fn from_filter(filter: &Value) -> QueryResult<Self> {
        Ok(Self {
            predicates: parse_filter(filter)?,
            ..Self::default()
        })
    }

    /// Builds a query directly from predicates (estimator and test hook)
    pub fn from_predicates(predicates: Vec<Predicate>) -> Self {
        Self {
            predicates,
            ..Self::default()
        }
    }

    /// Sets the requested result ordering
    pub fn with_sort(mut self, sort: Vec<String>) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the projected output fields
    pub fn with_projection(mut self, projection: impl IntoIterator<Item = String>) -> Self {
        self.projection = projection.into_iter().collect();
        self
    }

    /// Sets the result limit; zero is rejected
    pub fn with_limit(mut self, limit: u64) -> QueryResult<Self> {
        if limit == 0 {
            return Err(QueryError::ZeroLimit);
        }
        self.limit = Some(limit);
        Ok(self)
    }

    /// Filter predicates, in normalized order
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Requested result ordering; empty when none
    pub fn sort(&self) -> &[String] {
        &self.sort
    }

    /// Projected output fields; empty means all fields are needed
    pub fn projection(&self) -> &BTreeSet<String> {
        &self.projection
    }

    /// Result limit, if any
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Set of field names the filter touches
    pub fn fields(&self) -> BTreeSet<&str> {
        self.predicates.iter().map(|p| p.field.as_str()).collect()
    }

    /// Returns the sub-query the index can answer: the longest prefix of
    /// `key` matched by this query's predicates.
    ///
    /// Equality predicates keep the prefix going; a field matched only by
    /// range predicates is usable but terminates the prefix; a field with
    /// no predicate terminates it unmatched. The result carries only the
    /// matched predicates (sort, projection and limit are dropped).
    pub fn index_intersect(&self, key: &IndexKey) -> Query {
        let mut usable: BTreeSet<&str> = BTreeSet::new();
        for field in key.fields() {
            let on_field: Vec<&Predicate> = self
                .predicates
                .iter()
                .filter(|p| p.field == *field)
                .collect();
            if on_field.is_empty() {
                break;
            }
            usable.insert(field.as_str());
            if !on_field.iter().any(|p| p.is_equality()) {
                // range-only match: last usable position in the prefix
                break;
            }
        }
        Query::from_predicates(
            self.predicates
                .iter()
                .filter(|p| usable.contains(p.field.as_str()))
                .cloned()
                .collect(),
        )
    }

    /// True when the index alone can answer the query: every predicate,
    /// sort and projection field is part of the key. An empty projection
    /// means the whole document is needed, so nothing short of the full
    /// document covers it.
    pub fn is_covered(&self, key: &IndexKey) -> bool {
        if self.projection.is_empty() {
            return false;
        }
        self.fields().iter().all(|f| key.contains(f))
            && self.sort.iter().all(|f| key.contains(f))
            && self.projection.iter().all(|f| key.contains(f))
    }

    /// True when every filter field is somewhere in the key, order ignored.
    /// Determines whether a `limit` may legally cap the scan estimate.
    pub fn is_subset(&self, key: &IndexKey) -> bool {
        self.fields().iter().all(|f| key.contains(f))
    }

    /// True when the index can serve the requested sort without an
    /// in-memory sort step: after the leading key fields held fixed by
    /// equality predicates, the sort sequence (forward or fully reversed)
    /// must be a prefix of the remaining key fields.
    pub fn can_use_sort(&self, key: &IndexKey) -> bool {
        if self.sort.is_empty() {
            return false;
        }
        let equality_prefix = key
            .fields()
            .iter()
            .take_while(|field| {
                self.predicates
                    .iter()
                    .any(|p| p.field == **field && p.is_equality())
            })
            .count();
        let suffix = &key.fields()[equality_prefix..];
        if suffix.len() < self.sort.len() {
            return false;
        }
        let head = &suffix[..self.sort.len()];
        head.iter().eq(self.sort.iter()) || head.iter().eq(self.sort.iter().rev())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, pred) in self.predicates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", pred)?;
        }
        write!(f, "}}")?;
        if !self.sort.is_empty() {
            write!(f, " sort=[{}]", self.sort.join(", "))?;
        }
        if !self.projection.is_empty() {
            let fields: Vec<&str> = self.projection.iter().map(String::as_str).collect();
            write!(f, " projection=[{}]", fields.join(", "))?;
        }
        if let Some(limit) = self.limit {
            write!(f, " limit={}", limit)?;
        }
        Ok(())
    }
}
