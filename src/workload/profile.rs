//! Profile record ingestion
//!
//! One record per profiled operation, as exported from the profiler in
//! newline-delimited JSON. Sort order is carried as an array of field
//! names: JSON object key order does not survive parsing.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::query::{Query, QueryResult};

/// One operation record from a profiler export
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRecord {
    /// Namespace the operation ran against, as `<db>.<collection>`
    pub ns: String,
    /// Operation kind; only plain queries are analyzed
    pub op: String,
    /// Time the operation was recorded, when the export carries it
    #[serde(default)]
    pub ts: Option<DateTime<Utc>>,
    /// The recorded command body
    pub command: ProfileCommand,
}

/// The filter/limit/sort/projection portion of a profiled command
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileCommand {
    #[serde(default)]
    pub filter: Value,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub sort: Vec<String>,
    #[serde(default)]
    pub projection: Vec<String>,
}

impl ProfileRecord {
    /// True when the record is a plain query against `namespace`
    pub fn is_query_on(&self, namespace: &str) -> bool {
        self.op == "query" && self.ns == namespace
    }

    /// Normalizes the recorded command into a query model value.
    ///
    /// A missing filter deserializes to JSON null and fails validation
    /// here, which the workload builder treats as a skippable record.
    pub fn to_query(&self) -> QueryResult<Query> {
        let mut query = Query::from_filter(&self.command.filter)?;
        if let Some(limit) = self.command.limit {
            query = query.with_limit(limit)?;
        }
        if !self.command.sort.is_empty() {
            query = query.with_sort(self.command.sort.clone());
        }
        if !self.command.projection.is_empty() {
            query = query.with_projection(self.command.projection.iter().cloned());
        }
        Ok(query)
    }
}
