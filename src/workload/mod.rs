//! Workload construction
//!
//! Collects the normalized queries for one namespace out of a profiler
//! export. Records that fail validation are dropped with a warning; they
//! never abort the build.

mod profile;

pub use profile::{ProfileCommand, ProfileRecord};

use chrono::{DateTime, Utc};

use crate::observability::Logger;
use crate::query::Query;

/// Ordered, append-only sequence of normalized queries
#[derive(Debug, Clone, Default)]
pub struct Workload {
    queries: Vec<Query>,
}

impl Workload {
    /// Creates an empty workload
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-normalized query list
    pub fn from_queries(queries: Vec<Query>) -> Self {
        Self { queries }
    }

    /// Appends a query
    pub fn push(&mut self, query: Query) {
        self.queries.push(query);
    }

    /// Number of queries
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// True when no queries were kept
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Iterates queries in profile order
    pub fn iter(&self) -> std::slice::Iter<'_, Query> {
        self.queries.iter()
    }
}

impl<'a> IntoIterator for &'a Workload {
    type Item = &'a Query;
    type IntoIter = std::slice::Iter<'a, Query>;

    fn into_iter(self) -> Self::IntoIter {
        self.queries.iter()
    }
}

/// Outcome counters for one workload build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkloadReport {
    /// Records normalized into queries
    pub kept: usize,
    /// Records dropped by validation
    pub skipped: usize,
    /// Earliest recorded operation time, when the export carries timestamps
    pub first_ts: Option<DateTime<Utc>>,
    /// Latest recorded operation time
    pub last_ts: Option<DateTime<Utc>>,
}

impl WorkloadReport {
    fn observe_ts(&mut self, ts: Option<DateTime<Utc>>) {
        let Some(ts) = ts else { return };
        self.first_ts = Some(self.first_ts.map_or(ts, |t| t.min(ts)));
        self.last_ts = Some(self.last_ts.map_or(ts, |t| t.max(ts)));
    }
}

/// Builds the workload for `namespace` from a profiler export.
///
/// Only plain query records for the namespace are considered. Each
/// validation failure is logged as a WARN event with the failing filter's
/// reason and counted in the report.
pub fn build_workload(records: &[ProfileRecord], namespace: &str) -> (Workload, WorkloadReport) {
    let mut workload = Workload::new();
    let mut report = WorkloadReport::default();

    for record in records.iter().filter(|r| r.is_query_on(namespace)) {
        match record.to_query() {
            Ok(query) => {
                report.kept += 1;
                report.observe_ts(record.ts);
                workload.push(query);
            }
            Err(err) => {
                report.skipped += 1;
                Logger::warn(
                    "WORKLOAD_RECORD_SKIPPED",
                    &[("ns", namespace), ("reason", &err.to_string())],
                );
            }
        }
    }

    (workload, report)
}
