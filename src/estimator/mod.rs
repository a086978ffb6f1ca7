//! Cardinality estimation
//!
//! The scorer consumes estimates through the `CardinalityEstimator`
//! contract; the sample-backed implementation here is one provider, and
//! tests substitute deterministic stubs.

mod errors;
mod matcher;
mod sample;

pub use errors::{EstimateError, EstimateResult};
pub use sample::SampleEstimator;

use crate::query::Query;

/// Cardinality oracle contract used by the cost scorer.
///
/// Implementations must be deterministic for identical inputs within one
/// run (the estimate cache depends on it); results may vary across runs
/// when the underlying sample is redrawn.
pub trait CardinalityEstimator {
    /// Approximate number of documents matching the query's predicates.
    /// May be fractional: extrapolation from a sample.
    fn estimate(&self, query: &Query) -> EstimateResult<f64>;

    /// Approximate total collection size
    fn total_count(&self) -> EstimateResult<f64>;
}
