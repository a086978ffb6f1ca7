//! Cost-based benefit scoring
//!
//! Scores every (query, candidate) pair against the cost model: how much
//! work the candidate index saves over a full collection scan, with a
//! cheaper unit cost for covered queries, a cap when a limit lets the scan
//! stop early, and a bonus when the index makes an in-memory sort
//! unnecessary.

mod cache;
mod matrix;

pub use cache::EstimateCache;
pub use matrix::ScoreMatrix;

use crate::candidates::IndexKey;
use crate::estimator::{CardinalityEstimator, EstimateResult};
use crate::query::Query;
use crate::workload::Workload;

/// Relative cost constants; a collection scan costs 1.0 per document
#[derive(Debug, Clone, PartialEq)]
pub struct CostModel {
    /// Per-entry cost of walking index entries when the query is covered
    pub ixscan_cost: f64,
    /// Per-document cost when matches must be fetched after the index scan
    pub fetch_cost: f64,
    /// Per-comparison weight of the in-memory sort an index avoids
    pub sort_cost: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            ixscan_cost: 0.5,
            fetch_cost: 10.0,
            sort_cost: 10.0,
        }
    }
}

/// Scores a workload against a candidate set
pub struct Scorer<'a, E: CardinalityEstimator + ?Sized> {
    estimator: &'a E,
    cache: EstimateCache,
    cost_model: CostModel,
}

impl<'a, E: CardinalityEstimator + ?Sized> Scorer<'a, E> {
    /// Creates a scorer with a fresh estimate cache
    pub fn new(estimator: &'a E, cost_model: CostModel) -> Self {
        Self {
            estimator,
            cache: EstimateCache::new(),
            cost_model,
        }
    }

    /// Computes the full score matrix.
    ///
    /// Estimator failures abort the pass; no fallback estimate is ever
    /// substituted.
    pub fn score(&self, workload: &Workload, candidates: &[IndexKey]) -> EstimateResult<ScoreMatrix> {
        let total = self.estimator.total_count()?;
        let mut rows = Vec::with_capacity(workload.len());
        for query in workload {
            let mut row = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                row.push(self.score_pair(query, candidate, total)?);
            }
            rows.push(row);
        }
        Ok(ScoreMatrix::new(candidates.to_vec(), rows))
    }

    /// Benefit of one candidate for one query
    fn score_pair(&self, query: &Query, candidate: &IndexKey, total: f64) -> EstimateResult<f64> {
        let fetch = query.index_intersect(candidate);

        let mut benefit = if fetch.predicates().is_empty() {
            // the index cannot narrow this query; neutral against a collection scan
            0.0
        } else {
            let unit_cost = if query.is_covered(candidate) {
                self.cost_model.ixscan_cost
            } else {
                self.cost_model.fetch_cost
            };

            let mut est = self.cache.estimate(self.estimator, &fetch)?;
            if let Some(limit) = query.limit() {
                if query.is_subset(candidate) {
                    // every filter field is indexed, so the scan stops once
                    // `limit` matches are found; upper bound on expected
                    // draws, not the exact hypergeometric expectation
                    est = est.min(limit as f64);
                }
            }

            total * 1.0 - est * unit_cost
        };

        if query.can_use_sort(candidate) {
            // floor at 1 to keep log2 defined at zero matches
            let est = self.cache.estimate(self.estimator, query)?.max(1.0);
            benefit += est * est.log2() * self.cost_model.sort_cost;
        }

        Ok(benefit)
    }

    /// Distinct estimates resolved during this pass
    pub fn cached_estimates(&self) -> usize {
        self.cache.len()
    }
}
