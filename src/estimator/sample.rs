//! Sample-backed cardinality estimation
//!
//! Counts matching documents in an in-memory sample and extrapolates by
//! the sampling fraction. Estimates are deterministic for the lifetime of
//! the estimator; a fresh sample draw on the next run may shift them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use super::errors::{EstimateError, EstimateResult};
use super::matcher;
use super::CardinalityEstimator;
use crate::query::Query;

/// Estimates cardinalities from a document sample
#[derive(Debug, Clone)]
pub struct SampleEstimator {
    sample: Vec<Value>,
    total_count: f64,
}

impl SampleEstimator {
    /// Builds an estimator from a pre-drawn sample and the known size of
    /// the full collection
    pub fn from_sample(sample: Vec<Value>, total_count: u64) -> EstimateResult<Self> {
        if sample.is_empty() {
            return Err(EstimateError::EmptySample);
        }
        Ok(Self {
            sample,
            total_count: total_count as f64,
        })
    }

    /// Draws a Bernoulli sample from a full collection export.
    ///
    /// Pass a seed for a reproducible draw; otherwise the RNG is seeded
    /// from entropy.
    pub fn from_collection(
        documents: &[Value],
        sample_ratio: f64,
        seed: Option<u64>,
    ) -> EstimateResult<Self> {
        if !(sample_ratio > 0.0 && sample_ratio <= 1.0) {
            return Err(EstimateError::InvalidSampleRatio(sample_ratio));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sample: Vec<Value> = documents
            .iter()
            .filter(|_| rng.gen_bool(sample_ratio))
            .cloned()
            .collect();
        if sample.is_empty() {
            return Err(EstimateError::EmptySample);
        }
        Ok(Self {
            sample,
            total_count: documents.len() as f64,
        })
    }

    /// Number of documents in the sample
    pub fn sample_size(&self) -> usize {
        self.sample.len()
    }

    fn scale(&self) -> f64 {
        self.total_count / self.sample.len() as f64
    }
}

impl CardinalityEstimator for SampleEstimator {
    fn estimate(&self, query: &Query) -> EstimateResult<f64> {
        if query.predicates().is_empty() {
            return Ok(self.total_count);
        }
        let matching = self
            .sample
            .iter()
            .filter(|doc| matcher::matches(doc, query.predicates()))
            .count();
        Ok(matching as f64 * self.scale())
    }

    fn total_count(&self) -> EstimateResult<f64> {
        Ok(self.total_count)
    }
}
