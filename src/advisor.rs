//! End-to-end recommendation pipeline
//!
//! Ties the phases together: candidate generation over the workload, cost
//! scoring against the estimator, greedy selection over the score matrix.

use crate::candidates::{generate_candidates, IndexKey};
use crate::estimator::{CardinalityEstimator, EstimateResult};
use crate::observability::{log_event, Event, Timer};
use crate::scorer::{CostModel, ScoreMatrix, Scorer};
use crate::selector::select_indexes;
use crate::workload::Workload;

/// Tunable parameters for one advisor run
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Longest candidate key considered
    pub max_index_fields: usize,
    /// Relative cost constants for the benefit model
    pub cost_model: CostModel,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            max_index_fields: 3,
            cost_model: CostModel::default(),
        }
    }
}

/// Everything one advisor run produces
#[derive(Debug, Clone)]
pub struct Recommendation {
    /// Enumerated candidates, in column order
    pub candidates: Vec<IndexKey>,
    /// The scored benefit matrix
    pub scores: ScoreMatrix,
    /// Recommended keys, in greedy-selection order
    pub indexes: Vec<IndexKey>,
    /// Wall-clock duration of the scoring phase
    pub scoring_millis: u128,
    /// Distinct cardinality estimates resolved during scoring
    pub cached_estimates: usize,
}

/// Runs candidate generation, scoring and greedy selection.
///
/// An empty workload yields an empty recommendation; estimator failures
/// abort the run.
pub fn recommend<E>(
    workload: &Workload,
    estimator: &E,
    config: &AdvisorConfig,
) -> EstimateResult<Recommendation>
where
    E: CardinalityEstimator + ?Sized,
{
    let candidates: Vec<IndexKey> = generate_candidates(workload, config.max_index_fields)
        .into_iter()
        .collect();
    log_event(
        Event::CandidatesGenerated,
        &[("count", &candidates.len().to_string())],
    );

    log_event(Event::ScoringStart, &[]);
    let timer = Timer::start();
    let scorer = Scorer::new(estimator, config.cost_model.clone());
    let scores = scorer.score(workload, &candidates)?;
    let scoring_millis = timer.elapsed_millis();
    let cached_estimates = scorer.cached_estimates();
    log_event(
        Event::ScoringComplete,
        &[
            ("duration_ms", &scoring_millis.to_string()),
            ("estimates", &cached_estimates.to_string()),
        ],
    );

    let indexes = select_indexes(&scores);
    log_event(
        Event::SelectionComplete,
        &[("count", &indexes.len().to_string())],
    );

    Ok(Recommendation {
        candidates,
        scores,
        indexes,
        scoring_millis,
        cached_estimates,
    })
}
