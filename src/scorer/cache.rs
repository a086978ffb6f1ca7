//! Memoized cardinality lookups with single-flight semantics
//!
//! Estimation scans the sample, so one scoring pass must issue at most one
//! estimator call per distinct sub-query. The cache is shared and
//! thread-safe: concurrent requests for the same query collapse into one
//! call, with late arrivals blocking until the leader publishes.

use std::collections::HashMap;
use std::sync::{Condvar, Mutex, PoisonError};

use crate::estimator::{CardinalityEstimator, EstimateResult};
use crate::query::Query;

enum Slot {
    InFlight,
    Ready(f64),
}

/// Estimate cache keyed by query value equality
pub struct EstimateCache {
    slots: Mutex<HashMap<Query, Slot>>,
    published: Condvar,
}

impl EstimateCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            published: Condvar::new(),
        }
    }

    /// Returns the memoized estimate for `query`, calling the estimator at
    /// most once per distinct query even under concurrent callers.
    ///
    /// If the leading call fails, its error is returned and the slot is
    /// released; the scoring pass aborts on the first such error.
    pub fn estimate<E>(&self, estimator: &E, query: &Query) -> EstimateResult<f64>
    where
        E: CardinalityEstimator + ?Sized,
    {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            let in_flight = match slots.get(query) {
                Some(Slot::Ready(value)) => return Ok(*value),
                Some(Slot::InFlight) => true,
                None => false,
            };
            if !in_flight {
                break;
            }
            slots = self
                .published
                .wait(slots)
                .unwrap_or_else(PoisonError::into_inner);
        }
        slots.insert(query.clone(), Slot::InFlight);
        drop(slots);

        // leader path: the estimator runs outside the lock
        let result = estimator.estimate(query);

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        match &result {
            Ok(value) => {
                slots.insert(query.clone(), Slot::Ready(*value));
            }
            Err(_) => {
                slots.remove(query);
            }
        }
        drop(slots);
        self.published.notify_all();

        result
    }

    /// Number of distinct queries with a published estimate
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    /// True when nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EstimateCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::EstimateError;
    use crate::query::Predicate;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingEstimator {
        calls: AtomicUsize,
        delay: Duration,
    }

    impl CountingEstimator {
        fn new(delay: Duration) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay,
            }
        }
    }

    impl CardinalityEstimator for CountingEstimator {
        fn estimate(&self, query: &Query) -> EstimateResult<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(self.delay);
            Ok(query.predicates().len() as f64)
        }

        fn total_count(&self) -> EstimateResult<f64> {
            Ok(0.0)
        }
    }

    fn query(field: &str) -> Query {
        Query::from_predicates(vec![Predicate::eq(field, json!(1))])
    }

    #[test]
    fn test_memoizes_repeated_lookups() {
        let estimator = CountingEstimator::new(Duration::ZERO);
        let cache = EstimateCache::new();

        let q = query("a");
        assert_eq!(cache.estimate(&estimator, &q).unwrap(), 1.0);
        assert_eq!(cache.estimate(&estimator, &q).unwrap(), 1.0);
        assert_eq!(estimator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_queries_get_distinct_slots() {
        let estimator = CountingEstimator::new(Duration::ZERO);
        let cache = EstimateCache::new();

        cache.estimate(&estimator, &query("a")).unwrap();
        cache.estimate(&estimator, &query("b")).unwrap();
        assert_eq!(estimator.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_concurrent_requests_collapse_into_one_call() {
        let estimator = CountingEstimator::new(Duration::from_millis(50));
        let cache = EstimateCache::new();
        let q = query("a");

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    assert_eq!(cache.estimate(&estimator, &q).unwrap(), 1.0);
                });
            }
        });

        assert_eq!(estimator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_flight_releases_slot() {
        struct FailingEstimator;
        impl CardinalityEstimator for FailingEstimator {
            fn estimate(&self, _: &Query) -> EstimateResult<f64> {
                Err(EstimateError::EmptySample)
            }
            fn total_count(&self) -> EstimateResult<f64> {
                Err(EstimateError::EmptySample)
            }
        }

        let cache = EstimateCache::new();
        let q = query("a");
        assert!(cache.estimate(&FailingEstimator, &q).is_err());
        assert!(cache.is_empty());
    }
}
