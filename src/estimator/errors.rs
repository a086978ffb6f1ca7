//! Estimator error types
//!
//! Estimation failures are fatal for the scoring pass: there is no
//! meaningful fallback estimate, and substituting zero or an unbounded
//! value would corrupt every downstream benefit computation.

use thiserror::Error;

/// Result type for estimator operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Estimator errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EstimateError {
    #[error("cardinality estimation failed for query {query}: {reason}")]
    EstimationFailed { query: String, reason: String },

    #[error("total collection count unavailable: {0}")]
    TotalCountUnavailable(String),

    #[error("sample is empty; cannot extrapolate estimates")]
    EmptySample,

    #[error("sample ratio must be in (0, 1], got {0}")]
    InvalidSampleRatio(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_query() {
        let err = EstimateError::EstimationFailed {
            query: "{a: {$eq: 1}}".into(),
            reason: "sample gone".into(),
        };
        let display = format!("{}", err);
        assert!(display.contains("{a: {$eq: 1}}"));
        assert!(display.contains("sample gone"));
    }
}
