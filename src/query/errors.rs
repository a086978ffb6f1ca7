//! Query validation error types
//!
//! Validation failures are recoverable: the workload builder drops the
//! offending record with a warning and continues.

use thiserror::Error;

/// Result type for query construction
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while normalizing a filter document into a query
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("filter must be a document, got {0}")]
    FilterNotDocument(&'static str),

    #[error("unsupported operator '{op}' on field '{field}'")]
    UnsupportedOperator { field: String, op: String },

    #[error("field '{field}' mixes operators and literal keys")]
    MixedOperatorDocument { field: String },

    #[error("operator document for field '{field}' is empty")]
    EmptyOperatorDocument { field: String },

    #[error("field name must not be empty")]
    EmptyFieldName,

    #[error("limit must be positive")]
    ZeroLimit,
}
