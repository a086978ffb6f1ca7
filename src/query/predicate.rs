//! Filter predicates extracted from query filter documents
//!
//! Predicates form a closed set: equality plus the four range comparisons.
//! Anything else in a filter document is a validation failure at parse time,
//! never a silent partial match.

use std::fmt;

use serde_json::Value;

use super::errors::{QueryError, QueryResult};

/// Filter operation types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterOp {
    /// Equality: field = value
    Eq(Value),
    /// Greater than: field > value
    Gt(Value),
    /// Greater than or equal: field >= value
    Gte(Value),
    /// Less than: field < value
    Lt(Value),
    /// Less than or equal: field <= value
    Lte(Value),
}

impl FilterOp {
    /// Returns true if this is an equality operation
    pub fn is_equality(&self) -> bool {
        matches!(self, FilterOp::Eq(_))
    }

    /// Returns true if this is a range operation
    pub fn is_range(&self) -> bool {
        !self.is_equality()
    }

    /// Returns the operator name, dollar-prefixed
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "$eq",
            FilterOp::Gt(_) => "$gt",
            FilterOp::Gte(_) => "$gte",
            FilterOp::Lt(_) => "$lt",
            FilterOp::Lte(_) => "$lte",
        }
    }

    /// Returns the comparison value
    pub fn value(&self) -> &Value {
        match self {
            FilterOp::Eq(v)
            | FilterOp::Gt(v)
            | FilterOp::Gte(v)
            | FilterOp::Lt(v)
            | FilterOp::Lte(v) => v,
        }
    }
}

/// A single predicate (field + operation)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    /// Field name
    pub field: String,
    /// Filter operation
    pub op: FilterOp,
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq(value),
        }
    }

    /// Create a range predicate (gt)
    pub fn gt(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gt(value),
        }
    }

    /// Create a range predicate (gte)
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte(value),
        }
    }

    /// Create a range predicate (lt)
    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lt(value),
        }
    }

    /// Create a range predicate (lte)
    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lte(value),
        }
    }

    /// Returns true if this is an equality predicate
    pub fn is_equality(&self) -> bool {
        self.op.is_equality()
    }

    /// Returns true if this is a range predicate
    pub fn is_range(&self) -> bool {
        self.op.is_range()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {{{}: {}}}", self.field, self.op.op_name(), self.op.value())
    }
}

/// Parses a filter document into predicates, one or more per field, in the
/// parsed document's (deterministic) field order.
///
/// A field maps either to a literal (equality) or to an operator document
/// whose keys are all dollar-prefixed. A document value with no operator
/// keys is treated as a literal equality match on the whole document.
pub fn parse_filter(filter: &Value) -> QueryResult<Vec<Predicate>> {
    let doc = filter
        .as_object()
        .ok_or_else(|| QueryError::FilterNotDocument(json_type_name(filter)))?;

    let mut predicates = Vec::new();
    for (field, condition) in doc {
        if field.is_empty() {
            return Err(QueryError::EmptyFieldName);
        }
        match condition {
            Value::Object(ops) if ops.keys().any(|k| k.starts_with('$')) => {
                if !ops.keys().all(|k| k.starts_with('$')) {
                    return Err(QueryError::MixedOperatorDocument {
                        field: field.clone(),
                    });
                }
                for (op, value) in ops {
                    predicates.push(parse_operator(field, op, value)?);
                }
            }
            Value::Object(ops) if ops.is_empty() => {
                return Err(QueryError::EmptyOperatorDocument {
                    field: field.clone(),
                });
            }
            literal => predicates.push(Predicate::eq(field.clone(), literal.clone())),
        }
    }
    Ok(predicates)
}

fn parse_operator(field: &str, op: &str, value: &Value) -> QueryResult<Predicate> {
    let pred = match op {
        "$eq" => Predicate::eq(field, value.clone()),
        "$gt" => Predicate::gt(field, value.clone()),
        "$gte" => Predicate::gte(field, value.clone()),
        "$lt" => Predicate::lt(field, value.clone()),
        "$lte" => Predicate::lte(field, value.clone()),
        other => {
            return Err(QueryError::UnsupportedOperator {
                field: field.to_string(),
                op: other.to_string(),
            })
        }
    };
    Ok(pred)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "document",
    }
}
