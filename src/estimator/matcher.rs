//! Predicate matching against sampled documents
//!
//! Matching is strict: AND across predicates, missing fields and null
//! values never match, no type coercion. Range comparison is defined for
//! numbers and strings only.

use std::cmp::Ordering;

use serde_json::Value;

use crate::query::{FilterOp, Predicate};

/// True when `document` satisfies every predicate
pub(crate) fn matches(document: &Value, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|p| matches_predicate(document, p))
}

fn matches_predicate(document: &Value, predicate: &Predicate) -> bool {
    let actual = match document.get(&predicate.field) {
        Some(v) if !v.is_null() => v,
        _ => return false,
    };
    match &predicate.op {
        FilterOp::Eq(expected) => actual == expected,
        FilterOp::Gt(bound) => compare(actual, bound) == Some(Ordering::Greater),
        FilterOp::Gte(bound) => matches!(
            compare(actual, bound),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        FilterOp::Lt(bound) => compare(actual, bound) == Some(Ordering::Less),
        FilterOp::Lte(bound) => {
            matches!(compare(actual, bound), Some(Ordering::Less | Ordering::Equal))
        }
    }
}

/// Orders two values of the same scalar type; `None` when incomparable
fn compare(actual: &Value, bound: &Value) -> Option<Ordering> {
    match (actual, bound) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Predicate;
    use serde_json::json;

    #[test]
    fn test_equality_no_coercion() {
        let doc = json!({"value": 123});
        assert!(matches(&doc, &[Predicate::eq("value", json!(123))]));
        // string "123" must not match integer 123
        assert!(!matches(&doc, &[Predicate::eq("value", json!("123"))]));
    }

    #[test]
    fn test_range_numbers_and_strings() {
        let doc = json!({"age": 25, "name": "bob"});
        assert!(matches(&doc, &[Predicate::gte("age", json!(25))]));
        assert!(matches(&doc, &[Predicate::lt("age", json!(30))]));
        assert!(!matches(&doc, &[Predicate::gt("age", json!(25))]));
        assert!(matches(&doc, &[Predicate::gt("name", json!("alice"))]));
    }

    #[test]
    fn test_and_semantics() {
        let doc = json!({"a": 1, "b": 2});
        assert!(matches(
            &doc,
            &[Predicate::eq("a", json!(1)), Predicate::gte("b", json!(2))]
        ));
        assert!(!matches(
            &doc,
            &[Predicate::eq("a", json!(1)), Predicate::gt("b", json!(2))]
        ));
    }

    #[test]
    fn test_missing_and_null_never_match() {
        let doc = json!({"a": null});
        assert!(!matches(&doc, &[Predicate::eq("a", json!(null))]));
        assert!(!matches(&doc, &[Predicate::eq("b", json!(1))]));
    }

    #[test]
    fn test_cross_type_range_never_matches() {
        let doc = json!({"a": "high"});
        assert!(!matches(&doc, &[Predicate::gt("a", json!(5))]));
    }

    #[test]
    fn test_empty_predicates_match_everything() {
        assert!(matches(&json!({"x": 1}), &[]));
    }
}
