//! Candidate index key generation
//!
//! Key order changes both prefix matching and sort support, so candidates
//! are ordered permutations of each query's predicate fields, not
//! combinations. Length is bounded to keep enumeration tractable for wide
//! queries.

use std::collections::BTreeSet;
use std::fmt;

use crate::workload::Workload;

/// An ordered candidate index key pattern; every field ascending.
///
/// `(a, b)` and `(b, a)` are distinct candidates. The derived ordering is
/// lexicographic on field names and gives the candidate set a stable
/// iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexKey {
    fields: Vec<String>,
}

impl IndexKey {
    /// Creates a key from an ordered, non-empty field sequence
    pub fn new(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        debug_assert!(!fields.is_empty(), "index key must have at least one field");
        Self { fields }
    }

    /// Key fields in index order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of key fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True for a zero-field key (never produced by generation)
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when `field` appears anywhere in the key
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

impl fmt::Display for IndexKey {
    /// Renders in key-pattern form: `{a: 1, b: 1}`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: 1", field)?;
        }
        write!(f, "}}")
    }
}

/// Enumerates every candidate key for the workload: for each query, all
/// ordered permutations of its predicate fields up to `max_fields` long,
/// deduplicated across queries.
pub fn generate_candidates(workload: &Workload, max_fields: usize) -> BTreeSet<IndexKey> {
    let mut candidates = BTreeSet::new();
    for query in workload.iter() {
        let fields: Vec<&str> = query.fields().into_iter().collect();
        let longest = fields.len().min(max_fields);
        let mut prefix = Vec::with_capacity(longest);
        for len in 1..=longest {
            permute_into(&fields, len, &mut prefix, &mut candidates);
        }
    }
    candidates
}

fn permute_into<'a>(
    fields: &[&'a str],
    len: usize,
    prefix: &mut Vec<&'a str>,
    out: &mut BTreeSet<IndexKey>,
) {
    if prefix.len() == len {
        out.insert(IndexKey::new(prefix.iter().copied()));
        return;
    }
    for field in fields {
        if prefix.contains(field) {
            continue;
        }
        prefix.push(field);
        permute_into(fields, len, prefix, out);
        prefix.pop();
    }
}
