//! Score matrix shared by the scorer and the selector

use crate::candidates::IndexKey;

/// Dense benefit table: one row per workload query, one column per
/// candidate index key.
///
/// The base matrix is immutable once scored. The greedy selector keeps its
/// own working copy, so best-existing lookups during selection always see
/// the original scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    candidates: Vec<IndexKey>,
    rows: Vec<Vec<f64>>,
}

impl ScoreMatrix {
    pub(crate) fn new(candidates: Vec<IndexKey>, rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == candidates.len()));
        Self { candidates, rows }
    }

    /// Candidate keys, one per column, in lexicographic order
    pub fn candidates(&self) -> &[IndexKey] {
        &self.candidates
    }

    /// Number of query rows
    pub fn num_queries(&self) -> usize {
        self.rows.len()
    }

    /// Number of candidate columns
    pub fn num_candidates(&self) -> usize {
        self.candidates.len()
    }

    /// Benefit of candidate `col` for query `row`
    pub fn score(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Row-major copy of the scores, the selector's working state
    pub(crate) fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows.clone()
    }

    /// Renders the matrix for verbose reporting: a candidate legend, then
    /// one line per query row
    pub fn format_table(&self) -> String {
        let mut out = String::new();
        out.push_str("score table (rows=queries, columns=index candidates)\n");
        for (i, candidate) in self.candidates.iter().enumerate() {
            out.push_str(&format!("  c{:<3} {}\n", i, candidate));
        }
        for (qi, row) in self.rows.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|s| format!("{:>10.1}", s)).collect();
            out.push_str(&format!("  q{:<3} {}\n", qi, cells.join(" ")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let matrix = ScoreMatrix::new(
            vec![IndexKey::new(["a"]), IndexKey::new(["b"])],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        );
        assert_eq!(matrix.num_queries(), 2);
        assert_eq!(matrix.num_candidates(), 2);
        assert_eq!(matrix.score(1, 0), 3.0);
    }

    #[test]
    fn test_format_table_lists_candidates_and_rows() {
        let matrix = ScoreMatrix::new(vec![IndexKey::new(["a"])], vec![vec![900.0]]);
        let table = matrix.format_table();
        assert!(table.contains("{a: 1}"));
        assert!(table.contains("900.0"));
    }
}
