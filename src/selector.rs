//! Greedy diminishing-returns index selection
//!
//! Weighted-coverage heuristic over the score matrix: repeatedly take the
//! candidate with the greatest aggregate unclaimed benefit, then discount
//! what the remaining candidates are worth to each query by the best score
//! it already gets from the chosen set. Approximates, without guaranteeing,
//! the optimal small index set.

use crate::candidates::IndexKey;
use crate::scorer::ScoreMatrix;

/// Selects index keys in order of marginal benefit.
///
/// Terminates when no columns remain or no working entry is positive, so
/// it runs at most `num_candidates` iterations and never picks the same
/// candidate twice. Ties on column sums break to the lexicographically
/// smallest key (candidate columns are sorted).
pub fn select_indexes(scores: &ScoreMatrix) -> Vec<IndexKey> {
    let mut work = scores.to_rows();
    let mut remaining: Vec<usize> = (0..scores.num_candidates()).collect();
    let mut chosen: Vec<usize> = Vec::new();
    let mut recommended = Vec::new();

    for _ in 0..scores.num_candidates() {
        if remaining.is_empty() || !any_positive(&work, &remaining) {
            break;
        }

        let winner = best_column(&work, &remaining);
        remaining.retain(|&col| col != winner);
        chosen.push(winner);
        recommended.push(scores.candidates()[winner].clone());

        discount(scores, &mut work, &chosen, &remaining);
    }

    recommended
}

fn any_positive(work: &[Vec<f64>], remaining: &[usize]) -> bool {
    work.iter()
        .any(|row| remaining.iter().any(|&col| row[col] > 0.0))
}

/// Column with the greatest sum; the first maximum wins, which keeps ties
/// lexicographic
fn best_column(work: &[Vec<f64>], remaining: &[usize]) -> usize {
    let mut winner = remaining[0];
    let mut best_sum = f64::NEG_INFINITY;
    for &col in remaining {
        let sum: f64 = work.iter().map(|row| row[col]).sum();
        if sum > best_sum {
            best_sum = sum;
            winner = col;
        }
    }
    winner
}

/// Rewrites every remaining working score as the marginal value over the
/// best chosen candidate per query, clamped at zero.
///
/// A query no chosen candidate scores non-zero for keeps its working row
/// untouched: nothing selected so far serves it. Marginals are always
/// computed from the immutable base matrix.
fn discount(base: &ScoreMatrix, work: &mut [Vec<f64>], chosen: &[usize], remaining: &[usize]) {
    for (row, work_row) in work.iter_mut().enumerate() {
        let best_existing = chosen
            .iter()
            .map(|&col| base.score(row, col))
            .filter(|&score| score != 0.0)
            .reduce(f64::max);
        let Some(best) = best_existing else { continue };

        for &col in remaining {
            work_row[col] = (base.score(row, col) - best).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(candidates: Vec<IndexKey>, rows: Vec<Vec<f64>>) -> ScoreMatrix {
        ScoreMatrix::new(candidates, rows)
    }

    fn keys(names: &[&[&str]]) -> Vec<IndexKey> {
        names
            .iter()
            .map(|fields| IndexKey::new(fields.iter().copied()))
            .collect()
    }

    #[test]
    fn test_empty_matrix_recommends_nothing() {
        let m = matrix(Vec::new(), Vec::new());
        assert!(select_indexes(&m).is_empty());
    }

    #[test]
    fn test_all_non_positive_recommends_nothing() {
        let m = matrix(keys(&[&["a"], &["b"]]), vec![vec![0.0, -5.0]]);
        assert!(select_indexes(&m).is_empty());
    }

    #[test]
    fn test_single_winner() {
        let m = matrix(keys(&[&["a"], &["b"]]), vec![vec![10.0, 700.0]]);
        assert_eq!(select_indexes(&m), keys(&[&["b"]]));
    }

    #[test]
    fn test_ties_break_lexicographically() {
        // columns are in candidate order (a,b) < (b,a); equal sums pick the first
        let m = matrix(keys(&[&["a", "b"], &["b", "a"]]), vec![vec![900.0, 900.0]]);
        assert_eq!(select_indexes(&m), keys(&[&["a", "b"]]));
    }

    #[test]
    fn test_second_pick_serves_unserved_query() {
        // query 0 is served by (a); query 1 only by (b)
        let m = matrix(
            keys(&[&["a"], &["b"]]),
            vec![vec![500.0, 0.0], vec![0.0, 400.0]],
        );
        assert_eq!(select_indexes(&m), keys(&[&["a"], &["b"]]));
    }

    #[test]
    fn test_dominated_candidate_not_selected() {
        // (a) gives both queries slightly less than (a,b); after choosing
        // (a,b) the marginal value of (a) is zero
        let m = matrix(
            keys(&[&["a"], &["a", "b"]]),
            vec![vec![400.0, 500.0], vec![300.0, 350.0]],
        );
        assert_eq!(select_indexes(&m), keys(&[&["a", "b"]]));
    }

    #[test]
    fn test_no_duplicate_selection_and_bounded_iterations() {
        let m = matrix(
            keys(&[&["a"], &["b"], &["c"]]),
            vec![vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0]],
        );
        let picked = select_indexes(&m);
        assert!(picked.len() <= 3);
        let mut deduped = picked.clone();
        deduped.dedup();
        assert_eq!(picked, deduped);
    }

    #[test]
    fn test_working_scores_stay_non_negative_after_discount() {
        let base = matrix(
            keys(&[&["a"], &["b"], &["c"]]),
            vec![vec![900.0, 100.0, -50.0], vec![0.0, 200.0, 10.0]],
        );
        let mut work = base.to_rows();
        let chosen = vec![0];
        let remaining = vec![1, 2];

        discount(&base, &mut work, &chosen, &remaining);

        for row in &work {
            for &col in &remaining {
                assert!(row[col] >= 0.0);
            }
        }
        // query 1 gets nothing from candidate 0 (score 0): row untouched
        assert_eq!(work[1][1], 200.0);
        assert_eq!(work[1][2], 10.0);
    }

    #[test]
    fn test_negative_best_existing_still_discounts_from_base() {
        // a chosen candidate with a negative non-zero score counts as the
        // best existing when it is the only non-zero one
        let base = matrix(keys(&[&["a"], &["b"]]), vec![vec![-10.0, 5.0]]);
        let mut work = base.to_rows();
        discount(&base, &mut work, &[0], &[1]);
        // 5 - (-10) = 15
        assert_eq!(work[0][1], 15.0);
    }
}
