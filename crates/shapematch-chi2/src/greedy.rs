//! Greedy one-to-one assignment over a discrepancy matrix.

use rayon::prelude::*;

use crate::result::MatchPair;

/// Column indices of `row` by ascending value; ties keep the lower index.
fn sorted_columns(row: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..row.len()).collect();
    order.sort_by(|&x, &y| row[x].total_cmp(&row[y]));
    order
}

/// Walk rows in order, committing each to its cheapest column not yet taken.
///
/// There is no backtracking: a committed column stays forbidden for every
/// later row. Rows beyond the column count are left unmatched.
pub(crate) fn assign_greedy(matrix: &[Vec<f64>]) -> Vec<MatchPair> {
    let n_cols = matrix.first().map_or(0, Vec::len);
    let orders: Vec<Vec<usize>> = matrix.par_iter().map(|row| sorted_columns(row)).collect();

    let mut forbidden = vec![false; n_cols];
    let mut pairs = Vec::with_capacity(matrix.len());

    for (index_a, (row, order)) in matrix.iter().zip(&orders).enumerate() {
        let Some(&index_b) = order.iter().find(|&&j| !forbidden[j]) else {
            break;
        };
        forbidden[index_b] = true;
        pairs.push(MatchPair {
            index_a,
            index_b,
            discrepancy: row[index_b],
        });
    }
    pairs
}
