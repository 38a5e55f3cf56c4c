//! Index-aligned chi-square discrepancy.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::error::MatchError;
use crate::weighted::WeightedCurve;

/// Chi-square discrepancy of `a` against reference `b`.
///
/// Computes `Σ (w_b·b_i − w_a·a_i)² / Σ b_i²`. The weights are the curves'
/// own weights when `use_weights` is set and 1 otherwise. The measure is not
/// symmetric: `b` supplies the normalization.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`MatchError::LengthMismatch`] | `a` and `b` differ in length |
/// | [`MatchError::ZeroDenominator`] | every sample of `b` is zero |
pub fn discrepancy(
    a: &WeightedCurve,
    b: &WeightedCurve,
    use_weights: bool,
) -> Result<f64, MatchError> {
    if a.len() != b.len() {
        return Err(MatchError::LengthMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    let (wa, wb) = if use_weights {
        (a.weight(), b.weight())
    } else {
        (1.0, 1.0)
    };

    let mut numerator = 0.0_f64;
    let mut denominator = 0.0_f64;
    for (&ai, &bi) in a.curve().as_ref().iter().zip(b.curve().as_ref()) {
        let diff = wb * bi - wa * ai;
        numerator += diff * diff;
        denominator += bi * bi;
    }

    if denominator == 0.0 {
        return Err(MatchError::ZeroDenominator);
    }
    Ok(numerator / denominator)
}

/// Discrepancy of every curve in `a` against every curve in `b`.
///
/// Row `i` holds `discrepancy(a[i], b[j])` for all `j`. Rows are built in
/// parallel.
///
/// # Errors
///
/// Propagates the first error of [`discrepancy`] in row-major order.
#[instrument(skip_all, fields(rows = a.len(), cols = b.len(), use_weights = use_weights))]
pub fn discrepancy_matrix(
    a: &[WeightedCurve],
    b: &[WeightedCurve],
    use_weights: bool,
) -> Result<Vec<Vec<f64>>, MatchError> {
    let matrix = a
        .par_iter()
        .map(|ai| {
            b.iter()
                .map(|bj| discrepancy(ai, bj, use_weights))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("discrepancy matrix built");
    Ok(matrix)
}
