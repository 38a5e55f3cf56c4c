//! Configuration and entry points for curve matching.

use tracing::{debug, info, instrument};

use crate::discrepancy::{discrepancy, discrepancy_matrix};
use crate::error::MatchError;
use crate::greedy::assign_greedy;
use crate::result::{AlignedReport, BestMatch, MatchResult};
use crate::weighted::WeightedCurve;

/// Configuration for chi-square matching.
///
/// Weighting is off by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchConfig {
    use_weights: bool,
}

impl MatchConfig {
    /// Create a configuration with weighting disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scale each curve by its weight before comparing.
    #[must_use]
    pub fn with_use_weights(mut self, use_weights: bool) -> Self {
        self.use_weights = use_weights;
        self
    }

    /// Return whether weights are applied.
    #[must_use]
    pub fn use_weights(&self) -> bool {
        self.use_weights
    }

    /// Discrepancy of `a` against `b`. See [`discrepancy`](crate::discrepancy()).
    ///
    /// # Errors
    ///
    /// As [`discrepancy`](crate::discrepancy()).
    pub fn discrepancy(&self, a: &WeightedCurve, b: &WeightedCurve) -> Result<f64, MatchError> {
        discrepancy(a, b, self.use_weights)
    }

    /// Full discrepancy matrix of `a` against `b`.
    ///
    /// # Errors
    ///
    /// As [`discrepancy`](crate::discrepancy()).
    pub fn matrix(
        &self,
        a: &[WeightedCurve],
        b: &[WeightedCurve],
    ) -> Result<Vec<Vec<f64>>, MatchError> {
        discrepancy_matrix(a, b, self.use_weights)
    }

    /// Pair every curve of `a` with a distinct curve of `b`.
    ///
    /// Sources are visited in order; each takes its lowest-discrepancy target
    /// not already taken.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MatchError::EmptyInput`] | `a` or `b` is empty |
    /// | [`MatchError::TooFewTargets`] | `b.len() < a.len()` |
    /// | [`MatchError::LengthMismatch`] | curves differ in length |
    /// | [`MatchError::ZeroDenominator`] | a target curve is all zeros |
    #[instrument(skip_all, fields(sources = a.len(), targets = b.len(), use_weights = self.use_weights))]
    pub fn greedy(&self, a: &[WeightedCurve], b: &[WeightedCurve]) -> Result<MatchResult, MatchError> {
        if a.is_empty() || b.is_empty() {
            return Err(MatchError::EmptyInput);
        }
        if b.len() < a.len() {
            return Err(MatchError::TooFewTargets {
                sources: a.len(),
                targets: b.len(),
            });
        }

        let matrix = self.matrix(a, b)?;
        let result = MatchResult::from_pairs(assign_greedy(&matrix));
        for pair in &result.pairs {
            debug!(
                index_a = pair.index_a,
                index_b = pair.index_b,
                discrepancy = pair.discrepancy,
                "pair committed"
            );
        }
        info!(
            cumulative = result.cumulative,
            max = result.max,
            "greedy matching complete"
        );
        Ok(result)
    }

    /// Score `a[i]` against `b[i]` for two collections already in one-to-one
    /// correspondence.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MatchError::EmptyInput`] | the collections are empty |
    /// | [`MatchError::CountMismatch`] | `a.len() != b.len()` |
    /// | [`MatchError::LengthMismatch`] | curves differ in length |
    /// | [`MatchError::ZeroDenominator`] | a curve of `b` is all zeros |
    #[instrument(skip_all, fields(n = a.len(), use_weights = self.use_weights))]
    pub fn aligned(&self, a: &[WeightedCurve], b: &[WeightedCurve]) -> Result<AlignedReport, MatchError> {
        if a.len() != b.len() {
            return Err(MatchError::CountMismatch {
                a: a.len(),
                b: b.len(),
            });
        }
        if a.is_empty() {
            return Err(MatchError::EmptyInput);
        }

        let scores = a
            .iter()
            .zip(b)
            .map(|(ai, bi)| self.discrepancy(ai, bi))
            .collect::<Result<Vec<_>, _>>()?;
        let cumulative = scores.iter().sum();
        let max = scores.iter().copied().fold(0.0_f64, f64::max);
        info!(cumulative, max, "aligned comparison complete");

        Ok(AlignedReport {
            scores,
            cumulative,
            max,
        })
    }

    /// Index of the target in `b` closest to `curve`. The first minimum wins.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MatchError::EmptyInput`] | `b` is empty |
    /// | [`MatchError::LengthMismatch`] | curves differ in length |
    /// | [`MatchError::ZeroDenominator`] | a target curve is all zeros |
    pub fn best_match(&self, curve: &WeightedCurve, b: &[WeightedCurve]) -> Result<BestMatch, MatchError> {
        let mut best: Option<BestMatch> = None;
        for (index, target) in b.iter().enumerate() {
            let d = self.discrepancy(curve, target)?;
            if best.is_none_or(|bm| d < bm.discrepancy) {
                best = Some(BestMatch {
                    index,
                    discrepancy: d,
                });
            }
        }
        best.ok_or(MatchError::EmptyInput)
    }
}

#[cfg(test)]
mod tests {
    use shapematch_dtw::Curve;

    use super::MatchConfig;
    use crate::error::MatchError;
    use crate::weighted::WeightedCurve;

    fn plain(values: &[f64]) -> WeightedCurve {
        WeightedCurve::from(Curve::new(values.to_vec()).unwrap())
    }

    fn targets() -> Vec<WeightedCurve> {
        vec![
            plain(&[0.0, 0.0, 1.0]),
            plain(&[0.0, 1.0, 0.0]),
            plain(&[1.0, 0.0, 0.0]),
        ]
    }

    #[test]
    fn greedy_finds_exact_permutation() {
        let sources = vec![
            plain(&[1.0, 0.0, 0.0]),
            plain(&[0.0, 0.0, 1.0]),
            plain(&[0.0, 1.0, 0.0]),
        ];
        let result = MatchConfig::new().greedy(&sources, &targets()).unwrap();
        let b: Vec<usize> = result.pairs.iter().map(|p| p.index_b).collect();
        assert_eq!(b, vec![2, 0, 1]);
        assert_eq!(result.cumulative, 0.0);
        assert_eq!(result.max, 0.0);
    }

    #[test]
    fn greedy_reports_cumulative_and_max() {
        let sources = vec![plain(&[0.0, 1.0, 0.0]), plain(&[0.0, 1.0, 0.0])];
        let result = MatchConfig::new().greedy(&sources, &targets()).unwrap();
        // First source takes its exact match, second falls back to a 2.0 score.
        assert_eq!(result.pairs[0].index_b, 1);
        assert_eq!(result.pairs[1].index_b, 0);
        assert_eq!(result.cumulative, 2.0);
        assert_eq!(result.max, 2.0);
    }

    #[test]
    fn greedy_rejects_too_few_targets() {
        let sources = vec![plain(&[1.0]), plain(&[2.0])];
        let err = MatchConfig::new().greedy(&sources, &[plain(&[1.0])]);
        assert!(matches!(
            err,
            Err(MatchError::TooFewTargets { sources: 2, targets: 1 })
        ));
    }

    #[test]
    fn greedy_rejects_empty_input() {
        assert!(matches!(
            MatchConfig::new().greedy(&[], &targets()),
            Err(MatchError::EmptyInput)
        ));
    }

    #[test]
    fn weighting_changes_the_match() {
        let a = vec![WeightedCurve::new(Curve::new(vec![2.0, 2.0]).unwrap(), 0.5).unwrap()];
        let b = vec![plain(&[2.0, 2.0]), plain(&[1.0, 1.0])];

        let unweighted = MatchConfig::new().greedy(&a, &b).unwrap();
        assert_eq!(unweighted.pairs[0].index_b, 0);

        let weighted = MatchConfig::new().with_use_weights(true).greedy(&a, &b).unwrap();
        assert_eq!(weighted.pairs[0].index_b, 1);
    }

    #[test]
    fn aligned_scores_by_index() {
        let a = vec![plain(&[0.0, 1.0, 0.0]), plain(&[1.0, 0.0, 0.0])];
        let b = vec![plain(&[0.0, 0.0, 1.0]), plain(&[1.0, 0.0, 0.0])];
        let report = MatchConfig::new().aligned(&a, &b).unwrap();
        assert_eq!(report.scores, vec![2.0, 0.0]);
        assert_eq!(report.cumulative, 2.0);
        assert_eq!(report.max, 2.0);
    }

    #[test]
    fn aligned_rejects_count_mismatch() {
        let err = MatchConfig::new().aligned(&[plain(&[1.0])], &targets());
        assert!(matches!(err, Err(MatchError::CountMismatch { a: 1, b: 3 })));
    }

    #[test]
    fn best_match_first_minimum_wins() {
        let b = vec![plain(&[1.0, 1.0]), plain(&[0.0, 1.0]), plain(&[0.0, 1.0])];
        let best = MatchConfig::new().best_match(&plain(&[0.0, 1.0]), &b).unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(best.discrepancy, 0.0);
    }

    #[test]
    fn best_match_on_empty_targets() {
        assert!(matches!(
            MatchConfig::new().best_match(&plain(&[1.0]), &[]),
            Err(MatchError::EmptyInput)
        ));
    }
}
