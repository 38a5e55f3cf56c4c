//! Result types for curve matching.

/// One committed pairing of a source curve with a target curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPair {
    /// Index into the source collection.
    pub index_a: usize,
    /// Index into the target collection.
    pub index_b: usize,
    /// Discrepancy of the pair.
    pub discrepancy: f64,
}

/// Outcome of a greedy matching run.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// One pair per source curve, in source order.
    pub pairs: Vec<MatchPair>,
    /// Sum of the matched discrepancies.
    pub cumulative: f64,
    /// Largest matched discrepancy.
    pub max: f64,
}

impl MatchResult {
    pub(crate) fn from_pairs(pairs: Vec<MatchPair>) -> Self {
        let cumulative = pairs.iter().map(|p| p.discrepancy).sum();
        let max = pairs
            .iter()
            .map(|p| p.discrepancy)
            .fold(0.0_f64, f64::max);
        Self {
            pairs,
            cumulative,
            max,
        }
    }
}

/// Index-by-index comparison of two pre-aligned collections.
#[derive(Debug, Clone)]
pub struct AlignedReport {
    /// `scores[i]` is the discrepancy of `a[i]` against `b[i]`.
    pub scores: Vec<f64>,
    /// Sum of all scores.
    pub cumulative: f64,
    /// Largest score.
    pub max: f64,
}

/// Single closest target for one curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    /// Index into the target collection.
    pub index: usize,
    /// Discrepancy against that target.
    pub discrepancy: f64,
}
