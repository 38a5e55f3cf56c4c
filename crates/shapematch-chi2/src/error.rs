use shapematch_dtw::DtwError;

/// Errors from curve discrepancy and matching.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// Returned when two curves being compared differ in length.
    #[error("curve lengths differ: {expected} vs {got}")]
    LengthMismatch {
        /// Length of the first curve.
        expected: usize,
        /// Length of the second curve.
        got: usize,
    },

    /// Returned when the reference curve is all zeros.
    #[error("reference curve has zero energy; discrepancy is undefined")]
    ZeroDenominator,

    /// Returned when the target collection is smaller than the source.
    #[error("need at least {sources} target curves for {sources} sources, got {targets}")]
    TooFewTargets {
        /// Number of source curves.
        sources: usize,
        /// Number of target curves.
        targets: usize,
    },

    /// Returned when an aligned comparison gets collections of different size.
    #[error("aligned comparison needs equal collection sizes: {a} vs {b}")]
    CountMismatch {
        /// Size of the first collection.
        a: usize,
        /// Size of the second collection.
        b: usize,
    },

    /// Returned when a collection to match is empty.
    #[error("cannot match an empty curve collection")]
    EmptyInput,

    /// Returned when a trailing-weight vector has no room for a sample.
    #[error("trailing-weight layout needs at least 2 values, got {len}")]
    MissingWeight {
        /// Length of the offending vector.
        len: usize,
    },

    /// Returned when a weight is NaN or infinite.
    #[error("weight must be finite, got {weight}")]
    NonFiniteWeight {
        /// The rejected weight.
        weight: f64,
    },

    /// Wraps a curve validation error.
    #[error(transparent)]
    Dtw(#[from] DtwError),
}
