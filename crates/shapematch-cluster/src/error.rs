use shapematch_dtw::DtwError;

/// Errors from curve clustering.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    /// Returned when k is zero.
    #[error("k must be at least 1, got {k}")]
    InvalidK {
        /// The invalid k value provided.
        k: usize,
    },

    /// Returned when fewer curves are provided than the requested k.
    #[error("need at least {k} curves to form {k} clusters, got {n_curves}")]
    TooFewCurves {
        /// Number of curves provided.
        n_curves: usize,
        /// Requested number of clusters.
        k: usize,
    },

    /// Returned when zero refinement iterations are requested.
    #[error("at least one refinement iteration is required")]
    ZeroIterations,

    /// Returned when the curve collection is empty.
    #[error("cannot cluster an empty curve collection")]
    EmptyInput,

    /// Returned when a curve differs in length from the first curve.
    #[error("curve {index} has {got} samples, expected {expected}")]
    LengthMismatch {
        /// Position of the offending curve.
        index: usize,
        /// Length of the first curve.
        expected: usize,
        /// Length of the offending curve.
        got: usize,
    },

    /// Wraps a curve validation error raised while rebuilding a centroid.
    #[error("centroid update failed: {0}")]
    Dtw(#[from] DtwError),
}
