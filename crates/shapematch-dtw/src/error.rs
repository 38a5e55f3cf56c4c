//! Error types for curve validation and distance computation.

/// Errors from curve validation and DTW / lower-bound computation.
#[derive(Debug, thiserror::Error)]
pub enum DtwError {
    /// Returned when an empty slice is provided as a curve.
    #[error("curve must be non-empty")]
    EmptySeries,

    /// Returned when a curve contains NaN, infinity, or negative infinity.
    #[error("curve contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },

    /// Returned when the lower bound is requested for curves of different length.
    #[error("lower bound needs equal-length curves, got query {query} and reference {reference}")]
    LengthMismatch {
        /// Length of the query curve.
        query: usize,
        /// Length of the reference curve.
        reference: usize,
    },
}
