//! Warping window configuration.

use std::ops::Range;

/// Constraint on how far the DTW alignment may drift from the diagonal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BandConstraint {
    /// No constraint: every cell of the cost table is reachable.
    #[default]
    Unconstrained,

    /// Sakoe-Chiba band: cell (i,j) is valid only if |i - j| <= radius.
    SakoeChibaRadius(usize),
}

impl BandConstraint {
    /// Return the radius actually used for curves of length `n` and `m`.
    ///
    /// The configured radius is widened to `|n - m|` so the final cell
    /// `(n-1, m-1)` always lies inside the band.
    #[must_use]
    pub fn effective_radius(&self, n: usize, m: usize) -> usize {
        match self {
            Self::Unconstrained => n.max(m),
            Self::SakoeChibaRadius(r) => (*r).max(n.abs_diff(m)),
        }
    }

    /// Return the valid column range for `row` given an already widened `radius`.
    ///
    /// This is the intersection of `[row - radius, row + radius]` with `[0, n_cols)`.
    #[must_use]
    pub fn column_range(row: usize, n_cols: usize, radius: usize) -> Range<usize> {
        let start = row.saturating_sub(radius);
        let end = (row + radius + 1).min(n_cols);
        start..end
    }
}
