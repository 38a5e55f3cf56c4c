//! Banded DTW distance computation.

use tracing::instrument;

use crate::constraint::BandConstraint;
use crate::curve::CurveView;
use crate::distance::DtwDistance;

/// Immutable DTW configuration. Thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dtw {
    constraint: BandConstraint,
}

impl Dtw {
    /// Create an unconstrained DTW calculator.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self {
            constraint: BandConstraint::Unconstrained,
        }
    }

    /// Create a DTW calculator with a Sakoe-Chiba window of the given radius.
    ///
    /// The radius is widened per call to the length difference of the two
    /// curves, so curves of different length always remain alignable.
    #[must_use]
    pub fn with_window(radius: usize) -> Self {
        Self {
            constraint: BandConstraint::SakoeChibaRadius(radius),
        }
    }

    /// Create a DTW calculator from an existing [`BandConstraint`].
    #[must_use]
    pub fn from_constraint(constraint: BandConstraint) -> Self {
        Self { constraint }
    }

    /// Return the band constraint configuration.
    #[must_use]
    pub fn constraint(&self) -> BandConstraint {
        self.constraint
    }

    /// Compute the DTW distance between two curves.
    ///
    /// Runs in O(n * r) time for an effective band radius `r`.
    #[must_use]
    #[instrument(level = "trace", skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance(&self, a: CurveView<'_>, b: CurveView<'_>) -> DtwDistance {
        DtwDistance::from_squared(self.cost_table(a.as_slice(), b.as_slice(), None))
    }

    /// Compute DTW distance with early abandoning.
    ///
    /// If the distance would exceed `cutoff`, returns [`DtwDistance::ABANDONED`]
    /// without finishing the table. A finite result always equals
    /// `self.distance(a, b)`.
    #[must_use]
    #[instrument(level = "trace", skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance_with_cutoff(
        &self,
        a: CurveView<'_>,
        b: CurveView<'_>,
        cutoff: f64,
    ) -> DtwDistance {
        let cutoff_sq = cutoff * cutoff;
        DtwDistance::from_squared(self.cost_table(a.as_slice(), b.as_slice(), Some(cutoff_sq)))
    }

    /// Dense cost table DTW. Returns the squared cost of the final cell.
    ///
    /// The table has `(n + 1) * (m + 1)` cells. Cell `(i, j)` for
    /// `i, j >= -1` lives at flat index `(i + 1) * (m + 1) + (j + 1)`, so row
    /// and column `-1` form the boundary. Every cell starts at INF except the
    /// origin `(-1, -1)`, which is 0. Cells outside the band are never written
    /// and keep reading INF.
    ///
    /// When `cutoff_sq` is `Some(c)`, returns INF as soon as the minimum of a
    /// non-final row exceeds `c`: every warping path crosses each row, so the
    /// row minimum bounds the final cost from below.
    fn cost_table(&self, a: &[f64], b: &[f64], cutoff_sq: Option<f64>) -> f64 {
        let n = a.len();
        let m = b.len();
        let radius = self.constraint.effective_radius(n, m);
        let width = m + 1;

        let mut table = vec![f64::INFINITY; (n + 1) * width];
        table[0] = 0.0;

        for (i, &ai) in a.iter().enumerate() {
            let mut row_min = f64::INFINITY;
            let above_row = i * width;
            let this_row = (i + 1) * width;

            for j in BandConstraint::column_range(i, m, radius) {
                let cost = (ai - b[j]).powi(2);
                let up = table[above_row + j + 1];
                let left = table[this_row + j];
                let diag = table[above_row + j];
                let val = cost + up.min(left).min(diag);
                table[this_row + j + 1] = val;
                row_min = row_min.min(val);
            }

            if let Some(c) = cutoff_sq
                && i + 1 < n
                && row_min > c
            {
                return f64::INFINITY;
            }
        }

        let final_sq = table[n * width + m];
        if let Some(c) = cutoff_sq
            && final_sq > c
        {
            return f64::INFINITY;
        }
        final_sq
    }
}
