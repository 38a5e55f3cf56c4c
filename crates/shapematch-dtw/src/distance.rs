//! Elastic distance value returned by DTW and LB_Keogh.

use std::cmp::Ordering;
use std::fmt;

/// Non-negative elastic distance between two curves.
///
/// Distances are the square root of an accumulated squared-difference cost.
/// A run that gave up early because it could not beat a cutoff yields
/// [`DtwDistance::ABANDONED`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DtwDistance(f64);

impl DtwDistance {
    /// Marker for an early-abandoned computation. Compares above every real distance.
    pub const ABANDONED: Self = Self(f64::INFINITY);

    /// Distance from an accumulated squared cost. An infinite cost stays abandoned.
    pub(crate) fn from_squared(cost_sq: f64) -> Self {
        Self(cost_sq.sqrt())
    }

    /// Return the distance as a plain `f64` (`+inf` when abandoned).
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// True when the computation stopped before finishing the cost table.
    #[must_use]
    pub fn is_abandoned(self) -> bool {
        self.0 == f64::INFINITY
    }

    /// Order two distances; abandoned runs sort last.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for DtwDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_abandoned() {
            f.write_str("abandoned")
        } else {
            write!(f, "{:.6}", self.0)
        }
    }
}
