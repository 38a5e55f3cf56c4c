//! Elastic distance for 1-D intensity curves.
//!
//! Pure math library with zero I/O. Provides banded Dynamic Time Warping,
//! early-abandoning DTW, and the LB_Keogh lower bound used to skip full DTW
//! evaluations during nearest-centroid search.

mod constraint;
mod curve;
mod distance;
mod dtw;
mod envelope;
mod error;

pub use constraint::BandConstraint;
pub use curve::{Curve, CurveView, Peak};
pub use distance::DtwDistance;
pub use dtw::Dtw;
pub use envelope::{SeriesEnvelope, lb_keogh, lower_bound};
pub use error::DtwError;
