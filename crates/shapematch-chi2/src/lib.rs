//! Chi-square style discrepancy between curves and one-to-one matching of two
//! curve collections.
//!
//! The discrepancy of `a` against `b` is `Σ (w_b·b_i − w_a·a_i)² / Σ b_i²`,
//! index-aligned with no warping. [`MatchConfig::greedy`] pairs every curve of
//! the first collection with a distinct curve of the second.

mod config;
mod discrepancy;
mod error;
mod greedy;
mod result;
mod weighted;

pub use config::MatchConfig;
pub use discrepancy::{discrepancy, discrepancy_matrix};
pub use error::MatchError;
pub use result::{AlignedReport, BestMatch, MatchPair, MatchResult};
pub use weighted::WeightedCurve;
