//! Configuration builder for curve clustering.

use shapematch_dtw::{BandConstraint, Curve};

use crate::error::ClusterError;
use crate::result::ClusterResult;

/// Configuration for DTW k-means clustering.
///
/// Construct via [`ClusterConfig::new`], then chain `with_*` methods to override defaults.
///
/// # Defaults
///
/// | Parameter         | Default |
/// |-------------------|---------|
/// | `iterations`      | 10      |
/// | `seed`            | 42      |
/// | `envelope_radius` | 5       |
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    pub(crate) k: usize,
    pub(crate) constraint: BandConstraint,
    pub(crate) iterations: usize,
    pub(crate) seed: u64,
    pub(crate) envelope_radius: usize,
}

impl ClusterConfig {
    /// Create a new configuration with the given cluster count and DTW window.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClusterError::InvalidK`] | `k` is zero |
    pub fn new(k: usize, constraint: BandConstraint) -> Result<Self, ClusterError> {
        if k == 0 {
            return Err(ClusterError::InvalidK { k });
        }
        Ok(Self {
            k,
            constraint,
            iterations: 10,
            seed: 42,
            envelope_radius: 5,
        })
    }

    /// Set the fixed number of assign/update passes. There is no early exit.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the seed for initial centroid sampling.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the LB_Keogh envelope radius used to prune the assignment step.
    ///
    /// The radius actually used is never smaller than the DTW window, which
    /// keeps the bound below the true distance.
    #[must_use]
    pub fn with_envelope_radius(mut self, envelope_radius: usize) -> Self {
        self.envelope_radius = envelope_radius;
        self
    }

    /// Return the number of clusters.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Return the DTW band constraint.
    #[must_use]
    pub fn constraint(&self) -> BandConstraint {
        self.constraint
    }

    /// Return the number of refinement iterations.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Return the sampling seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Return the configured LB_Keogh envelope radius.
    #[must_use]
    pub fn envelope_radius(&self) -> usize {
        self.envelope_radius
    }

    /// Envelope radius for curves of length `len`, widened to cover the DTW band.
    pub(crate) fn pruning_radius(&self, len: usize) -> usize {
        match self.constraint {
            BandConstraint::Unconstrained => len,
            BandConstraint::SakoeChibaRadius(r) => self.envelope_radius.max(r),
        }
    }

    /// Cluster `curves` using this configuration.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClusterError::EmptyInput`] | `curves` is empty |
    /// | [`ClusterError::TooFewCurves`] | `curves.len() < k` |
    /// | [`ClusterError::ZeroIterations`] | `iterations` is zero |
    /// | [`ClusterError::LengthMismatch`] | Curves differ in length |
    /// | [`ClusterError::Dtw`] | A centroid mean is not finite |
    pub fn fit(&self, curves: &[Curve]) -> Result<ClusterResult, ClusterError> {
        if curves.is_empty() {
            return Err(ClusterError::EmptyInput);
        }
        if curves.len() < self.k {
            return Err(ClusterError::TooFewCurves {
                n_curves: curves.len(),
                k: self.k,
            });
        }
        if self.iterations == 0 {
            return Err(ClusterError::ZeroIterations);
        }
        let expected = curves[0].len();
        if let Some((index, c)) = curves.iter().enumerate().find(|(_, c)| c.len() != expected) {
            return Err(ClusterError::LengthMismatch {
                index,
                expected,
                got: c.len(),
            });
        }
        crate::kmeans::run(curves, self)
    }
}

#[cfg(test)]
mod tests {
    use shapematch_dtw::{BandConstraint, Curve};

    use super::ClusterConfig;
    use crate::error::ClusterError;

    fn curves() -> Vec<Curve> {
        vec![
            Curve::new(vec![0.0, 1.0, 0.0]).unwrap(),
            Curve::new(vec![1.0, 0.0, 0.0]).unwrap(),
        ]
    }

    #[test]
    fn rejects_zero_k() {
        let result = ClusterConfig::new(0, BandConstraint::SakoeChibaRadius(2));
        assert!(matches!(result, Err(ClusterError::InvalidK { k: 0 })));
    }

    #[test]
    fn defaults() {
        let cfg = ClusterConfig::new(3, BandConstraint::SakoeChibaRadius(4)).unwrap();
        assert_eq!(cfg.k(), 3);
        assert_eq!(cfg.iterations(), 10);
        assert_eq!(cfg.seed(), 42);
        assert_eq!(cfg.envelope_radius(), 5);
        assert_eq!(cfg.constraint(), BandConstraint::SakoeChibaRadius(4));
    }

    #[test]
    fn pruning_radius_covers_window() {
        let narrow = ClusterConfig::new(1, BandConstraint::SakoeChibaRadius(2)).unwrap();
        assert_eq!(narrow.pruning_radius(100), 5);
        let wide = ClusterConfig::new(1, BandConstraint::SakoeChibaRadius(12)).unwrap();
        assert_eq!(wide.pruning_radius(100), 12);
        let free = ClusterConfig::new(1, BandConstraint::Unconstrained).unwrap();
        assert_eq!(free.pruning_radius(100), 100);
    }

    #[test]
    fn fit_rejects_k_above_n() {
        let cfg = ClusterConfig::new(3, BandConstraint::SakoeChibaRadius(1)).unwrap();
        assert!(matches!(
            cfg.fit(&curves()),
            Err(ClusterError::TooFewCurves { n_curves: 2, k: 3 })
        ));
    }

    #[test]
    fn fit_rejects_empty_input() {
        let cfg = ClusterConfig::new(1, BandConstraint::SakoeChibaRadius(1)).unwrap();
        assert!(matches!(cfg.fit(&[]), Err(ClusterError::EmptyInput)));
    }

    #[test]
    fn fit_rejects_zero_iterations() {
        let cfg = ClusterConfig::new(1, BandConstraint::SakoeChibaRadius(1))
            .unwrap()
            .with_iterations(0);
        assert!(matches!(cfg.fit(&curves()), Err(ClusterError::ZeroIterations)));
    }

    #[test]
    fn fit_rejects_ragged_curves() {
        let mut input = curves();
        input.push(Curve::new(vec![1.0, 2.0]).unwrap());
        let cfg = ClusterConfig::new(1, BandConstraint::SakoeChibaRadius(1)).unwrap();
        assert!(matches!(
            cfg.fit(&input),
            Err(ClusterError::LengthMismatch { index: 2, expected: 3, got: 2 })
        ));
    }
}
