//! Result types for curve clustering.

use shapematch_dtw::Curve;

use crate::label::ClusterLabel;

/// Element-wise minimum and maximum across the members of one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterEnvelope {
    /// Element-wise minimum of the member curves.
    pub lower: Vec<f64>,
    /// Element-wise maximum of the member curves.
    pub upper: Vec<f64>,
}

impl ClusterEnvelope {
    /// Degenerate envelope of a single curve, used before a cluster gets members.
    pub(crate) fn of_curve(curve: &Curve) -> Self {
        Self {
            lower: curve.as_ref().to_vec(),
            upper: curve.as_ref().to_vec(),
        }
    }
}

/// Result of one clustering run.
///
/// Clusters are reported in ascending order of their centroid's maximum
/// sample value; `centroids`, `sizes` and `envelopes` are parallel and
/// `assignments` use the same ordering.
#[derive(Debug, Clone)]
pub struct ClusterResult {
    /// Cluster label for each input curve.
    pub assignments: Vec<ClusterLabel>,
    /// Centroid curve of each cluster.
    pub centroids: Vec<Curve>,
    /// Number of curves assigned to each cluster in the final iteration.
    pub sizes: Vec<usize>,
    /// Member min/max envelope of each cluster.
    pub envelopes: Vec<ClusterEnvelope>,
    /// Number of refinement iterations performed.
    pub iterations: usize,
    /// Membership counts after every iteration, in reported cluster order.
    pub size_history: Vec<Vec<usize>>,
}

impl ClusterResult {
    /// Return the number of clusters.
    #[must_use]
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Return each cluster's share of the clustered curves.
    ///
    /// Entry `i` is `sizes[i] / sum(sizes)`; the entries sum to 1.
    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        let total: usize = self.sizes.iter().sum();
        if total == 0 {
            return vec![0.0; self.sizes.len()];
        }
        self.sizes
            .iter()
            .map(|&s| s as f64 / total as f64)
            .collect()
    }

    /// Return the indices of all curves assigned to `label`.
    #[must_use]
    pub fn members(&self, label: ClusterLabel) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter_map(|(i, &l)| (l == label).then_some(i))
            .collect()
    }
}
