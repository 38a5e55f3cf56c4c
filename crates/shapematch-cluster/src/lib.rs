//! K-means style clustering of intensity curves under DTW distance.
//!
//! Initial centroids are sampled uniformly without replacement; every
//! iteration assigns curves to the nearest centroid (LB_Keogh pruned DTW) and
//! replaces each populated centroid by the element-wise mean of its members.

mod config;
mod error;
mod init;
mod kmeans;
mod label;
mod result;

pub use config::ClusterConfig;
pub use error::ClusterError;
pub use label::ClusterLabel;
pub use result::{ClusterEnvelope, ClusterResult};
