//! CSV and JSON result writers for clustering and matching outputs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use shapematch_chi2::{AlignedReport, MatchResult};
use shapematch_cluster::{ClusterConfig, ClusterResult};
use shapematch_dtw::BandConstraint;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::ExperimentName;

/// Writes clustering and matching results.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_centroids.csv`,
/// `{experiment}_cluster.json` and `{experiment}_match.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    fn path_for(&self, suffix: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{suffix}", self.experiment.as_str()))
    }

    /// Write centroids to `{experiment}_centroids.csv`.
    ///
    /// Row `r` holds sample `r` of every centroid; the final row holds the
    /// normalized cluster weights. The file reads back with
    /// [`CurveReader::with_weight_row`](crate::CurveReader::with_weight_row).
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::CsvWrite`] | the file cannot be created or a record written |
    /// | [`IoError::WriteFile`] | the final flush fails |
    #[instrument(skip_all, fields(k = result.k()))]
    pub fn write_centroids_csv(&self, result: &ClusterResult) -> Result<PathBuf, IoError> {
        let path = self.path_for("centroids.csv");
        let csv_err = |e: csv::Error| IoError::CsvWrite {
            path: path.clone(),
            source: e,
        };

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .map_err(csv_err)?;

        let n_rows = result.centroids.first().map_or(0, |c| c.len());
        for row in 0..n_rows {
            wtr.write_record(result.centroids.iter().map(|c| c.as_view()[row].to_string()))
                .map_err(csv_err)?;
        }
        wtr.write_record(result.weights().iter().map(f64::to_string))
            .map_err(csv_err)?;
        wtr.flush().map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), n_rows, "centroids written");
        Ok(path)
    }

    /// Write a clustering result to `{experiment}_cluster.json`.
    ///
    /// `peak_positions` holds one entry per clustered curve and may be empty
    /// when the curves were not resampled.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Serialize`] | JSON serialization fails |
    /// | [`IoError::WriteFile`] | the file cannot be written |
    #[instrument(skip_all, fields(k = result.k()))]
    pub fn write_cluster(
        &self,
        config: &ClusterConfig,
        result: &ClusterResult,
        peak_positions: &[f64],
    ) -> Result<PathBuf, IoError> {
        let path = self.path_for("cluster.json");

        let window = match config.constraint() {
            BandConstraint::Unconstrained => None,
            BandConstraint::SakoeChibaRadius(r) => Some(r),
        };

        let artifact = ClusterArtifact {
            experiment: self.experiment.as_str(),
            k: result.k(),
            iterations: result.iterations,
            window,
            envelope_radius: config.envelope_radius(),
            seed: config.seed(),
            sizes: &result.sizes,
            weights: result.weights(),
            labels: result.assignments.iter().map(|l| l.index()).collect(),
            centroids: result.centroids.iter().map(|c| c.as_view().as_slice()).collect(),
            lower_envelopes: result.envelopes.iter().map(|e| e.lower.as_slice()).collect(),
            upper_envelopes: result.envelopes.iter().map(|e| e.upper.as_slice()).collect(),
            size_history: &result.size_history,
            peak_positions,
        };

        self.write_json(&path, &artifact)?;
        info!(path = %path.display(), "cluster result written");
        Ok(path)
    }

    /// Write a greedy matching result to `{experiment}_match.json`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Serialize`] | JSON serialization fails |
    /// | [`IoError::WriteFile`] | the file cannot be written |
    #[instrument(skip_all, fields(pairs = result.pairs.len()))]
    pub fn write_match(&self, result: &MatchResult, use_weights: bool) -> Result<PathBuf, IoError> {
        let pairs = result
            .pairs
            .iter()
            .map(|p| PairEntry {
                index_a: p.index_a,
                index_b: p.index_b,
                discrepancy: p.discrepancy,
            })
            .collect();
        self.write_match_artifact("greedy", use_weights, pairs, result.cumulative, result.max)
    }

    /// Write an aligned comparison to `{experiment}_match.json`.
    ///
    /// Pairs are reported as `(i, i, score)`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Serialize`] | JSON serialization fails |
    /// | [`IoError::WriteFile`] | the file cannot be written |
    #[instrument(skip_all, fields(pairs = report.scores.len()))]
    pub fn write_aligned(&self, report: &AlignedReport, use_weights: bool) -> Result<PathBuf, IoError> {
        let pairs = report
            .scores
            .iter()
            .enumerate()
            .map(|(i, &discrepancy)| PairEntry {
                index_a: i,
                index_b: i,
                discrepancy,
            })
            .collect();
        self.write_match_artifact("aligned", use_weights, pairs, report.cumulative, report.max)
    }

    fn write_match_artifact(
        &self,
        mode: &str,
        use_weights: bool,
        pairs: Vec<PairEntry>,
        cumulative: f64,
        max: f64,
    ) -> Result<PathBuf, IoError> {
        let path = self.path_for("match.json");
        let artifact = MatchArtifact {
            experiment: self.experiment.as_str(),
            mode,
            use_weights,
            pairs,
            cumulative,
            max,
        };
        self.write_json(&path, &artifact)?;
        info!(path = %path.display(), mode, "match result written");
        Ok(path)
    }

    fn write_json<T: Serialize>(&self, path: &Path, artifact: &T) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(artifact)?;
        fs::write(path, json).map_err(|e| IoError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct ClusterArtifact<'a> {
    experiment: &'a str,
    k: usize,
    iterations: usize,
    window: Option<usize>,
    envelope_radius: usize,
    seed: u64,
    sizes: &'a [usize],
    weights: Vec<f64>,
    labels: Vec<usize>,
    centroids: Vec<&'a [f64]>,
    lower_envelopes: Vec<&'a [f64]>,
    upper_envelopes: Vec<&'a [f64]>,
    size_history: &'a [Vec<usize>],
    peak_positions: &'a [f64],
}

#[derive(Serialize)]
struct MatchArtifact<'a> {
    experiment: &'a str,
    mode: &'a str,
    use_weights: bool,
    pairs: Vec<PairEntry>,
    cumulative: f64,
    max: f64,
}

#[derive(Serialize)]
struct PairEntry {
    index_a: usize,
    index_b: usize,
    discrepancy: f64,
}
