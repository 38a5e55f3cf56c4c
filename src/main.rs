use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use shapematch_chi2::{MatchConfig, WeightedCurve};
use shapematch_cluster::ClusterConfig;
use shapematch_dtw::{BandConstraint, Curve};
use shapematch_io::{CurveReader, ExperimentName, ResultWriter, resample};

#[derive(Parser)]
#[command(name = "shapematch")]
#[command(about = "Shape-based clustering and chi-square matching of intensity curves")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for reproducibility
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Resample raw curves and cluster them into k shapes with DTW k-means
    Cluster {
        /// Path to the input CSV file (one curve per column)
        #[arg(long)]
        data: PathBuf,

        /// Number of clusters
        #[arg(long)]
        k: usize,

        /// Number of assign/update passes
        #[arg(long, default_value_t = 10)]
        iterations: usize,

        /// Sakoe-Chiba window radius (omit for unconstrained DTW)
        #[arg(long)]
        window: Option<usize>,

        /// LB_Keogh envelope radius used to skip DTW evaluations
        #[arg(long, default_value_t = 5)]
        envelope_radius: usize,

        /// Number of points each curve is resampled onto
        #[arg(long, default_value_t = 100)]
        grid_len: usize,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Match the curves of one file against the curves of another
    Match {
        /// Source curves (CSV, one curve per column)
        #[arg(long)]
        a: PathBuf,

        /// Target curves (CSV, one curve per column)
        #[arg(long)]
        b: PathBuf,

        /// Scale curves by their weights before comparing
        #[arg(long, default_value_t = false)]
        use_weights: bool,

        /// Matching mode: "greedy" or "aligned"
        #[arg(long, default_value = "greedy")]
        mode: String,

        /// Inputs have no trailing weight row
        #[arg(long, default_value_t = false)]
        no_weight_row: bool,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct ClusterOutput {
    experiment: String,
    k: usize,
    n_curves: usize,
    iterations: usize,
    sizes: Vec<usize>,
    weights: Vec<f64>,
    centroids_csv: PathBuf,
    cluster_json: PathBuf,
}

#[derive(Serialize)]
struct MatchOutput {
    experiment: String,
    mode: &'static str,
    use_weights: bool,
    n_a: usize,
    n_b: usize,
    cumulative: f64,
    max: f64,
    match_json: PathBuf,
}

#[derive(Clone, Copy)]
enum MatchMode {
    Greedy,
    Aligned,
}

impl MatchMode {
    fn as_str(self) -> &'static str {
        match self {
            MatchMode::Greedy => "greedy",
            MatchMode::Aligned => "aligned",
        }
    }
}

fn parse_mode(s: &str) -> Result<MatchMode> {
    match s {
        "greedy" => Ok(MatchMode::Greedy),
        "aligned" => Ok(MatchMode::Aligned),
        other => anyhow::bail!("unknown match mode: {other} (expected greedy or aligned)"),
    }
}

fn build_constraint(window: Option<usize>) -> BandConstraint {
    window.map_or(BandConstraint::Unconstrained, BandConstraint::SakoeChibaRadius)
}

/// Read raw curves and resample every column onto `grid_len` points.
fn load_resampled(path: &Path, grid_len: usize) -> Result<(Vec<Curve>, Vec<f64>)> {
    let table = CurveReader::new(path)
        .read()
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut curves = Vec::with_capacity(table.n_columns());
    let mut peaks = Vec::with_capacity(table.n_columns());
    for (col_index, column) in table.columns().enumerate() {
        let r = resample(column, grid_len, col_index)
            .with_context(|| format!("failed to resample {}", path.display()))?;
        curves.push(r.curve);
        peaks.push(r.peak_position);
    }
    info!(n_curves = curves.len(), grid_len, "curves resampled");
    Ok((curves, peaks))
}

fn load_weighted(path: &Path, weight_row: bool) -> Result<Vec<WeightedCurve>> {
    let curves = CurveReader::new(path)
        .with_weight_row(weight_row)
        .read()
        .and_then(|table| table.into_weighted_curves())
        .with_context(|| format!("failed to read {}", path.display()))?;
    info!(path = %path.display(), n_curves = curves.len(), "curves loaded");
    Ok(curves)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Cluster {
            data,
            k,
            iterations,
            window,
            envelope_radius,
            grid_len,
            experiment,
            output_dir,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;
            let (curves, peaks) = load_resampled(&data, grid_len)?;

            let config = ClusterConfig::new(k, build_constraint(window))?
                .with_iterations(iterations)
                .with_envelope_radius(envelope_radius)
                .with_seed(cli.seed);
            let result = config.fit(&curves).context("clustering failed")?;

            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            let centroids_csv = writer.write_centroids_csv(&result)?;
            let cluster_json = writer.write_cluster(&config, &result, &peaks)?;

            let output = ClusterOutput {
                experiment,
                k: result.k(),
                n_curves: curves.len(),
                iterations: result.iterations,
                weights: result.weights(),
                sizes: result.sizes,
                centroids_csv,
                cluster_json,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Match {
            a,
            b,
            use_weights,
            mode,
            no_weight_row,
            experiment,
            output_dir,
        } => {
            let mode = parse_mode(&mode)?;
            let experiment_name = ExperimentName::new(experiment.clone())?;
            let curves_a = load_weighted(&a, !no_weight_row)?;
            let curves_b = load_weighted(&b, !no_weight_row)?;

            let config = MatchConfig::new().with_use_weights(use_weights);
            let writer = ResultWriter::new(&output_dir, experiment_name)?;

            let (cumulative, max, match_json) = match mode {
                MatchMode::Greedy => {
                    let result = config
                        .greedy(&curves_a, &curves_b)
                        .context("greedy matching failed")?;
                    let path = writer.write_match(&result, use_weights)?;
                    (result.cumulative, result.max, path)
                }
                MatchMode::Aligned => {
                    let report = config
                        .aligned(&curves_a, &curves_b)
                        .context("aligned comparison failed")?;
                    let path = writer.write_aligned(&report, use_weights)?;
                    (report.cumulative, report.max, path)
                }
            };

            let output = MatchOutput {
                experiment,
                mode: mode.as_str(),
                use_weights,
                n_a: curves_a.len(),
                n_b: curves_b.len(),
                cumulative,
                max,
                match_json,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
