//! Core assign/update refinement loop.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use shapematch_dtw::{Curve, Dtw, SeriesEnvelope, lb_keogh};

use crate::config::ClusterConfig;
use crate::error::ClusterError;
use crate::init::sample_initial;
use crate::label::ClusterLabel;
use crate::result::{ClusterEnvelope, ClusterResult};

// ── assign ────────────────────────────────────────────────────────────────────

/// Nearest centroid for one curve.
struct Nearest {
    label: ClusterLabel,
    dtw_evaluations: usize,
}

/// Scan centroids in id order, skipping any whose LB_Keogh bound is not below
/// the best distance found so far. Ties keep the lowest id.
fn nearest(curve: &Curve, centroids: &[Curve], envelopes: &[SeriesEnvelope], dtw: &Dtw) -> Nearest {
    let view = curve.as_view();
    let mut best_label = 0usize;
    let mut best_dist = f64::INFINITY;
    let mut dtw_evaluations = 0usize;

    for (c_idx, (centroid, envelope)) in centroids.iter().zip(envelopes).enumerate() {
        if lb_keogh(view.as_slice(), envelope) >= best_dist {
            continue;
        }
        dtw_evaluations += 1;
        let d = dtw
            .distance_with_cutoff(view, centroid.as_view(), best_dist)
            .value();
        if d < best_dist {
            best_dist = d;
            best_label = c_idx;
        }
    }

    Nearest {
        label: ClusterLabel::new(best_label),
        dtw_evaluations,
    }
}

/// Assign every curve to its nearest centroid using LB_Keogh pruned DTW.
///
/// `envelopes[c]` is the Keogh envelope of `centroids[c]`. Returns the labels
/// and the number of full DTW evaluations performed.
#[instrument(skip_all, fields(n = curves.len(), k = centroids.len()))]
pub(crate) fn assign(
    curves: &[Curve],
    centroids: &[Curve],
    envelopes: &[SeriesEnvelope],
    dtw: &Dtw,
) -> (Vec<ClusterLabel>, usize) {
    let results: Vec<Nearest> = curves
        .par_iter()
        .map(|c| nearest(c, centroids, envelopes, dtw))
        .collect();

    let evaluations: usize = results.iter().map(|r| r.dtw_evaluations).sum();
    let skipped = curves.len() * centroids.len() - evaluations;
    debug!(dtw_evaluations = evaluations, skipped, "assignment step complete");

    (results.into_iter().map(|r| r.label).collect(), evaluations)
}

/// Plain nearest-centroid assignment without pruning. Reference for tests.
#[cfg(test)]
pub(crate) fn assign_exhaustive(curves: &[Curve], centroids: &[Curve], dtw: &Dtw) -> Vec<ClusterLabel> {
    curves
        .iter()
        .map(|c| {
            let mut best = (0usize, f64::INFINITY);
            for (c_idx, centroid) in centroids.iter().enumerate() {
                let d = dtw.distance(c.as_view(), centroid.as_view()).value();
                if d < best.1 {
                    best = (c_idx, d);
                }
            }
            ClusterLabel::new(best.0)
        })
        .collect()
}

// ── update ────────────────────────────────────────────────────────────────────

/// Element-wise mean and min/max envelope of the curves in `group`.
///
/// Returns `None` for an empty group.
fn summarize(
    curves: &[Curve],
    group: &[usize],
) -> Result<Option<(Curve, ClusterEnvelope)>, ClusterError> {
    let Some(&first) = group.first() else {
        return Ok(None);
    };
    let len = curves[first].len();
    let mut sum = vec![0.0_f64; len];
    let mut lower = vec![f64::INFINITY; len];
    let mut upper = vec![f64::NEG_INFINITY; len];

    for &i in group {
        for (t, &v) in curves[i].as_ref().iter().enumerate() {
            sum[t] += v;
            lower[t] = lower[t].min(v);
            upper[t] = upper[t].max(v);
        }
    }

    let count = group.len() as f64;
    let mean = Curve::new(sum.into_iter().map(|s| s / count).collect())?;
    Ok(Some((mean, ClusterEnvelope { lower, upper })))
}

/// Recompute the centroid and envelope of every populated cluster.
///
/// A cluster that received no curves keeps its previous centroid and
/// envelope. Returns the membership count of each cluster.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ClusterError::Dtw`] | A mean overflows to a non-finite value |
#[instrument(skip(curves, assignments, centroids, envelopes), fields(k = centroids.len()))]
pub(crate) fn update(
    curves: &[Curve],
    assignments: &[ClusterLabel],
    centroids: &mut [Curve],
    envelopes: &mut [ClusterEnvelope],
    iteration: usize,
) -> Result<Vec<usize>, ClusterError> {
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); centroids.len()];
    for (i, label) in assignments.iter().enumerate() {
        groups[label.index()].push(i);
    }

    let rebuilt: Vec<Option<(Curve, ClusterEnvelope)>> = groups
        .par_iter()
        .map(|group| summarize(curves, group))
        .collect::<Result<Vec<_>, _>>()?;

    for (cluster, slot) in rebuilt.into_iter().enumerate() {
        match slot {
            Some((centroid, envelope)) => {
                centroids[cluster] = centroid;
                envelopes[cluster] = envelope;
            }
            None => debug!(cluster, "empty cluster keeps previous centroid"),
        }
    }

    Ok(groups.iter().map(Vec::len).collect())
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Sample initial centroids from `config.seed` and refine them.
///
/// Inputs are validated by [`ClusterConfig::fit`].
#[instrument(skip(curves, config), fields(n = curves.len(), k = config.k, seed = config.seed))]
pub(crate) fn run(curves: &[Curve], config: &ClusterConfig) -> Result<ClusterResult, ClusterError> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let initial = sample_initial(curves.len(), config.k, &mut rng);
    debug!(?initial, "initial centroids sampled");
    refine(curves, config, &initial)
}

/// Run `config.iterations` assign/update passes starting from the curves at
/// `initial`, then order clusters by ascending centroid peak.
pub(crate) fn refine(
    curves: &[Curve],
    config: &ClusterConfig,
    initial: &[usize],
) -> Result<ClusterResult, ClusterError> {
    let k = initial.len();
    let dtw = Dtw::from_constraint(config.constraint);
    let radius = config.pruning_radius(curves[0].len());

    let mut centroids: Vec<Curve> = initial.iter().map(|&i| curves[i].clone()).collect();
    let mut envelopes: Vec<ClusterEnvelope> =
        centroids.iter().map(ClusterEnvelope::of_curve).collect();
    let mut assignments: Vec<ClusterLabel> = Vec::new();
    let mut sizes = vec![0usize; k];
    let mut size_history = Vec::with_capacity(config.iterations);
    let mut dtw_evaluations = 0usize;

    for iteration in 0..config.iterations {
        let centroid_envelopes: Vec<SeriesEnvelope> = centroids
            .par_iter()
            .map(|c| SeriesEnvelope::compute(c.as_view(), radius))
            .collect();

        let (labels, evaluations) = assign(curves, &centroids, &centroid_envelopes, &dtw);
        dtw_evaluations += evaluations;

        sizes = update(curves, &labels, &mut centroids, &mut envelopes, iteration)?;
        assignments = labels;

        debug!(iteration, ?sizes, "iteration complete");
        size_history.push(sizes.clone());
    }

    // Stable sort: equal peaks keep cluster id order.
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| centroids[a].max_value().total_cmp(&centroids[b].max_value()));
    let mut position_of = vec![0usize; k];
    for (position, &id) in order.iter().enumerate() {
        position_of[id] = position;
    }

    info!(
        iterations = config.iterations,
        dtw_evaluations,
        ?sizes,
        "clustering complete"
    );

    Ok(ClusterResult {
        assignments: assignments.into_iter().map(|l| l.remap(&position_of)).collect(),
        centroids: order.iter().map(|&id| centroids[id].clone()).collect(),
        sizes: order.iter().map(|&id| sizes[id]).collect(),
        envelopes: order.iter().map(|&id| envelopes[id].clone()).collect(),
        iterations: config.iterations,
        size_history: size_history
            .into_iter()
            .map(|s| order.iter().map(|&id| s[id]).collect())
            .collect(),
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
