//! Criterion benchmarks for shapematch-cluster: full fit and single-pass cost.

use criterion::{Criterion, criterion_group, criterion_main};

use shapematch_cluster::ClusterConfig;
use shapematch_dtw::{BandConstraint, Curve};

/// 100 Gaussian-like pulses of length 64 in five height groups.
fn make_cluster_data() -> Vec<Curve> {
    let heights = [1.0, 2.0, 4.0, 8.0, 16.0];
    let mut curves = Vec::new();
    for &height in &heights {
        for j in 0..20 {
            let centre = 28.0 + (j % 8) as f64;
            let values: Vec<f64> = (0..64)
                .map(|i| {
                    let x = (i as f64 - centre) / 6.0;
                    height * (-0.5 * x * x).exp()
                })
                .collect();
            curves.push(Curve::new(values).unwrap());
        }
    }
    curves
}

fn bench_fit(c: &mut Criterion) {
    let curves = make_cluster_data();
    let cfg = ClusterConfig::new(5, BandConstraint::SakoeChibaRadius(3))
        .unwrap()
        .with_iterations(10)
        .with_seed(42);

    c.bench_function("cluster_fit_100x64_k5_iter10", |b| {
        b.iter(|| cfg.fit(&curves).unwrap());
    });
}

fn bench_single_pass(c: &mut Criterion) {
    let curves = make_cluster_data();
    let cfg = ClusterConfig::new(5, BandConstraint::SakoeChibaRadius(3))
        .unwrap()
        .with_iterations(1)
        .with_seed(42);

    c.bench_function("cluster_single_pass_100x64_k5", |b| {
        b.iter(|| cfg.fit(&curves).unwrap());
    });
}

fn bench_unconstrained(c: &mut Criterion) {
    let curves = make_cluster_data();
    let cfg = ClusterConfig::new(5, BandConstraint::Unconstrained)
        .unwrap()
        .with_iterations(3)
        .with_seed(42);

    c.bench_function("cluster_fit_100x64_k5_unconstrained", |b| {
        b.iter(|| cfg.fit(&curves).unwrap());
    });
}

criterion_group!(benches, bench_fit, bench_single_pass, bench_unconstrained);
criterion_main!(benches);
