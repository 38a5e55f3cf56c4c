//! Property-based tests for DTW and the LB_Keogh lower bound.

use proptest::prelude::*;
use shapematch_dtw::{Curve, Dtw, lower_bound};

/// Strategy for finite intensity samples of a given length range.
fn samples(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-50.0..50.0_f64, min_len..max_len)
}

/// Two equal-length sample vectors.
fn equal_pair(min_len: usize, max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (min_len..max_len).prop_flat_map(|len| {
        (
            prop::collection::vec(-50.0..50.0_f64, len),
            prop::collection::vec(-50.0..50.0_f64, len),
        )
    })
}

proptest! {
    #[test]
    fn dtw_identity(values in samples(1, 40), window in 0usize..10) {
        let c = Curve::new(values).unwrap();
        let d = Dtw::with_window(window).distance(c.as_view(), c.as_view());
        prop_assert_eq!(d.value(), 0.0);
    }

    #[test]
    fn dtw_symmetric_for_equal_lengths((a, b) in equal_pair(1, 30), window in 0usize..8) {
        let a = Curve::new(a).unwrap();
        let b = Curve::new(b).unwrap();
        let dtw = Dtw::with_window(window);
        let ab = dtw.distance(a.as_view(), b.as_view()).value();
        let ba = dtw.distance(b.as_view(), a.as_view()).value();
        prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
    }

    #[test]
    fn dtw_finite_for_any_lengths(a in samples(1, 30), b in samples(1, 30), window in 0usize..4) {
        let a = Curve::new(a).unwrap();
        let b = Curve::new(b).unwrap();
        let d = Dtw::with_window(window).distance(a.as_view(), b.as_view());
        prop_assert!(!d.is_abandoned());
        prop_assert!(d.value() >= 0.0);
    }

    #[test]
    fn lower_bound_never_exceeds_dtw((a, b) in equal_pair(1, 30), radius in 0usize..8, shrink in 0usize..8) {
        let window = radius.saturating_sub(shrink);
        let a = Curve::new(a).unwrap();
        let b = Curve::new(b).unwrap();
        let lb = lower_bound(a.as_view(), b.as_view(), radius).unwrap().value();
        let d = Dtw::with_window(window).distance(a.as_view(), b.as_view()).value();
        prop_assert!(lb <= d + 1e-9 * d.max(1.0), "lb {} > dtw {} (r={}, w={})", lb, d, radius, window);
    }

    #[test]
    fn cutoff_is_exact_or_abandoned((a, b) in equal_pair(1, 25), window in 0usize..5, cutoff in 0.0..200.0_f64) {
        let a = Curve::new(a).unwrap();
        let b = Curve::new(b).unwrap();
        let dtw = Dtw::with_window(window);
        let exact = dtw.distance(a.as_view(), b.as_view()).value();
        let cut = dtw.distance_with_cutoff(a.as_view(), b.as_view(), cutoff).value();
        if cut.is_finite() {
            prop_assert!((cut - exact).abs() < 1e-9);
        } else {
            prop_assert!(exact > cutoff - 1e-9);
        }
    }
}
