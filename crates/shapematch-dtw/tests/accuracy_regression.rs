//! Accuracy regression tests for shapematch-dtw.
//!
//! Reference values were computed with an independent dense-table DTW and are
//! hardcoded to catch regressions in the banded recurrence.

use shapematch_dtw::{Curve, Dtw, lower_bound};

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn curve(values: &[f64]) -> Curve {
    Curve::new(values.to_vec()).expect("valid test curve")
}

fn reference_pairs() -> Vec<(Curve, Curve)> {
    vec![
        (curve(&[0.0, 0.0, 0.0]), curve(&[1.0, 1.0, 1.0])),
        (curve(&[0.0, 1.0, 0.0]), curve(&[0.0, 0.0, 0.0])),
        (curve(&[1.0, 2.0, 3.0]), curve(&[3.0, 2.0, 1.0])),
        (curve(&[0.0, 5.0, 0.0, 5.0]), curve(&[5.0, 0.0, 5.0, 0.0])),
        (curve(&[0.0, 0.0, 1.0]), curve(&[1.0, 0.0, 0.0])),
        (curve(&[0.0, 1.0, 2.0, 3.0, 4.0]), curve(&[0.0, 0.0, 0.0, 0.0, 4.0])),
        (curve(&[0.0, 3.0, 0.0, 3.0, 0.0]), curve(&[3.0, 0.0, 3.0, 0.0, 3.0])),
    ]
}

// ---------------------------------------------------------------------------
// a) distances match known values for three window settings
// ---------------------------------------------------------------------------

#[test]
fn dtw_distances_match_known_values() {
    // (unconstrained, window 1, window 0)
    let expected: [(f64, f64, f64); 7] = [
        (1.7320508075688772, 1.7320508075688772, 1.7320508075688772),
        (1.0, 1.0, 1.0),
        (2.8284271247461903, 2.8284271247461903, 2.8284271247461903),
        (7.0710678118654755, 7.0710678118654755, 10.0),
        (1.4142135623730951, 1.4142135623730951, 1.4142135623730951),
        (2.449489742783178, 2.449489742783178, 3.7416573867739413),
        (4.242640687119285, 4.242640687119285, 6.708203932499369),
    ];

    for (i, ((a, b), &(free, w1, w0))) in reference_pairs().iter().zip(expected.iter()).enumerate() {
        let got_free = Dtw::unconstrained().distance(a.as_view(), b.as_view()).value();
        let got_w1 = Dtw::with_window(1).distance(a.as_view(), b.as_view()).value();
        let got_w0 = Dtw::with_window(0).distance(a.as_view(), b.as_view()).value();
        assert!((got_free - free).abs() < 1e-10, "pair {i}: unconstrained {got_free} != {free}");
        assert!((got_w1 - w1).abs() < 1e-10, "pair {i}: window 1 {got_w1} != {w1}");
        assert!((got_w0 - w0).abs() < 1e-10, "pair {i}: window 0 {got_w0} != {w0}");
    }
}

// ---------------------------------------------------------------------------
// b) unequal lengths widen the window
// ---------------------------------------------------------------------------

#[test]
fn unequal_lengths_match_unconstrained_when_widened() {
    let a = curve(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let b = curve(&[1.0, 3.0, 6.0]);
    let widened = Dtw::with_window(0).distance(a.as_view(), b.as_view()).value();
    assert!((widened - 1.7320508075688772).abs() < 1e-10, "got {widened}");
}

// ---------------------------------------------------------------------------
// c) pruning never changes the winner
// ---------------------------------------------------------------------------

#[test]
fn lower_bound_pruning_keeps_nearest_candidate() {
    let query = curve(&[0.0, 0.5, 2.0, 4.0, 2.0, 0.5, 0.0]);
    let candidates = [
        curve(&[0.0, 0.0, 0.5, 2.0, 4.0, 2.0, 0.5]),
        curve(&[4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0]),
        curve(&[0.0, 0.5, 1.0, 1.5, 1.0, 0.5, 0.0]),
    ];
    let dtw = Dtw::with_window(2);

    let exhaustive = candidates
        .iter()
        .map(|c| dtw.distance(query.as_view(), c.as_view()).value())
        .enumerate()
        .fold((0usize, f64::INFINITY), |best, (i, d)| if d < best.1 { (i, d) } else { best });

    let mut best = (0usize, f64::INFINITY);
    for (i, c) in candidates.iter().enumerate() {
        let lb = lower_bound(query.as_view(), c.as_view(), 5).unwrap().value();
        if lb < best.1 {
            let d = dtw.distance_with_cutoff(query.as_view(), c.as_view(), best.1).value();
            if d < best.1 {
                best = (i, d);
            }
        }
    }

    assert_eq!(best.0, exhaustive.0);
    assert!((best.1 - exhaustive.1).abs() < 1e-12);
    assert_eq!(best.0, 0, "shifted copy should be nearest");
}
