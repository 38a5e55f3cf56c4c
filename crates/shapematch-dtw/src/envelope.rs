//! Keogh envelope computation and the LB_Keogh lower bound.

use std::collections::VecDeque;

use tracing::instrument;

use crate::curve::CurveView;
use crate::distance::DtwDistance;
use crate::error::DtwError;

/// Precomputed upper and lower Keogh envelope of a reference curve.
///
/// For each sample `i`, `upper[i]` is the maximum of `reference[j]` over
/// `|i - j| <= radius` and `lower[i]` the minimum.
#[derive(Debug, Clone)]
pub struct SeriesEnvelope {
    upper: Vec<f64>,
    lower: Vec<f64>,
}

impl SeriesEnvelope {
    /// Compute upper and lower envelopes of `reference` for the given radius.
    ///
    /// Uses an O(n) sliding-window min/max with monotonic [`VecDeque`]s.
    #[must_use]
    pub fn compute(reference: CurveView<'_>, radius: usize) -> Self {
        let data = reference.as_slice();
        let n = data.len();

        let mut upper = Vec::with_capacity(n);
        let mut lower = Vec::with_capacity(n);

        // Both deques hold indices in increasing order. Values decrease from
        // the front in `max_deque` and increase in `min_deque`, so the front is
        // the extreme of the current window [i - radius, i + radius].
        let mut max_deque: VecDeque<usize> = VecDeque::new();
        let mut min_deque: VecDeque<usize> = VecDeque::new();
        let mut next_to_add = 0usize;

        for i in 0..n {
            let hi = (i + radius).min(n - 1);
            while next_to_add <= hi {
                let v = data[next_to_add];
                while max_deque.back().is_some_and(|&back| data[back] <= v) {
                    max_deque.pop_back();
                }
                max_deque.push_back(next_to_add);

                while min_deque.back().is_some_and(|&back| data[back] >= v) {
                    min_deque.pop_back();
                }
                min_deque.push_back(next_to_add);

                next_to_add += 1;
            }

            let lo = i.saturating_sub(radius);
            while max_deque.front().is_some_and(|&front| front < lo) {
                max_deque.pop_front();
            }
            while min_deque.front().is_some_and(|&front| front < lo) {
                min_deque.pop_front();
            }

            // Index `i` itself is always inside the window, so neither deque is empty.
            upper.push(max_deque.front().map_or(data[i], |&j| data[j]));
            lower.push(min_deque.front().map_or(data[i], |&j| data[j]));
        }

        Self { upper, lower }
    }

    /// Return the upper envelope values.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Return the lower envelope values.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Return the length of the envelope (same as the reference curve).
    #[must_use]
    pub fn len(&self) -> usize {
        self.upper.len()
    }

    /// Return true if the envelope is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.upper.is_empty()
    }
}

/// LB_Keogh of `query` against a precomputed reference envelope.
///
/// Accumulates the squared excess of every query sample above the upper or
/// below the lower envelope and returns the square root. Never exceeds the
/// DTW distance for any window not wider than the envelope radius.
///
/// Only the common prefix is compared; callers that need a length check use
/// [`lower_bound`].
#[must_use]
pub fn lb_keogh(query: &[f64], envelope: &SeriesEnvelope) -> f64 {
    lb_keogh_squared(query, envelope).sqrt()
}

fn lb_keogh_squared(query: &[f64], envelope: &SeriesEnvelope) -> f64 {
    query
        .iter()
        .zip(envelope.upper.iter().zip(envelope.lower.iter()))
        .map(|(&q, (&u, &l))| {
            if q > u {
                (q - u).powi(2)
            } else if q < l {
                (l - q).powi(2)
            } else {
                0.0
            }
        })
        .sum()
}

/// LB_Keogh lower bound of `query` against `reference` with envelope `radius`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DtwError::LengthMismatch`] | The curves have different lengths |
#[instrument(level = "trace", skip(query, reference), fields(n = query.len()))]
pub fn lower_bound(
    query: CurveView<'_>,
    reference: CurveView<'_>,
    radius: usize,
) -> Result<DtwDistance, DtwError> {
    if query.len() != reference.len() {
        return Err(DtwError::LengthMismatch {
            query: query.len(),
            reference: reference.len(),
        });
    }
    let envelope = SeriesEnvelope::compute(reference, radius);
    Ok(DtwDistance::from_squared(lb_keogh_squared(query.as_slice(), &envelope)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::curve::Curve;
    use crate::dtw::Dtw;

    fn test_pairs() -> Vec<(Vec<f64>, Vec<f64>)> {
        vec![
            (vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![5.0, 4.0, 3.0, 2.0, 1.0]),
            (vec![0.0, 0.0, 0.0, 0.0], vec![1.0, 2.0, 3.0, 4.0]),
            (vec![1.0, 3.0, 2.0, 5.0, 4.0], vec![2.0, 1.0, 4.0, 3.0, 6.0]),
            (vec![10.0, -10.0, 10.0, -10.0], vec![-10.0, 10.0, -10.0, 10.0]),
            (vec![0.0, 0.2, 1.0, 0.2, 0.0], vec![0.0, 0.0, 0.2, 1.0, 0.2]),
        ]
    }

    #[test]
    fn lb_keogh_leq_dtw() {
        for (q_vec, c_vec) in test_pairs() {
            let q = Curve::new(q_vec.clone()).unwrap();
            let c = Curve::new(c_vec.clone()).unwrap();
            for radius in 0..3 {
                let lb = lower_bound(q.as_view(), c.as_view(), radius).unwrap().value();
                for window in 0..=radius {
                    let d = Dtw::with_window(window).distance(q.as_view(), c.as_view()).value();
                    assert!(
                        lb <= d + 1e-9,
                        "lb ({lb}) > dtw ({d}) for r={radius} w={window}, {q_vec:?} vs {c_vec:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn lb_keogh_identical_curve_zero() {
        let c = Curve::new(vec![1.0, 2.0, 3.0, 2.0, 1.0]).unwrap();
        let lb = lower_bound(c.as_view(), c.as_view(), 5).unwrap();
        assert_eq!(lb.value(), 0.0);
    }

    #[test]
    fn lb_keogh_hand_computed() {
        // Envelope of [0, 0, 3] with radius 0 is the curve itself.
        // Query [1, 0, 1]: excess 1 above at 0, 2 below at 2 -> sqrt(1 + 4).
        let q = Curve::new(vec![1.0, 0.0, 1.0]).unwrap();
        let r = Curve::new(vec![0.0, 0.0, 3.0]).unwrap();
        let lb = lower_bound(q.as_view(), r.as_view(), 0).unwrap();
        assert!((lb.value() - 5.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn lower_bound_rejects_length_mismatch() {
        let q = Curve::new(vec![1.0, 2.0]).unwrap();
        let r = Curve::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert!(matches!(
            lower_bound(q.as_view(), r.as_view(), 1),
            Err(DtwError::LengthMismatch { query: 2, reference: 3 })
        ));
    }

    #[test]
    fn envelope_upper_geq_lower() {
        let data = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0];
        let c = Curve::new(data).unwrap();
        let env = SeriesEnvelope::compute(c.as_view(), 2);
        for i in 0..env.len() {
            assert!(env.upper()[i] >= env.lower()[i], "upper < lower at {i}");
        }
    }

    #[test]
    fn envelope_matches_brute_force() {
        let data = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0];
        let c = Curve::new(data.clone()).unwrap();
        for radius in [0usize, 1, 2, 5, 20] {
            let env = SeriesEnvelope::compute(c.as_view(), radius);
            for i in 0..data.len() {
                let lo = i.saturating_sub(radius);
                let hi = (i + radius).min(data.len() - 1);
                let window = &data[lo..=hi];
                let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let min = window.iter().copied().fold(f64::INFINITY, f64::min);
                assert_eq!(env.upper()[i], max, "upper[{i}] radius {radius}");
                assert_eq!(env.lower()[i], min, "lower[{i}] radius {radius}");
            }
        }
    }

    #[test]
    fn envelope_radius_zero_equals_curve() {
        let data = vec![3.0, 1.0, 4.0, 1.0, 5.0];
        let c = Curve::new(data.clone()).unwrap();
        let env = SeriesEnvelope::compute(c.as_view(), 0);
        assert_eq!(env.upper(), data.as_slice());
        assert_eq!(env.lower(), data.as_slice());
    }
}
