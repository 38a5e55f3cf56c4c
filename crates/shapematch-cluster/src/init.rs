//! Uniform initial centroid selection (private module).

use rand::seq::index;
use rand_chacha::ChaCha8Rng;

/// Select `k` distinct curve indices uniformly at random without replacement.
///
/// The returned order is the sampling order; index `c` of the result seeds
/// cluster `c`.
///
/// # Panics
///
/// Panics in debug mode if `k == 0` or `k > n`.
#[must_use]
pub(crate) fn sample_initial(n: usize, k: usize, rng: &mut ChaCha8Rng) -> Vec<usize> {
    debug_assert!(k > 0, "k must be at least 1");
    debug_assert!(k <= n, "k must not exceed the number of curves");
    index::sample(rng, n, k).into_vec()
}
