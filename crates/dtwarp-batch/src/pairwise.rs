//! Pairwise DTW distances fanned out over the rayon pool.

use dtwarp_core::{Dtw, DtwDistance, SequenceView};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::matrix::{DistanceMatrix, pair_from_flat};

/// DTW distance with the default squared Euclidean sample cost.
///
/// The default capability for [`pairwise`] callers and
/// [`WarpedMeanConfig`](crate::WarpedMeanConfig).
#[must_use]
pub fn dtw_distance(a: SequenceView<'_>, b: SequenceView<'_>) -> DtwDistance {
    Dtw::new().distance(a, b)
}

/// Compute distances for every unordered pair of `sequences`.
///
/// `distance` is called once per pair, never for `i == j`. Pairs are
/// enumerated by their flat lower-triangle index and evaluated independently
/// on the current rayon pool; each result lands in its own pre-sized slot, so
/// evaluation order has no effect on the output.
#[must_use]
#[instrument(skip_all, fields(n = sequences.len()))]
pub fn pairwise<F>(sequences: &[SequenceView<'_>], distance: F) -> DistanceMatrix
where
    F: Fn(SequenceView<'_>, SequenceView<'_>) -> DtwDistance + Sync,
{
    let n = sequences.len();
    let total_pairs = n * n.saturating_sub(1) / 2;

    let distances: Vec<DtwDistance> = (0..total_pairs)
        .into_par_iter()
        .map(|flat| {
            let (i, j) = pair_from_flat(flat);
            distance(sequences[i], sequences[j])
        })
        .collect();

    debug!(pairs = total_pairs, "pairwise distances computed");
    DistanceMatrix::from_raw(n, distances)
}
