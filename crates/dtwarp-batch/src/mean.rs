//! DTW warped mean: average a dataset in the time frame of its most central member.

use dtwarp_core::{Dtw, DtwDistance, Sequence, SequenceView};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::error::BatchError;
use crate::matrix::DistanceMatrix;
use crate::pairwise::{dtw_distance, pairwise};

/// Function-pointer form of a distance capability.
pub type DistanceFn = for<'a, 'b> fn(SequenceView<'a>, SequenceView<'b>) -> DtwDistance;

/// Configuration for warped-mean computation.
///
/// The distance capability only drives the choice of reference sequence;
/// alignment to the reference always goes through the DTW cost matrix and
/// path tracer.
///
/// # Defaults
///
/// | Parameter  | Default          |
/// |------------|------------------|
/// | `distance` | [`dtw_distance`] |
#[derive(Debug, Clone, Copy)]
pub struct WarpedMeanConfig<F = DistanceFn> {
    distance: F,
}

impl WarpedMeanConfig {
    /// Create a configuration using plain DTW distance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            distance: dtw_distance,
        }
    }
}

impl Default for WarpedMeanConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> WarpedMeanConfig<F> {
    /// Replace the distance used to rank sequences when picking the reference.
    #[must_use]
    pub fn with_distance<G>(self, distance: G) -> WarpedMeanConfig<G>
    where
        G: Fn(SequenceView<'_>, SequenceView<'_>) -> DtwDistance + Sync,
    {
        WarpedMeanConfig { distance }
    }
}

impl<F> WarpedMeanConfig<F>
where
    F: Fn(SequenceView<'_>, SequenceView<'_>) -> DtwDistance + Sync,
{
    /// Compute the warped mean of `sequences`.
    ///
    /// Computes the pairwise distance matrix with the configured capability
    /// and delegates to [`compute_with_distances`][Self::compute_with_distances].
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`BatchError::EmptyDataset`] | `sequences` is empty |
    /// | [`BatchError::Dtw`] | The averaged samples fail sequence validation |
    #[instrument(skip_all, fields(n = sequences.len()))]
    pub fn compute(&self, sequences: &[SequenceView<'_>]) -> Result<WarpedMeanResult, BatchError> {
        if sequences.is_empty() {
            return Err(BatchError::EmptyDataset);
        }
        let distances = pairwise(sequences, &self.distance);
        self.compute_with_distances(sequences, &distances)
    }

    /// Compute the warped mean from a precomputed pairwise matrix.
    ///
    /// The reference is the sequence with the smallest mean distance to all
    /// sequences (lowest index on ties). Every sequence is aligned to the
    /// reference; for each reference index the samples aligned to it are
    /// averaged, and those per-sequence profiles are averaged across the
    /// dataset. The mean has the reference's length.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`BatchError::EmptyDataset`] | `sequences` is empty |
    /// | [`BatchError::SizeMismatch`] | `distances` covers a different number of sequences |
    /// | [`BatchError::Dtw`] | The averaged samples fail sequence validation |
    pub fn compute_with_distances(
        &self,
        sequences: &[SequenceView<'_>],
        distances: &DistanceMatrix,
    ) -> Result<WarpedMeanResult, BatchError> {
        if sequences.is_empty() {
            return Err(BatchError::EmptyDataset);
        }
        if distances.len() != sequences.len() {
            return Err(BatchError::SizeMismatch {
                sequences: sequences.len(),
                matrix: distances.len(),
            });
        }

        let (reference_index, reference_mean_distance) = (0..sequences.len())
            .map(|i| (i, distances.row_mean(i)))
            .fold((0, f32::INFINITY), |best, cand| if cand.1 < best.1 { cand } else { best });
        debug!(reference_index, reference_mean_distance, "reference selected");

        let reference = sequences[reference_index];
        let profiles: Vec<Vec<f32>> = sequences
            .par_iter()
            .map(|s| aligned_profile(*s, reference))
            .collect();

        let mut mean = vec![0.0_f32; reference.len()];
        for profile in &profiles {
            for (acc, v) in mean.iter_mut().zip(profile) {
                *acc += v;
            }
        }
        let n = sequences.len() as f32;
        for v in &mut mean {
            *v /= n;
        }

        Ok(WarpedMeanResult {
            reference_index,
            reference_mean_distance,
            mean: Sequence::new(mean)?,
            n_sequences: sequences.len(),
        })
    }
}

/// Average of the samples of `sequence` aligned to each index of `reference`.
fn aligned_profile(sequence: SequenceView<'_>, reference: SequenceView<'_>) -> Vec<f32> {
    let (_, path) = Dtw::new().distance_and_path(sequence, reference);

    let mut sums = vec![0.0_f32; reference.len()];
    let mut counts = vec![0_u32; reference.len()];
    for step in &path {
        sums[step.j] += sequence[step.i];
        counts[step.j] += 1;
    }

    // Every reference index is visited at least once by a full path.
    sums.iter()
        .zip(&counts)
        .map(|(&s, &c)| s / c.max(1) as f32)
        .collect()
}

/// Result of a warped-mean computation.
#[derive(Debug, Clone)]
pub struct WarpedMeanResult {
    /// Index of the sequence used as the time reference.
    pub reference_index: usize,
    /// Mean distance from the reference to all sequences, itself included.
    pub reference_mean_distance: f32,
    /// The warped mean, as long as the reference.
    pub mean: Sequence,
    /// Number of sequences averaged.
    pub n_sequences: usize,
}
