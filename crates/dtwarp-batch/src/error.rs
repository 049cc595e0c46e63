//! Error types for batch DTW operations.

use dtwarp_core::DtwError;

/// Errors from pairwise and warped-mean computations.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Returned when a batch operation that needs at least one sequence gets none.
    #[error("cannot average an empty dataset")]
    EmptyDataset,

    /// Returned when a precomputed distance matrix does not match the dataset.
    #[error("distance matrix covers {matrix} sequences, dataset has {sequences}")]
    SizeMismatch {
        /// Number of sequences supplied.
        sequences: usize,
        /// Number of sequences covered by the matrix.
        matrix: usize,
    },

    /// Wraps a kernel error encountered while aligning sequences.
    #[error("DTW error during batch computation: {0}")]
    Dtw(#[from] DtwError),
}
