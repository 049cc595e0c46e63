//! Batch operations built on the DTW kernel.
//!
//! Provides a pairwise distance matrix computed on the rayon pool and the DTW
//! warped mean of a dataset. Both take the pairwise distance as a capability
//! parameter, any `Fn(SequenceView, SequenceView) -> DtwDistance + Sync`.

mod error;
mod matrix;
mod mean;
mod pairwise;

pub use error::BatchError;
pub use matrix::DistanceMatrix;
pub use mean::{DistanceFn, WarpedMeanConfig, WarpedMeanResult};
pub use pairwise::{dtw_distance, pairwise};
