//! Dynamic Time Warping kernel for 1-D `f32` sequences.
//!
//! Pure math library, zero I/O. Provides three operations sharing one
//! recurrence:
//!
//! - [`Dtw::distance`]: the scalar DTW distance in linear memory.
//! - [`Dtw::cost_matrix`]: the full accumulated-cost surface.
//! - [`warping_path`]: the optimal alignment path recovered from a surface.
//!
//! Inputs are contiguous `f32` slices validated by [`Sequence`] /
//! [`SequenceView`]; empty or non-finite sequences are rejected before any
//! computation. Every call is self-contained and allocates only its own
//! buffers, so calls may run concurrently on any number of threads.
//!
//! ```
//! use dtwarp_core::{Dtw, Sequence};
//!
//! let x = Sequence::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! let y = Sequence::new(vec![2.0, 3.0, 4.0]).unwrap();
//! let dtw = Dtw::new();
//!
//! let d = dtw.distance(x.as_view(), y.as_view());
//! assert!((d.value() - 2.0_f32.sqrt()).abs() < 1e-6);
//!
//! let path = dtw.cost_matrix(x.as_view(), y.as_view()).path().unwrap();
//! assert_eq!(path.pairs(), vec![(0, 0), (1, 0), (2, 1), (3, 2), (4, 2)]);
//! ```

mod cost;
mod distance;
mod dtw;
mod error;
mod matrix;
mod path;
mod series;

pub use cost::{PointwiseCost, SquaredEuclidean};
pub use distance::DtwDistance;
pub use dtw::Dtw;
pub use error::DtwError;
pub use matrix::CostMatrix;
pub use path::{AlignmentPath, PathStep, warping_path};
pub use series::{Sequence, SequenceView};
