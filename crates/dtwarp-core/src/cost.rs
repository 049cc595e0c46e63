//! Sample-level cost between two scalars.

use std::fmt;

/// Elementary cost between two samples.
///
/// The recurrence only ever calls [`PointwiseCost::cost`], so a different base
/// metric can be swapped in without touching the dynamic program. The
/// accumulated total is square-rooted once at the end regardless of the
/// metric, so implementations should return non-negative, squared-scale costs.
pub trait PointwiseCost: Copy + Send + Sync + fmt::Debug {
    /// Return the cost of aligning sample `a` with sample `b`.
    fn cost(&self, a: f32, b: f32) -> f32;
}

/// Squared Euclidean distance `(a - b)^2`, evaluated in single precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquaredEuclidean;

impl PointwiseCost for SquaredEuclidean {
    #[inline(always)]
    fn cost(&self, a: f32, b: f32) -> f32 {
        let d = a - b;
        d * d
    }
}
