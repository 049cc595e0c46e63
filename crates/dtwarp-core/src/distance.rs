//! DTW distance newtype wrapper.

use std::cmp::Ordering;
use std::fmt;

/// A non-negative DTW distance value in single precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DtwDistance(f32);

impl DtwDistance {
    /// Zero distance, the distance of every sequence to itself.
    pub const ZERO: Self = Self(0.0);

    /// Create a new DTW distance from a raw value.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value)
    }

    /// Return the raw distance value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Total ordering comparison using [`f32::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for DtwDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

impl From<DtwDistance> for f32 {
    fn from(d: DtwDistance) -> Self {
        d.0
    }
}
