//! Dense accumulated-cost surface produced by the matrix engine.

use std::ops::Index;

use crate::distance::DtwDistance;
use crate::error::DtwError;
use crate::path::{self, AlignmentPath};

/// Row-major `rows x cols` surface of square-rooted accumulated costs.
///
/// Cell `(i, j)` holds the DTW distance between the prefixes `x[..=i]` and
/// `y[..=j]`. The matrix is read-only once built; [`CostMatrix::path`] only
/// borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl CostMatrix {
    /// Wrap an externally produced surface.
    ///
    /// Zero-dimension shapes are accepted here; tracing a path through them
    /// is what fails.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::ShapeMismatch`] | `data.len() != rows * cols` |
    pub fn from_raw(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, DtwError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(DtwError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Return the number of rows (length of the first sequence).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Return the number of columns (length of the second sequence).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Return `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Return true if either dimension is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Return the value at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(i < self.rows, "row index {i} out of bounds for {} rows", self.rows);
        assert!(j < self.cols, "column index {j} out of bounds for {} columns", self.cols);
        self.data[i * self.cols + j]
    }

    /// Return row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f32] {
        assert!(i < self.rows, "row index {i} out of bounds for {} rows", self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Return the flat row-major storage.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consume and return the flat row-major storage.
    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }

    /// Return the rows as nested vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Return the transposed matrix, i.e. the surface for the swapped sequences.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j]);
            }
        }
        Self::from_parts(self.cols, self.rows, data)
    }

    /// Return the bottom-right cell, the DTW distance between the full sequences.
    ///
    /// `None` when the matrix has a zero dimension.
    #[must_use]
    pub fn distance(&self) -> Option<DtwDistance> {
        self.data.last().copied().map(DtwDistance::new)
    }

    /// Backtrack the optimal alignment path through this surface.
    ///
    /// See [`warping_path`](crate::warping_path).
    ///
    /// # Errors
    ///
    /// Returns [`DtwError::EmptyMatrix`] if either dimension is zero.
    pub fn path(&self) -> Result<AlignmentPath, DtwError> {
        path::warping_path(self)
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f32;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds for {}x{}", self.rows, self.cols);
        &self.data[i * self.cols + j]
    }
}
