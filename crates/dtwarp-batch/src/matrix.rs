//! Lower-triangular distance matrix for pairwise DTW distances.

use dtwarp_core::DtwDistance;

/// Symmetric distance matrix stored as a lower-triangular flat vector.
///
/// For `n` sequences, stores `n*(n-1)/2` distances. Access is symmetric:
/// `get(i, j) == get(j, i)`. Diagonal is always zero.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<DtwDistance>,
}

/// Position of the pair `(row, col)`, `row > col`, in the flat lower triangle.
pub(crate) fn flat_index(row: usize, col: usize) -> usize {
    row * (row - 1) / 2 + col
}

/// Inverse of [`flat_index`]: recover `(row, col)` with `row > col`.
pub(crate) fn pair_from_flat(flat: usize) -> (usize, usize) {
    // row = floor((1 + sqrt(1 + 8*flat)) / 2), then nudged to absorb
    // rounding in the square root for very large indices.
    let mut row = ((1.0 + (1.0 + 8.0 * flat as f64).sqrt()) / 2.0).floor() as usize;
    while row * (row - 1) / 2 > flat {
        row -= 1;
    }
    while (row + 1) * row / 2 <= flat {
        row += 1;
    }
    (row, flat - row * (row - 1) / 2)
}

impl DistanceMatrix {
    /// `data` must contain exactly `n*(n-1)/2` elements, stored as
    /// `data[row*(row-1)/2 + col]` where `row > col`.
    pub(crate) fn from_raw(n: usize, data: Vec<DtwDistance>) -> Self {
        debug_assert_eq!(data.len(), n * n.saturating_sub(1) / 2);
        Self { n, data }
    }

    /// Return the number of sequences in the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Return true if the matrix covers no sequences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Return the distance between sequence `i` and sequence `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n` or `j >= n`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> DtwDistance {
        assert!(i < self.n, "row index {i} out of bounds for matrix of size {}", self.n);
        assert!(j < self.n, "column index {j} out of bounds for matrix of size {}", self.n);
        if i == j {
            return DtwDistance::ZERO;
        }
        let (row, col) = if i > j { (i, j) } else { (j, i) };
        self.data[flat_index(row, col)]
    }

    /// Iterate over all unique pairs `(i, j, distance)` where `i > j`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, DtwDistance)> + '_ {
        self.data.iter().enumerate().map(|(flat, &d)| {
            let (i, j) = pair_from_flat(flat);
            (i, j, d)
        })
    }

    /// Return all distances from sequence `i` to every sequence, itself included.
    #[must_use]
    pub fn row(&self, i: usize) -> Vec<DtwDistance> {
        (0..self.n).map(|j| self.get(i, j)).collect()
    }

    /// Mean of row `i`, counting the zero self-distance.
    #[must_use]
    pub fn row_mean(&self, i: usize) -> f32 {
        let sum: f32 = self.row(i).iter().map(|d| d.value()).sum();
        sum / self.n as f32
    }

    /// Expand to a dense, symmetric `n x n` matrix of raw values.
    #[must_use]
    pub fn to_square(&self) -> Vec<Vec<f32>> {
        (0..self.n)
            .map(|i| self.row(i).into_iter().map(DtwDistance::value).collect())
            .collect()
    }
}
