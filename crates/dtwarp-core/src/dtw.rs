//! DTW distance and cost-matrix computation.

use tracing::{debug, instrument};

use crate::cost::{PointwiseCost, SquaredEuclidean};
use crate::distance::DtwDistance;
use crate::matrix::CostMatrix;
use crate::path::{self, AlignmentPath};
use crate::series::SequenceView;

#[inline(always)]
fn min3(a: f32, b: f32, c: f32) -> f32 {
    a.min(b).min(c)
}

/// Immutable DTW calculator. Thread-safe and copyable.
///
/// Both engines evaluate the same recurrence
///
/// ```text
/// D[i][j] = cost(x[i], y[j]) + min(D[i-1][j-1], D[i-1][j], D[i][j-1])
/// ```
///
/// where predecessors outside the grid are excluded from the `min` and
/// `D[0][0]` is the bare cost. Accumulation stays in squared-cost space and
/// the square root is taken once, at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dtw<C = SquaredEuclidean> {
    cost: C,
}

impl Dtw {
    /// Create a calculator using the squared Euclidean sample cost.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cost: SquaredEuclidean,
        }
    }
}

impl<C: PointwiseCost> Dtw<C> {
    /// Create a calculator with a custom sample cost.
    #[must_use]
    pub fn with_cost(cost: C) -> Self {
        Self { cost }
    }

    /// Return the sample cost in use.
    #[must_use]
    pub fn cost(&self) -> C {
        self.cost
    }

    /// Compute the DTW distance between two sequences.
    ///
    /// Keeps only two rows of the table, each as long as the shorter
    /// sequence, so memory is O(min(n, m)) and no path is recoverable. The
    /// result does not depend on argument order.
    #[must_use]
    #[instrument(skip_all, fields(n = a.len(), m = b.len()))]
    pub fn distance(&self, a: SequenceView<'_>, b: SequenceView<'_>) -> DtwDistance {
        let total = self.accumulate_rolling(a.as_slice(), b.as_slice());
        DtwDistance::new(total.sqrt())
    }

    /// Compute the full `n x m` cost surface between two sequences.
    ///
    /// Every cell is square-rooted before returning, so `matrix[i][j]` is the
    /// DTW distance between `a[..=i]` and `b[..=j]` and the bottom-right cell
    /// equals [`distance`][Dtw::distance]. Runs in O(n * m) time and space.
    #[must_use]
    #[instrument(skip_all, fields(n = a.len(), m = b.len()))]
    pub fn cost_matrix(&self, a: SequenceView<'_>, b: SequenceView<'_>) -> CostMatrix {
        let (n, m) = (a.len(), b.len());
        let mut cells = self.accumulate_full(a.as_slice(), b.as_slice());
        for c in &mut cells {
            *c = c.sqrt();
        }
        debug!(cells = n * m, "cost matrix materialized");
        CostMatrix::from_parts(n, m, cells)
    }

    /// Compute the DTW distance and optimal alignment path between two sequences.
    ///
    /// Materializes the full surface via [`cost_matrix`][Dtw::cost_matrix]
    /// and backtracks through it. Use [`distance`][Dtw::distance] when only
    /// the scalar is needed.
    #[must_use]
    pub fn distance_and_path(
        &self,
        a: SequenceView<'_>,
        b: SequenceView<'_>,
    ) -> (DtwDistance, AlignmentPath) {
        let matrix = self.cost_matrix(a, b);
        let path = path::trace(&matrix);
        let dist = matrix.distance().unwrap_or(DtwDistance::ZERO);
        (dist, path)
    }

    /// Rolling two-row accumulation; returns the squared total.
    ///
    /// The longer sequence drives the outer loop and the shorter one sizes
    /// the row buffers. Swapping the roles only relabels the grid axes, and
    /// for a symmetric sample cost every cell sees the same three operands,
    /// so the total is bit-identical either way.
    #[allow(clippy::needless_range_loop)]
    fn accumulate_rolling(&self, a: &[f32], b: &[f32]) -> f32 {
        let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
        let m = inner.len();

        let mut prev = vec![0.0_f32; m];
        let mut curr = vec![0.0_f32; m];

        // First row: only the left predecessor exists.
        let x0 = outer[0];
        prev[0] = self.cost.cost(x0, inner[0]);
        for j in 1..m {
            prev[j] = self.cost.cost(x0, inner[j]) + prev[j - 1];
        }

        for &x in &outer[1..] {
            // First column: only the predecessor above exists.
            curr[0] = self.cost.cost(x, inner[0]) + prev[0];
            for j in 1..m {
                curr[j] = self.cost.cost(x, inner[j]) + min3(prev[j - 1], prev[j], curr[j - 1]);
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        // After the final swap, `prev` holds the last completed row.
        prev[m - 1]
    }

    /// Full-table accumulation; returns the squared `n * m` surface, row-major.
    #[allow(clippy::needless_range_loop)]
    fn accumulate_full(&self, a: &[f32], b: &[f32]) -> Vec<f32> {
        let n = a.len();
        let m = b.len();
        let mut acc = vec![0.0_f32; n * m];

        acc[0] = self.cost.cost(a[0], b[0]);
        for j in 1..m {
            acc[j] = self.cost.cost(a[0], b[j]) + acc[j - 1];
        }

        for i in 1..n {
            let row = i * m;
            let above = row - m;
            acc[row] = self.cost.cost(a[i], b[0]) + acc[above];
            for j in 1..m {
                acc[row + j] = self.cost.cost(a[i], b[j])
                    + min3(acc[above + j - 1], acc[above + j], acc[row + j - 1]);
            }
        }

        acc
    }
}
