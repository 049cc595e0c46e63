//! Optimal alignment path recovery from a cost surface.

use crate::error::DtwError;
use crate::matrix::CostMatrix;

/// A single step of an alignment path, pairing index `i` of the first
/// sequence with index `j` of the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathStep {
    /// Index in the first sequence (matrix row).
    pub i: usize,
    /// Index in the second sequence (matrix column).
    pub j: usize,
}

/// An ordered sequence of steps from `(0, 0)` to `(n-1, m-1)`.
///
/// Consecutive steps advance by exactly one of `(1, 0)`, `(0, 1)` or `(1, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentPath(Vec<PathStep>);

impl AlignmentPath {
    /// Return the steps as a slice.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    /// Return the number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path contains no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the steps as `(i, j)` tuples.
    #[must_use]
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.0.iter().map(|s| (s.i, s.j)).collect()
    }

    /// Consume and return the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<PathStep> {
        self.0
    }
}

impl<'a> IntoIterator for &'a AlignmentPath {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Predecessor chosen during backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Diagonal,
    Up,
    Left,
}

/// Pick the cheapest in-bounds predecessor of `(i, j)`.
///
/// Candidates are checked diagonal, up, left and only a strictly smaller cost
/// replaces the current choice, so ties resolve to diagonal over up over left.
fn best_move(matrix: &CostMatrix, i: usize, j: usize) -> Move {
    if i == 0 {
        return Move::Left;
    }
    if j == 0 {
        return Move::Up;
    }

    let mut best = Move::Diagonal;
    let mut best_cost = matrix.get(i - 1, j - 1);

    let up = matrix.get(i - 1, j);
    if up < best_cost {
        best = Move::Up;
        best_cost = up;
    }

    let left = matrix.get(i, j - 1);
    if left < best_cost {
        best = Move::Left;
    }

    best
}

/// Walk a non-empty surface backward from the last cell to the origin.
pub(crate) fn trace(matrix: &CostMatrix) -> AlignmentPath {
    let (rows, cols) = matrix.shape();
    debug_assert!(rows > 0 && cols > 0);

    let mut steps = Vec::with_capacity(rows + cols - 1);
    let mut i = rows - 1;
    let mut j = cols - 1;
    steps.push(PathStep { i, j });

    while i > 0 || j > 0 {
        match best_move(matrix, i, j) {
            Move::Diagonal => {
                i -= 1;
                j -= 1;
            }
            Move::Up => i -= 1,
            Move::Left => j -= 1,
        }
        steps.push(PathStep { i, j });
    }

    steps.reverse();
    AlignmentPath(steps)
}

/// Recover the optimal alignment path from a fully populated cost surface.
///
/// Costs are only read, never recomputed, so any surface that follows the DTW
/// recurrence is accepted. The returned path runs from `(0, 0)` to
/// `(rows-1, cols-1)` and has between `max(rows, cols)` and `rows + cols - 1`
/// steps.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DtwError::EmptyMatrix`] | `matrix` has zero rows or zero columns |
pub fn warping_path(matrix: &CostMatrix) -> Result<AlignmentPath, DtwError> {
    if matrix.is_empty() {
        return Err(DtwError::EmptyMatrix {
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }
    Ok(trace(matrix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: usize, cols: usize, data: &[f32]) -> CostMatrix {
        CostMatrix::from_raw(rows, cols, data.to_vec()).unwrap()
    }

    fn steps(pairs: &[(usize, usize)]) -> Vec<PathStep> {
        pairs.iter().map(|&(i, j)| PathStep { i, j }).collect()
    }

    #[test]
    fn rejects_zero_rows_and_zero_cols() {
        let no_rows = matrix(0, 3, &[]);
        assert!(matches!(
            warping_path(&no_rows),
            Err(DtwError::EmptyMatrix { rows: 0, cols: 3 })
        ));
        let no_cols = matrix(2, 0, &[]);
        assert!(matches!(
            warping_path(&no_cols),
            Err(DtwError::EmptyMatrix { rows: 2, cols: 0 })
        ));
    }

    #[test]
    fn single_cell() {
        let path = warping_path(&matrix(1, 1, &[7.0])).unwrap();
        assert_eq!(path.pairs(), vec![(0, 0)]);
    }

    #[test]
    fn single_row_walks_left() {
        let path = warping_path(&matrix(1, 4, &[1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(path.pairs(), vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn single_column_walks_up() {
        let path = warping_path(&matrix(3, 1, &[1.0, 2.0, 3.0])).unwrap();
        assert_eq!(path.pairs(), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn three_way_tie_prefers_diagonal() {
        // All predecessors of (1, 1) cost the same.
        let path = warping_path(&matrix(2, 2, &[1.0, 1.0, 1.0, 5.0])).unwrap();
        assert_eq!(path.steps(), steps(&[(0, 0), (1, 1)]).as_slice());
    }

    #[test]
    fn up_left_tie_prefers_up() {
        // From (1, 1): diagonal 9, up 2, left 2.
        let path = warping_path(&matrix(2, 2, &[9.0, 2.0, 2.0, 5.0])).unwrap();
        assert_eq!(path.pairs(), vec![(0, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn strictly_smaller_left_wins() {
        // From (1, 1): diagonal 9, up 3, left 2.
        let path = warping_path(&matrix(2, 2, &[9.0, 3.0, 2.0, 5.0])).unwrap();
        assert_eq!(path.pairs(), vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn reference_surface() {
        let m = matrix(
            5,
            3,
            &[
                1.0, 5.0, 14.0, //
                1.0, 2.0, 6.0, //
                2.0, 1.0, 2.0, //
                6.0, 2.0, 1.0, //
                15.0, 6.0, 2.0,
            ],
        );
        let path = m.path().unwrap();
        assert_eq!(path.pairs(), vec![(0, 0), (1, 0), (2, 1), (3, 2), (4, 2)]);
        assert_eq!(path.len(), 5);
        assert!(!path.is_empty());
    }

    #[test]
    fn iterates_in_order() {
        let path = warping_path(&matrix(2, 2, &[0.0, 1.0, 1.0, 0.0])).unwrap();
        let collected: Vec<_> = (&path).into_iter().copied().collect();
        assert_eq!(collected, path.clone().into_inner());
    }
}
