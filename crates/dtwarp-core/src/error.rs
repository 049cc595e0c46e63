//! Error types for the DTW kernel.

/// Errors from sequence validation and path backtracking.
#[derive(Debug, thiserror::Error)]
pub enum DtwError {
    /// Returned when an empty slice is provided as a sequence.
    #[error("sequence must be non-empty")]
    EmptySequence,

    /// Returned when a sequence contains NaN, infinity, or negative infinity.
    #[error("sequence contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },

    /// Returned when a path is requested from a cost matrix with a zero dimension.
    #[error("cannot trace a path through a {rows}x{cols} cost matrix")]
    EmptyMatrix {
        /// Number of rows in the supplied matrix.
        rows: usize,
        /// Number of columns in the supplied matrix.
        cols: usize,
    },

    /// Returned when raw matrix data does not hold exactly `rows * cols` cells.
    #[error("cost matrix data has {len} cells, expected {rows}x{cols}")]
    ShapeMismatch {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        cols: usize,
        /// Length of the supplied data.
        len: usize,
    },
}
