//! Error types for matrix operations.
//!
//! Every fallible operation in this crate returns [`Result`], including
//! out-of-bounds element access. Nothing in the library aborts the process.

use thiserror::Error;

/// Errors that can occur while building, indexing or factoring matrices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// An operation received an absent matrix where one was required.
    #[error("matrix is nil")]
    NilMatrix,

    /// A sparse lookup of a required entry found nothing stored.
    #[error("element {index} does not exist in the sparse matrix")]
    NilElement {
        /// Linear index that was looked up
        index: usize,
    },

    /// Operand shapes are incompatible.
    #[error(
        "input dimensions do not match: expected {}x{}, got {}x{}",
        .expected.0, .expected.1, .got.0, .got.1
    )]
    DimensionMismatch {
        /// Shape the operation required
        expected: (usize, usize),
        /// Shape it received
        got: (usize, usize),
    },

    /// An index or sub-range lies outside the matrix.
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IllegalIndex {
        /// Offending row (or end row of a requested range)
        row: usize,
        /// Offending column (or end column of a requested range)
        col: usize,
        /// Row count of the matrix
        rows: usize,
        /// Column count of the matrix
        cols: usize,
    },

    /// A zero pivot was met where a nonzero one is required.
    #[error("matrix is singular")]
    Singular,

    /// The matrix is not positive semidefinite.
    #[error("matrix is not positive semidefinite")]
    NotPositiveSemidefinite,
}

/// A specialized `Result` type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

impl MatrixError {
    pub(crate) fn dimension(expected: (usize, usize), got: (usize, usize)) -> Self {
        MatrixError::DimensionMismatch { expected, got }
    }

    pub(crate) fn index(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        MatrixError::IllegalIndex {
            row,
            col,
            rows,
            cols,
        }
    }

    /// Bounds check for the `rows x cols` block at `(i, j)` of a
    /// `bound_rows x bound_cols` matrix. Overflowing corners are rejected.
    pub(crate) fn check_block(
        (i, j): (usize, usize),
        (rows, cols): (usize, usize),
        (bound_rows, bound_cols): (usize, usize),
    ) -> Result<()> {
        let past_rows = i.checked_add(rows).is_none_or(|end| end > bound_rows);
        let past_cols = j.checked_add(cols).is_none_or(|end| end > bound_cols);
        if past_rows || past_cols {
            return Err(MatrixError::index(
                i.saturating_add(rows),
                j.saturating_add(cols),
                bound_rows,
                bound_cols,
            ));
        }
        Ok(())
    }

    /// Returns `true` if this is a shape-compatibility error.
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, MatrixError::DimensionMismatch { .. })
    }

    /// Returns `true` if this is an indexing error.
    ///
    /// This includes `IllegalIndex` and `NilElement`.
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            MatrixError::IllegalIndex { .. } | MatrixError::NilElement { .. }
        )
    }

    /// Returns `true` if the operation failed on a degenerate matrix.
    ///
    /// This includes `Singular` and `NotPositiveSemidefinite`.
    pub fn is_singular(&self) -> bool {
        matches!(
            self,
            MatrixError::Singular | MatrixError::NotPositiveSemidefinite
        )
    }
}
