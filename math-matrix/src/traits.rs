//! Capability traits shared by every matrix representation
//!
//! - [`Matrix`]: read-only contract (shape, element access, determinant,
//!   trace, materialization and conversions)
//! - [`MatrixMut`]: adds element writes and in-place elementwise arithmetic
//! - [`Norms`]: the norms each representation can report
//!
//! Algorithms that do not care about the storage format take `&dyn Matrix`,
//! so dense, sparse and permutation matrices can be mixed freely.

use std::fmt;

use crate::dense::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::sparse::SparseMatrix;

/// Read-only matrix contract.
///
/// Every implementation renders itself as text through [`fmt::Display`].
pub trait Matrix: fmt::Display {
    /// Number of rows
    fn rows(&self) -> usize;

    /// Number of columns
    fn cols(&self) -> usize;

    /// Number of cells, `rows * cols`
    fn num_elements(&self) -> usize {
        self.rows() * self.cols()
    }

    /// `(rows, cols)`
    fn dimension(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Check if the matrix is square
    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Value at row `i`, column `j`.
    ///
    /// Fails with `IllegalIndex` when `i >= rows` or `j >= cols`.
    fn get(&self, i: usize, j: usize) -> Result<f64>;

    /// Determinant; fails with `DimensionMismatch` on a non-square matrix.
    fn det(&self) -> Result<f64>;

    /// Sum of the main diagonal
    fn trace(&self) -> f64;

    /// All cells, row-major, in a fresh vector.
    fn array(&self) -> Vec<f64>;

    /// All cells as one vector per row.
    fn arrays(&self) -> Vec<Vec<f64>> {
        let cols = self.cols();
        if cols == 0 {
            return vec![Vec::new(); self.rows()];
        }
        self.array().chunks(cols).map(<[f64]>::to_vec).collect()
    }

    /// Dense copy of this matrix.
    fn dense_matrix(&self) -> DenseMatrix;

    /// Sparse copy of this matrix.
    fn sparse_matrix(&self) -> SparseMatrix;
}

/// Mutable matrix contract.
pub trait MatrixMut: Matrix {
    /// Writes `v` at row `i`, column `j`.
    fn set(&mut self, i: usize, j: usize, v: f64) -> Result<()>;

    /// Adds `other` cell by cell.
    fn add(&mut self, other: &dyn Matrix) -> Result<()> {
        self.combine(other, |a, b| a + b)
    }

    /// Subtracts `other` cell by cell.
    fn subtract(&mut self, other: &dyn Matrix) -> Result<()> {
        self.combine(other, |a, b| a - b)
    }

    /// Multiplies every cell by `factor`.
    fn scale(&mut self, factor: f64);

    /// Replaces every cell `a` with `f(a, b)`, `b` being the matching cell of
    /// `other`. Fails with `DimensionMismatch` and leaves `self` untouched if
    /// the shapes differ.
    fn combine(&mut self, other: &dyn Matrix, f: fn(f64, f64) -> f64) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(MatrixError::dimension(self.dimension(), other.dimension()));
        }
        // Snapshot both sides first: `other` may share storage with `self`.
        let lhs = self.array();
        let rhs = other.array();
        let cols = self.cols();
        for (k, (a, b)) in lhs.into_iter().zip(rhs).enumerate() {
            self.set(k / cols, k % cols, f(a, b))?;
        }
        Ok(())
    }
}

/// Matrix norms.
pub trait Norms {
    /// One norm
    fn one_norm(&self) -> f64;

    /// Two norm
    fn two_norm(&self) -> f64;

    /// Infinity norm
    fn infinity_norm(&self) -> f64;
}
