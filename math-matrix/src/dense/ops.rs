//! Norms, transposition, determinant and products for dense matrices.

use super::DenseMatrix;
use crate::direct::lu_factorize;
use crate::error::{MatrixError, Result};
use crate::traits::{Matrix, Norms};

impl DenseMatrix {
    pub(crate) fn determinant(&self) -> Result<f64> {
        if !self.is_square() {
            return Err(MatrixError::dimension(
                (self.rows, self.rows),
                self.dimension(),
            ));
        }
        Ok(lu_factorize(self).det())
    }

    /// Returns a new `cols x rows` matrix.
    pub fn transpose(&self) -> DenseMatrix {
        let t = DenseMatrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t.put(j, i, self.at(i, j));
            }
        }
        t
    }

    /// Transposes a square matrix in place.
    pub fn transpose_in_place(&mut self) -> Result<()> {
        if !self.is_square() {
            return Err(MatrixError::dimension(
                (self.rows, self.rows),
                self.dimension(),
            ));
        }
        for i in 0..self.rows {
            for j in 0..i {
                self.storage
                    .swap(self.index_of(i, j), self.index_of(j, i));
            }
        }
        Ok(())
    }

    /// Matrix product `self * b`.
    pub fn times(&self, b: &dyn Matrix) -> Result<DenseMatrix> {
        crate::arithmetic::times(self, b)
    }
}

/// These keep the historical definitions of this library: the "one norm" is
/// the largest cell value (never below zero) and the "infinity norm" is the
/// plain sum of every cell. The two norm is the Frobenius norm.
impl Norms for DenseMatrix {
    fn one_norm(&self) -> f64 {
        self.array().into_iter().fold(0.0, f64::max)
    }

    fn two_norm(&self) -> f64 {
        self.array().iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    fn infinity_norm(&self) -> f64 {
        self.array().iter().sum()
    }
}
