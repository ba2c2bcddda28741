//! Bulk row, column and diagonal access, plus the row operations used by
//! the elimination kernels.

use super::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::traits::Matrix;

impl DenseMatrix {
    fn check_row(&self, i: usize) -> Result<()> {
        if i >= self.rows {
            return Err(MatrixError::index(i, 0, self.rows, self.cols));
        }
        Ok(())
    }

    fn check_col(&self, j: usize) -> Result<()> {
        if j >= self.cols {
            return Err(MatrixError::index(0, j, self.rows, self.cols));
        }
        Ok(())
    }

    fn check_buffer(expected: usize, got: usize) -> Result<()> {
        if expected != got {
            return Err(MatrixError::dimension((1, expected), (1, got)));
        }
        Ok(())
    }

    fn span(&self) -> usize {
        self.rows.min(self.cols)
    }

    pub(crate) fn load_row(&self, i: usize, buf: &mut [f64]) {
        for (j, b) in buf.iter_mut().enumerate().take(self.cols) {
            *b = self.at(i, j);
        }
    }

    pub(crate) fn load_col(&self, j: usize, buf: &mut [f64]) {
        for (i, b) in buf.iter_mut().enumerate().take(self.rows) {
            *b = self.at(i, j);
        }
    }

    pub(crate) fn exchange_rows(&self, r1: usize, r2: usize) {
        if r1 == r2 {
            return;
        }
        for j in 0..self.cols {
            self.storage
                .swap(self.index_of(r1, j), self.index_of(r2, j));
        }
    }

    pub(crate) fn scale_row_unchecked(&self, r: usize, f: f64) {
        for j in 0..self.cols {
            self.put(r, j, self.at(r, j) * f);
        }
    }

    pub(crate) fn scale_add_row_unchecked(&self, rd: usize, rs: usize, f: f64) {
        for j in 0..self.cols {
            self.put(rd, j, self.at(rd, j) + f * self.at(rs, j));
        }
    }

    /// Copy of row `i`.
    pub fn row_copy(&self, i: usize) -> Result<Vec<f64>> {
        self.check_row(i)?;
        let mut row = vec![0.0; self.cols];
        self.load_row(i, &mut row);
        Ok(row)
    }

    /// Copy of column `j`.
    pub fn col_copy(&self, j: usize) -> Result<Vec<f64>> {
        self.check_col(j)?;
        let mut col = vec![0.0; self.rows];
        self.load_col(j, &mut col);
        Ok(col)
    }

    /// Copy of the main diagonal, `min(rows, cols)` long.
    pub fn diagonal_copy(&self) -> Vec<f64> {
        (0..self.span()).map(|i| self.at(i, i)).collect()
    }

    /// Reads row `i` into `buf`, which must hold exactly `cols` values.
    pub fn buffer_row(&self, i: usize, buf: &mut [f64]) -> Result<()> {
        self.check_row(i)?;
        Self::check_buffer(self.cols, buf.len())?;
        self.load_row(i, buf);
        Ok(())
    }

    /// Reads column `j` into `buf`, which must hold exactly `rows` values.
    pub fn buffer_col(&self, j: usize, buf: &mut [f64]) -> Result<()> {
        self.check_col(j)?;
        Self::check_buffer(self.rows, buf.len())?;
        self.load_col(j, buf);
        Ok(())
    }

    /// Reads the main diagonal into `buf`.
    pub fn buffer_diagonal(&self, buf: &mut [f64]) -> Result<()> {
        Self::check_buffer(self.span(), buf.len())?;
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.at(i, i);
        }
        Ok(())
    }

    /// Overwrites row `i` with `buf`.
    pub fn fill_row(&mut self, i: usize, buf: &[f64]) -> Result<()> {
        self.check_row(i)?;
        Self::check_buffer(self.cols, buf.len())?;
        for (j, &v) in buf.iter().enumerate() {
            self.put(i, j, v);
        }
        Ok(())
    }

    /// Overwrites column `j` with `buf`.
    pub fn fill_col(&mut self, j: usize, buf: &[f64]) -> Result<()> {
        self.check_col(j)?;
        Self::check_buffer(self.rows, buf.len())?;
        for (i, &v) in buf.iter().enumerate() {
            self.put(i, j, v);
        }
        Ok(())
    }

    /// Overwrites the main diagonal with `buf`.
    pub fn fill_diagonal(&mut self, buf: &[f64]) -> Result<()> {
        Self::check_buffer(self.span(), buf.len())?;
        for (i, &v) in buf.iter().enumerate() {
            self.put(i, i, v);
        }
        Ok(())
    }

    /// Swaps rows `r1` and `r2` in place.
    pub fn swap_rows(&mut self, r1: usize, r2: usize) -> Result<()> {
        self.check_row(r1)?;
        self.check_row(r2)?;
        self.exchange_rows(r1, r2);
        Ok(())
    }

    /// Multiplies row `r` by `f`.
    pub fn scale_row(&mut self, r: usize, f: f64) -> Result<()> {
        self.check_row(r)?;
        self.scale_row_unchecked(r, f);
        Ok(())
    }

    /// Adds `f` times row `rs` to row `rd`.
    pub fn scale_add_row(&mut self, rd: usize, rs: usize, f: f64) -> Result<()> {
        self.check_row(rd)?;
        self.check_row(rs)?;
        self.scale_add_row_unchecked(rd, rs, f);
        Ok(())
    }

    /// Returns `true` if the matrix is square and equal to its transpose.
    pub fn symmetric(&self) -> bool {
        self.is_square() && (0..self.rows).all(|i| (0..i).all(|j| self.at(i, j) == self.at(j, i)))
    }
}
