//! Dense matrices stored row-major with a configurable row stride.
//!
//! Logical cell `(i, j)` lives at `offset + i * step + j` in the backing
//! storage, with `step >= cols`. A tightly packed matrix has `offset == 0`
//! and `step == cols`; a window into a wider matrix keeps the parent's step.
//!
//! Two constructors sit on the same buffer type:
//! - owning matrices ([`DenseMatrix::zeros`], [`DenseMatrix::copy`], ...)
//!   allocate fresh packed storage,
//! - [`DenseMatrix::window`] hands out another handle onto existing storage,
//!   so writes through the window show up in the source and vice versa.

mod data;
mod ops;
mod storage;

use std::cell::Cell;
use std::fmt;

use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::{MatrixError, Result};
use crate::sparse::SparseMatrix;
use crate::traits::{Matrix, MatrixMut};

use storage::Storage;

/// Dense matrix backed by a flat, strided buffer of `f64`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "PackedDense", into = "PackedDense")
)]
pub struct DenseMatrix {
    storage: Storage,
    /// Position of logical cell (0, 0) in the storage
    offset: usize,
    rows: usize,
    cols: usize,
    /// Distance between the starts of consecutive rows
    step: usize,
}

impl DenseMatrix {
    fn packed(storage: Storage, rows: usize, cols: usize) -> Self {
        Self {
            storage,
            offset: 0,
            rows,
            cols,
            step: cols,
        }
    }

    /// Creates a matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::packed(Storage::filled(rows * cols, 0.0), rows, cols)
    }

    /// Creates a matrix filled with ones.
    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::packed(Storage::filled(rows * cols, 1.0), rows, cols)
    }

    /// Creates the `size x size` identity matrix.
    pub fn identity(size: usize) -> Self {
        let m = Self::zeros(size, size);
        for i in 0..size {
            m.put(i, i, 1.0);
        }
        m
    }

    /// Creates a square matrix with `d` on its main diagonal.
    pub fn diagonal(d: &[f64]) -> Self {
        let m = Self::zeros(d.len(), d.len());
        for (i, &v) in d.iter().enumerate() {
            m.put(i, i, v);
        }
        m
    }

    /// Creates a matrix of standard normal samples drawn from the thread-local RNG.
    pub fn normals(rows: usize, cols: usize) -> Self {
        Self::normals_with_rng(rows, cols, &mut rand::rng())
    }

    /// Creates a matrix of standard normal samples drawn from `rng`.
    pub fn normals_with_rng<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let data = (0..rows * cols)
            .map(|_| rng.sample::<f64, _>(StandardNormal))
            .collect();
        Self::packed(Storage::from_vec(data), rows, cols)
    }

    /// Adopts a row-major buffer of exactly `rows * cols` values.
    pub fn from_vec(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(MatrixError::dimension((rows, cols), (1, data.len())));
        }
        Ok(Self::packed(Storage::from_vec(data), rows, cols))
    }

    /// Stacks equally long rows into a matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for row in rows {
            if row.len() != num_cols {
                return Err(MatrixError::dimension((1, num_cols), (1, row.len())));
            }
            data.extend(row);
        }
        Ok(Self::packed(Storage::from_vec(data), num_rows, num_cols))
    }

    /// Dense copy of any matrix representation.
    pub fn copy_of(m: &dyn Matrix) -> Self {
        Self::packed(Storage::from_vec(m.array()), m.rows(), m.cols())
    }

    /// Offset between consecutive rows in the backing storage.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns `true` if both matrices are handles onto the same storage.
    pub fn shares_storage(&self, other: &DenseMatrix) -> bool {
        self.storage.ptr_eq(&other.storage)
    }

    #[inline]
    fn index_of(&self, i: usize, j: usize) -> usize {
        self.offset + i * self.step + j
    }

    /// Unchecked read; callers guarantee `i < rows` and `j < cols`.
    #[inline]
    pub(crate) fn at(&self, i: usize, j: usize) -> f64 {
        self.storage.get(self.index_of(i, j))
    }

    /// Unchecked write; callers guarantee `i < rows` and `j < cols`.
    #[inline]
    pub(crate) fn put(&self, i: usize, j: usize, v: f64) {
        self.storage.set(self.index_of(i, j), v);
    }

    pub(crate) fn check_index(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.rows || j >= self.cols {
            return Err(MatrixError::index(i, j, self.rows, self.cols));
        }
        Ok(())
    }

    fn check_block(&self, i: usize, j: usize, rows: usize, cols: usize) -> Result<()> {
        MatrixError::check_block((i, j), (rows, cols), (self.rows, self.cols))
    }

    /// Returns a `rows x cols` window starting at `(i, j)` that shares this
    /// matrix's storage.
    ///
    /// Writes through the window are visible here and the other way round.
    /// Use [`DenseMatrix::copy`] on the result to cut the link.
    pub fn window(&self, i: usize, j: usize, rows: usize, cols: usize) -> Result<DenseMatrix> {
        self.check_block(i, j, rows, cols)?;
        Ok(DenseMatrix {
            storage: self.storage.share(),
            offset: self.index_of(i, j),
            rows,
            cols,
            step: self.step,
        })
    }

    /// Extracts a `rows x cols` block starting at `(i, j)` into fresh storage.
    pub fn sub_matrix(&self, i: usize, j: usize, rows: usize, cols: usize) -> Result<DenseMatrix> {
        self.check_block(i, j, rows, cols)?;
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            data.extend((0..cols).map(|c| self.at(i + r, j + c)));
        }
        Ok(Self::packed(Storage::from_vec(data), rows, cols))
    }

    /// Copies `a` into this matrix so that `a`'s `(0, 0)` lands on `(i, j)`.
    pub fn set_matrix(&mut self, i: usize, j: usize, a: &DenseMatrix) -> Result<()> {
        self.check_block(i, j, a.rows, a.cols)?;
        // `a` may be a window onto this very storage
        let values = a.array();
        for r in 0..a.rows {
            for c in 0..a.cols {
                self.put(i + r, j + c, values[r * a.cols + c]);
            }
        }
        Ok(())
    }

    /// Extracts column `j` as an `rows x 1` matrix.
    pub fn col_vector(&self, j: usize) -> Result<DenseMatrix> {
        self.sub_matrix(0, j, self.rows, 1)
    }

    /// Extracts row `i` as a `1 x cols` matrix.
    pub fn row_vector(&self, i: usize) -> Result<DenseMatrix> {
        self.sub_matrix(i, 0, 1, self.cols)
    }

    /// Independent, tightly packed copy.
    pub fn copy(&self) -> DenseMatrix {
        Self::packed(Storage::from_vec(self.array()), self.rows, self.cols)
    }

    /// Returns `[self, a]`.
    pub fn augment(&self, a: &DenseMatrix) -> Result<DenseMatrix> {
        if self.rows != a.rows {
            return Err(MatrixError::dimension((self.rows, a.cols), a.dimension()));
        }
        let mut b = Self::zeros(self.rows, self.cols + a.cols);
        self.augment_fill(a, &mut b)?;
        Ok(b)
    }

    /// Returns `[self; a]`, with `self` above `a`.
    pub fn stack(&self, a: &DenseMatrix) -> Result<DenseMatrix> {
        if self.cols != a.cols {
            return Err(MatrixError::dimension((a.rows, self.cols), a.dimension()));
        }
        let mut b = Self::zeros(self.rows + a.rows, self.cols);
        self.stack_fill(a, &mut b)?;
        Ok(b)
    }

    /// Writes `[self, a]` into `b`, which must already have the combined shape.
    pub fn augment_fill(&self, a: &DenseMatrix, b: &mut DenseMatrix) -> Result<()> {
        let expected = (self.rows, self.cols + a.cols);
        if self.rows != a.rows {
            return Err(MatrixError::dimension((self.rows, a.cols), a.dimension()));
        }
        if b.dimension() != expected {
            return Err(MatrixError::dimension(expected, b.dimension()));
        }
        b.set_matrix(0, 0, self)?;
        b.set_matrix(0, self.cols, a)
    }

    /// Writes `[self; a]` into `b`, which must already have the combined shape.
    pub fn stack_fill(&self, a: &DenseMatrix, b: &mut DenseMatrix) -> Result<()> {
        let expected = (self.rows + a.rows, self.cols);
        if self.cols != a.cols {
            return Err(MatrixError::dimension((a.rows, self.cols), a.dimension()));
        }
        if b.dimension() != expected {
            return Err(MatrixError::dimension(expected, b.dimension()));
        }
        b.set_matrix(0, 0, self)?;
        b.set_matrix(self.rows, 0, a)
    }

    /// Row `i` as cells of the backing storage.
    ///
    /// Setting a cell writes straight into this matrix (and every window
    /// sharing its storage).
    pub fn row_cells(&self, i: usize) -> Result<&[Cell<f64>]> {
        if i >= self.rows {
            return Err(MatrixError::index(i, 0, self.rows, self.cols));
        }
        Ok(self.storage.cells(self.index_of(i, 0), self.cols))
    }
}

impl Matrix for DenseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn get(&self, i: usize, j: usize) -> Result<f64> {
        self.check_index(i, j)?;
        Ok(self.at(i, j))
    }

    fn det(&self) -> Result<f64> {
        self.determinant()
    }

    fn trace(&self) -> f64 {
        self.diagonal_copy().iter().sum()
    }

    fn array(&self) -> Vec<f64> {
        if self.offset == 0 && self.step == self.cols && self.storage.len() == self.rows * self.cols
        {
            return (0..self.storage.len()).map(|k| self.storage.get(k)).collect();
        }
        let mut a = Vec::with_capacity(self.rows * self.cols);
        for i in 0..self.rows {
            a.extend((0..self.cols).map(|j| self.at(i, j)));
        }
        a
    }

    fn dense_matrix(&self) -> DenseMatrix {
        self.copy()
    }

    fn sparse_matrix(&self) -> SparseMatrix {
        let mut s = SparseMatrix::zeros(self.rows, self.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                let v = self.at(i, j);
                if v != 0.0 {
                    s.insert(i, j, v);
                }
            }
        }
        s
    }
}

impl MatrixMut for DenseMatrix {
    fn set(&mut self, i: usize, j: usize, v: f64) -> Result<()> {
        self.check_index(i, j)?;
        self.put(i, j, v);
        Ok(())
    }

    fn scale(&mut self, factor: f64) {
        for i in 0..self.rows {
            for j in 0..self.cols {
                self.put(i, j, self.at(i, j) * factor);
            }
        }
    }
}

/// Deep copy; use [`DenseMatrix::window`] for a handle that shares storage.
impl Clone for DenseMatrix {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl fmt::Debug for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseMatrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("step", &self.step)
            .field("data", &self.array())
            .finish()
    }
}

impl PartialEq for DenseMatrix {
    fn eq(&self, other: &Self) -> bool {
        crate::arithmetic::equals(self, other)
    }
}

#[cfg(feature = "ndarray")]
impl From<&ndarray::Array2<f64>> for DenseMatrix {
    fn from(a: &ndarray::Array2<f64>) -> Self {
        let (rows, cols) = a.dim();
        Self::packed(Storage::from_vec(a.iter().copied().collect()), rows, cols)
    }
}

#[cfg(feature = "ndarray")]
impl DenseMatrix {
    /// Copies this matrix into an owned `ndarray` array.
    pub fn to_array2(&self) -> ndarray::Array2<f64> {
        ndarray::Array2::from_shape_fn((self.rows, self.cols), |(i, j)| self.at(i, j))
    }
}

/// Serialized form of a dense matrix: always tightly packed.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PackedDense {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

#[cfg(feature = "serde")]
impl From<DenseMatrix> for PackedDense {
    fn from(m: DenseMatrix) -> Self {
        Self {
            rows: m.rows,
            cols: m.cols,
            data: m.array(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<PackedDense> for DenseMatrix {
    type Error = MatrixError;

    fn try_from(p: PackedDense) -> Result<Self> {
        DenseMatrix::from_vec(p.data, p.rows, p.cols)
    }
}
