//! Hash-map backed sparse matrix.
//!
//! Entries are keyed by a linear index `i * step + j + offset`; a key that is
//! absent stands for an implicit zero. No stored value is ever exactly zero:
//! writing zero removes the key, so the map size is the nonzero count.
//!
//! `offset` and `step` let one map be addressed through a window (see
//! [`SparseMatrix::into_window`]). Keys outside the current window stay in the
//! map but are invisible to every accessor.

use std::collections::HashMap;

use rand::Rng;
use rand_distr::StandardNormal;

use crate::dense::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::traits::{Matrix, MatrixMut, Norms};

/// Sparse matrix storing only its nonzero cells.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "PackedSparse", into = "PackedSparse")
)]
pub struct SparseMatrix {
    elements: HashMap<usize, f64>,
    rows: usize,
    cols: usize,
    /// Linear index of logical cell (0, 0)
    offset: usize,
    /// Analogous to the dense row stride
    step: usize,
}

impl SparseMatrix {
    /// Creates an all-zero matrix (an empty map).
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            elements: HashMap::new(),
            rows,
            cols,
            offset: 0,
            step: cols,
        }
    }

    /// Builds a matrix from raw linear-index entries.
    ///
    /// Zero values are dropped; keys outside `rows * cols` are rejected.
    pub fn from_elements(elements: HashMap<usize, f64>, rows: usize, cols: usize) -> Result<Self> {
        let mut m = Self::zeros(rows, cols);
        for (index, value) in elements {
            m.set_value(index, value)?;
        }
        Ok(m)
    }

    /// Creates a matrix with every cell set to one.
    pub fn ones(rows: usize, cols: usize) -> Self {
        let mut m = Self::zeros(rows, cols);
        m.elements.extend((0..rows * cols).map(|index| (index, 1.0)));
        m
    }

    /// Creates the `size x size` identity matrix.
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size, size);
        for i in 0..size {
            m.insert(i, i, 1.0);
        }
        m
    }

    /// Creates a square matrix with `d` on its main diagonal.
    pub fn diagonal(d: &[f64]) -> Self {
        let mut m = Self::zeros(d.len(), d.len());
        for (i, &v) in d.iter().enumerate() {
            m.insert(i, i, v);
        }
        m
    }

    /// Creates a matrix of standard normal samples drawn from the thread-local RNG.
    pub fn normals(rows: usize, cols: usize) -> Self {
        Self::normals_with_rng(rows, cols, &mut rand::rng())
    }

    /// Creates a matrix of standard normal samples drawn from `rng`.
    pub fn normals_with_rng<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let mut m = Self::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                m.insert(i, j, rng.sample::<f64, _>(StandardNormal));
            }
        }
        m
    }

    /// Sparse copy of any matrix representation.
    ///
    /// Each source converts itself, so sparse and permutation inputs cost
    /// time proportional to their nonzeros.
    pub fn copy_of(m: &dyn Matrix) -> Self {
        m.sparse_matrix()
    }

    /// Number of stored entries inside the current window.
    pub fn nnz(&self) -> usize {
        self.indices().count()
    }

    #[inline]
    fn index_of(&self, i: usize, j: usize) -> usize {
        i * self.step + j + self.offset
    }

    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        if self.rows == 0 || self.cols == 0 || index < self.offset {
            return None;
        }
        let rel = index - self.offset;
        let (i, j) = (rel / self.step, rel % self.step);
        (i < self.rows && j < self.cols).then_some((i, j))
    }

    fn illegal_linear(&self, index: usize) -> MatrixError {
        let rel = index.saturating_sub(self.offset);
        let step = self.step.max(1);
        MatrixError::index(rel / step, rel % step, self.rows, self.cols)
    }

    fn check_index(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.rows || j >= self.cols {
            return Err(MatrixError::index(i, j, self.rows, self.cols));
        }
        Ok(())
    }

    /// Stores `v` at `(i, j)` without bounds checks; zero removes the entry.
    pub(crate) fn insert(&mut self, i: usize, j: usize, v: f64) {
        let index = self.index_of(i, j);
        self.store(index, v);
    }

    fn store(&mut self, index: usize, v: f64) {
        if v == 0.0 {
            self.elements.remove(&index);
        } else {
            self.elements.insert(index, v);
        }
    }

    /// Recovers `(i, j)` from a linear index.
    pub fn get_row_col_index(&self, index: usize) -> Result<(usize, usize)> {
        self.locate(index).ok_or_else(|| self.illegal_linear(index))
    }

    /// Row part of [`SparseMatrix::get_row_col_index`].
    pub fn get_row_index(&self, index: usize) -> Result<usize> {
        self.get_row_col_index(index).map(|(i, _)| i)
    }

    /// Column part of [`SparseMatrix::get_row_col_index`].
    pub fn get_col_index(&self, index: usize) -> Result<usize> {
        self.get_row_col_index(index).map(|(_, j)| j)
    }

    /// Returns `true` if an entry is actually stored at `(i, j)`.
    ///
    /// Unlike [`Matrix::get`], this distinguishes a stored value from an
    /// implicit zero.
    pub fn exist(&self, i: usize, j: usize) -> Result<bool> {
        self.check_index(i, j)?;
        Ok(self.elements.contains_key(&self.index_of(i, j)))
    }

    /// Looks up an entry by linear index; absence is an error here.
    pub fn get_value(&self, index: usize) -> Result<f64> {
        self.get_row_col_index(index)?;
        self.elements
            .get(&index)
            .copied()
            .ok_or(MatrixError::NilElement { index })
    }

    /// Writes an entry by linear index; zero removes it.
    pub fn set_value(&mut self, index: usize, v: f64) -> Result<()> {
        self.get_row_col_index(index)?;
        self.store(index, v);
        Ok(())
    }

    /// Linear indices of the stored entries inside the current window.
    ///
    /// The order follows the map and is unspecified.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.elements
            .keys()
            .copied()
            .filter(move |&index| self.locate(index).is_some())
    }

    /// Stored entries inside the current window as `((i, j), value)`.
    pub fn entries(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.elements
            .iter()
            .filter_map(move |(&index, &v)| self.locate(index).map(|ij| (ij, v)))
    }

    /// Re-addresses this matrix as its `rows x cols` block at `(i, j)`.
    ///
    /// The map moves into the result unchanged; only `offset` and the
    /// dimensions are updated.
    pub fn into_window(self, i: usize, j: usize, rows: usize, cols: usize) -> Result<Self> {
        MatrixError::check_block((i, j), (rows, cols), (self.rows, self.cols))?;
        let offset = self.index_of(i, j);
        Ok(Self {
            offset,
            rows,
            cols,
            ..self
        })
    }

    /// Copies the `rows x cols` block at `(i, j)` into a new matrix.
    pub fn sub_matrix(&self, i: usize, j: usize, rows: usize, cols: usize) -> Result<Self> {
        MatrixError::check_block((i, j), (rows, cols), (self.rows, self.cols))?;
        let mut s = Self::zeros(rows, cols);
        for ((r, c), v) in self.entries() {
            if (i..i + rows).contains(&r) && (j..j + cols).contains(&c) {
                s.insert(r - i, c - j, v);
            }
        }
        Ok(s)
    }

    /// Copies column `j` into a `rows x 1` matrix.
    pub fn col_vector(&self, j: usize) -> Result<Self> {
        self.sub_matrix(0, j, self.rows, 1)
    }

    /// Copies row `i` into a `1 x cols` matrix.
    pub fn row_vector(&self, i: usize) -> Result<Self> {
        self.sub_matrix(i, 0, 1, self.cols)
    }

    /// Returns `[self, b]`.
    pub fn augment(&self, b: &SparseMatrix) -> Result<Self> {
        if self.rows != b.rows {
            return Err(MatrixError::dimension((self.rows, b.cols), b.dimension()));
        }
        let mut s = Self::zeros(self.rows, self.cols + b.cols);
        for ((i, j), v) in self.entries() {
            s.insert(i, j, v);
        }
        for ((i, j), v) in b.entries() {
            s.insert(i, j + self.cols, v);
        }
        Ok(s)
    }

    /// Returns `[self; b]`, with `self` above `b`.
    pub fn stack(&self, b: &SparseMatrix) -> Result<Self> {
        if self.cols != b.cols {
            return Err(MatrixError::dimension((b.rows, self.cols), b.dimension()));
        }
        let mut s = Self::zeros(self.rows + b.rows, self.cols);
        for ((i, j), v) in self.entries() {
            s.insert(i, j, v);
        }
        for ((i, j), v) in b.entries() {
            s.insert(i + self.rows, j, v);
        }
        Ok(s)
    }

    fn filtered(&self, keep: impl Fn(usize, usize) -> bool) -> Self {
        let mut s = Self::zeros(self.rows, self.cols);
        for ((i, j), v) in self.entries() {
            if keep(i, j) {
                s.insert(i, j, v);
            }
        }
        s
    }

    /// Lower triangle including the diagonal (`i >= j`).
    pub fn l(&self) -> Self {
        self.filtered(|i, j| i >= j)
    }

    /// Upper triangle including the diagonal (`i <= j`).
    pub fn u(&self) -> Self {
        self.filtered(|i, j| i <= j)
    }

    /// Returns a new `cols x rows` matrix.
    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for ((i, j), v) in self.entries() {
            t.insert(j, i, v);
        }
        t
    }

    /// Packed copy holding only the entries of the current window.
    pub fn copy(&self) -> Self {
        self.filtered(|_, _| true)
    }
}

impl Matrix for SparseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    /// Absent entries read as `0.0`; only out-of-bounds indices fail.
    fn get(&self, i: usize, j: usize) -> Result<f64> {
        self.check_index(i, j)?;
        Ok(self
            .elements
            .get(&self.index_of(i, j))
            .copied()
            .unwrap_or(0.0))
    }

    fn det(&self) -> Result<f64> {
        self.dense_matrix().det()
    }

    fn trace(&self) -> f64 {
        self.entries()
            .filter(|((i, j), _)| i == j)
            .map(|(_, v)| v)
            .sum()
    }

    fn array(&self) -> Vec<f64> {
        let mut a = vec![0.0; self.rows * self.cols];
        for ((i, j), v) in self.entries() {
            a[i * self.cols + j] = v;
        }
        a
    }

    fn dense_matrix(&self) -> DenseMatrix {
        DenseMatrix::copy_of(self)
    }

    fn sparse_matrix(&self) -> SparseMatrix {
        self.copy()
    }
}

impl MatrixMut for SparseMatrix {
    fn set(&mut self, i: usize, j: usize, v: f64) -> Result<()> {
        self.check_index(i, j)?;
        self.insert(i, j, v);
        Ok(())
    }

    fn scale(&mut self, factor: f64) {
        let scaled: Vec<(usize, f64)> = self
            .elements
            .iter()
            .filter(|&(&index, _)| self.locate(index).is_some())
            .map(|(&index, &v)| (index, v * factor))
            .collect();
        for (index, v) in scaled {
            self.store(index, v);
        }
    }
}

/// Same definitions as the dense norms, evaluated over stored entries and
/// the implicit zeros around them.
impl Norms for SparseMatrix {
    fn one_norm(&self) -> f64 {
        self.entries().map(|(_, v)| v).fold(0.0, f64::max)
    }

    fn two_norm(&self) -> f64 {
        self.entries().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    fn infinity_norm(&self) -> f64 {
        self.entries().map(|(_, v)| v).sum()
    }
}

impl PartialEq for SparseMatrix {
    fn eq(&self, other: &Self) -> bool {
        crate::arithmetic::equals(self, other)
    }
}

/// Serialized form: the window's entries re-keyed as `i * cols + j`.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PackedSparse {
    rows: usize,
    cols: usize,
    elements: HashMap<usize, f64>,
}

#[cfg(feature = "serde")]
impl From<SparseMatrix> for PackedSparse {
    fn from(m: SparseMatrix) -> Self {
        let packed = m.copy();
        Self {
            rows: packed.rows,
            cols: packed.cols,
            elements: packed.elements,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<PackedSparse> for SparseMatrix {
    type Error = MatrixError;

    fn try_from(p: PackedSparse) -> Result<Self> {
        SparseMatrix::from_elements(p.elements, p.rows, p.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample() -> SparseMatrix {
        // [1 0 2]
        // [0 3 0]
        // [4 0 5]
        let mut m = SparseMatrix::zeros(3, 3);
        m.set(0, 0, 1.0).unwrap();
        m.set(0, 2, 2.0).unwrap();
        m.set(1, 1, 3.0).unwrap();
        m.set(2, 0, 4.0).unwrap();
        m.set(2, 2, 5.0).unwrap();
        m
    }

    #[test]
    fn test_zeros_is_empty() {
        let z = SparseMatrix::zeros(4, 5);
        assert_eq!(z.nnz(), 0);
        assert_eq!(z.get(3, 4).unwrap(), 0.0);
        assert!(!z.exist(3, 4).unwrap());
    }

    #[test]
    fn test_factories() {
        assert_eq!(SparseMatrix::ones(2, 3).nnz(), 6);
        assert_eq!(SparseMatrix::identity(4).trace(), 4.0);
        let d = SparseMatrix::diagonal(&[1.0, 0.0, 3.0]);
        assert_eq!(d.nnz(), 2);
        assert!(!d.exist(1, 1).unwrap());

        let a = SparseMatrix::normals_with_rng(2, 2, &mut StdRng::seed_from_u64(3));
        let b = SparseMatrix::normals_with_rng(2, 2, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_zero_removes_key() {
        let mut m = SparseMatrix::zeros(2, 2);
        m.set(1, 0, 2.5).unwrap();
        assert!(m.exist(1, 0).unwrap());
        m.set(1, 0, 0.0).unwrap();
        assert!(!m.exist(1, 0).unwrap());
        assert_eq!(m.get(1, 0).unwrap(), 0.0);
        assert_eq!(m.nnz(), 0);
    }

    #[test]
    fn test_bounds() {
        let mut m = sample();
        assert!(m.get(3, 0).unwrap_err().is_index_error());
        assert!(m.set(0, 3, 1.0).unwrap_err().is_index_error());
        assert!(m.exist(5, 5).unwrap_err().is_index_error());
    }

    #[test]
    fn test_linear_index_mapping() {
        let m = sample();
        assert_eq!(m.get_row_col_index(5).unwrap(), (1, 2));
        assert_eq!(m.get_row_index(7).unwrap(), 2);
        assert_eq!(m.get_col_index(7).unwrap(), 1);
        assert!(m.get_row_col_index(9).unwrap_err().is_index_error());
    }

    #[test]
    fn test_get_value_and_set_value() {
        let mut m = sample();
        assert_eq!(m.get_value(4).unwrap(), 3.0);
        assert_eq!(
            m.get_value(1).unwrap_err(),
            MatrixError::NilElement { index: 1 }
        );
        m.set_value(1, 7.0).unwrap();
        assert_eq!(m.get(0, 1).unwrap(), 7.0);
        m.set_value(1, 0.0).unwrap();
        assert!(!m.exist(0, 1).unwrap());
        assert!(m.set_value(9, 1.0).unwrap_err().is_index_error());
    }

    #[test]
    fn test_from_elements() {
        let elements = HashMap::from([(0, 1.0), (3, 0.0), (5, 2.0)]);
        let m = SparseMatrix::from_elements(elements, 2, 3).unwrap();
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.get(1, 2).unwrap(), 2.0);

        let bad = HashMap::from([(6, 1.0)]);
        assert!(SparseMatrix::from_elements(bad, 2, 3).is_err());
    }

    #[test]
    fn test_indices() {
        let m = sample();
        let mut indices: Vec<usize> = m.indices().collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_window_addressing() {
        let w = sample().into_window(1, 1, 2, 2).unwrap();
        assert_eq!(w.dimension(), (2, 2));
        assert_eq!(w.array(), vec![3.0, 0.0, 0.0, 5.0]);
        assert_eq!(w.nnz(), 2);

        let mut indices: Vec<usize> = w.indices().collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![4, 8]);
        assert_eq!(w.get_row_col_index(8).unwrap(), (1, 1));
        assert!(w.get_row_col_index(6).is_err());
        assert!(w.get_row_col_index(0).is_err());

        let c = w.copy();
        assert_eq!(c, w);
        assert_eq!(c.get_row_col_index(3).unwrap(), (1, 1));

        assert!(sample().into_window(2, 2, 2, 1).is_err());
    }

    #[test]
    fn test_window_scale_leaves_outside_untouched() {
        let mut w = sample().into_window(0, 0, 1, 3).unwrap();
        w.scale(2.0);
        assert_eq!(w.array(), vec![2.0, 0.0, 4.0]);
        assert_eq!(w.elements.get(&8), Some(&5.0));
    }

    #[test]
    fn test_scale_by_zero_empties() {
        let mut m = sample();
        m.scale(0.0);
        assert_eq!(m.nnz(), 0);
        assert!(m.elements.is_empty());
    }

    #[test]
    fn test_sub_matrix_and_vectors() {
        let m = sample();
        let s = m.sub_matrix(1, 0, 2, 2).unwrap();
        assert_eq!(s.array(), vec![0.0, 3.0, 4.0, 0.0]);
        assert_eq!(m.col_vector(2).unwrap().array(), vec![2.0, 0.0, 5.0]);
        assert_eq!(m.row_vector(0).unwrap().array(), vec![1.0, 0.0, 2.0]);
        assert!(m.sub_matrix(2, 2, 2, 2).is_err());
    }

    #[test]
    fn test_copy_of_each_representation() {
        let w = sample().into_window(1, 1, 2, 2).unwrap();
        let c = SparseMatrix::copy_of(&w);
        assert_eq!(c, w);
        assert_eq!(c.elements.len(), 2);
        assert_eq!(c.get(1, 1).unwrap(), 5.0);

        let p = crate::perm::PivotMatrix::new(vec![2, 0, 1]).unwrap();
        let c = SparseMatrix::copy_of(&p);
        assert_eq!(c.nnz(), 3);
        assert_eq!(c.get(2, 0).unwrap(), 1.0);

        let d = DenseMatrix::identity(3);
        assert_eq!(SparseMatrix::copy_of(&d), SparseMatrix::identity(3));
    }

    #[test]
    fn test_block_bounds_near_usize_max() {
        let m = sample();
        assert!(m.sub_matrix(usize::MAX, 0, 2, 1).unwrap_err().is_index_error());
        assert!(m.sub_matrix(0, 2, 1, usize::MAX).unwrap_err().is_index_error());
        assert!(m.clone().into_window(0, usize::MAX, 1, 2).unwrap_err().is_index_error());
        assert!(m.clone().into_window(usize::MAX, 0, 1, 1).unwrap_err().is_index_error());
        assert!(m.row_vector(usize::MAX).is_err());
    }

    #[test]
    fn test_augment_and_stack() {
        let a = SparseMatrix::identity(2);
        let b = SparseMatrix::ones(2, 1);
        let ab = a.augment(&b).unwrap();
        assert_eq!(ab.array(), vec![1.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
        assert!(a.stack(&b).unwrap_err().is_dimension_error());

        let c = SparseMatrix::ones(1, 2);
        let ac = a.stack(&c).unwrap();
        assert_eq!(ac.array(), vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert!(a.augment(&c).unwrap_err().is_dimension_error());
    }

    #[test]
    fn test_triangles() {
        let m = sample();
        assert_eq!(
            m.l().array(),
            vec![1.0, 0.0, 0.0, 0.0, 3.0, 0.0, 4.0, 0.0, 5.0]
        );
        assert_eq!(
            m.u().array(),
            vec![1.0, 0.0, 2.0, 0.0, 3.0, 0.0, 0.0, 0.0, 5.0]
        );
    }

    #[test]
    fn test_transpose_and_trace() {
        let m = sample();
        let t = m.transpose();
        assert_eq!(t.get(2, 0).unwrap(), 2.0);
        assert_eq!(t.transpose(), m);
        assert_eq!(m.trace(), 9.0);
    }

    #[test]
    fn test_det() {
        // 1*(15) - 0 + 2*(0 - 12) = -9
        assert_relative_eq!(sample().det().unwrap(), -9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dense_round_trip() {
        let m = sample();
        let d = m.dense_matrix();
        assert_eq!(d.get(2, 0).unwrap(), 4.0);
        assert_eq!(d.sparse_matrix(), m);
        assert_eq!(SparseMatrix::copy_of(&d), m);
    }

    #[test]
    fn test_add_subtract_mixed() {
        let mut m = sample();
        m.add(&DenseMatrix::identity(3)).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), 4.0);
        assert_eq!(m.get(1, 0).unwrap(), 0.0);
        m.subtract(&sample()).unwrap();
        assert_eq!(m, SparseMatrix::identity(3));
        assert_eq!(m.nnz(), 3);
        assert!(m.add(&SparseMatrix::zeros(2, 3)).is_err());
    }

    #[test]
    fn test_norms() {
        let m = sample();
        assert_eq!(m.one_norm(), 5.0);
        assert_eq!(m.infinity_norm(), 15.0);
        assert_relative_eq!(m.two_norm(), 55.0_f64.sqrt(), epsilon = 1e-12);
    }
}
