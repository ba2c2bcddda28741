//! Permutation matrices in compact form.
//!
//! A [`PivotMatrix`] stores one row index per column: column `j` holds its
//! single `1` at row `pivots[j]`. The sign (`+1` or `-1`) is the parity of the
//! row swaps that produced the permutation and is its determinant.

use crate::dense::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::sparse::SparseMatrix;
use crate::traits::{Matrix, Norms};

/// Space-optimized matrix with exactly one `1` in each row and each column.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct PivotMatrix {
    pivots: Vec<usize>,
    sign: f64,
}

impl PivotMatrix {
    /// The `n x n` identity permutation.
    pub fn identity(n: usize) -> Self {
        Self {
            pivots: (0..n).collect(),
            sign: 1.0,
        }
    }

    /// Wraps a caller-supplied permutation of `0..n`.
    ///
    /// The sign is derived from the permutation's parity. Fails with
    /// `IllegalIndex` if `pivots` is not a bijection on `0..n`.
    pub fn new(pivots: Vec<usize>) -> Result<Self> {
        let n = pivots.len();
        let mut seen = vec![false; n];
        for (j, &p) in pivots.iter().enumerate() {
            if p >= n || seen[p] {
                return Err(MatrixError::index(p, j, n, n));
            }
            seen[p] = true;
        }
        let sign = parity_sign(&pivots);
        Ok(Self { pivots, sign })
    }

    /// Row index holding the `1` of each column.
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// `+1` or `-1`.
    pub fn sign(&self) -> f64 {
        self.sign
    }

    /// Independent copy.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Swap without bounds checks, used by the factorization.
    ///
    /// Swapping an entry with itself is a no-op and keeps the sign.
    pub(crate) fn swap(&mut self, r1: usize, r2: usize) {
        if r1 == r2 {
            return;
        }
        self.pivots.swap(r1, r2);
        self.sign = -self.sign;
    }

    /// Exchanges `pivots[r1]` and `pivots[r2]` and flips the sign.
    ///
    /// `r1 == r2` only checks bounds.
    pub fn swap_rows(&mut self, r1: usize, r2: usize) -> Result<()> {
        let n = self.pivots.len();
        if r1 >= n || r2 >= n {
            return Err(MatrixError::index(r1.max(r2), 0, n, n));
        }
        self.swap(r1, r2);
        Ok(())
    }

    /// Returns `true` if the permutation is its own inverse.
    pub fn symmetric(&self) -> bool {
        self.pivots
            .iter()
            .enumerate()
            .all(|(i, &p)| self.pivots[p] == i)
    }

    /// The inverse permutation, which is also the transpose.
    pub fn transpose(&self) -> Self {
        let mut pivots = vec![0; self.pivots.len()];
        for (i, &p) in self.pivots.iter().enumerate() {
            pivots[p] = i;
        }
        Self {
            pivots,
            sign: self.sign,
        }
    }

    /// Same as [`PivotMatrix::transpose`].
    pub fn inverse(&self) -> Self {
        self.transpose()
    }

    /// Product `self * b`: row `j` of `b` moves to row `pivots[j]`.
    pub fn times(&self, b: &dyn Matrix) -> Result<DenseMatrix> {
        let n = self.pivots.len();
        if b.rows() != n {
            return Err(MatrixError::dimension((n, b.cols()), b.dimension()));
        }
        let cols = b.cols();
        let src = b.array();
        let mut out = vec![0.0; n * cols];
        for (j, &p) in self.pivots.iter().enumerate() {
            out[p * cols..(p + 1) * cols].copy_from_slice(&src[j * cols..(j + 1) * cols]);
        }
        DenseMatrix::from_vec(out, n, cols)
    }

    /// Returns `x` such that `self * x = b`, i.e. `transpose() * b`.
    pub fn solve(&self, b: &dyn Matrix) -> Result<DenseMatrix> {
        self.transpose().times(b)
    }
}

fn parity_sign(pivots: &[usize]) -> f64 {
    let mut visited = vec![false; pivots.len()];
    let mut sign = 1.0;
    for start in 0..pivots.len() {
        if visited[start] {
            continue;
        }
        let mut len = 0;
        let mut k = start;
        while !visited[k] {
            visited[k] = true;
            k = pivots[k];
            len += 1;
        }
        if len % 2 == 0 {
            sign = -sign;
        }
    }
    sign
}

impl Matrix for PivotMatrix {
    fn rows(&self) -> usize {
        self.pivots.len()
    }

    fn cols(&self) -> usize {
        self.pivots.len()
    }

    fn get(&self, i: usize, j: usize) -> Result<f64> {
        let n = self.pivots.len();
        if i >= n || j >= n {
            return Err(MatrixError::index(i, j, n, n));
        }
        Ok(if self.pivots[j] == i { 1.0 } else { 0.0 })
    }

    fn det(&self) -> Result<f64> {
        Ok(self.sign)
    }

    /// Number of fixed points.
    fn trace(&self) -> f64 {
        self.pivots
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i == p)
            .count() as f64
    }

    fn array(&self) -> Vec<f64> {
        let n = self.pivots.len();
        let mut a = vec![0.0; n * n];
        for (j, &p) in self.pivots.iter().enumerate() {
            a[p * n + j] = 1.0;
        }
        a
    }

    fn dense_matrix(&self) -> DenseMatrix {
        DenseMatrix::copy_of(self)
    }

    fn sparse_matrix(&self) -> SparseMatrix {
        let n = self.pivots.len();
        let mut s = SparseMatrix::zeros(n, n);
        for (j, &p) in self.pivots.iter().enumerate() {
            s.insert(p, j, 1.0);
        }
        s
    }
}

/// Closed forms: every column and every row sums to exactly one.
impl Norms for PivotMatrix {
    fn one_norm(&self) -> f64 {
        self.pivots.len() as f64
    }

    fn two_norm(&self) -> f64 {
        (self.pivots.len() as f64).sqrt()
    }

    fn infinity_norm(&self) -> f64 {
        1.0
    }
}

/// Two permutations are equal when they have the same pivots.
impl PartialEq for PivotMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.pivots == other.pivots
    }
}

impl TryFrom<Vec<usize>> for PivotMatrix {
    type Error = MatrixError;

    fn try_from(pivots: Vec<usize>) -> Result<Self> {
        Self::new(pivots)
    }
}

impl From<PivotMatrix> for Vec<usize> {
    fn from(p: PivotMatrix) -> Self {
        p.pivots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(PivotMatrix::new(vec![2, 0, 1]).is_ok());
        assert!(PivotMatrix::new(vec![0, 0, 1]).unwrap_err().is_index_error());
        assert!(PivotMatrix::new(vec![0, 3, 1]).unwrap_err().is_index_error());
        assert_eq!(PivotMatrix::new(vec![]).unwrap().dimension(), (0, 0));
    }

    #[test]
    fn test_sign_from_parity() {
        assert_eq!(PivotMatrix::new(vec![0, 1, 2]).unwrap().sign(), 1.0);
        assert_eq!(PivotMatrix::new(vec![1, 0, 2]).unwrap().sign(), -1.0);
        // a 3-cycle is even
        assert_eq!(PivotMatrix::new(vec![1, 2, 0]).unwrap().sign(), 1.0);
        assert_eq!(PivotMatrix::new(vec![3, 2, 1, 0]).unwrap().sign(), 1.0);
    }

    #[test]
    fn test_get_layout() {
        let p = PivotMatrix::new(vec![2, 0, 1]).unwrap();
        assert_eq!(p.get(2, 0).unwrap(), 1.0);
        assert_eq!(p.get(0, 1).unwrap(), 1.0);
        assert_eq!(p.get(1, 2).unwrap(), 1.0);
        assert_eq!(p.get(0, 0).unwrap(), 0.0);
        assert!(p.get(3, 0).unwrap_err().is_index_error());
        assert_eq!(
            p.array(),
            vec![0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_swap_rows_flips_sign() {
        let mut p = PivotMatrix::identity(3);
        p.swap_rows(0, 2).unwrap();
        assert_eq!(p.pivots(), &[2, 1, 0]);
        assert_eq!(p.det().unwrap(), -1.0);
        p.swap_rows(1, 2).unwrap();
        assert_eq!(p.det().unwrap(), 1.0);
        assert!(p.swap_rows(0, 3).is_err());
    }

    #[test]
    fn test_swap_rows_same_index_is_noop() {
        let mut p = PivotMatrix::identity(3);
        p.swap_rows(1, 1).unwrap();
        assert_eq!(p.sign(), 1.0);
        assert_eq!(p.det().unwrap(), 1.0);
        assert_eq!(p, PivotMatrix::identity(3));
        assert!(p.swap_rows(3, 3).is_err());
    }

    #[test]
    fn test_transpose_is_inverse() {
        let p = PivotMatrix::new(vec![2, 0, 3, 1]).unwrap();
        let t = p.transpose();
        assert_eq!(t.sign(), p.sign());
        assert_eq!(t.dense_matrix(), p.dense_matrix().transpose());
        let product = p.times(&t.dense_matrix()).unwrap();
        assert_eq!(product, DenseMatrix::identity(4));
        assert_eq!(p.inverse(), t);
    }

    #[test]
    fn test_trace_and_det() {
        let p = PivotMatrix::new(vec![0, 2, 1, 3]).unwrap();
        assert_eq!(p.trace(), 2.0);
        assert_eq!(p.det().unwrap(), -1.0);
    }

    #[test]
    fn test_symmetric() {
        assert!(PivotMatrix::new(vec![1, 0, 2]).unwrap().symmetric());
        assert!(!PivotMatrix::new(vec![1, 2, 0]).unwrap().symmetric());
    }

    #[test]
    fn test_times_matches_dense_product() {
        let p = PivotMatrix::new(vec![1, 2, 0]).unwrap();
        let b = DenseMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]])
            .unwrap();
        let fast = p.times(&b).unwrap();
        let slow = p.dense_matrix().times(&b).unwrap();
        assert_eq!(fast, slow);
        assert!(p.times(&DenseMatrix::ones(2, 2)).unwrap_err().is_dimension_error());
    }

    #[test]
    fn test_solve() {
        let p = PivotMatrix::new(vec![1, 2, 0]).unwrap();
        let x = DenseMatrix::from_rows(vec![vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let b = p.times(&x).unwrap();
        assert_eq!(p.solve(&b).unwrap(), x);
    }

    #[test]
    fn test_norms() {
        let p = PivotMatrix::identity(4);
        assert_eq!(p.one_norm(), 4.0);
        assert_eq!(p.two_norm(), 2.0);
        assert_eq!(p.infinity_norm(), 1.0);
    }

    #[test]
    fn test_conversions() {
        let p = PivotMatrix::new(vec![1, 0]).unwrap();
        let d = p.dense_matrix();
        let s = p.sparse_matrix();
        assert_eq!(d.array(), vec![0.0, 1.0, 1.0, 0.0]);
        assert_eq!(s.nnz(), 2);
        assert_eq!(s, d.sparse_matrix());
    }
}
