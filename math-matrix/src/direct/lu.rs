//! LU decomposition with partial pivoting
//!
//! Crout-style, column by column, overwriting the input with the combined
//! `[L\U]` factors. `L` has an implicit unit diagonal that is not stored.
//! The returned [`PivotMatrix`] `P` satisfies `P * L * U = A`.

use crate::dense::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::perm::PivotMatrix;
use crate::traits::Matrix;

use super::solve::{solve_lower_unit, solve_upper};

/// Factors `a` in place and returns the row permutation.
///
/// Works for rectangular `m x n` input; the permutation is `m x m`. A zero
/// pivot is not an error here: the column is left unscaled and singularity
/// is reported by whoever divides by the diagonal later.
pub fn lu_in_place(a: &mut DenseMatrix) -> PivotMatrix {
    let (m, n) = a.dimension();
    let mut pivot = PivotMatrix::identity(m);
    let mut col = vec![0.0; m];
    let mut row = vec![0.0; n];

    for j in 0..n {
        a.load_col(j, &mut col);

        // Apply the previous transformations to column j
        for i in 0..m {
            a.load_row(i, &mut row);
            let kmax = i.min(j);
            let s: f64 = row[..kmax]
                .iter()
                .zip(&col[..kmax])
                .map(|(l, u)| l * u)
                .sum();
            col[i] -= s;
            a.put(i, j, col[i]);
        }

        if j >= m {
            continue;
        }

        let mut p = j;
        for i in (j + 1)..m {
            if col[i].abs() > col[p].abs() {
                p = i;
            }
        }
        if p != j {
            a.exchange_rows(p, j);
            pivot.swap(p, j);
        }

        let d = a.at(j, j);
        if d != 0.0 {
            for i in (j + 1)..m {
                a.put(i, j, a.at(i, j) / d);
            }
        } else {
            log::debug!("lu: zero pivot in column {j}, leaving column unscaled");
        }
    }

    pivot
}

/// LU factors of a matrix, kept together with their permutation.
#[derive(Debug, Clone)]
pub struct LuFactorization {
    /// Combined `[L\U]` factors
    lu: DenseMatrix,
    pivot: PivotMatrix,
}

/// Copies `a` and factors the copy.
pub fn lu_factorize(a: &DenseMatrix) -> LuFactorization {
    let mut lu = a.copy();
    let pivot = lu_in_place(&mut lu);
    LuFactorization { lu, pivot }
}

impl LuFactorization {
    /// Unit lower-triangular factor, `m x min(m, n)`.
    pub fn l(&self) -> DenseMatrix {
        let (m, n) = self.lu.dimension();
        let k = m.min(n);
        let l = DenseMatrix::zeros(m, k);
        for i in 0..m {
            for j in 0..k.min(i + 1) {
                l.put(i, j, if i == j { 1.0 } else { self.lu.at(i, j) });
            }
        }
        l
    }

    /// Upper-triangular factor, `min(m, n) x n`.
    pub fn u(&self) -> DenseMatrix {
        let (m, n) = self.lu.dimension();
        let k = m.min(n);
        let u = DenseMatrix::zeros(k, n);
        for i in 0..k {
            for j in i..n {
                u.put(i, j, self.lu.at(i, j));
            }
        }
        u
    }

    /// Row permutation `P`.
    pub fn pivot(&self) -> &PivotMatrix {
        &self.pivot
    }

    /// Combined `[L\U]` storage as produced by [`lu_in_place`].
    pub fn factors(&self) -> &DenseMatrix {
        &self.lu
    }

    /// Product of the `U` diagonal times the permutation sign.
    pub fn det(&self) -> f64 {
        self.lu.diagonal_copy().iter().product::<f64>() * self.pivot.sign()
    }

    /// Solves `A * x = b` for every column of `b`.
    pub fn solve(&self, b: &dyn Matrix) -> Result<DenseMatrix> {
        if !self.lu.is_square() {
            let (m, n) = self.lu.dimension();
            return Err(MatrixError::dimension((m, m), (m, n)));
        }
        let pb = self.pivot.transpose().times(b)?;
        let y = solve_lower_unit(&self.lu, &pb)?;
        solve_upper(&self.lu, &y)
    }
}

impl DenseMatrix {
    /// Overwrites `self` with its `[L\U]` factors; see [`lu_in_place`].
    pub fn lu_in_place(&mut self) -> PivotMatrix {
        lu_in_place(self)
    }
}
