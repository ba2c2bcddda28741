//! Triangular substitution and the dense system solve
//!
//! The triangular solvers only read the triangle they need, so they accept
//! either a plain triangular matrix or the combined `[L\U]` storage.

use crate::dense::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::traits::Matrix;

use super::lu::lu_factorize;

fn check_system(t: &DenseMatrix, b: &DenseMatrix) -> Result<()> {
    if !t.is_square() {
        return Err(MatrixError::dimension((t.rows(), t.rows()), t.dimension()));
    }
    if b.rows() != t.rows() {
        return Err(MatrixError::dimension((t.rows(), b.cols()), b.dimension()));
    }
    Ok(())
}

/// Forward substitution for `L * y = b`, with `L` unit lower-triangular.
///
/// The diagonal of `l` is never read.
pub fn solve_lower_unit(l: &DenseMatrix, b: &DenseMatrix) -> Result<DenseMatrix> {
    check_system(l, b)?;
    let y = b.copy();
    for c in 0..b.cols() {
        for i in 0..l.rows() {
            let s: f64 = (0..i).map(|k| l.at(i, k) * y.at(k, c)).sum();
            y.put(i, c, y.at(i, c) - s);
        }
    }
    Ok(y)
}

/// Back substitution for `U * x = b`.
///
/// Fails with `Singular` when a diagonal entry of `u` is zero.
pub fn solve_upper(u: &DenseMatrix, b: &DenseMatrix) -> Result<DenseMatrix> {
    check_system(u, b)?;
    let n = u.rows();
    if let Some(i) = (0..n).find(|&i| u.at(i, i) == 0.0) {
        log::debug!("solve: zero on the diagonal at row {i}");
        return Err(MatrixError::Singular);
    }
    let x = b.copy();
    for c in 0..b.cols() {
        for i in (0..n).rev() {
            let s: f64 = ((i + 1)..n).map(|k| u.at(i, k) * x.at(k, c)).sum();
            x.put(i, c, (x.at(i, c) - s) / u.at(i, i));
        }
    }
    Ok(x)
}

/// Solves `A * x = b` through a fresh LU factorization of `a`.
///
/// `a` is left untouched. `b` may be any representation and may hold
/// several right-hand sides as columns.
pub fn solve(a: &DenseMatrix, b: &dyn Matrix) -> Result<DenseMatrix> {
    if !a.is_square() {
        return Err(MatrixError::dimension((a.rows(), a.rows()), a.dimension()));
    }
    log::trace!(
        "solve: {}x{} system, {} right-hand side(s)",
        a.rows(),
        a.cols(),
        b.cols()
    );
    lu_factorize(a).solve(b)
}

impl DenseMatrix {
    /// Solves `self * x = b`; see [`solve`].
    pub fn solve(&self, b: &dyn Matrix) -> Result<DenseMatrix> {
        solve(self, b)
    }
}
