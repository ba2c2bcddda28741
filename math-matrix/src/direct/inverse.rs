//! Gauss-Jordan inversion on the augmented system `[A | I]`.

use crate::dense::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::traits::Matrix;

/// Inverse of a square matrix.
///
/// Eliminates every column of `[A | I]` above and below the pivot, with
/// partial pivoting. The result is a window onto the right half of the
/// augmented buffer. Fails with `Singular` on an exactly zero pivot.
pub fn inverse(a: &DenseMatrix) -> Result<DenseMatrix> {
    if !a.is_square() {
        return Err(MatrixError::dimension((a.rows(), a.rows()), a.dimension()));
    }
    let n = a.rows();
    let aug = a.augment(&DenseMatrix::identity(n))?;

    for i in 0..n {
        let mut p = i;
        for k in (i + 1)..n {
            if aug.at(k, i).abs() > aug.at(p, i).abs() {
                p = k;
            }
        }
        aug.exchange_rows(p, i);

        let pivot = aug.at(i, i);
        if pivot == 0.0 {
            log::debug!("inverse: zero pivot in column {i}");
            return Err(MatrixError::Singular);
        }
        aug.scale_row_unchecked(i, 1.0 / pivot);

        for k in (0..n).filter(|&k| k != i) {
            let f = aug.at(k, i);
            if f != 0.0 {
                aug.scale_add_row_unchecked(k, i, -f);
            }
        }
    }

    aug.window(0, n, n, n)
}

impl DenseMatrix {
    /// Inverse of `self`; see [`inverse`].
    pub fn inverse(&self) -> Result<DenseMatrix> {
        inverse(self)
    }
}
