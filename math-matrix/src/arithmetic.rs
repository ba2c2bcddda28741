//! Representation-agnostic comparisons and products.

use crate::dense::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::traits::Matrix;

/// Returns `true` if `a` and `b` have the same shape and every cell matches
/// exactly. No tolerance is applied.
pub fn equals(a: &dyn Matrix, b: &dyn Matrix) -> bool {
    a.dimension() == b.dimension() && a.array() == b.array()
}

/// Matrix product `a * b` for any pair of representations.
pub fn times(a: &dyn Matrix, b: &dyn Matrix) -> Result<DenseMatrix> {
    if a.cols() != b.rows() {
        return Err(MatrixError::dimension((a.cols(), b.cols()), b.dimension()));
    }
    let (m, n, p) = (a.rows(), a.cols(), b.cols());
    let lhs = a.array();
    let rhs = b.array();
    let mut out = vec![0.0; m * p];
    for i in 0..m {
        for k in 0..n {
            let v = lhs[i * n + k];
            for j in 0..p {
                out[i * p + j] += v * rhs[k * p + j];
            }
        }
    }
    DenseMatrix::from_vec(out, m, p)
}
