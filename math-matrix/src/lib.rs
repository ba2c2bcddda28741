//! Dense, sparse and permutation matrices with LU-based direct solvers
//!
//! This crate provides three matrix representations behind one pair of
//! capability traits, along with the elimination kernels that operate on them.
//!
//! # Features
//!
//! - **Dense matrices**: strided row-major storage with aliasing windows
//! - **Sparse matrices**: hash-map storage with implicit zeros
//! - **Permutation matrices**: one pivot index per column plus a sign
//! - **Direct solvers**: in-place LU with partial pivoting, Gauss-Jordan
//!   inversion, forward/back substitution
//! - **Text I/O**: Matlab-style literal parsing and aligned grid rendering
//!
//! Optional cargo features: `serde` (serialization of all three types) and
//! `ndarray` (conversion to and from `Array2<f64>`).
//!
//! # Example
//!
//! ```rust
//! use math_audio_matrix::{DenseMatrix, Matrix, parse_matlab};
//!
//! let a = parse_matlab("[2 1; 1 1]").unwrap();
//! let b = parse_matlab("[3; 2]").unwrap();
//! let x = a.solve(&b).unwrap();
//! assert!((x.get(0, 0).unwrap() - 1.0).abs() < 1e-12);
//!
//! let mut lu = a.copy();
//! let p = lu.lu_in_place();
//! assert_eq!(p.det().unwrap(), 1.0);
//! assert_eq!(DenseMatrix::identity(2).to_string(), "{1, 0,\n 0, 1}");
//! ```

pub mod arithmetic;
pub mod dense;
pub mod direct;
pub mod error;
pub mod format;
pub mod parse;
pub mod perm;
pub mod sparse;
pub mod traits;

// Re-export main types
pub use dense::DenseMatrix;
pub use error::{MatrixError, Result};
pub use perm::PivotMatrix;
pub use sparse::SparseMatrix;
pub use traits::{Matrix, MatrixMut, Norms};

// Re-export kernels
pub use arithmetic::{equals, times};
pub use direct::{
    LuFactorization, inverse, lu_factorize, lu_in_place, solve, solve_lower_unit, solve_upper,
};

// Re-export text I/O
pub use format::{FormatConfig, format_matrix, format_matrix_with};
pub use parse::{ParseError, parse_matlab};
