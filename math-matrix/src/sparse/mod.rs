//! Sparse matrix structures
//!
//! [`SparseMatrix`] keeps only its nonzero cells in a hash map keyed by
//! linear index, so storage is proportional to the number of nonzeros.

mod map;

pub use map::SparseMatrix;
