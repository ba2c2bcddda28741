//! Direct solvers for dense linear systems
//!
//! - [`lu_in_place`] / [`lu_factorize`]: LU decomposition with partial pivoting
//! - [`inverse`]: Gauss-Jordan inversion
//! - [`solve`]: LU followed by forward and back substitution

mod inverse;
mod lu;
mod solve;

pub use inverse::inverse;
pub use lu::{LuFactorization, lu_factorize, lu_in_place};
pub use solve::{solve, solve_lower_unit, solve_upper};
