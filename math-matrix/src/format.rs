//! Text rendering of matrices.
//!
//! The layout is a brace-delimited grid:
//!
//! ```text
//! {1, 2.5,
//!  3,  -4}
//! ```
//!
//! Cells are right-aligned to the widest rendered cell. Trailing zeros after
//! the decimal point are dropped, and so is a bare trailing point.

use std::fmt;

use crate::dense::DenseMatrix;
use crate::perm::PivotMatrix;
use crate::sparse::SparseMatrix;
use crate::traits::Matrix;

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Digits after the decimal point before trimming
    pub precision: usize,
    /// Strip trailing zeros and a trailing decimal point
    pub trim_zeros: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            precision: 6,
            trim_zeros: true,
        }
    }
}

fn render_cell(v: f64, config: &FormatConfig) -> String {
    let mut s = format!("{:.*}", config.precision, v);
    if config.trim_zeros && s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    s
}

/// Renders `m` with the default [`FormatConfig`].
pub fn format_matrix<M: Matrix + ?Sized>(m: &M) -> String {
    format_matrix_with(m, &FormatConfig::default())
}

/// Renders `m` with explicit options.
pub fn format_matrix_with<M: Matrix + ?Sized>(m: &M, config: &FormatConfig) -> String {
    if m.num_elements() == 0 {
        return "{}".to_string();
    }
    let cells: Vec<String> = m
        .array()
        .into_iter()
        .map(|v| render_cell(v, config))
        .collect();
    let width = cells.iter().map(String::len).max().unwrap_or(0);

    let rows: Vec<String> = cells
        .chunks(m.cols())
        .map(|row| {
            row.iter()
                .map(|c| format!("{c:>width$}"))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect();
    format!("{{{}}}", rows.join(",\n "))
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_matrix(self))
    }
}

impl fmt::Display for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_matrix(self))
    }
}

impl fmt::Display for PivotMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_matrix(self))
    }
}
