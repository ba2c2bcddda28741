//! Matlab-style matrix literals: `[1 2 3; 4 5 6]`.
//!
//! Columns are separated by whitespace or commas, rows by `;`. Empty rows are
//! skipped, so a trailing `;` is harmless. `[]` is the `0 x 0` matrix.

use std::num::ParseFloatError;
use std::str::FromStr;

use thiserror::Error;

use crate::dense::DenseMatrix;
use crate::error::MatrixError;

/// Errors from [`parse_matlab`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token between delimiters is not a valid `f64`
    #[error("invalid number: {0}")]
    InvalidNumber(#[from] ParseFloatError),

    /// A row has a different number of values than the first row
    #[error("misaligned row: expected {expected} columns, got {got}")]
    MisalignedRow {
        /// Column count of the first row
        expected: usize,
        /// Column count of the offending row
        got: usize,
    },

    /// No `]` follows the values
    #[error("literal is missing its closing bracket")]
    Unterminated,

    /// Input holds nothing but whitespace and separators
    #[error("empty input")]
    Empty,

    /// The parsed rows could not be assembled into a matrix
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Open,
    Close,
    RowEnd,
    Number(&'a str),
}

fn tokenize(txt: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (pos, c) in txt.char_indices() {
        let delimiter = match c {
            '[' => Some(Token::Open),
            ']' => Some(Token::Close),
            ';' => Some(Token::RowEnd),
            ',' => None,
            c if c.is_whitespace() => None,
            _ => {
                start.get_or_insert(pos);
                continue;
            }
        };
        if let Some(s) = start.take() {
            tokens.push(Token::Number(&txt[s..pos]));
        }
        tokens.extend(delimiter);
    }
    if let Some(s) = start {
        tokens.push(Token::Number(&txt[s..]));
    }
    tokens
}

/// Parses a bracketed literal into a dense matrix.
///
/// Every row must have as many values as the first one.
pub fn parse_matlab(txt: &str) -> Result<DenseMatrix, ParseError> {
    let tokens = tokenize(txt);
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut row = Vec::new();
    let mut closed = false;

    let mut push_row = |row: &mut Vec<f64>| -> Result<(), ParseError> {
        if row.is_empty() {
            return Ok(());
        }
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(ParseError::MisalignedRow {
                    expected: first.len(),
                    got: row.len(),
                });
            }
        }
        rows.push(std::mem::take(row));
        Ok(())
    };

    for token in tokens {
        match token {
            Token::Open => {}
            Token::RowEnd => push_row(&mut row)?,
            Token::Close => {
                push_row(&mut row)?;
                closed = true;
                break;
            }
            Token::Number(t) => row.push(t.parse::<f64>()?),
        }
    }
    if !closed {
        return Err(ParseError::Unterminated);
    }

    Ok(DenseMatrix::from_rows(rows)?)
}

impl FromStr for DenseMatrix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_matlab(s)
    }
}
