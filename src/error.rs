//! Error types for block matrix operations.
//!
//! Every operation validates its arguments before touching any block, so an
//! `Err` always means nothing was written.

use std::fmt;

use thiserror::Error;

/// Result type for block matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Which axis an index or range refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Errors that can occur during block matrix operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// A matrix needs at least one row and one column.
    #[error("Invalid dimension: {rows}x{columns}")]
    InvalidDimension { rows: usize, columns: usize },

    /// Operand shapes are incompatible, or a raw input is ragged.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An entry, row or column index is outside the matrix.
    #[error("{axis} index {index} out of range [0, {bound})")]
    IndexOutOfRange {
        axis: Axis,
        index: usize,
        bound: usize,
    },

    /// A sub-range is empty, reversed, or extends past the matrix.
    #[error("Invalid {axis} range {start}..{end} for bound {bound}")]
    InvalidRange {
        axis: Axis,
        start: usize,
        end: usize,
        bound: usize,
    },
}
