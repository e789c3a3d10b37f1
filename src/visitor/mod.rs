//! Visitor-based traversal of block matrices.
//!
//! Two orders are available:
//! - **row order** visits entries in increasing `(row, column)` order,
//!   crossing block boundaries as it goes. Use it when output order matters.
//! - **optimized order** finishes one block before moving to the next, which
//!   reads each backing buffer sequentially. Use it when order doesn't matter,
//!   e.g. for reductions.
//!
//! Each order comes as read-only (`PreservingVisitor`) and mutating
//! (`ChangingVisitor`) walks, over the whole matrix or a sub-range. The
//! protocol is the same for all of them: `start` once, `visit` per entry,
//! `end` once, and the walk returns whatever `end` returns.

mod walk;

use std::ops::Range;

use crate::element::Element;

/// What a walk is about to cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkBounds {
    /// Full matrix rows.
    pub rows: usize,
    /// Full matrix columns.
    pub columns: usize,
    /// Rows that will be visited.
    pub row_range: Range<usize>,
    /// Columns that will be visited.
    pub column_range: Range<usize>,
}

/// Visitor that may replace each entry it sees.
pub trait ChangingVisitor<T: Element> {
    type Output;

    fn start(&mut self, _bounds: &WalkBounds) {}

    /// Returns the new value for the entry.
    fn visit(&mut self, row: usize, column: usize, value: T) -> T;

    fn end(&mut self) -> Self::Output;
}

/// Visitor that only reads entries.
pub trait PreservingVisitor<T: Element> {
    type Output;

    fn start(&mut self, _bounds: &WalkBounds) {}

    fn visit(&mut self, row: usize, column: usize, value: T);

    fn end(&mut self) -> Self::Output;
}

/// Sums every visited entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumVisitor<T> {
    sum: T,
}

impl<T: Element> PreservingVisitor<T> for SumVisitor<T> {
    type Output = T;

    fn start(&mut self, _bounds: &WalkBounds) {
        self.sum = T::zero();
    }

    fn visit(&mut self, _row: usize, _column: usize, value: T) {
        self.sum += value;
    }

    fn end(&mut self) -> T {
        self.sum
    }
}
