//! Walk implementations on [`BlockMatrix`].
//!
//! The visiting order is computed once per order from the layout alone and
//! fed to the visitor as `(row, column, block index, offset)`.

use std::ops::Range;

use super::{ChangingVisitor, PreservingVisitor, WalkBounds};
use crate::element::Element;
use crate::error::{Axis, Result};
use crate::layout::{BLOCK_SIZE, BlockLayout};
use crate::matrix::BlockMatrix;
use crate::matrix::check_range;

/// Blocks touched by `range` along one axis.
fn block_span(range: &Range<usize>) -> Range<usize> {
    range.start / BLOCK_SIZE..(range.end - 1) / BLOCK_SIZE + 1
}

/// Row order: every row of the range left to right, top to bottom.
fn row_order<F>(layout: &BlockLayout, rows: &Range<usize>, columns: &Range<usize>, mut f: F)
where
    F: FnMut(usize, usize, usize, usize),
{
    for i_block in block_span(rows) {
        let p0 = i_block * BLOCK_SIZE;
        let p_start = rows.start.max(p0);
        let p_end = rows.end.min(p0 + layout.block_height(i_block));
        for p in p_start..p_end {
            for j_block in block_span(columns) {
                let width = layout.block_width(j_block);
                let q0 = j_block * BLOCK_SIZE;
                let q_start = columns.start.max(q0);
                let q_end = columns.end.min(q0 + width);
                let index = layout.block_index(i_block, j_block);
                let mut k = (p - p0) * width + q_start - q0;
                for q in q_start..q_end {
                    f(p, q, index, k);
                    k += 1;
                }
            }
        }
    }
}

/// Block order: finish each block's part of the range before the next block.
fn block_order<F>(layout: &BlockLayout, rows: &Range<usize>, columns: &Range<usize>, mut f: F)
where
    F: FnMut(usize, usize, usize, usize),
{
    for i_block in block_span(rows) {
        let p0 = i_block * BLOCK_SIZE;
        let p_start = rows.start.max(p0);
        let p_end = rows.end.min(p0 + layout.block_height(i_block));
        for j_block in block_span(columns) {
            let width = layout.block_width(j_block);
            let q0 = j_block * BLOCK_SIZE;
            let q_start = columns.start.max(q0);
            let q_end = columns.end.min(q0 + width);
            let index = layout.block_index(i_block, j_block);
            for p in p_start..p_end {
                let mut k = (p - p0) * width + q_start - q0;
                for q in q_start..q_end {
                    f(p, q, index, k);
                    k += 1;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Order {
    Row,
    Block,
}

impl Order {
    /// Feeds every `(row, column, block index, offset)` of the range to `f`.
    fn traverse<F>(self, layout: &BlockLayout, rows: &Range<usize>, columns: &Range<usize>, f: F)
    where
        F: FnMut(usize, usize, usize, usize),
    {
        match self {
            Order::Row => row_order(layout, rows, columns, f),
            Order::Block => block_order(layout, rows, columns, f),
        }
    }
}

impl<T: Element> BlockMatrix<T> {
    fn bounds(&self, rows: &Range<usize>, columns: &Range<usize>) -> WalkBounds {
        WalkBounds {
            rows: self.rows(),
            columns: self.columns(),
            row_range: rows.clone(),
            column_range: columns.clone(),
        }
    }

    fn checked_bounds(&self, rows: &Range<usize>, columns: &Range<usize>) -> Result<WalkBounds> {
        check_range(Axis::Row, rows, self.rows())?;
        check_range(Axis::Column, columns, self.columns())?;
        Ok(self.bounds(rows, columns))
    }

    fn walk_mut<V>(&mut self, bounds: WalkBounds, visitor: &mut V, order: Order) -> V::Output
    where
        V: ChangingVisitor<T>,
    {
        visitor.start(&bounds);
        let layout = *self.layout();
        let blocks = self.blocks_mut();
        order.traverse(&layout, &bounds.row_range, &bounds.column_range, |p, q, index, k| {
            let entry = &mut blocks[index][k];
            *entry = visitor.visit(p, q, *entry);
        });
        visitor.end()
    }

    fn walk_ref<V>(&self, bounds: WalkBounds, visitor: &mut V, order: Order) -> V::Output
    where
        V: PreservingVisitor<T>,
    {
        visitor.start(&bounds);
        let blocks = self.blocks();
        order.traverse(self.layout(), &bounds.row_range, &bounds.column_range, |p, q, index, k| {
            visitor.visit(p, q, blocks[index][k]);
        });
        visitor.end()
    }

    /// Visits every entry in row order, replacing each with the visitor's result.
    pub fn walk_in_row_order_mut<V: ChangingVisitor<T>>(&mut self, visitor: &mut V) -> V::Output {
        let bounds = self.bounds(&(0..self.rows()), &(0..self.columns()));
        self.walk_mut(bounds, visitor, Order::Row)
    }

    /// Visits every entry in row order.
    pub fn walk_in_row_order<V: PreservingVisitor<T>>(&self, visitor: &mut V) -> V::Output {
        let bounds = self.bounds(&(0..self.rows()), &(0..self.columns()));
        self.walk_ref(bounds, visitor, Order::Row)
    }

    /// Row-order mutating walk over `rows × columns`.
    pub fn walk_in_row_order_range_mut<V: ChangingVisitor<T>>(
        &mut self,
        visitor: &mut V,
        rows: Range<usize>,
        columns: Range<usize>,
    ) -> Result<V::Output> {
        let bounds = self.checked_bounds(&rows, &columns)?;
        Ok(self.walk_mut(bounds, visitor, Order::Row))
    }

    /// Row-order read-only walk over `rows × columns`.
    pub fn walk_in_row_order_range<V: PreservingVisitor<T>>(
        &self,
        visitor: &mut V,
        rows: Range<usize>,
        columns: Range<usize>,
    ) -> Result<V::Output> {
        let bounds = self.checked_bounds(&rows, &columns)?;
        Ok(self.walk_ref(bounds, visitor, Order::Row))
    }

    /// Visits every entry one block at a time, replacing each with the visitor's result.
    pub fn walk_in_optimized_order_mut<V: ChangingVisitor<T>>(&mut self, visitor: &mut V) -> V::Output {
        let bounds = self.bounds(&(0..self.rows()), &(0..self.columns()));
        self.walk_mut(bounds, visitor, Order::Block)
    }

    /// Visits every entry one block at a time.
    pub fn walk_in_optimized_order<V: PreservingVisitor<T>>(&self, visitor: &mut V) -> V::Output {
        let bounds = self.bounds(&(0..self.rows()), &(0..self.columns()));
        self.walk_ref(bounds, visitor, Order::Block)
    }

    /// Block-order mutating walk over `rows × columns`.
    pub fn walk_in_optimized_order_range_mut<V: ChangingVisitor<T>>(
        &mut self,
        visitor: &mut V,
        rows: Range<usize>,
        columns: Range<usize>,
    ) -> Result<V::Output> {
        let bounds = self.checked_bounds(&rows, &columns)?;
        Ok(self.walk_mut(bounds, visitor, Order::Block))
    }

    /// Block-order read-only walk over `rows × columns`.
    pub fn walk_in_optimized_order_range<V: PreservingVisitor<T>>(
        &self,
        visitor: &mut V,
        rows: Range<usize>,
        columns: Range<usize>,
    ) -> Result<V::Output> {
        let bounds = self.checked_bounds(&rows, &columns)?;
        Ok(self.walk_ref(bounds, visitor, Order::Block))
    }
}
