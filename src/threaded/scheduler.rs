//! Fork-join decomposition of a blocked multiply.
//!
//! The unit of work is a range of destination block-rows. A task whose range
//! is no longer than the leaf chunk runs the sequential kernel on it;
//! otherwise it splits the range into `fan_out` near-equal parts, forks one
//! child per part and joins on all of them. With the default fan-out of 4
//! the tree is shallow and wide:
//!
//! ```text
//!                 [0, 40)
//!      ┌────────┬───┴────┬────────┐
//!   [0,10)   [10,20)  [20,30)  [30,40)      chunk = 40 / (2 × 5) + 1 = 5
//!    ┌─┴─┐    ┌─┴─┐    ┌─┴─┐    ┌─┴─┐
//!  [0,3)[3,6)[6,9)[9,10) ...                leaves run the kernel
//! ```
//!
//! All destination blocks exist before the first task is forked, and each
//! task owns the mutable slice of exactly its block-rows, so leaves write
//! without locks and never touch each other's blocks.

use std::ops::Range;

use tracing::trace;

use super::executor::{Executor, Job};
use crate::blocked::gemm::multiply_block_rows;
use crate::config::MultiplyConfig;
use crate::element::Element;
use crate::error::Result;
use crate::layout::{Block, BlockLayout};
use crate::matrix::BlockMatrix;

/// A pending multiply over destination block-rows `block_rows`.
///
/// `dest` is the slice of the output holding exactly those block-rows.
pub struct MultiplyTask<'a, T: Element> {
    a: &'a BlockMatrix<T>,
    b: &'a BlockMatrix<T>,
    dest: &'a mut [Block<T>],
    dest_layout: &'a BlockLayout,
    block_rows: Range<usize>,
    chunk: usize,
    fan_out: usize,
}

impl<'a, T: Element> MultiplyTask<'a, T> {
    /// Root task covering every block-row of the destination.
    pub fn root(
        a: &'a BlockMatrix<T>,
        b: &'a BlockMatrix<T>,
        dest: &'a mut [Block<T>],
        dest_layout: &'a BlockLayout,
        config: &MultiplyConfig,
        parallelism: usize,
    ) -> Self {
        let block_rows = dest_layout.block_rows();
        Self {
            a,
            b,
            dest,
            dest_layout,
            block_rows: 0..block_rows,
            chunk: config.leaf_chunk(block_rows, parallelism),
            fan_out: config.effective_fan_out(),
        }
    }

    pub fn block_rows(&self) -> Range<usize> {
        self.block_rows.clone()
    }

    pub fn is_leaf(&self) -> bool {
        self.block_rows.len() <= self.chunk
    }

    /// Runs this task and all its descendants, returning once every one has finished.
    pub fn run<E: Executor + ?Sized>(self, executor: &E) -> Result<()> {
        if self.is_leaf() {
            trace!(from = self.block_rows.start, to = self.block_rows.end, "multiply leaf");
            multiply_block_rows(self.a, self.b, self.dest, self.dest_layout, self.block_rows);
            return Ok(());
        }

        let children = self.split();
        let jobs: Vec<Job<'_>> = children
            .into_iter()
            .map(|child| Box::new(move || child.run(executor)) as Job<'_>)
            .collect();
        executor.fork_join(jobs)
    }

    /// Splits into up to `fan_out` children of `ceil(len / fan_out)` block-rows.
    fn split(self) -> Vec<MultiplyTask<'a, T>> {
        let block_columns = self.dest_layout.block_columns();
        let step = self.block_rows.len().div_ceil(self.fan_out);

        let mut children = Vec::with_capacity(self.fan_out);
        let mut rest = self.dest;
        let mut start = self.block_rows.start;
        while start < self.block_rows.end {
            let end = (start + step).min(self.block_rows.end);
            let (head, tail) = std::mem::take(&mut rest).split_at_mut((end - start) * block_columns);
            rest = tail;
            children.push(MultiplyTask {
                a: self.a,
                b: self.b,
                dest: head,
                dest_layout: self.dest_layout,
                block_rows: start..end,
                chunk: self.chunk,
                fan_out: self.fan_out,
            });
            start = end;
        }
        children
    }
}
