//! Sub-range extraction and insertion.
//!
//! A requested range rarely lines up with the block grid. Shifting the range
//! origin by `(rows_shift, columns_shift)` inside the first source block means
//! each output block overlaps at most a 2×2 group of source blocks:
//!
//! ```text
//!   source grid           output block at (rows_shift, columns_shift)
//!  ┌─────────┬─────────┐
//!  │    ┌────┼──┐      │   one rectangle per overlapped source block:
//!  │    │ A  │B │      │   A only, A+B (column spill), A+C (row spill),
//!  ├────┼────┼──┼──────┤   or A+B+C+D
//!  │    │ C  │D │      │
//!  │    └────┼──┘      │
//!  └─────────┴─────────┘
//! ```

use std::ops::Range;

use super::BlockMatrix;
use crate::element::Element;
use crate::error::{Axis, MatrixError, Result};
use crate::layout::{BLOCK_SIZE, check_rectangular};

/// Copies rows `src_rows` × columns `src_columns` of a row-major block of
/// width `src_width` into `dst` (width `dst_width`) at `(dst_row, dst_column)`.
#[allow(clippy::too_many_arguments)]
fn copy_block_part<T: Element>(
    src: &[T],
    src_width: usize,
    src_rows: Range<usize>,
    src_columns: Range<usize>,
    dst: &mut [T],
    dst_width: usize,
    dst_row: usize,
    dst_column: usize,
) {
    let length = src_columns.end - src_columns.start;
    let mut src_pos = src_rows.start * src_width + src_columns.start;
    let mut dst_pos = dst_row * dst_width + dst_column;
    for _ in src_rows {
        dst[dst_pos..dst_pos + length].copy_from_slice(&src[src_pos..src_pos + length]);
        src_pos += src_width;
        dst_pos += dst_width;
    }
}

/// Fails unless `range` is non-empty and inside `[0, bound)`.
pub(crate) fn check_range(axis: Axis, range: &Range<usize>, bound: usize) -> Result<()> {
    if range.end <= range.start || range.end > bound {
        return Err(MatrixError::InvalidRange {
            axis,
            start: range.start,
            end: range.end,
            bound,
        });
    }
    Ok(())
}

/// `origin..origin + length`, checked against `bound` without overflowing.
fn placed_range(axis: Axis, origin: usize, length: usize, bound: usize) -> Result<Range<usize>> {
    let end = origin.checked_add(length).ok_or(MatrixError::InvalidRange {
        axis,
        start: origin,
        end: usize::MAX,
        bound,
    })?;
    let range = origin..end;
    check_range(axis, &range, bound)?;
    Ok(range)
}

impl<T: Element> BlockMatrix<T> {
    /// New matrix holding `rows × columns` of `self`.
    pub fn sub_matrix(&self, rows: Range<usize>, columns: Range<usize>) -> Result<Self> {
        check_range(Axis::Row, &rows, self.rows())?;
        check_range(Axis::Column, &columns, self.columns())?;

        let mut out = Self::zeros(rows.end - rows.start, columns.end - columns.start)?;
        let src = self.layout;
        let dst = out.layout;

        let block_start_row = rows.start / BLOCK_SIZE;
        let rows_shift = rows.start % BLOCK_SIZE;
        let block_start_column = columns.start / BLOCK_SIZE;
        let columns_shift = columns.start % BLOCK_SIZE;

        for i_block in 0..dst.block_rows() {
            let height = dst.block_height(i_block);
            let p_block = block_start_row + i_block;
            // rows that spill into the next source block-row
            let height_excess = (height + rows_shift).saturating_sub(BLOCK_SIZE);

            for j_block in 0..dst.block_columns() {
                let width = dst.block_width(j_block);
                let q_block = block_start_column + j_block;
                let width_excess = (width + columns_shift).saturating_sub(BLOCK_SIZE);

                let index = src.block_index(p_block, q_block);
                let src_width = src.block_width(q_block);
                let out_block = &mut out.blocks[dst.block_index(i_block, j_block)];

                match (height_excess > 0, width_excess > 0) {
                    (false, false) => {
                        copy_block_part(
                            &self.blocks[index],
                            src_width,
                            rows_shift..height + rows_shift,
                            columns_shift..width + columns_shift,
                            out_block,
                            width,
                            0,
                            0,
                        );
                    }
                    (false, true) => {
                        let next_width = src.block_width(q_block + 1);
                        copy_block_part(
                            &self.blocks[index],
                            src_width,
                            rows_shift..height + rows_shift,
                            columns_shift..BLOCK_SIZE,
                            out_block,
                            width,
                            0,
                            0,
                        );
                        copy_block_part(
                            &self.blocks[index + 1],
                            next_width,
                            rows_shift..height + rows_shift,
                            0..width_excess,
                            out_block,
                            width,
                            0,
                            width - width_excess,
                        );
                    }
                    (true, false) => {
                        let below = index + src.block_columns();
                        copy_block_part(
                            &self.blocks[index],
                            src_width,
                            rows_shift..BLOCK_SIZE,
                            columns_shift..width + columns_shift,
                            out_block,
                            width,
                            0,
                            0,
                        );
                        copy_block_part(
                            &self.blocks[below],
                            src_width,
                            0..height_excess,
                            columns_shift..width + columns_shift,
                            out_block,
                            width,
                            height - height_excess,
                            0,
                        );
                    }
                    (true, true) => {
                        let next_width = src.block_width(q_block + 1);
                        let below = index + src.block_columns();
                        copy_block_part(
                            &self.blocks[index],
                            src_width,
                            rows_shift..BLOCK_SIZE,
                            columns_shift..BLOCK_SIZE,
                            out_block,
                            width,
                            0,
                            0,
                        );
                        copy_block_part(
                            &self.blocks[index + 1],
                            next_width,
                            rows_shift..BLOCK_SIZE,
                            0..width_excess,
                            out_block,
                            width,
                            0,
                            width - width_excess,
                        );
                        copy_block_part(
                            &self.blocks[below],
                            src_width,
                            0..height_excess,
                            columns_shift..BLOCK_SIZE,
                            out_block,
                            width,
                            height - height_excess,
                            0,
                        );
                        copy_block_part(
                            &self.blocks[below + 1],
                            next_width,
                            0..height_excess,
                            0..width_excess,
                            out_block,
                            width,
                            height - height_excess,
                            width - width_excess,
                        );
                    }
                }
            }
        }
        Ok(out)
    }

    /// Row-major copy of `rows × columns`.
    pub fn copy_sub_matrix(&self, rows: Range<usize>, columns: Range<usize>) -> Result<Vec<Vec<T>>> {
        Ok(self.sub_matrix(rows, columns)?.to_rows())
    }

    /// Overwrites the region starting at `(row, column)` with `sub`.
    ///
    /// `sub` must be rectangular and fit inside the matrix.
    pub fn set_sub_matrix(&mut self, sub: &[Vec<T>], row: usize, column: usize) -> Result<()> {
        let (sub_rows, sub_columns) = check_rectangular(sub)?;
        let rows = placed_range(Axis::Row, row, sub_rows, self.rows())?;
        let columns = placed_range(Axis::Column, column, sub_columns, self.columns())?;

        let layout = self.layout;
        let block_start_row = rows.start / BLOCK_SIZE;
        let block_end_row = (rows.end - 1) / BLOCK_SIZE + 1;
        let block_start_column = columns.start / BLOCK_SIZE;
        let block_end_column = (columns.end - 1) / BLOCK_SIZE + 1;

        for i_block in block_start_row..block_end_row {
            let first_row = i_block * BLOCK_SIZE;
            let i_start = rows.start.max(first_row);
            let i_end = rows.end.min(first_row + layout.block_height(i_block));

            for j_block in block_start_column..block_end_column {
                let width = layout.block_width(j_block);
                let first_column = j_block * BLOCK_SIZE;
                let j_start = columns.start.max(first_column);
                let j_end = columns.end.min(first_column + width);
                let length = j_end - j_start;

                let block = &mut self.blocks[layout.block_index(i_block, j_block)];
                for i in i_start..i_end {
                    let src = &sub[i - row][j_start - column..j_start - column + length];
                    let dst_pos = (i - first_row) * width + (j_start - first_column);
                    block[dst_pos..dst_pos + length].copy_from_slice(src);
                }
            }
        }
        Ok(())
    }
}
