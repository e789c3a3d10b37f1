//! Block partition of an R×C matrix.
//!
//! The matrix is cut into `BLOCK_SIZE × BLOCK_SIZE` tiles. Tiles in the last
//! block-row / block-column are shorter / narrower when the dimension isn't a
//! multiple of the block size. Each tile is one contiguous row-major buffer,
//! and tiles are stored in row-major block order.
//!
//! ```text
//!  100×100, B = 52
//!  ┌──────────┬────────┐
//!  │ block 0  │ block 1│   52 rows
//!  │ 52×52    │ 52×48  │
//!  ├──────────┼────────┤
//!  │ block 2  │ block 3│   48 rows
//!  │ 48×52    │ 48×48  │
//!  └──────────┴────────┘
//! ```

use crate::element::Element;
use crate::error::{MatrixError, Result};

/// Side length of an interior block.
pub const BLOCK_SIZE: usize = 52;

/// One tile of a matrix: `height * width` elements, row-major.
pub type Block<T> = Box<[T]>;

/// Shape of a block grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    rows: usize,
    columns: usize,
    block_rows: usize,
    block_columns: usize,
}

impl BlockLayout {
    /// Fails if either dimension is zero or `rows * columns` doesn't fit in `usize`.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 || rows.checked_mul(columns).is_none() {
            return Err(MatrixError::InvalidDimension { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            block_rows: rows.div_ceil(BLOCK_SIZE),
            block_columns: columns.div_ceil(BLOCK_SIZE),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `rows * columns`; never overflows for a constructed layout.
    pub fn element_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn block_rows(&self) -> usize {
        self.block_rows
    }

    pub fn block_columns(&self) -> usize {
        self.block_columns
    }

    /// Layout of the transposed matrix.
    pub fn transposed(&self) -> Self {
        Self {
            rows: self.columns,
            columns: self.rows,
            block_rows: self.block_columns,
            block_columns: self.block_rows,
        }
    }

    /// Total number of blocks in the grid.
    pub fn block_count(&self) -> usize {
        self.block_rows * self.block_columns
    }

    /// Height of the blocks in block-row `block_row`.
    pub fn block_height(&self, block_row: usize) -> usize {
        if block_row == self.block_rows - 1 {
            self.rows - block_row * BLOCK_SIZE
        } else {
            BLOCK_SIZE
        }
    }

    /// Width of the blocks in block-column `block_column`.
    pub fn block_width(&self, block_column: usize) -> usize {
        if block_column == self.block_columns - 1 {
            self.columns - block_column * BLOCK_SIZE
        } else {
            BLOCK_SIZE
        }
    }

    pub fn block_index(&self, block_row: usize, block_column: usize) -> usize {
        block_row * self.block_columns + block_column
    }

    /// Maps `(row, column)` to `(block index, offset inside the block)`.
    ///
    /// Callers check bounds first.
    #[inline]
    pub fn locate(&self, row: usize, column: usize) -> (usize, usize) {
        let i_block = row / BLOCK_SIZE;
        let j_block = column / BLOCK_SIZE;
        let offset =
            (row - i_block * BLOCK_SIZE) * self.block_width(j_block) + (column - j_block * BLOCK_SIZE);
        (self.block_index(i_block, j_block), offset)
    }

    /// Allocates a zero-filled block array for this grid.
    pub fn create_blocks<T: Element>(&self) -> Vec<Block<T>> {
        let mut blocks = Vec::with_capacity(self.block_count());
        for i_block in 0..self.block_rows {
            let height = self.block_height(i_block);
            for j_block in 0..self.block_columns {
                let width = self.block_width(j_block);
                blocks.push(vec![T::zero(); height * width].into_boxed_slice());
            }
        }
        blocks
    }

    /// Copies a rectangular row-major array into block form.
    ///
    /// Each source row lands as one contiguous run in every block it crosses.
    pub fn to_blocks<T: Element>(&self, raw: &[Vec<T>]) -> Result<Vec<Block<T>>> {
        check_rectangular(raw)?;
        if raw.len() != self.rows {
            return Err(MatrixError::DimensionMismatch {
                expected: self.rows,
                actual: raw.len(),
            });
        }
        if raw[0].len() != self.columns {
            return Err(MatrixError::DimensionMismatch {
                expected: self.columns,
                actual: raw[0].len(),
            });
        }

        let mut blocks = Vec::with_capacity(self.block_count());
        for i_block in 0..self.block_rows {
            let p_start = i_block * BLOCK_SIZE;
            let p_end = p_start + self.block_height(i_block);
            for j_block in 0..self.block_columns {
                let width = self.block_width(j_block);
                let q_start = j_block * BLOCK_SIZE;
                let mut block = Vec::with_capacity((p_end - p_start) * width);
                for row in &raw[p_start..p_end] {
                    block.extend_from_slice(&row[q_start..q_start + width]);
                }
                blocks.push(block.into_boxed_slice());
            }
        }
        Ok(blocks)
    }

    /// Same as [`to_blocks`](Self::to_blocks) but from one flat row-major slice.
    pub fn flat_to_blocks<T: Element>(&self, data: &[T]) -> Result<Vec<Block<T>>> {
        let expected = self.element_count();
        if data.len() != expected {
            return Err(MatrixError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }

        let mut blocks = Vec::with_capacity(self.block_count());
        for i_block in 0..self.block_rows {
            let p_start = i_block * BLOCK_SIZE;
            let p_end = p_start + self.block_height(i_block);
            for j_block in 0..self.block_columns {
                let width = self.block_width(j_block);
                let q_start = j_block * BLOCK_SIZE;
                let mut block = Vec::with_capacity((p_end - p_start) * width);
                for p in p_start..p_end {
                    let start = p * self.columns + q_start;
                    block.extend_from_slice(&data[start..start + width]);
                }
                blocks.push(block.into_boxed_slice());
            }
        }
        Ok(blocks)
    }

    /// Materializes blocks back into row-major rows.
    pub fn to_rows<T: Element>(&self, blocks: &[Block<T>]) -> Vec<Vec<T>> {
        let mut out = Vec::with_capacity(self.rows);
        for i_block in 0..self.block_rows {
            let height = self.block_height(i_block);
            for i in 0..height {
                let mut row = Vec::with_capacity(self.columns);
                for j_block in 0..self.block_columns {
                    let width = self.block_width(j_block);
                    let block = &blocks[self.block_index(i_block, j_block)];
                    row.extend_from_slice(&block[i * width..(i + 1) * width]);
                }
                out.push(row);
            }
        }
        out
    }

    /// Materializes blocks into one flat row-major vector.
    pub fn to_flat<T: Element>(&self, blocks: &[Block<T>]) -> Vec<T> {
        let mut out = Vec::with_capacity(self.element_count());
        for i_block in 0..self.block_rows {
            let height = self.block_height(i_block);
            for i in 0..height {
                for j_block in 0..self.block_columns {
                    let width = self.block_width(j_block);
                    let block = &blocks[self.block_index(i_block, j_block)];
                    out.extend_from_slice(&block[i * width..(i + 1) * width]);
                }
            }
        }
        out
    }
}

/// Fails if `raw` is empty or its rows don't all share the first row's length.
pub(crate) fn check_rectangular<T>(raw: &[Vec<T>]) -> Result<(usize, usize)> {
    let rows = raw.len();
    let columns = raw.first().map_or(0, Vec::len);
    if rows == 0 || columns == 0 {
        return Err(MatrixError::InvalidDimension { rows, columns });
    }
    for row in raw {
        if row.len() != columns {
            return Err(MatrixError::DimensionMismatch {
                expected: columns,
                actual: row.len(),
            });
        }
    }
    Ok((rows, columns))
}
