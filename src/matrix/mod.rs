//! The block matrix type and its element-level operations.
//!
//! Other operations live in sibling modules:
//! - `lines`: row/column gather and scatter
//! - `arith`: add/subtract, scalar ops, norms, matrix-vector products
//! - `transpose`: blocked transpose
//! - `submatrix`: sub-range extraction and insertion
//! - `multiply`: shape checks and sequential/parallel dispatch
//! - `naive_ijk`: textbook triple loop, used as a correctness baseline

mod arith;
mod lines;
mod multiply;
pub mod naive_ijk;
mod submatrix;
mod transpose;

pub(crate) use submatrix::check_range;

use crate::element::Element;
use crate::error::{Axis, MatrixError, Result};
use crate::layout::{Block, BlockLayout, check_rectangular};

/// A dense matrix stored as a grid of square tiles.
///
/// Each matrix owns its blocks outright; every operation that produces a new
/// matrix allocates fresh storage.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMatrix<T: Element> {
    layout: BlockLayout,
    blocks: Vec<Block<T>>,
}

/// Read access shared by block matrices and plain row-major data.
///
/// `add` and `subtract` accept any view. They take the flat per-block path
/// when [`as_block_matrix`](Self::as_block_matrix) returns a matrix with the
/// same grid, and fall back to per-entry access otherwise.
pub trait MatrixView<T: Element> {
    fn rows(&self) -> usize;
    fn columns(&self) -> usize;

    /// Entry at `(row, column)`. Callers stay in bounds.
    fn entry(&self, row: usize, column: usize) -> T;

    fn as_block_matrix(&self) -> Option<&BlockMatrix<T>> {
        None
    }

    /// Fails if the view can't answer `entry` for every in-shape coordinate.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl<T: Element> MatrixView<T> for BlockMatrix<T> {
    fn rows(&self) -> usize {
        self.layout.rows()
    }

    fn columns(&self) -> usize {
        self.layout.columns()
    }

    fn entry(&self, row: usize, column: usize) -> T {
        let (index, offset) = self.layout.locate(row, column);
        self.blocks[index][offset]
    }

    fn as_block_matrix(&self) -> Option<&BlockMatrix<T>> {
        Some(self)
    }
}

impl<T: Element> MatrixView<T> for Vec<Vec<T>> {
    fn rows(&self) -> usize {
        self.len()
    }

    fn columns(&self) -> usize {
        self.first().map_or(0, Vec::len)
    }

    fn entry(&self, row: usize, column: usize) -> T {
        self[row][column]
    }

    fn validate(&self) -> Result<()> {
        check_rectangular(self).map(|_| ())
    }
}

impl<T: Element> BlockMatrix<T> {
    /// Zero-filled `rows × columns` matrix.
    pub fn zeros(rows: usize, columns: usize) -> Result<Self> {
        let layout = BlockLayout::new(rows, columns)?;
        let blocks = layout.create_blocks();
        Ok(Self { layout, blocks })
    }

    /// Copies a rectangular array of rows into block form.
    pub fn from_rows(raw: &[Vec<T>]) -> Result<Self> {
        let layout = BlockLayout::new(raw.len(), raw.first().map_or(0, Vec::len))?;
        // to_blocks rejects ragged rows
        let blocks = layout.to_blocks(raw)?;
        Ok(Self { layout, blocks })
    }

    /// Copies a flat row-major slice of `rows * columns` elements.
    pub fn from_row_major(rows: usize, columns: usize, data: &[T]) -> Result<Self> {
        let layout = BlockLayout::new(rows, columns)?;
        let blocks = layout.flat_to_blocks(data)?;
        Ok(Self { layout, blocks })
    }

    /// `n × n` identity.
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            let (index, offset) = m.layout.locate(i, i);
            m.blocks[index][offset] = T::one();
        }
        Ok(m)
    }

    /// Wraps blocks already laid out for `layout`.
    pub(crate) fn from_parts(layout: BlockLayout, blocks: Vec<Block<T>>) -> Self {
        debug_assert_eq!(blocks.len(), layout.block_count());
        Self { layout, blocks }
    }

    pub fn rows(&self) -> usize {
        self.layout.rows()
    }

    pub fn columns(&self) -> usize {
        self.layout.columns()
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.columns()
    }

    pub fn layout(&self) -> &BlockLayout {
        &self.layout
    }

    /// Backing blocks in row-major block order.
    pub fn blocks(&self) -> &[Block<T>] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut [Block<T>] {
        &mut self.blocks
    }

    /// Row-major copy as a vector of rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.layout.to_rows(&self.blocks)
    }

    /// Row-major copy as one flat vector.
    pub fn to_row_major(&self) -> Vec<T> {
        self.layout.to_flat(&self.blocks)
    }

    pub fn get(&self, row: usize, column: usize) -> Result<T> {
        let (index, offset) = self.checked_locate(row, column)?;
        Ok(self.blocks[index][offset])
    }

    pub fn set(&mut self, row: usize, column: usize, value: T) -> Result<()> {
        let (index, offset) = self.checked_locate(row, column)?;
        self.blocks[index][offset] = value;
        Ok(())
    }

    /// Adds `increment` to the entry in place.
    pub fn add_to_entry(&mut self, row: usize, column: usize, increment: T) -> Result<()> {
        let (index, offset) = self.checked_locate(row, column)?;
        self.blocks[index][offset] += increment;
        Ok(())
    }

    /// Multiplies the entry by `factor` in place.
    pub fn multiply_entry(&mut self, row: usize, column: usize, factor: T) -> Result<()> {
        let (index, offset) = self.checked_locate(row, column)?;
        let entry = &mut self.blocks[index][offset];
        *entry = *entry * factor;
        Ok(())
    }

    fn checked_locate(&self, row: usize, column: usize) -> Result<(usize, usize)> {
        self.check_row(row)?;
        self.check_column(column)?;
        Ok(self.layout.locate(row, column))
    }

    pub(crate) fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows() {
            return Err(MatrixError::IndexOutOfRange {
                axis: Axis::Row,
                index: row,
                bound: self.rows(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_column(&self, column: usize) -> Result<()> {
        if column >= self.columns() {
            return Err(MatrixError::IndexOutOfRange {
                axis: Axis::Column,
                index: column,
                bound: self.columns(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(rows: usize, columns: usize) -> BlockMatrix<f64> {
        let data: Vec<f64> = (0..rows * columns).map(|i| i as f64).collect();
        BlockMatrix::from_row_major(rows, columns, &data).unwrap()
    }

    #[test]
    fn test_zeros() {
        let m = BlockMatrix::<f64>::zeros(60, 7).unwrap();
        for r in 0..60 {
            for c in 0..7 {
                assert_eq!(m.get(r, c).unwrap(), 0.0);
            }
        }
        assert!(BlockMatrix::<f64>::zeros(0, 1).is_err());
    }

    #[test]
    fn test_entry_in_expected_block() {
        // entry(r, c) = r * 100 + c
        let m = counting(100, 100);
        assert_eq!(m.layout().block_rows(), 2);
        assert_eq!(m.layout().block_columns(), 2);
        assert_eq!(m.get(51, 51).unwrap(), 5151.0);
        assert_eq!(m.blocks()[0][51 * 52 + 51], 5151.0);
        assert_eq!(m.get(52, 52).unwrap(), 5252.0);
        assert_eq!(m.blocks()[3][0], 5252.0);
    }

    #[test]
    fn test_set_add_multiply_entry() {
        let mut m = BlockMatrix::<f64>::zeros(70, 70).unwrap();
        m.set(60, 3, 2.0).unwrap();
        m.add_to_entry(60, 3, 1.5).unwrap();
        m.multiply_entry(60, 3, 2.0).unwrap();
        assert_eq!(m.get(60, 3).unwrap(), 7.0);
    }

    #[test]
    fn test_out_of_range() {
        let mut m = BlockMatrix::<f64>::zeros(3, 4).unwrap();
        assert_eq!(
            m.get(3, 0),
            Err(MatrixError::IndexOutOfRange {
                axis: Axis::Row,
                index: 3,
                bound: 3
            })
        );
        assert_eq!(
            m.set(0, 4, 1.0),
            Err(MatrixError::IndexOutOfRange {
                axis: Axis::Column,
                index: 4,
                bound: 4
            })
        );
        assert!(m.add_to_entry(5, 5, 1.0).is_err());
        assert!(m.multiply_entry(0, 9, 1.0).is_err());
    }

    #[test]
    fn test_from_row_major_huge_shape() {
        let huge = usize::MAX / 2;
        assert_eq!(
            BlockMatrix::<f64>::from_row_major(huge, 3, &[]),
            Err(MatrixError::InvalidDimension {
                rows: huge,
                columns: 3
            })
        );
        assert_eq!(
            BlockMatrix::<f64>::from_row_major(2, 3, &[1.0; 5]),
            Err(MatrixError::DimensionMismatch {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn test_from_rows_validation() {
        assert_eq!(
            BlockMatrix::<f64>::from_rows(&[]),
            Err(MatrixError::InvalidDimension {
                rows: 0,
                columns: 0
            })
        );
        assert_eq!(
            BlockMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0]]),
            Err(MatrixError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_identity() {
        let m = BlockMatrix::<f32>::identity(55).unwrap();
        assert_eq!(m.get(54, 54).unwrap(), 1.0);
        assert_eq!(m.get(54, 53).unwrap(), 0.0);
    }

    #[test]
    fn test_clone_does_not_alias() {
        let a = counting(60, 60);
        let mut b = a.clone();
        b.set(0, 0, -1.0).unwrap();
        assert_eq!(a.get(0, 0).unwrap(), 0.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_rows_view() {
        let raw = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(raw.rows(), 2);
        assert_eq!(raw.columns(), 2);
        assert_eq!(MatrixView::entry(&raw, 1, 0), 3.0);
        assert!(raw.as_block_matrix().is_none());
    }
}
