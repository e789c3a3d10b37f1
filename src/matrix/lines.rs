//! Row and column access.
//!
//! A row crosses every block in its block-row as one contiguous run, so it
//! moves with one slice copy per block. A column is strided inside each block
//! and goes element by element.

use super::BlockMatrix;
use crate::element::Element;
use crate::error::{MatrixError, Result};
use crate::layout::BLOCK_SIZE;

impl<T: Element> BlockMatrix<T> {
    pub fn row(&self, row: usize) -> Result<Vec<T>> {
        self.check_row(row)?;
        let layout = self.layout;
        let i_block = row / BLOCK_SIZE;
        let i_row = row - i_block * BLOCK_SIZE;
        let mut out = Vec::with_capacity(self.columns());
        for j_block in 0..layout.block_columns() {
            let width = layout.block_width(j_block);
            let block = &self.blocks[layout.block_index(i_block, j_block)];
            out.extend_from_slice(&block[i_row * width..(i_row + 1) * width]);
        }
        Ok(out)
    }

    pub fn set_row(&mut self, row: usize, values: &[T]) -> Result<()> {
        self.check_row(row)?;
        if values.len() != self.columns() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.columns(),
                actual: values.len(),
            });
        }
        let layout = self.layout;
        let i_block = row / BLOCK_SIZE;
        let i_row = row - i_block * BLOCK_SIZE;
        let mut start = 0;
        for j_block in 0..layout.block_columns() {
            let width = layout.block_width(j_block);
            let block = &mut self.blocks[layout.block_index(i_block, j_block)];
            block[i_row * width..(i_row + 1) * width].copy_from_slice(&values[start..start + width]);
            start += width;
        }
        Ok(())
    }

    pub fn column(&self, column: usize) -> Result<Vec<T>> {
        self.check_column(column)?;
        let layout = self.layout;
        let j_block = column / BLOCK_SIZE;
        let j_column = column - j_block * BLOCK_SIZE;
        let width = layout.block_width(j_block);
        let mut out = Vec::with_capacity(self.rows());
        for i_block in 0..layout.block_rows() {
            let height = layout.block_height(i_block);
            let block = &self.blocks[layout.block_index(i_block, j_block)];
            for i in 0..height {
                out.push(block[i * width + j_column]);
            }
        }
        Ok(out)
    }

    pub fn set_column(&mut self, column: usize, values: &[T]) -> Result<()> {
        self.check_column(column)?;
        if values.len() != self.rows() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.rows(),
                actual: values.len(),
            });
        }
        let layout = self.layout;
        let j_block = column / BLOCK_SIZE;
        let j_column = column - j_block * BLOCK_SIZE;
        let width = layout.block_width(j_block);
        let mut source = values.iter();
        for i_block in 0..layout.block_rows() {
            let height = layout.block_height(i_block);
            let block = &mut self.blocks[layout.block_index(i_block, j_block)];
            for (i, &value) in (0..height).zip(&mut source) {
                block[i * width + j_column] = value;
            }
        }
        Ok(())
    }

    /// Row `row` as a `1 × columns` matrix.
    pub fn row_matrix(&self, row: usize) -> Result<Self> {
        let values = self.row(row)?;
        Self::from_row_major(1, self.columns(), &values)
    }

    /// Column `column` as a `rows × 1` matrix.
    pub fn column_matrix(&self, column: usize) -> Result<Self> {
        let values = self.column(column)?;
        Self::from_row_major(self.rows(), 1, &values)
    }

    /// Overwrites row `row` from a `1 × columns` matrix.
    pub fn set_row_matrix(&mut self, row: usize, source: &Self) -> Result<()> {
        if source.rows() != 1 {
            return Err(MatrixError::DimensionMismatch {
                expected: 1,
                actual: source.rows(),
            });
        }
        self.set_row(row, &source.to_row_major())
    }

    /// Overwrites column `column` from a `rows × 1` matrix.
    pub fn set_column_matrix(&mut self, column: usize, source: &Self) -> Result<()> {
        if source.columns() != 1 {
            return Err(MatrixError::DimensionMismatch {
                expected: 1,
                actual: source.columns(),
            });
        }
        self.set_column(column, &source.to_row_major())
    }
}

#[cfg(test)]
mod tests {
    use crate::BlockMatrix;
    use crate::error::MatrixError;

    fn counting(rows: usize, columns: usize) -> BlockMatrix<f64> {
        let data: Vec<f64> = (0..rows * columns).map(|i| i as f64).collect();
        BlockMatrix::from_row_major(rows, columns, &data).unwrap()
    }

    #[test]
    fn test_row_crosses_blocks() {
        let m = counting(60, 110);
        let row = m.row(53).unwrap();
        let expected: Vec<f64> = (0..110).map(|c| (53 * 110 + c) as f64).collect();
        assert_eq!(row, expected);
    }

    #[test]
    fn test_column_crosses_blocks() {
        let m = counting(110, 60);
        let column = m.column(57).unwrap();
        let expected: Vec<f64> = (0..110).map(|r| (r * 60 + 57) as f64).collect();
        assert_eq!(column, expected);
    }

    #[test]
    fn test_set_row_and_column() {
        let mut m = BlockMatrix::<f64>::zeros(105, 105).unwrap();
        let values: Vec<f64> = (0..105).map(|i| i as f64 + 1.0).collect();
        m.set_row(104, &values).unwrap();
        m.set_column(52, &values).unwrap();
        assert_eq!(m.get(104, 0).unwrap(), 1.0);
        assert_eq!(m.get(104, 104).unwrap(), 105.0);
        assert_eq!(m.column(52).unwrap(), values);
        // the column write overwrote one entry of the row
        assert_eq!(m.get(104, 52).unwrap(), 105.0);
    }

    #[test]
    fn test_line_length_checked() {
        let mut m = BlockMatrix::<f64>::zeros(3, 4).unwrap();
        assert_eq!(
            m.set_row(0, &[1.0, 2.0]),
            Err(MatrixError::DimensionMismatch {
                expected: 4,
                actual: 2
            })
        );
        assert!(m.set_column(0, &[1.0; 4]).is_err());
        assert!(m.row(3).is_err());
        assert!(m.column(4).is_err());
        // nothing was written
        assert_eq!(m, BlockMatrix::zeros(3, 4).unwrap());
    }

    #[test]
    fn test_line_matrices() {
        let mut m = counting(70, 80);
        let row = m.row_matrix(60).unwrap();
        assert_eq!((row.rows(), row.columns()), (1, 80));
        m.set_row_matrix(0, &row).unwrap();
        assert_eq!(m.row(0).unwrap(), m.row(60).unwrap());

        let column = m.column_matrix(79).unwrap();
        assert_eq!((column.rows(), column.columns()), (70, 1));
        m.set_column_matrix(0, &column).unwrap();
        assert_eq!(m.column(0).unwrap(), m.column(79).unwrap());
        assert!(m.set_row_matrix(0, &column).is_err());
    }
}
