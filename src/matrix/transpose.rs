use super::BlockMatrix;
use crate::element::Element;

impl<T: Element> BlockMatrix<T> {
    /// Transpose a block matrix: out = selfᵀ
    ///
    /// The output grid is the input grid with block-rows and block-columns
    /// swapped, so output block `(i, j)` is exactly input block `(j, i)`
    /// transposed. Each block is copied with a strided walk: write the
    /// output row-major, read the input down a column (stride = input block width).
    ///
    /// # Example
    ///
    /// ```
    /// use blockmat::BlockMatrix;
    ///
    /// let m = BlockMatrix::from_rows(&[vec![1.0, 2.0, 3.0],   // 2×3 matrix
    ///                                  vec![4.0, 5.0, 6.0]]).unwrap();
    ///
    /// let t = m.transpose();                                    // 3×2
    ///
    /// assert_eq!(t.to_rows(), vec![vec![1.0, 4.0],
    ///                              vec![2.0, 5.0],
    ///                              vec![3.0, 6.0]]);
    /// ```
    pub fn transpose(&self) -> Self {
        let src = self.layout;
        let dst = src.transposed();

        let mut blocks = Vec::with_capacity(dst.block_count());
        for i_block in 0..dst.block_rows() {
            for j_block in 0..dst.block_columns() {
                let source = &self.blocks[src.block_index(j_block, i_block)];
                // rows of the output block = columns of the source block
                let height = dst.block_height(i_block);
                let width = dst.block_width(j_block);
                let mut out = Vec::with_capacity(height * width);
                for p in 0..height {
                    let mut l = p;
                    for _ in 0..width {
                        out.push(source[l]);
                        l += height;
                    }
                }
                blocks.push(out.into_boxed_slice());
            }
        }
        BlockMatrix::from_parts(dst, blocks)
    }
}

#[cfg(test)]
mod tests {
    use crate::BlockMatrix;

    #[test]
    fn test_transpose_entries() {
        let (rows, columns) = (53, 105);
        let data: Vec<f64> = (0..rows * columns).map(|i| i as f64).collect();
        let m = BlockMatrix::from_row_major(rows, columns, &data).unwrap();
        let t = m.transpose();
        assert_eq!((t.rows(), t.columns()), (columns, rows));
        for r in 0..rows {
            for c in 0..columns {
                assert_eq!(t.get(c, r).unwrap(), m.get(r, c).unwrap());
            }
        }
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let m = BlockMatrix::from_row_major(1, 60, &[0.25f32; 60]).unwrap();
        assert_eq!(m.transpose().transpose(), m);
    }
}
