//! Blocked GEMM over block matrices.

use std::ops::Range;

use crate::element::Element;
use crate::kernels::dot::dot_strided;
use crate::layout::{Block, BlockLayout};
use crate::matrix::BlockMatrix;

/// Computes block-rows `block_rows` of C = A * B into `dest`.
///
/// `dest` holds exactly those block-rows of C (laid out by `dest_layout`),
/// zero-filled or holding a partial sum to accumulate into. Every
/// destination block `(i, j)` sums over k-blocks in ascending order; inside
/// a k-block it goes row by row, column by column. That order is what makes
/// the result reproducible, so callers must not reorder it.
///
/// Shapes are validated by the caller.
///
/// # Panics
///
/// Panics if `dest` doesn't hold `block_rows.len() * dest_layout.block_columns()` blocks.
pub fn multiply_block_rows<T: Element>(
    a: &BlockMatrix<T>,
    b: &BlockMatrix<T>,
    dest: &mut [Block<T>],
    dest_layout: &BlockLayout,
    block_rows: Range<usize>,
) {
    let block_columns = dest_layout.block_columns();
    assert_eq!(
        dest.len(),
        block_rows.len() * block_columns,
        "dest: expected {} block-rows of {} blocks",
        block_rows.len(),
        block_columns
    );

    let a_layout = a.layout();
    let b_layout = b.layout();

    for (i_block, row_blocks) in block_rows.zip(dest.chunks_mut(block_columns)) {
        let height = dest_layout.block_height(i_block);

        for (j_block, out) in row_blocks.iter_mut().enumerate() {
            let width = dest_layout.block_width(j_block);

            for k_block in 0..a_layout.block_columns() {
                let k_width = a_layout.block_width(k_block);
                let a_block = &a.blocks()[a_layout.block_index(i_block, k_block)];
                let b_block = &b.blocks()[b_layout.block_index(k_block, j_block)];

                // a_block is height × k_width, b_block is k_width × width
                let mut k = 0;
                for a_row in a_block.chunks_exact(k_width).take(height) {
                    for n_start in 0..width {
                        out[k] += dot_strided(a_row, b_block, n_start, width);
                        k += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::naive_ijk::matmul_naive_ijk;

    fn patterned(rows: usize, columns: usize, modulus: usize) -> BlockMatrix<f64> {
        let data: Vec<f64> = (0..rows * columns).map(|i| (i % modulus) as f64).collect();
        BlockMatrix::from_row_major(rows, columns, &data).unwrap()
    }

    #[test]
    fn test_gemm_blocks_correctness() {
        let (m, n, k) = (110, 57, 105);
        let a = patterned(m, k, 10);
        let b = patterned(k, n, 7);
        let layout = BlockLayout::new(m, n).unwrap();
        let mut dest = layout.create_blocks::<f64>();

        multiply_block_rows(&a, &b, &mut dest, &layout, 0..layout.block_rows());

        let mut c_naive = vec![0.0; m * n];
        matmul_naive_ijk(&a.to_row_major(), &b.to_row_major(), &mut c_naive, m, n, k);
        assert_eq!(layout.to_flat(&dest), c_naive);
    }

    #[test]
    fn test_gemm_partial_block_rows() {
        let (m, n, k) = (160, 60, 60);
        let a = patterned(m, k, 10);
        let b = patterned(k, n, 10);
        let layout = BlockLayout::new(m, n).unwrap();

        let mut full = layout.create_blocks::<f64>();
        multiply_block_rows(&a, &b, &mut full, &layout, 0..layout.block_rows());

        // compute block-rows 1..3 on their own and compare against the full run
        let columns = layout.block_columns();
        let mut part = full[columns..].to_vec();
        for block in part.iter_mut() {
            block.fill(0.0);
        }
        multiply_block_rows(&a, &b, &mut part, &layout, 1..layout.block_rows());
        assert_eq!(&full[columns..], &part[..]);
    }

    #[test]
    #[should_panic(expected = "dest")]
    fn test_gemm_wrong_dest_len() {
        let a = patterned(10, 10, 3);
        let layout = BlockLayout::new(10, 10).unwrap();
        let mut dest: Vec<Block<f64>> = Vec::new();
        multiply_block_rows(&a, &a, &mut dest, &layout, 0..1);
    }
}
