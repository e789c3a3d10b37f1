//! Elementwise arithmetic, norms and matrix-vector products.

use super::{BlockMatrix, MatrixView};
use crate::element::Element;
use crate::error::{MatrixError, Result};
use crate::kernels::dot::{dot_contiguous, dot_strided};
use crate::layout::BLOCK_SIZE;

impl<T: Element> BlockMatrix<T> {
    /// `self + other`.
    pub fn add<M: MatrixView<T> + ?Sized>(&self, other: &M) -> Result<Self> {
        self.combine(other, |a, b| a + b)
    }

    /// `self - other`.
    pub fn subtract<M: MatrixView<T> + ?Sized>(&self, other: &M) -> Result<Self> {
        self.combine(other, |a, b| a - b)
    }

    fn combine<M, F>(&self, other: &M, op: F) -> Result<Self>
    where
        M: MatrixView<T> + ?Sized,
        F: Fn(T, T) -> T,
    {
        self.check_same_shape(other)?;
        let mut out = self.clone();

        // Same shape means same grid: walk the flat buffers side by side.
        if let Some(other) = other.as_block_matrix() {
            for (out_block, other_block) in out.blocks.iter_mut().zip(&other.blocks) {
                for (x, &y) in out_block.iter_mut().zip(other_block.iter()) {
                    *x = op(*x, y);
                }
            }
            return Ok(out);
        }

        let layout = self.layout;
        for i_block in 0..layout.block_rows() {
            let p_start = i_block * BLOCK_SIZE;
            let p_end = p_start + layout.block_height(i_block);
            for j_block in 0..layout.block_columns() {
                let q_start = j_block * BLOCK_SIZE;
                let q_end = q_start + layout.block_width(j_block);
                let block = &mut out.blocks[layout.block_index(i_block, j_block)];
                let mut k = 0;
                for p in p_start..p_end {
                    for q in q_start..q_end {
                        block[k] = op(block[k], other.entry(p, q));
                        k += 1;
                    }
                }
            }
        }
        Ok(out)
    }

    fn check_same_shape<M: MatrixView<T> + ?Sized>(&self, other: &M) -> Result<()> {
        other.validate()?;
        if other.rows() != self.rows() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.rows(),
                actual: other.rows(),
            });
        }
        if other.columns() != self.columns() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.columns(),
                actual: other.columns(),
            });
        }
        Ok(())
    }

    /// Adds `d` to every entry.
    pub fn scalar_add(&self, d: T) -> Self {
        self.map_entries(|x| x + d)
    }

    /// Multiplies every entry by `d`.
    pub fn scalar_multiply(&self, d: T) -> Self {
        self.map_entries(|x| x * d)
    }

    fn map_entries<F: Fn(T) -> T>(&self, f: F) -> Self {
        let mut out = self.clone();
        for block in out.blocks.iter_mut() {
            for x in block.iter_mut() {
                *x = f(*x);
            }
        }
        out
    }

    /// Maximum absolute column sum.
    pub fn norm(&self) -> T {
        let layout = self.layout;
        let mut column_sums = [T::zero(); BLOCK_SIZE];
        let mut max_column_sum = T::zero();
        for j_block in 0..layout.block_columns() {
            let width = layout.block_width(j_block);
            column_sums[..width].fill(T::zero());
            for i_block in 0..layout.block_rows() {
                let height = layout.block_height(i_block);
                let block = &self.blocks[layout.block_index(i_block, j_block)];
                for (j, column_sum) in column_sums[..width].iter_mut().enumerate() {
                    let mut sum = T::zero();
                    for i in 0..height {
                        sum += block[i * width + j].abs();
                    }
                    *column_sum += sum;
                }
            }
            for &sum in &column_sums[..width] {
                max_column_sum = max_column_sum.max(sum);
            }
        }
        max_column_sum
    }

    /// Square root of the sum of squared entries.
    pub fn frobenius_norm(&self) -> T {
        let mut sum2 = T::zero();
        for block in &self.blocks {
            for &x in block.iter() {
                sum2 += x * x;
            }
        }
        sum2.sqrt()
    }

    /// Sum of the diagonal. Square matrices only.
    pub fn trace(&self) -> Result<T> {
        if !self.is_square() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.rows(),
                actual: self.columns(),
            });
        }
        let mut trace = T::zero();
        for i in 0..self.rows() {
            let (index, offset) = self.layout.locate(i, i);
            trace += self.blocks[index][offset];
        }
        Ok(trace)
    }

    /// `self · v` for a column vector `v`.
    pub fn operate(&self, v: &[T]) -> Result<Vec<T>> {
        if v.len() != self.columns() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.columns(),
                actual: v.len(),
            });
        }
        let layout = self.layout;
        let mut out = vec![T::zero(); self.rows()];
        for i_block in 0..layout.block_rows() {
            let p_start = i_block * BLOCK_SIZE;
            let height = layout.block_height(i_block);
            for j_block in 0..layout.block_columns() {
                let width = layout.block_width(j_block);
                let q_start = j_block * BLOCK_SIZE;
                let block = &self.blocks[layout.block_index(i_block, j_block)];
                let segment = &v[q_start..q_start + width];
                for (i, block_row) in block.chunks_exact(width).take(height).enumerate() {
                    out[p_start + i] += dot_contiguous(block_row, segment);
                }
            }
        }
        Ok(out)
    }

    /// `vᵀ · self` for a row vector `v`.
    pub fn pre_multiply(&self, v: &[T]) -> Result<Vec<T>> {
        if v.len() != self.rows() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.rows(),
                actual: v.len(),
            });
        }
        let layout = self.layout;
        let mut out = vec![T::zero(); self.columns()];
        for j_block in 0..layout.block_columns() {
            let width = layout.block_width(j_block);
            let q_start = j_block * BLOCK_SIZE;
            for i_block in 0..layout.block_rows() {
                let p_start = i_block * BLOCK_SIZE;
                let height = layout.block_height(i_block);
                let block = &self.blocks[layout.block_index(i_block, j_block)];
                let segment = &v[p_start..p_start + height];
                for j in 0..width {
                    out[q_start + j] += dot_strided(segment, block, j, width);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::BlockMatrix;
    use crate::error::MatrixError;

    fn counting(rows: usize, columns: usize) -> BlockMatrix<f64> {
        let data: Vec<f64> = (0..rows * columns).map(|i| (i % 13) as f64).collect();
        BlockMatrix::from_row_major(rows, columns, &data).unwrap()
    }

    #[test]
    fn test_add_subtract_block_path() {
        let a = counting(60, 70);
        let b = a.scalar_multiply(2.0);
        let sum = a.add(&b).unwrap();
        assert_eq!(sum, a.scalar_multiply(3.0));
        assert_eq!(sum.subtract(&b).unwrap(), a);
    }

    #[test]
    fn test_add_matches_across_paths() {
        let a = counting(60, 70);
        let b = counting(60, 70).scalar_add(1.0);
        let raw = b.to_rows();
        assert_eq!(a.add(&b).unwrap(), a.add(&raw).unwrap());
        assert_eq!(a.subtract(&b).unwrap(), a.subtract(&raw).unwrap());
    }

    #[test]
    fn test_add_shape_mismatch() {
        let a = counting(3, 4);
        let b = counting(4, 4);
        assert_eq!(
            a.add(&b),
            Err(MatrixError::DimensionMismatch {
                expected: 3,
                actual: 4
            })
        );
        let c = counting(3, 5);
        assert!(a.subtract(&c).is_err());

        let ragged = vec![vec![1.0; 4], vec![1.0; 4], vec![1.0; 2]];
        assert!(a.add(&ragged).is_err());
    }

    #[test]
    fn test_norms() {
        let m = BlockMatrix::from_rows(&[vec![1.0, -2.0], vec![-3.0, 4.0]]).unwrap();
        assert_eq!(m.norm(), 6.0);
        assert!((m.frobenius_norm() - 30.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_norm_spans_blocks() {
        let mut m = BlockMatrix::<f64>::zeros(120, 120).unwrap();
        for r in 0..120 {
            m.set(r, 100, -1.0).unwrap();
        }
        assert_eq!(m.norm(), 120.0);
    }

    #[test]
    fn test_trace() {
        let m = BlockMatrix::<f64>::identity(60).unwrap().scalar_multiply(2.0);
        assert_eq!(m.trace().unwrap(), 120.0);
        assert!(counting(2, 3).trace().is_err());
    }

    #[test]
    fn test_operate_and_pre_multiply() {
        let (rows, columns) = (61, 107);
        let m = counting(rows, columns);
        let raw = m.to_rows();
        let v: Vec<f64> = (0..columns).map(|i| (i % 5) as f64).collect();
        let w: Vec<f64> = (0..rows).map(|i| (i % 3) as f64).collect();

        let expected: Vec<f64> = raw
            .iter()
            .map(|row| row.iter().zip(&v).map(|(a, b)| a * b).sum())
            .collect();
        assert_eq!(m.operate(&v).unwrap(), expected);

        let expected: Vec<f64> = (0..columns)
            .map(|c| (0..rows).map(|r| w[r] * raw[r][c]).sum())
            .collect();
        assert_eq!(m.pre_multiply(&w).unwrap(), expected);

        assert!(m.operate(&w).is_err());
        assert!(m.pre_multiply(&v).is_err());
    }
}
