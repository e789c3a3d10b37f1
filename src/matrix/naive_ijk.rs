use crate::element::Element;

/// Reference product on flat row-major slices: `c += a * b`.
///
/// `a` is `m × k`, `b` is `k × n`, `c` is `m × n`. No tiling, no unrolling:
/// each output entry is one running sum over `k` in ascending order. The block
/// engine's tests and benches check [`BlockMatrix::multiply`] against it.
///
/// [`BlockMatrix::multiply`]: crate::BlockMatrix::multiply
pub fn matmul_naive_ijk<T: Element>(a: &[T], b: &[T], c: &mut [T], m: usize, n: usize, k: usize) {
    for (a_row, c_row) in a.chunks_exact(k).zip(c.chunks_exact_mut(n)).take(m) {
        for (j, out) in c_row.iter_mut().enumerate() {
            let mut sum = *out;
            for (p, &x) in a_row.iter().enumerate() {
                sum += x * b[p * n + j];
            }
            *out = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_2x3_times_3x2() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = [0.0; 4];
        matmul_naive_ijk(&a, &b, &mut c, 2, 2, 3);
        assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_naive_accumulates_into_c() {
        let a = [1.0f32, 2.0];
        let b = [3.0f32, 4.0];
        let mut c = [10.0f32];
        matmul_naive_ijk(&a, &b, &mut c, 1, 1, 2);
        assert_eq!(c, [21.0]);
    }
}
