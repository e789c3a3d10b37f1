//! 4-way unrolled dot products.
//!
//! Summation order is fixed: each group of four products is added together
//! first and the group total is then added to the running sum. Results are
//! only bit-reproducible if every caller goes through these functions.

use crate::element::Element;

/// Dot product of `lhs` with `lhs.len()` elements of `rhs`, starting at
/// `start` and stepping by `stride`.
///
/// In a row-major block of width `stride`, that is column `start` read top
/// to bottom.
///
/// # Panics
///
/// Panics if `rhs` is too short for `lhs.len()` strided reads.
#[inline]
pub fn dot_strided<T: Element>(lhs: &[T], rhs: &[T], start: usize, stride: usize) -> T {
    let len = lhs.len();
    let stride2 = stride + stride;
    let stride3 = stride2 + stride;
    let stride4 = stride3 + stride;

    let mut sum = T::zero();
    let mut l = 0;
    let mut n = start;
    while l + 3 < len {
        sum += lhs[l] * rhs[n]
            + lhs[l + 1] * rhs[n + stride]
            + lhs[l + 2] * rhs[n + stride2]
            + lhs[l + 3] * rhs[n + stride3];
        l += 4;
        n += stride4;
    }
    while l < len {
        sum += lhs[l] * rhs[n];
        l += 1;
        n += stride;
    }
    sum
}

/// Dot product of two slices of equal length.
///
/// # Panics
///
/// Panics if `rhs` is shorter than `lhs`.
#[inline]
pub fn dot_contiguous<T: Element>(lhs: &[T], rhs: &[T]) -> T {
    let len = lhs.len();
    let mut sum = T::zero();
    let mut l = 0;
    while l + 3 < len {
        sum += lhs[l] * rhs[l]
            + lhs[l + 1] * rhs[l + 1]
            + lhs[l + 2] * rhs[l + 2]
            + lhs[l + 3] * rhs[l + 3];
        l += 4;
    }
    while l < len {
        sum += lhs[l] * rhs[l];
        l += 1;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_strided(lhs: &[f64], rhs: &[f64], start: usize, stride: usize) -> f64 {
        lhs.iter()
            .enumerate()
            .map(|(i, &x)| x * rhs[start + i * stride])
            .sum()
    }

    #[test]
    fn test_strided_all_tail_lengths() {
        // lengths 0..=9 hit every remainder of the 4-way unroll
        let stride = 5;
        for len in 0..=9 {
            let lhs: Vec<f64> = (0..len).map(|i| (i + 1) as f64).collect();
            let rhs: Vec<f64> = (0..len * stride + 3).map(|i| (i % 7) as f64).collect();
            for start in 0..3 {
                assert_eq!(
                    dot_strided(&lhs, &rhs, start, stride),
                    naive_strided(&lhs, &rhs, start, stride),
                    "len={} start={}",
                    len,
                    start
                );
            }
        }
    }

    #[test]
    fn test_contiguous_matches_unit_stride() {
        for len in 0..=11 {
            let lhs: Vec<f64> = (0..len).map(|i| i as f64 * 0.5).collect();
            let rhs: Vec<f64> = (0..len).map(|i| 3.0 - i as f64).collect();
            assert_eq!(dot_contiguous(&lhs, &rhs), dot_strided(&lhs, &rhs, 0, 1));
        }
    }

    #[test]
    fn test_f32() {
        let lhs = [1.0f32, 2.0, 3.0, 4.0, 5.0];
        let rhs = [1.0f32; 5];
        assert_eq!(dot_contiguous(&lhs, &rhs), 15.0);
    }
}
