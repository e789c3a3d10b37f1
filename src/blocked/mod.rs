//! Sequential blocked multiply.
//!
//! Works tile by tile: each destination block accumulates the products of
//! one block-row of A with one block-column of B, reading both operands as
//! whole contiguous blocks. The inner dot products come from
//! [`kernels::dot`](crate::kernels::dot).
//!
//! The parallel scheduler in [`threaded`](crate::threaded) calls the same
//! routine on disjoint block-row ranges, so both paths produce bit-identical
//! results.

pub mod gemm;
