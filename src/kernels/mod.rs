//! Unrolled dot products for the inner loops of the blocked routines.
//!
//! These kernels do the innermost accumulate step for multiply and for the
//! matrix-vector products. The loop body handles four terms per iteration,
//! with a scalar tail for the last 0-3.
//!
//! Available kernels:
//! - `dot`: contiguous and strided dot products, unrolled by 4

pub mod dot;
