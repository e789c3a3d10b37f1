//! Numeric element types a [`BlockMatrix`](crate::BlockMatrix) can hold.

use std::fmt::Debug;
use std::ops::AddAssign;

use num_traits::Float;

/// Scalar type stored in matrix blocks.
///
/// The partitioning, traversal and scheduling code is written once against
/// this trait. Blocks are shared read-only across worker threads during a
/// parallel multiply, hence `Send + Sync`.
pub trait Element: Float + AddAssign + Send + Sync + Debug + 'static {}

impl Element for f64 {}
impl Element for f32 {}
