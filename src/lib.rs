//! Block-tiled dense matrices in Rust.
//!
//! A matrix is cut into 52×52 tiles, each stored as its own contiguous
//! row-major buffer. Everything works a tile at a time: elementwise ops,
//! transpose, sub-range copies, traversal and, most importantly, multiply.
//! The multiply kernel accumulates tile by tile with a 4-way unrolled inner
//! loop, and large products are split across a fork-join task tree.
//!
//! ## Usage
//!
//! ```
//! use blockmat::BlockMatrix;
//!
//! let a = BlockMatrix::from_row_major(256, 256, &vec![1.0f64; 256 * 256]).unwrap();
//! let b = BlockMatrix::from_row_major(256, 256, &vec![1.0f64; 256 * 256]).unwrap();
//!
//! let c = a.multiply(&b).unwrap();
//! assert_eq!(c.get(10, 200).unwrap(), 256.0);
//! ```
//!
//! For explicit control over threading, pass a config and an executor:
//!
//! ```
//! use blockmat::{BlockMatrix, MultiplyConfig, RayonExecutor};
//!
//! let a = BlockMatrix::<f64>::identity(200).unwrap();
//! let executor = RayonExecutor::with_threads(4).unwrap();
//! let config = MultiplyConfig::default().with_parallel_threshold(100);
//!
//! let c = a.multiply_with(&a, &config, &executor).unwrap();
//! assert_eq!(c, a);
//! ```
//!
//! ## What's inside
//!
//! - Block layout and raw-array conversion (`layout`)
//! - Entry, row/column, arithmetic, transpose and sub-matrix ops (`matrix`)
//! - Row-order and block-order visitors (`visitor`)
//! - Unrolled dot-product kernels (`kernels`)
//! - Sequential blocked GEMM (`blocked`)
//! - Fork-join parallel scheduler over a pluggable executor (`threaded`)

pub mod blocked;
pub mod config;
pub mod element;
pub mod error;
pub mod kernels;
pub mod layout;
pub mod matrix;
pub mod threaded;
pub mod visitor;

pub use config::MultiplyConfig;
pub use element::Element;
pub use error::{Axis, MatrixError, Result};
pub use layout::{BLOCK_SIZE, Block, BlockLayout};
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use matrix::{BlockMatrix, MatrixView};
pub use threaded::{Executor, RayonExecutor, SequentialExecutor};
pub use visitor::{ChangingVisitor, PreservingVisitor, SumVisitor, WalkBounds};
