//! Matrix multiply entry points: validate, allocate, dispatch.

use tracing::{debug, instrument};

use super::BlockMatrix;
use crate::blocked::gemm::multiply_block_rows;
use crate::config::MultiplyConfig;
use crate::element::Element;
use crate::error::{MatrixError, Result};
use crate::threaded::{Executor, MultiplyTask, RayonExecutor};

impl<T: Element> BlockMatrix<T> {
    /// Returns `self * other`.
    ///
    /// Large operands (any dimension above 500) go through the parallel
    /// scheduler on rayon's global pool; everything else runs the
    /// sequential kernel. Both paths give bit-identical results.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.multiply_with(other, &MultiplyConfig::default(), &RayonExecutor::global())
    }

    /// Returns `self * other` on the calling thread only.
    pub fn multiply_sequential(&self, other: &Self) -> Result<Self> {
        let mut out = self.product_target(other)?;
        let layout = *out.layout();
        multiply_block_rows(self, other, out.blocks_mut(), &layout, 0..layout.block_rows());
        Ok(out)
    }

    /// Returns `self * other`, parallelizing on `executor` when `config` says so.
    ///
    /// Blocks the calling thread until the whole task tree has finished.
    #[instrument(
        level = "debug",
        skip_all,
        fields(lhs = %format!("{}x{}", self.rows(), self.columns()), rhs = %format!("{}x{}", other.rows(), other.columns()))
    )]
    pub fn multiply_with<E: Executor + ?Sized>(
        &self,
        other: &Self,
        config: &MultiplyConfig,
        executor: &E,
    ) -> Result<Self> {
        let lhs_shape = (self.rows(), self.columns());
        let rhs_shape = (other.rows(), other.columns());
        if !config.should_parallelize(lhs_shape, rhs_shape) {
            debug!("sequential multiply");
            return self.multiply_sequential(other);
        }

        let mut out = self.product_target(other)?;
        let layout = *out.layout();
        let parallelism = executor.parallelism();
        debug!(
            block_rows = layout.block_rows(),
            parallelism,
            "parallel multiply"
        );
        MultiplyTask::root(self, other, out.blocks_mut(), &layout, config, parallelism).run(executor)?;
        Ok(out)
    }

    /// Checks the shapes and allocates the zero-filled product.
    fn product_target(&self, other: &Self) -> Result<Self> {
        if self.columns() != other.rows() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.columns(),
                actual: other.rows(),
            });
        }
        Self::zeros(self.rows(), other.columns())
    }
}
