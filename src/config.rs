//! Tuning knobs for [`BlockMatrix::multiply_with`](crate::BlockMatrix::multiply_with).

/// Controls when a multiply goes parallel and how the work is split.
///
/// The defaults were picked empirically. Override them per machine if
/// benchmarks say otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplyConfig {
    /// Any operand dimension above this routes to the parallel scheduler.
    pub parallel_threshold: usize,
    /// Tasks per hardware thread, to absorb uneven per-block cost.
    pub oversubscription: usize,
    /// Children per split in the task tree.
    pub fan_out: usize,
}

impl Default for MultiplyConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 500,
            oversubscription: 5,
            fan_out: 4,
        }
    }
}

impl MultiplyConfig {
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_oversubscription(mut self, factor: usize) -> Self {
        self.oversubscription = factor;
        self
    }

    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out;
        self
    }

    /// True if any dimension of `lhs` or `rhs` (as `(rows, columns)`) exceeds the threshold.
    pub fn should_parallelize(&self, lhs: (usize, usize), rhs: (usize, usize)) -> bool {
        let t = self.parallel_threshold;
        lhs.0 > t || lhs.1 > t || rhs.0 > t || rhs.1 > t
    }

    /// Largest block-row range a task runs without splitting further.
    pub fn leaf_chunk(&self, block_rows: usize, parallelism: usize) -> usize {
        let workers = parallelism.max(1) * self.oversubscription.max(1);
        block_rows / workers + 1
    }

    /// Fan-out actually used; a split into fewer than two parts would never terminate.
    pub fn effective_fan_out(&self) -> usize {
        self.fan_out.max(2)
    }
}
