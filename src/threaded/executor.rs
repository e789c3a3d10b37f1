//! Fork-join executors for the parallel multiply.

use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

/// One unit of forked work.
pub type Job<'a> = Box<dyn FnOnce() -> Result<()> + Send + 'a>;

/// Runs a batch of jobs and waits for all of them.
///
/// `fork_join` must not return before every job has finished, since jobs
/// borrow from the caller's stack. It may be called again from inside a job.
pub trait Executor: Send + Sync {
    /// Number of workers the executor runs jobs on.
    fn parallelism(&self) -> usize;

    /// Runs `jobs` and returns once all have completed. If any job fails,
    /// one of the errors is returned.
    fn fork_join<'a>(&self, jobs: Vec<Job<'a>>) -> Result<()>;
}

/// Executor backed by a rayon thread pool.
#[derive(Debug, Clone, Default)]
pub struct RayonExecutor {
    // None = rayon's global pool
    pool: Option<Arc<ThreadPool>>,
}

impl RayonExecutor {
    /// Uses rayon's process-wide pool, created on first use and sized to the
    /// machine.
    pub fn global() -> Self {
        Self { pool: None }
    }

    /// Uses a dedicated pool of `threads` workers.
    pub fn with_threads(threads: usize) -> std::result::Result<Self, rayon::ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("blockmat-worker-{}", i))
            .build()?;
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }
}

impl Executor for RayonExecutor {
    fn parallelism(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn fork_join<'a>(&self, jobs: Vec<Job<'a>>) -> Result<()> {
        let run = || jobs.into_par_iter().try_for_each(|job| job());
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// Runs every job in order on the calling thread.
///
/// Gives a deterministic schedule for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn parallelism(&self) -> usize {
        1
    }

    fn fork_join<'a>(&self, jobs: Vec<Job<'a>>) -> Result<()> {
        for job in jobs {
            job()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_jobs(counter: &AtomicUsize, n: usize) -> Vec<Job<'_>> {
        (0..n)
            .map(|_| {
                Box::new(move || -> Result<()> {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }) as Job<'_>
            })
            .collect()
    }

    #[test]
    fn test_sequential_runs_all() {
        let counter = AtomicUsize::new(0);
        SequentialExecutor
            .fork_join(counting_jobs(&counter, 7))
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 7);
        assert_eq!(SequentialExecutor.parallelism(), 1);
    }

    #[test]
    fn test_rayon_runs_all() {
        let counter = AtomicUsize::new(0);
        let executor = RayonExecutor::with_threads(3).unwrap();
        assert_eq!(executor.parallelism(), 3);
        executor.fork_join(counting_jobs(&counter, 50)).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 50);

        RayonExecutor::global()
            .fork_join(counting_jobs(&counter, 5))
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 55);
    }

    #[test]
    fn test_nested_fork_join() {
        let counter = AtomicUsize::new(0);
        let executor = RayonExecutor::with_threads(2).unwrap();
        let outer: Vec<Job<'_>> = (0..4)
            .map(|_| {
                let executor = &executor;
                let counter = &counter;
                Box::new(move || executor.fork_join(counting_jobs(counter, 3))) as Job<'_>
            })
            .collect();
        executor.fork_join(outer).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 12);
    }

    #[test]
    fn test_error_propagates() {
        let failure = MatrixError::DimensionMismatch {
            expected: 1,
            actual: 2,
        };
        let jobs = |err: MatrixError| -> Vec<Job<'static>> {
            vec![
                Box::new(|| -> Result<()> { Ok(()) }) as Job<'static>,
                Box::new(move || -> Result<()> { Err(err) }) as Job<'static>,
                Box::new(|| -> Result<()> { Ok(()) }) as Job<'static>,
            ]
        };
        assert_eq!(
            SequentialExecutor.fork_join(jobs(failure.clone())),
            Err(failure.clone())
        );
        assert_eq!(
            RayonExecutor::global().fork_join(jobs(failure.clone())),
            Err(failure)
        );
    }
}
