//! Multi-threaded blocked multiply.
//!
//! Wraps the sequential kernel in a fork-join task tree over destination
//! block-rows. The executor is passed in explicitly, so the engine carries no
//! global state of its own:
//! - `executor`: the [`Executor`] trait, a rayon-backed implementation and a
//!   single-threaded one for deterministic tests
//! - `scheduler`: the [`MultiplyTask`] tree

pub mod executor;
pub mod scheduler;

pub use executor::{Executor, Job, RayonExecutor, SequentialExecutor};
pub use scheduler::MultiplyTask;
