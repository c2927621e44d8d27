//! Decomposing a worker template's states into named tasks, and caching
//! the per-transition/per-task global footprints (via the footprint analyzer,
//! applied) everything downstream needs.
//!
//! # Non-goals
//!
//! This crate does not decide *how many* threads run a task, nor does it
//! validate that a task's states form a single-entry/single-exit region —
//! it only recovers the grouping the origin annotations already encode.

mod decompose;
mod error;
mod task;

pub use decompose::{decompose, BnStateKey, BnTransitionKey, Tasks};
pub use error::TasksError;
pub use task::{Task, TaskId};
