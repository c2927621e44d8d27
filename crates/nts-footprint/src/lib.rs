//! Global-footprint analysis: what a transition reads and writes, and
//! whether two footprints may interfere.
//!
//! This crate has no notion of tasks, control states, or reduction — it is
//! purely the syntactic analysis every later stage is built out of.

mod footprint;
mod globals;

pub use footprint::{always_enabled, footprint, havoc_in_toplevel_conjunction};
pub use globals::{GlobalReads, GlobalWrites, Globals};
