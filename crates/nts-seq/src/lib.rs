//! The sequentialization driver, and the error taxonomy that wraps every
//! lower-level crate's failures into the shape the CLI maps to exit codes.
//!
//! This is the one crate in the workspace that knows about every other
//! core crate at once; everything else (`nts-ir`, `nts-footprint`,
//! `nts-tasks`, `nts-explore`, `nts-codegen`) is usable independently of it.

mod driver;
mod error;

pub use driver::{sequentialize, SeqConfig, SeqMode};
pub use error::SeqError;
