//! The driver's error taxonomy, realized as a `thiserror` enum that
//! distinguishes three categories:
//!
//! - *Invariant violation* (programmer bug, fatal): surfaced as a panic, not
//!   a variant of this enum — an `unwrap`/`expect` at the point of detection
//!   aborts with a message pointing at the violated invariant, rather than
//!   forcing every caller up the stack to handle a "this should be
//!   impossible" case.
//! - *Input rejection* (user error, exit 1): [`SeqError::InputRejected`].
//! - *Internal failure* (bug reached `main`, exit 2): every other variant,
//!   wrapping the lower-level crates' own error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeqError {
    /// The input `Nts` failed structural validation (ambiguous/missing
    /// initial state, an instance naming an unknown template, a call
    /// transition surviving past the inliner). Surfaced to the CLI as exit
    /// code 1.
    #[error("input rejected: {0}")]
    InputRejected(#[from] nts_ir::IrError),

    /// The task decomposer rejected the input: an unparseable or
    /// colliding task-number scheme. Not a conversion failure in the
    /// `IrError` sense, but still traceable to something wrong with the
    /// input rather than a bug in this crate, so it is treated the same way
    /// at the CLI boundary.
    #[error("task decomposition failed: {0}")]
    Tasks(#[from] nts_tasks::TasksError),

    /// The CFG builder could not even construct the initial control
    /// state (an instance's template has no, or more than one, initial
    /// state).
    #[error("cfg construction failed: {0}")]
    Explore(#[from] nts_explore::ExploreError),
}
