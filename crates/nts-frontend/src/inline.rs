//! The call-inliner seam.
//!
//! Interprocedural inlining itself — resolving a `Call` rule against its
//! callee's body and splicing the result in — is an external collaborator's
//! job; this repo only handles flat input (call rules remain opaque labels).
//! What this crate provides is the seam the driver (`nts-seq`) calls before
//! sequentializing, exactly the way `nts-seq.cpp`'s pipeline calls the real
//! inliner ahead of `Tasks::compute_tasks`/`ControlFlowGraph::build`.

use nts_ir::Nts;

/// Identity pass standing in for real call inlining. Idempotent: inlining a
/// flat `Nts` twice is the same as inlining it once, trivially true here
/// since there is nothing to do either time.
///
/// Debug builds additionally assert the input's precondition (flatness)
/// holds, since a caller skipping the real inliner and handing this
/// function non-flat input is a programmer error this crate can at least
/// catch cheaply in development.
pub fn inline(nts: Nts) -> Nts {
    debug_assert!(
        nts.is_flat(),
        "nts-frontend::inline is an identity pass; the real call-inliner \
         must run first to produce flat input"
    );
    nts
}
