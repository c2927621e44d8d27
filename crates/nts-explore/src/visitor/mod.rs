//! The pluggable edge-visitor strategy the CFG builder drives:
//! whatever decides which of a newly-discovered state's successor edges
//! actually get added to the graph.

mod por;
mod simple;

pub use por::PorVisitor;
pub use simple::SimpleVisitor;

use crate::graph::ControlFlowGraph;
use crate::ids::ControlStateId;

/// Computes and commits the outgoing edges of a just-discovered control
/// state. Called exactly once per state, the moment its status flips from
/// `New` to `OnStack` (see [`crate::builder::build`]).
pub trait EdgeVisitor {
    fn explore(&mut self, graph: &mut ControlFlowGraph, cs: ControlStateId);
}

/// Each instance's position in `nts.basic_ntses()`, resolved once so the
/// hot per-state exploration loop doesn't re-search by name.
pub(crate) fn instance_bnts_indices(nts: &nts_ir::Nts) -> Vec<usize> {
    nts.instances()
        .iter()
        .map(|inst| {
            nts.basic_ntses()
                .iter()
                .position(|b| b.name == inst.basic_nts_name)
                .expect("Nts::validate checks every instance names a real basic nts")
        })
        .collect()
}
