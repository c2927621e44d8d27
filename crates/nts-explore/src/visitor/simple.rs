use nts_ir::Nts;

use super::EdgeVisitor;
use crate::control_state::ControlState;
use crate::graph::{CfgEdge, ControlFlowGraph};
use crate::ids::ControlStateId;

/// Full interleaving: every thread's every enabled transition becomes an
/// outgoing edge of a product state. Grounded on
/// `control_flow_graph.cpp::SimpleVisitor::explore` (both overloads).
pub struct SimpleVisitor<'a> {
    nts: &'a Nts,
    instance_bnts_index: Vec<usize>,
}

impl<'a> SimpleVisitor<'a> {
    pub fn new(nts: &'a Nts) -> Self {
        let instance_bnts_index = super::instance_bnts_indices(nts);
        SimpleVisitor {
            nts,
            instance_bnts_index,
        }
    }

    /// Appends, for a single thread `pid`, one outgoing edge per enabled
    /// transition of its current local state.
    pub fn explore_pid(&self, graph: &mut ControlFlowGraph, cs: ControlStateId, pid: usize) {
        let bnts_index = self.instance_bnts_index[pid];
        let bnts = &self.nts.basic_ntses()[bnts_index];
        let from_state = graph.node(cs).state.states[pid];
        let transitions: Vec<_> = bnts.outgoing(from_state).cloned().collect();
        for t in transitions {
            let next_state = graph.node(cs).state.states.clone();
            let successor = ControlState::new({
                let mut s = next_state;
                s[pid] = t.to;
                s
            });
            let to = graph.intern(successor);
            let edge_id = graph.push_edge(CfgEdge {
                from: cs,
                to,
                bnts_index,
                transition: t.id,
                pid,
            });
            graph.attach_outgoing(cs, edge_id);
        }
    }
}

impl EdgeVisitor for SimpleVisitor<'_> {
    fn explore(&mut self, graph: &mut ControlFlowGraph, cs: ControlStateId) {
        for pid in 0..self.nts.instances().len() {
            self.explore_pid(graph, cs, pid);
        }
    }
}
