use nts_footprint::Globals;
use nts_ir::Nts;
use nts_tasks::Tasks;
use tracing::trace;

use super::simple::SimpleVisitor;
use super::EdgeVisitor;
use crate::control_state::ControlState;
use crate::graph::{CfgEdge, ControlFlowGraph, DfsStatus};
use crate::ids::ControlStateId;

/// Partial-order reduction: tries, for each thread in turn, to commit just
/// that thread's transitions as the product state's only outgoing edges,
/// falling back to the full interleaving ([`SimpleVisitor`]) when no thread
/// qualifies.
///
/// Grounded on `control_flow_graph.cpp::POVisitor::{explore, try_ample,
/// check_c0, check_c3, next_states}`.
pub struct PorVisitor<'a> {
    nts: &'a Nts,
    tasks: &'a Tasks,
    instance_bnts_index: Vec<usize>,
    simple: SimpleVisitor<'a>,
}

impl<'a> PorVisitor<'a> {
    pub fn new(nts: &'a Nts, tasks: &'a Tasks) -> Self {
        let instance_bnts_index = super::instance_bnts_indices(nts);
        PorVisitor {
            nts,
            tasks,
            instance_bnts_index,
            simple: SimpleVisitor::new(nts),
        }
    }

    /// C0: at least one of `pid`'s outgoing transitions from its current
    /// local state is always enabled (never blocked, never racing on the
    /// condition that makes it fireable).
    fn check_c0(&self, transitions: &[nts_ir::Transition]) -> bool {
        transitions
            .iter()
            .any(|t| nts_footprint::always_enabled(&t.rule))
    }

    /// C3: none of the tentative successor states may already be on the DFS
    /// stack, and none may be the current state itself (a self-loop
    /// surviving the reduction would make the ample set unsound).
    fn check_c3(&self, graph: &ControlFlowGraph, cs: ControlStateId, tentative: &[ControlState]) -> bool {
        for t in tentative {
            if let Some(existing) = graph.lookup(t) {
                if existing == cs || graph.node(existing).status == DfsStatus::OnStack {
                    return false;
                }
            }
        }
        true
    }

    /// C1: the ample set's footprint must not collide with any globals a
    /// *different* thread's current task might touch.
    ///
    /// This unions the coarse, whole-task footprint of every other thread's
    /// current task rather than anything finer-grained (e.g. just the
    /// reachable-from-here footprint) — the original implementation does
    /// the same and notes the redundancy (every other thread's task
    /// footprint ends up identical in practice for its workloads) without
    /// tightening it; this crate preserves that choice rather than assuming
    /// a refined semantics without further analysis (see `DESIGN.md`).
    fn other_tasks_globals(&self, cs_states: &[nts_ir::StateId], skip_pid: usize) -> Globals {
        let mut acc = Globals::new();
        for (pid, &state) in cs_states.iter().enumerate() {
            if pid == skip_pid {
                continue;
            }
            let bnts_index = self.instance_bnts_index[pid];
            if let Some(task_id) = self.tasks.state_task(bnts_index, state) {
                acc.union_with(&self.tasks.task(task_id).globals);
            }
        }
        acc
    }

    fn try_ample(&self, graph: &mut ControlFlowGraph, cs: ControlStateId, pid: usize) -> bool {
        let bnts_index = self.instance_bnts_index[pid];
        let from_state = graph.node(cs).state.states[pid];
        let bnts = &self.nts.basic_ntses()[bnts_index];
        let transitions: Vec<_> = bnts.outgoing(from_state).cloned().collect();
        if transitions.is_empty() || !self.check_c0(&transitions) {
            return false;
        }

        let base_states = graph.node(cs).state.states.clone();
        let tentative: Vec<ControlState> = transitions
            .iter()
            .map(|t| {
                let mut states = base_states.clone();
                states[pid] = t.to;
                ControlState::new(states)
            })
            .collect();

        if !self.check_c3(graph, cs, &tentative) {
            return false;
        }

        let mut pa_globals = Globals::new();
        for t in &transitions {
            if let Some(g) = self.tasks.transition_globals(bnts_index, t.id) {
                pa_globals.union_with(g);
            }
        }
        let other = self.other_tasks_globals(&base_states, pid);
        if other.may_collide_with(&pa_globals) {
            return false;
        }

        trace!(pid, states = transitions.len(), "committing ample set");
        for (t, successor) in transitions.into_iter().zip(tentative) {
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
        true
    }
}

impl EdgeVisitor for PorVisitor<'_> {
    fn explore(&mut self, graph: &mut ControlFlowGraph, cs: ControlStateId) {
        for pid in 0..self.nts.instances().len() {
            if self.try_ample(graph, cs, pid) {
                return;
            }
        }
        self.simple.explore(graph, cs);
    }
}
