use nts_ir::StateId;

/// A product state: one local state per thread, in instance order.
///
/// Grounded on `control_flow_graph.hpp`'s `ControlState`, minus the pointer
/// back to the owning `Nts` — every consumer already has `&Nts` in scope, so
/// a `ControlState` here is just the plain value its equality and hash are
/// defined over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlState {
    pub states: Vec<StateId>,
}

impl ControlState {
    pub fn new(states: Vec<StateId>) -> Self {
        ControlState { states }
    }

    pub fn with_state(&self, pid: usize, new_state: StateId) -> ControlState {
        let mut next = self.states.clone();
        next[pid] = new_state;
        ControlState { states: next }
    }
}
