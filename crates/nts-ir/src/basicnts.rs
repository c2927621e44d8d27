use crate::ids::{StateId, TransitionId, VarId};
use crate::state::State;
use crate::transition::{Transition, TransitionRule};
use crate::var::Variable;

/// A named template: a flat control-flow automaton over a set of local
/// variables, parameterized by the globals its formulas reference.
///
/// `BasicNts` is the unit the task decomposer splits into tasks and
/// the one the codegen stage clones per thread; an [`crate::Nts`] is a
/// set of these plus the [`crate::Instance`]s that run them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicNts {
    pub name: String,
    locals: Vec<Variable>,
    states: Vec<State>,
    transitions: Vec<Transition>,
}

impl BasicNts {
    pub fn new(name: impl Into<String>) -> Self {
        BasicNts {
            name: name.into(),
            locals: Vec::new(),
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn add_local(&mut self, name: impl Into<String>, kind: crate::var::VarKind) -> VarId {
        let id = VarId(self.locals.len() as u32);
        self.locals.push(Variable::new(id, name, kind));
        id
    }

    pub fn add_local_with_origin(
        &mut self,
        name: impl Into<String>,
        kind: crate::var::VarKind,
        origin: impl Into<String>,
    ) -> VarId {
        let id = VarId(self.locals.len() as u32);
        self.locals.push(Variable::new(id, name, kind).with_origin(origin));
        id
    }

    pub fn add_state(
        &mut self,
        name: impl Into<String>,
        is_initial: bool,
        is_final: bool,
    ) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(State {
            id,
            name: name.into(),
            is_initial,
            is_final,
            is_error: false,
            annotations: Vec::new(),
        });
        id
    }

    pub fn add_transition(&mut self, from: StateId, to: StateId, rule: TransitionRule) -> TransitionId {
        let id = TransitionId(self.transitions.len() as u32);
        self.transitions.push(Transition { id, from, to, rule });
        id
    }

    pub fn locals(&self) -> &[Variable] {
        &self.locals
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    pub fn state_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id.index()]
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn outgoing(&self, from: StateId) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(move |t| t.from == from)
    }

    pub fn transition(&self, id: TransitionId) -> &Transition {
        &self.transitions[id.index()]
    }

    pub fn is_local(&self, var: VarId) -> bool {
        var.index() < self.locals.len()
    }

    /// The template's unique initial state, or `None`/ambiguous — both of
    /// which are input-rejection conditions the caller (4.D's
    /// `initial_control_state`) turns into a proper error rather than a
    /// panic.
    pub fn initial_state(&self) -> Option<StateId> {
        let mut found = None;
        for s in &self.states {
            if s.is_initial {
                if found.is_some() {
                    return None;
                }
                found = Some(s.id);
            }
        }
        found
    }

    pub fn has_ambiguous_initial_state(&self) -> bool {
        self.states.iter().filter(|s| s.is_initial).count() > 1
    }
}
