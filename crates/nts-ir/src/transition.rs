use crate::formula::Formula;
use crate::ids::{StateId, TransitionId};
use crate::term::Term;
use crate::var::VarUse;

/// What a transition does when taken, independent of which states it
/// connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionRule {
    /// A relabelling formula over current- and next-state variables.
    Formula(Formula),
    /// A call to another `BasicNts` by name, with input/output actuals.
    ///
    /// Inputs not already inlined away are out of this crate's scope to
    /// execute (the call-inliner is an external collaborator); a `Call`
    /// surviving past [`crate::Nts::is_flat`] is an input-rejection error for
    /// every consumer in this workspace.
    Call {
        callee: String,
        inputs: Vec<Term>,
        outputs: Vec<VarUse>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub id: TransitionId,
    pub from: StateId,
    pub to: StateId,
    pub rule: TransitionRule,
}
