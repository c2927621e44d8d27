//! The variable-use rewriting pass applied to every cloned transition rule:
//! maps a use rooted in the input `Nts`'s global scope, or in one thread's
//! local scope, to the corresponding clone in the target `main` template.
//!
//! Grounded on `control_flow_graph.cpp::NtsGenerator`'s `CNVariableInfo`
//! back-pointer walk — here a plain owned side table rather than a pointer
//! stashed on the original `Variable` node (see the crate-level docs for why
//! that split matters for teardown).

use ahash::AHashMap;
use nts_ir::{AtomicProposition, Formula, Term, VarUse};

use crate::ids::{TargetVarId};

/// Maps every variable use this pass might encounter in a cloned input
/// formula to its target clone. Built once per [`crate::generate`] call and
/// dropped at the end of it.
#[derive(Debug, Default)]
pub struct VarRebinder {
    pub(crate) globals: AHashMap<nts_ir::VarId, TargetVarId>,
    /// Keyed by `(pid, original local VarId)`; `pid` is the index of the
    /// thread whose transition is being rewritten, i.e. which per-thread
    /// clone of a shared template's locals applies.
    pub(crate) locals: AHashMap<(usize, nts_ir::VarId), TargetVarId>,
}

impl VarRebinder {
    pub(crate) fn rebind(&self, pid: usize, v: VarUse) -> VarUse {
        let target = if v.global {
            self.globals.get(&v.var).copied()
        } else {
            self.locals.get(&(pid, v.var)).copied()
        };
        match target {
            Some(new_id) => VarUse {
                var: new_id.0,
                global: v.global,
                primed: v.primed,
            },
            // Uses without variable-info (e.g. a bare parameter reference
            // surviving an un-inlined call) are left alone.
            None => v,
        }
    }

    pub fn rewrite_formula(&self, pid: usize, formula: &Formula) -> Formula {
        match formula {
            Formula::And(parts) => {
                Formula::And(parts.iter().map(|p| self.rewrite_formula(pid, p)).collect())
            }
            Formula::Not(inner) => Formula::Not(Box::new(self.rewrite_formula(pid, inner))),
            Formula::Quantified { bound, body } => Formula::Quantified {
                bound: self.rebind(pid, *bound),
                body: Box::new(self.rewrite_formula(pid, body)),
            },
            Formula::Atomic(ap) => Formula::Atomic(self.rewrite_atomic(pid, ap)),
        }
    }

    fn rewrite_atomic(&self, pid: usize, ap: &AtomicProposition) -> AtomicProposition {
        match ap {
            AtomicProposition::Relation(op, lhs, rhs) => AtomicProposition::Relation(
                *op,
                self.rewrite_term(pid, lhs),
                self.rewrite_term(pid, rhs),
            ),
            AtomicProposition::BooleanTerm(t) => {
                AtomicProposition::BooleanTerm(self.rewrite_term(pid, t))
            }
            AtomicProposition::Havoc(v) => AtomicProposition::Havoc(self.rebind(pid, *v)),
            AtomicProposition::ArrayWrite { array, index, value } => AtomicProposition::ArrayWrite {
                array: self.rebind(pid, *array),
                index: Box::new(self.rewrite_term(pid, index)),
                value: Box::new(self.rewrite_term(pid, value)),
            },
        }
    }

    pub fn rewrite_term(&self, pid: usize, term: &Term) -> Term {
        match term {
            Term::Var(v) => Term::Var(self.rebind(pid, *v)),
            Term::IntConst(n) => Term::IntConst(*n),
            Term::ThreadId => Term::ThreadId,
            Term::Minus(inner) => Term::Minus(Box::new(self.rewrite_term(pid, inner))),
            Term::Arith(op, lhs, rhs) => Term::Arith(
                *op,
                Box::new(self.rewrite_term(pid, lhs)),
                Box::new(self.rewrite_term(pid, rhs)),
            ),
            Term::Array(v, index) => {
                Term::Array(self.rebind(pid, *v), Box::new(self.rewrite_term(pid, index)))
            }
        }
    }
}
