//! The global-footprint analyzer.
//!
//! Computes, for a single transition, which globals it reads and which it
//! writes — conservatively, since a formula is only ever inspected
//! syntactically here (no symbolic evaluation, no path-sensitivity). This is
//! the input every other stage's soundness argument rests on: the task
//! decomposer's per-task footprints are just these unioned over a
//! task's transitions, and the POR visitor's C1 check is exactly
//! [`Globals::may_collide_with`] applied to them.

use nts_ir::{AtomicProposition, Formula, Nts, Term, Transition, TransitionRule, VarUse};
use tracing::trace;

use crate::globals::Globals;

/// True iff every primed variable this formula assigns is pinned down by an
/// explicit `havoc` atom somewhere in the *top-level* conjunction. When this
/// doesn't hold we can't tell which globals an implicit wildcard write might
/// touch, so [`footprint`] falls back to [`crate::GlobalWrites::everything`].
///
/// Grounded on the original's `havoc_in_toplevel_conjunction`, which only
/// ever looks at top-level `And` conjuncts — nested disjunctions or negated
/// havocs are deliberately not given credit, matching the conservative bias
/// the whole analysis is built on.
pub fn havoc_in_toplevel_conjunction(formula: &Formula) -> bool {
    formula
        .top_level_conjuncts()
        .iter()
        .any(|c| matches!(c, Formula::Atomic(AtomicProposition::Havoc(_))))
}

fn all_primed_vars_in_toplevel_havocs(formula: &Formula) -> bool {
    let mut primed = Vec::new();
    collect_primed_var_refs(formula, &mut primed);
    let havoced: Vec<VarUse> = formula
        .top_level_conjuncts()
        .iter()
        .filter_map(|c| match c {
            Formula::Atomic(AtomicProposition::Havoc(v)) => Some(*v),
            _ => None,
        })
        .collect();
    primed
        .into_iter()
        .all(|p| havoced.iter().any(|h| h.var == p.var && h.global == p.global))
}

fn collect_primed_var_refs(formula: &Formula, out: &mut Vec<VarUse>) {
    match formula {
        Formula::And(parts) => parts.iter().for_each(|p| collect_primed_var_refs(p, out)),
        Formula::Not(inner) => collect_primed_var_refs(inner, out),
        Formula::Quantified { body, .. } => collect_primed_var_refs(body, out),
        Formula::Atomic(ap) => collect_primed_vars_in_atomic(ap, out),
    }
}

fn collect_primed_vars_in_atomic(ap: &AtomicProposition, out: &mut Vec<VarUse>) {
    match ap {
        AtomicProposition::Relation(_, lhs, rhs) => {
            collect_primed_vars_in_term(lhs, out);
            collect_primed_vars_in_term(rhs, out);
        }
        AtomicProposition::BooleanTerm(t) => collect_primed_vars_in_term(t, out),
        AtomicProposition::Havoc(v) => {
            if v.primed {
                out.push(*v);
            }
        }
        AtomicProposition::ArrayWrite { array, index, value } => {
            if array.primed {
                out.push(*array);
            }
            collect_primed_vars_in_term(index, out);
            collect_primed_vars_in_term(value, out);
        }
    }
}

fn collect_primed_vars_in_term(term: &Term, out: &mut Vec<VarUse>) {
    match term {
        Term::Var(v) => {
            if v.primed {
                out.push(*v);
            }
        }
        Term::IntConst(_) | Term::ThreadId => {}
        Term::Minus(inner) => collect_primed_vars_in_term(inner, out),
        Term::Arith(_, lhs, rhs) => {
            collect_primed_vars_in_term(lhs, out);
            collect_primed_vars_in_term(rhs, out);
        }
        Term::Array(v, index) => {
            if v.primed {
                out.push(*v);
            }
            collect_primed_vars_in_term(index, out);
        }
    }
}

/// Syntactic "this transition is always enabled" check used by the POR
/// visitor's C0 condition. A `Call` is always considered enabled
/// (calls are out of this crate's scope to evaluate); a `Formula` rule is
/// enabled iff every top-level conjunct is itself one of the propositions
/// known to never block (`Havoc`, `ArrayWrite`, a `Relation` between primed
/// variables only) and every primed variable the formula touches is covered
/// by a top-level havoc.
pub fn always_enabled(rule: &TransitionRule) -> bool {
    match rule {
        TransitionRule::Call { .. } => true,
        TransitionRule::Formula(formula) => {
            only_enabled_aps(formula) && all_primed_vars_in_toplevel_havocs(formula)
        }
    }
}

fn only_enabled_aps(formula: &Formula) -> bool {
    match formula {
        Formula::And(parts) => parts.iter().all(only_enabled_aps),
        Formula::Not(_) | Formula::Quantified { .. } => false,
        Formula::Atomic(ap) => atomic_always_enabled(ap),
    }
}

fn atomic_always_enabled(ap: &AtomicProposition) -> bool {
    match ap {
        AtomicProposition::Havoc(_) | AtomicProposition::ArrayWrite { .. } => true,
        AtomicProposition::BooleanTerm(_) => false,
        AtomicProposition::Relation(_, lhs, rhs) => {
            is_primed_var_ref(lhs) || is_primed_var_ref(rhs)
        }
    }
}

fn is_primed_var_ref(term: &Term) -> bool {
    matches!(term, Term::Var(v) if v.primed)
}

fn walk_term(nts: &Nts, term: &Term, globals: &mut Globals, writing: bool) {
    match term {
        Term::Var(v) | Term::Array(v, _) => {
            if v.global && nts.is_global(v.var) {
                if v.primed && writing {
                    globals.writes.insert(v.var);
                } else {
                    globals.reads.insert(v.var);
                }
            }
            if let Term::Array(_, index) = term {
                walk_term(nts, index, globals, false);
            }
        }
        Term::IntConst(_) | Term::ThreadId => {}
        Term::Minus(inner) => walk_term(nts, inner, globals, false),
        Term::Arith(_, lhs, rhs) => {
            walk_term(nts, lhs, globals, false);
            walk_term(nts, rhs, globals, false);
        }
    }
}

fn walk_atomic(nts: &Nts, ap: &AtomicProposition, globals: &mut Globals) {
    match ap {
        AtomicProposition::Relation(_, lhs, rhs) => {
            walk_term(nts, lhs, globals, true);
            walk_term(nts, rhs, globals, true);
        }
        AtomicProposition::BooleanTerm(t) => walk_term(nts, t, globals, true),
        AtomicProposition::Havoc(v) => {
            if v.global && nts.is_global(v.var) {
                globals.writes.insert(v.var);
            }
        }
        AtomicProposition::ArrayWrite { array, index, value } => {
            if array.global && nts.is_global(array.var) {
                globals.writes.insert(array.var);
            }
            walk_term(nts, index, globals, false);
            walk_term(nts, value, globals, false);
        }
    }
}

fn walk_formula(nts: &Nts, formula: &Formula, globals: &mut Globals) {
    match formula {
        Formula::And(parts) => parts.iter().for_each(|p| walk_formula(nts, p, globals)),
        Formula::Not(inner) => walk_formula(nts, inner, globals),
        Formula::Quantified { body, .. } => walk_formula(nts, body, globals),
        Formula::Atomic(ap) => walk_atomic(nts, ap, globals),
    }
}

/// Computes the global read/write footprint of a single transition.
///
/// A `Call`'s input terms are reads, its output parameters are writes. A
/// `Formula` without a top-level havoc is treated as a potential write to
/// every global (`GlobalWrites::everything`) before the formula is still
/// walked for its reads — the same conservative default
/// `logic_utils.cpp::used_global_variables` applies.
pub fn footprint(nts: &Nts, transition: &Transition) -> Globals {
    let mut globals = Globals::new();
    match &transition.rule {
        TransitionRule::Call { inputs, outputs, .. } => {
            for t in inputs {
                walk_term(nts, t, &mut globals, false);
            }
            for o in outputs {
                if o.global && nts.is_global(o.var) {
                    globals.writes.insert(o.var);
                }
            }
        }
        TransitionRule::Formula(formula) => {
            if !havoc_in_toplevel_conjunction(formula) {
                trace!(transition = %transition.id, "no top-level havoc, assuming everything-write");
                globals.writes.insert_everything();
            }
            walk_formula(nts, formula, &mut globals);
        }
    }
    globals
}
