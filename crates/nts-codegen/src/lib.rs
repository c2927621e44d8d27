//! The target NTS generator.
//!
//! Takes a finished [`nts_explore::ControlFlowGraph`] plus the input it was
//! built over and produces the single sequentialized `Nts` downstream model
//! checkers consume. Has no opinion on *how* the graph was built (full
//! interleaving or POR) — it only walks what's there.
//!
//! # Teardown
//!
//! The original implementation's generator nulls out every back-pointer it
//! attached to the input's nodes before returning. This crate never attaches
//! anything to the input in the first place — [`rebind::VarRebinder`] and
//! the target-state lookup table are owned locally by [`generate`] and
//! simply go out of scope at the end of the call, so "no side-data remains
//! on the input" is a consequence of ownership rather than an assertion this
//! crate has to remember to run.

mod generator;
mod ids;
mod rebind;

pub use generator::{generate, TARGET_MAIN_NAME};
pub use ids::TargetVarId;

#[cfg(test)]
mod tests {
    use super::*;
    use nts_explore::{build, PorVisitor, SimpleVisitor};
    use nts_ir::{
        AtomicProposition, BasicNts, Formula, Nts, RelOp, Term, TransitionRule, VarKind, VarUse,
    };
    use pretty_assertions::assert_eq;

    fn havoc_rule() -> TransitionRule {
        TransitionRule::Formula(Formula::and([]))
    }

    /// Two identical
    /// threads, no globals, one transition each `s0 -> s1`.
    fn two_identical_threads() -> Nts {
        let mut nts = Nts::new("t");
        let mut worker = BasicNts::new("worker");
        let s0 = worker.add_state("s0", true, false);
        let s1 = worker.add_state("s1", false, true);
        worker.add_transition(s0, s1, havoc_rule());
        nts.add_basic_nts(worker);
        nts.add_instance("worker");
        nts.add_instance("worker");
        nts
    }

    #[test]
    fn generates_one_state_and_transition_per_cfg_node_and_edge() {
        let nts = two_identical_threads();
        let graph = build(&nts, SimpleVisitor::new(&nts)).expect("build");
        let target = generate(&nts, &graph);

        assert_eq!(target.instances().len(), 1);
        let main = &target.basic_ntses()[0];
        assert_eq!(main.name, TARGET_MAIN_NAME);
        assert_eq!(main.states().len(), graph.nodes().len());
        assert_eq!(main.transitions().len(), graph.edges().len());
        // spec I6: target locals = sum over instances of |locals(template)|.
        let expected_locals: usize = nts
            .instances()
            .iter()
            .map(|inst| nts.basic_nts_by_name(&inst.basic_nts_name).unwrap().locals().len())
            .sum();
        assert_eq!(main.locals().len(), expected_locals);
        // spec I6: target globals = |globals(input)|.
        assert_eq!(target.globals().len(), nts.globals().len());
        assert_eq!(main.states().iter().filter(|s| s.is_initial).count(), 1);
    }

    #[test]
    fn race_on_global_rewrites_each_threads_write_to_its_own_clone_of_the_global() {
        // Two threads each doing `x' = x + 1`; globals are shared (one
        // clone), not per-thread — only locals get per-thread clones.
        let mut nts = Nts::new("t");
        let x = nts.add_global("x", VarKind::Int);
        let mut worker = BasicNts::new("worker");
        let s0 = worker.add_state("s0", true, false);
        let s1 = worker.add_state("s1", false, true);
        let rule = TransitionRule::Formula(Formula::Atomic(AtomicProposition::Relation(
            RelOp::Eq,
            Term::Var(VarUse::global_primed(x)),
            Term::Arith(
                nts_ir::ArithOp::Add,
                Box::new(Term::Var(VarUse::global(x))),
                Box::new(Term::IntConst(1)),
            ),
        )));
        worker.add_transition(s0, s1, rule);
        nts.add_basic_nts(worker);
        nts.add_instance("worker");
        nts.add_instance("worker");

        let graph = build(&nts, SimpleVisitor::new(&nts)).expect("build");
        let target = generate(&nts, &graph);
        // Globals are cloned once regardless of thread count; only locals
        // get a clone per thread.
        assert_eq!(target.globals().len(), 1);
        let main = &target.basic_ntses()[0];
        for t in main.transitions() {
            let TransitionRule::Formula(Formula::Atomic(AtomicProposition::Relation(_, lhs, rhs))) =
                &t.rule
            else {
                panic!("expected a rewritten relation formula");
            };
            for term in [lhs, rhs] {
                match flatten_arith(term) {
                    Term::Var(v) | Term::Array(v, _) => {
                        assert!(v.global, "global write must stay bound to the cloned global")
                    }
                    _ => {}
                }
            }
        }
    }

    fn flatten_arith(term: &Term) -> &Term {
        match term {
            Term::Arith(_, lhs, _) => flatten_arith(lhs),
            other => other,
        }
    }

    #[test]
    fn local_variable_uses_stay_local_after_rebind() {
        // A local-only havoc must come out rewritten to a *local* clone of
        // the per-thread variable, not accidentally reinterpreted as a
        // global index (the two arenas are numbered independently, so
        // flipping the `global` flag without remapping which arena a use
        // points into would silently corrupt the formula).
        let mut nts = Nts::new("t");
        let mut worker = BasicNts::new("worker");
        let scratch = worker.add_local("scratch", VarKind::Int);
        let s0 = worker.add_state("s0", true, false);
        let s1 = worker.add_state("s1", false, true);
        worker.add_transition(
            s0,
            s1,
            TransitionRule::Formula(Formula::Atomic(AtomicProposition::Havoc(
                VarUse::local_primed(scratch),
            ))),
        );
        nts.add_basic_nts(worker);
        nts.add_instance("worker");

        let graph = build(&nts, SimpleVisitor::new(&nts)).expect("build");
        let target = generate(&nts, &graph);
        let main = &target.basic_ntses()[0];
        assert_eq!(main.locals().len(), 1);

        for t in main.transitions() {
            let TransitionRule::Formula(Formula::Atomic(AtomicProposition::Havoc(v))) = &t.rule
            else {
                panic!("expected a rewritten havoc formula");
            };
            assert!(!v.global, "a local use must rebind to a local clone");
            assert!(main.is_local(v.var), "rebound var must index main's local arena");
        }
    }

    #[test]
    fn por_generated_nts_has_no_more_states_than_simple() {
        let nts = two_identical_threads();
        let mut dummy = Nts::new("dummy");
        dummy.add_basic_nts(BasicNts::new("main"));
        dummy.add_instance("main");
        let tasks = nts_tasks::decompose(&dummy, "main").expect("decompose");

        let simple_graph = build(&nts, SimpleVisitor::new(&nts)).expect("build");
        let por_graph = build(&nts, PorVisitor::new(&nts, &tasks)).expect("build");
        let simple_target = generate(&nts, &simple_graph);
        let por_target = generate(&nts, &por_graph);
        assert!(por_target.basic_ntses()[0].states().len() <= simple_target.basic_ntses()[0].states().len());
    }

    /// A product state is final in the generated target iff *every*
    /// instance's local state is final, not merely one of them. Two
    /// two-state threads give four product states; exactly one (both
    /// instances at their own final state) should come out marked final.
    #[test]
    fn exactly_one_product_state_is_final() {
        let nts = two_identical_threads();
        let graph = build(&nts, SimpleVisitor::new(&nts)).expect("build");
        assert_eq!(graph.nodes().len(), 4);

        let target = generate(&nts, &graph);
        let main = target.basic_nts_by_name(TARGET_MAIN_NAME).expect("generated main");

        let final_states: Vec<_> = main.states().iter().filter(|s| s.is_final).collect();
        assert_eq!(final_states.len(), 1, "only the all-threads-final product state should be final");

        let initial_states: Vec<_> = main.states().iter().filter(|s| s.is_initial).collect();
        assert_eq!(initial_states.len(), 1);
        assert_ne!(initial_states[0].id, final_states[0].id);
    }
}
