//! Two threads racing on a shared global with a
//! plain (non-havoc) increment, `x' = x + 1`. C0's syntactic check requires
//! every primed variable a formula touches to be covered by a top-level
//! `havoc`; a bare relation never qualifies, so no thread is ever ample and
//! POR must fall back to full interleaving for every state, producing the
//! same four-state diamond Simple does.

use nts_ir::{ArithOp, BasicNts, Formula, AtomicProposition, Nts, RelOp, Term, TransitionRule, VarKind, VarUse};
use nts_seq::{sequentialize, SeqConfig, SeqMode};
use pretty_assertions::assert_eq;

fn increment_x(x: nts_ir::VarId) -> TransitionRule {
    TransitionRule::Formula(Formula::Atomic(AtomicProposition::Relation(
        RelOp::Eq,
        Term::Var(VarUse::global_primed(x)),
        Term::Arith(
            ArithOp::Add,
            Box::new(Term::Var(VarUse::global(x))),
            Box::new(Term::IntConst(1)),
        ),
    )))
}

fn racing_threads() -> Nts {
    let mut nts = Nts::new("race");
    let x = nts.add_global("x", VarKind::Int);

    let mut main = BasicNts::new("main");
    main.add_state("s0", true, true);
    nts.add_basic_nts(main);

    let mut worker = BasicNts::new("worker");
    let s0 = worker.add_state("s0", true, false);
    let s1 = worker.add_state("s1", false, true);
    worker.add_transition(s0, s1, increment_x(x));
    nts.add_basic_nts(worker);

    nts.add_instance("main");
    nts.add_instance("worker");
    nts.add_instance("worker");
    nts
}

#[test]
fn por_falls_back_to_the_full_diamond() {
    let nts = racing_threads();

    let simple = sequentialize(
        &nts,
        &SeqConfig {
            mode: SeqMode::Simple,
            main_name: "main".into(),
        },
    )
    .expect("simple sequentialize");
    let por = sequentialize(
        &nts,
        &SeqConfig {
            mode: SeqMode::Por,
            main_name: "main".into(),
        },
    )
    .expect("por sequentialize");

    let simple_main = simple.basic_nts_by_name("main").expect("generated main");
    let por_main = por.basic_nts_by_name("main").expect("generated main");

    assert_eq!(simple_main.states().len(), 4);
    assert_eq!(por_main.states().len(), 4);
    assert_eq!(simple_main.transitions().len(), por_main.transitions().len());
}
