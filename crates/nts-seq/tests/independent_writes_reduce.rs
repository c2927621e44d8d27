//! Two threads whose tasks write disjoint globals
//! (`x` and `y`). Each thread is task-numbered via the idle-worker
//! `s_running_N` convention, so the task decomposer gives them
//! distinct, disjoint footprints — C1 never collides, and POR should
//! explore strictly fewer control states than Simple's full interleaving.
//!
//! Per-thread shape is a 3-state chain (`idle -> entry -> done`), so the
//! full interleaving reaches the 3x3 product (9 states) while POR, always
//! finding one thread's ample set uncontested, reaches exactly the
//! classic partial-order "staircase": `(3-1) + (3-1) + 1 = 5` states.

use nts_ir::{AtomicProposition, BasicNts, Formula, Nts, RelOp, Term, TransitionRule, VarKind, VarUse};
use nts_seq::{sequentialize, SeqConfig, SeqMode};
use pretty_assertions::assert_eq;

fn local_scratch_havoc(scratch: nts_ir::VarId) -> TransitionRule {
    TransitionRule::Formula(Formula::and([Formula::Atomic(AtomicProposition::Havoc(
        VarUse::local_primed(scratch),
    ))]))
}

fn global_write_one(g: nts_ir::VarId) -> TransitionRule {
    TransitionRule::Formula(Formula::and([
        Formula::Atomic(AtomicProposition::Havoc(VarUse::global_primed(g))),
        Formula::Atomic(AtomicProposition::Relation(
            RelOp::Eq,
            Term::Var(VarUse::global_primed(g)),
            Term::IntConst(1),
        )),
    ]))
}

fn worker_writing(global: nts_ir::VarId, name: &str, task_number: u32) -> BasicNts {
    let mut worker = BasicNts::new(name);
    let scratch = worker.add_local("scratch", VarKind::Int);
    let idle = worker.add_state("idle", true, false);
    let entry = worker.add_state("entry", false, false);
    let done = worker.add_state("done", false, true);
    // The idle state itself carries the `s_running_{n}` origin; the task's
    // own states are named by the task's own prefix, not the running number.
    worker.state_mut(idle).set_origin(format!("s_running_{task_number}"));
    worker.state_mut(entry).set_origin(format!("{name}: entry"));
    worker.state_mut(done).set_origin(format!("{name}: done"));
    worker.add_transition(idle, entry, local_scratch_havoc(scratch));
    worker.add_transition(entry, done, global_write_one(global));
    worker
}

fn independent_writers() -> Nts {
    let mut nts = Nts::new("independent_writes");
    let x = nts.add_global("x", VarKind::Int);
    let y = nts.add_global("y", VarKind::Int);

    let mut main = BasicNts::new("main");
    main.add_state("s0", true, true);
    nts.add_basic_nts(main);

    nts.add_basic_nts(worker_writing(x, "worker_x", 1));
    nts.add_basic_nts(worker_writing(y, "worker_y", 2));

    nts.add_instance("main");
    nts.add_instance("worker_x");
    nts.add_instance("worker_y");
    nts
}

#[test]
fn por_explores_strictly_fewer_states_than_simple() {
    let nts = independent_writers();

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

    assert_eq!(simple_main.states().len(), 9);
    assert_eq!(por_main.states().len(), 5);
    assert!(por_main.transitions().len() < simple_main.transitions().len());
}
