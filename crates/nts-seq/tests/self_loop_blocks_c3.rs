//! A thread whose only transition is a self-loop
//! that is always enabled. C0 passes trivially, but committing it as an
//! ample set would never discharge the other thread's pending actions (the
//! product state never actually changes), so C3 must reject it and POR
//! falls back to Simple — which still only ever finds the one reachable
//! product state, just by the full-interleaving path instead of the
//! reduced one.

use nts_ir::{AtomicProposition, BasicNts, Formula, Nts, VarKind, VarUse};
use nts_seq::{sequentialize, SeqConfig, SeqMode};
use pretty_assertions::assert_eq;

fn self_looping_nts() -> Nts {
    let mut nts = Nts::new("self_loop");
    let g = nts.add_global("g", VarKind::Int);

    let mut main = BasicNts::new("main");
    main.add_state("s0", true, true);
    nts.add_basic_nts(main);

    let mut worker = BasicNts::new("worker");
    let s0 = worker.add_state("s0", true, true);
    worker.add_transition(
        s0,
        s0,
        nts_ir::TransitionRule::Formula(Formula::and([Formula::Atomic(AtomicProposition::Havoc(
            VarUse::global_primed(g),
        ))])),
    );
    nts.add_basic_nts(worker);

    nts.add_instance("main");
    nts.add_instance("worker");
    nts
}

#[test]
fn por_falls_back_to_simple_and_both_find_one_state() {
    let nts = self_looping_nts();

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

    assert_eq!(simple_main.states().len(), 1);
    assert_eq!(por_main.states().len(), 1);
    assert_eq!(simple_main.transitions().len(), 1);
    assert_eq!(por_main.transitions().len(), 1);
}
