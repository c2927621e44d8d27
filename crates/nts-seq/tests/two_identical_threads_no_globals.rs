//! Two structurally identical threads with no
//! globals at all. Every transition is a vacuous `true` label (an empty
//! conjunction), so C0 holds trivially for both; with no globals there is
//! nothing for C1 to ever find colliding. Simple and POR must agree on the
//! reachable state count.

use nts_ir::{BasicNts, Formula, Nts, TransitionRule};
use nts_seq::{sequentialize, SeqConfig, SeqMode};
use pretty_assertions::assert_eq;

fn vacuous_rule() -> TransitionRule {
    TransitionRule::Formula(Formula::and([]))
}

fn two_identical_threads() -> Nts {
    let mut nts = Nts::new("two_identical");
    let mut main = BasicNts::new("main");
    main.add_state("s0", true, true);
    nts.add_basic_nts(main);

    let mut worker = BasicNts::new("worker");
    let s0 = worker.add_state("s0", true, false);
    let s1 = worker.add_state("s1", false, true);
    worker.add_transition(s0, s1, vacuous_rule());
    worker.add_transition(s1, s0, vacuous_rule());
    nts.add_basic_nts(worker);

    nts.add_instance("main");
    nts.add_instance("worker");
    nts.add_instance("worker");
    nts
}

#[test]
fn simple_and_por_reach_the_same_four_states() {
    let nts = two_identical_threads();

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

    let target_main_simple = simple.basic_nts_by_name("main").expect("generated main");
    let target_main_por = por.basic_nts_by_name("main").expect("generated main");

    assert_eq!(target_main_simple.states().len(), target_main_por.states().len());
    assert_eq!(
        target_main_simple.transitions().len(),
        target_main_por.transitions().len()
    );
}
