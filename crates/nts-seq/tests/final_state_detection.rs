//! Spec scenario 6: a 3-task input (main plus two worker tasks `T1`/`T2`
//! sharing one template) whose idle-worker states schedule each task by a
//! `s_running_{n} -> init_Tn` edge and collect it back on `fin_Tn ->
//! s_idle`. The task decomposer must recover both tasks' numbers (1 and 2)
//! from the *idle* predecessor's origin and record each task's entry/exit
//! states from the edges themselves.

use nts_ir::{BasicNts, Formula, Nts, TransitionRule};
use nts_tasks::{decompose, TaskId};
use pretty_assertions::assert_eq;

fn vacuous_rule() -> TransitionRule {
    TransitionRule::Formula(Formula::and([]))
}

fn two_scheduled_tasks() -> Nts {
    let mut nts = Nts::new("finals");

    let mut main = BasicNts::new("main");
    main.add_state("s0", true, true);
    nts.add_basic_nts(main);

    let mut worker = BasicNts::new("worker");
    let s_idle = worker.add_state("s_idle", true, false);
    let s_running_1 = worker.add_state("s_running_1", false, false);
    let init_t1 = worker.add_state("init_t1", false, false);
    let fin_t1 = worker.add_state("fin_t1", false, false);
    let s_running_2 = worker.add_state("s_running_2", false, false);
    let init_t2 = worker.add_state("init_t2", false, false);
    let fin_t2 = worker.add_state("fin_t2", false, false);

    // The idle-worker states carry the `s_running_{n}` origin themselves;
    // the task's own states are named by the task's own prefix (`T1`/`T2`),
    // never by the running number.
    worker.state_mut(s_running_1).set_origin("s_running_1");
    worker.state_mut(s_running_2).set_origin("s_running_2");
    worker.state_mut(init_t1).set_origin("T1: init");
    worker.state_mut(fin_t1).set_origin("T1: fin");
    worker.state_mut(init_t2).set_origin("T2: init");
    worker.state_mut(fin_t2).set_origin("T2: fin");

    worker.add_transition(s_idle, s_running_1, vacuous_rule());
    worker.add_transition(s_running_1, init_t1, vacuous_rule());
    worker.add_transition(init_t1, fin_t1, vacuous_rule());
    worker.add_transition(fin_t1, s_idle, vacuous_rule());

    worker.add_transition(s_idle, s_running_2, vacuous_rule());
    worker.add_transition(s_running_2, init_t2, vacuous_rule());
    worker.add_transition(init_t2, fin_t2, vacuous_rule());
    worker.add_transition(fin_t2, s_idle, vacuous_rule());

    nts.add_basic_nts(worker);
    nts.add_instance("main");
    nts.add_instance("worker");
    nts
}

#[test]
fn tasks_are_numbered_from_the_idle_predecessor_and_entry_exit_states_recorded() {
    let nts = two_scheduled_tasks();
    let worker_idx = nts.basic_ntses().iter().position(|b| b.name == "worker").unwrap();
    let worker = &nts.basic_ntses()[worker_idx];
    let init_t1 = worker.states().iter().find(|s| s.name == "init_t1").unwrap().id;
    let fin_t1 = worker.states().iter().find(|s| s.name == "fin_t1").unwrap().id;
    let init_t2 = worker.states().iter().find(|s| s.name == "init_t2").unwrap().id;
    let fin_t2 = worker.states().iter().find(|s| s.name == "fin_t2").unwrap().id;

    let tasks = decompose(&nts, "main").expect("decompose");

    let t1 = tasks
        .state_task(worker_idx, init_t1)
        .expect("init_t1 assigned a task");
    let t2 = tasks
        .state_task(worker_idx, init_t2)
        .expect("init_t2 assigned a task");

    assert_eq!(t1, TaskId(1));
    assert_eq!(t2, TaskId(2));
    assert_ne!(t1, tasks.main_task());
    assert_ne!(t2, tasks.main_task());
    assert_ne!(Some(t1), tasks.idle_worker_task());
    assert_ne!(Some(t2), tasks.idle_worker_task());

    let task1 = tasks.task(t1);
    assert_eq!(task1.initial_states, vec![(worker_idx, init_t1)]);
    assert_eq!(task1.final_states, vec![(worker_idx, fin_t1)]);

    let task2 = tasks.task(t2);
    assert_eq!(task2.initial_states, vec![(worker_idx, init_t2)]);
    assert_eq!(task2.final_states, vec![(worker_idx, fin_t2)]);

    // Main's own initial/final states are recorded straight from its
    // template, not via an idle-worker handoff.
    let main_idx = nts.basic_ntses().iter().position(|b| b.name == "main").unwrap();
    let main_state = nts.basic_ntses()[main_idx].states()[0].id;
    let main_task = tasks.task(tasks.main_task());
    assert_eq!(main_task.initial_states, vec![(main_idx, main_state)]);
    assert_eq!(main_task.final_states, vec![(main_idx, main_state)]);
}
