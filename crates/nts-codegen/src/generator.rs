//! The target NTS generator.
//!
//! Walks a finished [`ControlFlowGraph`] and the original [`Nts`] it was
//! built from, and emits a single sequentialized `Nts` with one thread
//! template (`main`): globals cloned once, locals cloned once per thread,
//! one target state per product state, one target transition per CFG edge.
//! Grounded on `control_flow_graph.cpp`'s `NtsGenerator` class.

use nts_explore::ControlFlowGraph;
use nts_ir::{BasicNts, Nts, TransitionRule};
use tracing::debug;

use crate::ids::TargetVarId;
use crate::rebind::VarRebinder;

/// The name of the single thread template every sequentialized `Nts`
/// carries, independent of what the input's main thread happened to be
/// named.
pub const TARGET_MAIN_NAME: &str = "main";

/// Per-instance index into `nts.basic_ntses()`, resolved once up front so
/// the per-edge rewrite doesn't re-search by name.
fn instance_bnts_indices(nts: &Nts) -> Vec<usize> {
    nts.instances()
        .iter()
        .map(|inst| {
            nts.basic_ntses()
                .iter()
                .position(|b| b.name == inst.basic_nts_name)
                .expect("Nts::validate checks every instance names a real basic nts")
        })
        .collect()
}

/// Produces the sequentialized `Nts` for `graph`, a
/// control-flow graph built (by either visitor) over `nts`.
///
/// This is infallible: by the time a [`ControlFlowGraph`] exists, every
/// precondition the generator depends on (flat input, resolvable instances)
/// has already been checked by [`nts_explore::build`] and
/// [`nts_ir::Nts::validate`].
pub fn generate(nts: &Nts, graph: &ControlFlowGraph) -> Nts {
    let pid_bnts = instance_bnts_indices(nts);
    let mut target = Nts::new(format!("{}_seq", nts.name));
    let mut rebinder = VarRebinder::default();

    // Step 2: clone globals once, preserving their origin annotation.
    for g in nts.globals() {
        let new_id = match &g.origin {
            Some(origin) => target.add_global_with_origin(format!("gvar_{}", g.id.0), g.kind, origin.clone()),
            None => target.add_global(format!("gvar_{}", g.id.0), g.kind),
        };
        rebinder.globals.insert(g.id, TargetVarId(new_id));
    }

    let mut main = BasicNts::new(TARGET_MAIN_NAME);

    // Step 3: clone locals once per thread (multiplicity is already
    // flattened into one `Instance` per running thread at the IR level, so
    // "once per multiplicity" collapses to "once per instance").
    for (pid, inst) in nts.instances().iter().enumerate() {
        let bnts = &nts.basic_ntses()[pid_bnts[pid]];
        for v in bnts.locals() {
            let origin = format!("{} [ {} ] :: {}", bnts.name, inst.thread_id, v.name);
            let new_id = main.add_local_with_origin(
                format!("var_{}", target_var_counter(&main)),
                v.kind,
                origin,
            );
            rebinder.locals.insert((pid, v.id), TargetVarId(new_id));
        }
    }

    // Step 4: clone states, one per interned control state.
    let mut target_state_of = Vec::with_capacity(graph.nodes().len());
    for (k, node) in graph.nodes().iter().enumerate() {
        let is_final = node
            .state
            .states
            .iter()
            .enumerate()
            .all(|(pid, &sid)| nts.basic_ntses()[pid_bnts[pid]].state(sid).is_final);
        let is_initial = graph.initial.index() == k;
        let st = main.add_state(format!("st_{k}"), is_initial, is_final);
        let origin = node
            .state
            .states
            .iter()
            .enumerate()
            .map(|(pid, &sid)| {
                nts.basic_ntses()[pid_bnts[pid]]
                    .state(sid)
                    .origin()
                    .unwrap_or("-")
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join(" | ");
        main.state_mut(st).set_origin(format!("( {origin} )"));
        target_state_of.push(st);
    }

    // Step 5: rewrite and insert one transition per logged CFG edge.
    for edge in graph.edges() {
        let bnts = &nts.basic_ntses()[edge.bnts_index];
        let rule = bnts.transition(edge.transition).rule.clone();
        let rewritten = rewrite_rule(&rebinder, edge.pid, rule);
        main.add_transition(
            target_state_of[edge.from.index()],
            target_state_of[edge.to.index()],
            rewritten,
        );
    }

    debug!(
        states = main.states().len(),
        transitions = main.transitions().len(),
        globals = target.globals().len(),
        locals = main.locals().len(),
        "generated sequentialized nts"
    );

    target.add_basic_nts(main);
    target.add_instance(TARGET_MAIN_NAME);
    target
}

fn target_var_counter(main: &BasicNts) -> usize {
    main.locals().len()
}

fn rewrite_rule(rebinder: &VarRebinder, pid: usize, rule: TransitionRule) -> TransitionRule {
    match rule {
        TransitionRule::Formula(f) => TransitionRule::Formula(rebinder.rewrite_formula(pid, &f)),
        TransitionRule::Call {
            callee,
            inputs,
            outputs,
        } => TransitionRule::Call {
            callee,
            inputs: inputs
                .iter()
                .map(|t| rebinder.rewrite_term(pid, t))
                .collect(),
            outputs: outputs
                .iter()
                .map(|v| rebinder.rebind(pid, *v))
                .collect(),
        },
    }
}
