//! The task decomposer.
//!
//! Splits each worker template's states into named tasks by the prefix
//! before the first `:` in a state's `Origin` annotation, the way the
//! original's `Tasks::split_to_tasks` does; states with no such prefix fall
//! into a single shared "idle worker" task. The main thread's template is
//! never split — its whole body is task `0`.

use ahash::AHashMap;
use nts_ir::{Nts, StateId, TransitionId};
use tracing::debug;

use crate::error::TasksError;
use crate::task::{Task, TaskId};

const IDLE_WORKER_NAME: &str = "idle_worker";
const RUNNING_PREFIX: &str = "s_running_";

pub type BnStateKey = (usize, StateId);
pub type BnTransitionKey = (usize, TransitionId);

/// The result of decomposing an `Nts` into tasks: the tasks themselves plus
/// the side tables mapping every state/transition to the task (footprint)
/// it belongs to. These tables are owned here, not stashed on the IR nodes
/// themselves — see the crate-level docs for why.
#[derive(Debug, Clone)]
pub struct Tasks {
    tasks: Vec<Task>,
    main_task: TaskId,
    idle_worker_task: Option<TaskId>,
    state_task: AHashMap<BnStateKey, TaskId>,
    transition_globals: AHashMap<BnTransitionKey, nts_footprint::Globals>,
}

impl Tasks {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> &Task {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .expect("TaskId only ever constructed for an existing task")
    }

    pub fn main_task(&self) -> TaskId {
        self.main_task
    }

    pub fn idle_worker_task(&self) -> Option<TaskId> {
        self.idle_worker_task
    }

    pub fn state_task(&self, bnts_index: usize, state: StateId) -> Option<TaskId> {
        self.state_task.get(&(bnts_index, state)).copied()
    }

    pub fn transition_globals(
        &self,
        bnts_index: usize,
        transition: TransitionId,
    ) -> Option<&nts_footprint::Globals> {
        self.transition_globals.get(&(bnts_index, transition))
    }
}

/// Splits `nts` into tasks rooted at the thread template named `main_name`.
///
/// Returns [`TasksError`] if the declared main template doesn't exist, if
/// the idle worker's scheduling edges assign the same task number twice, or
/// if the resulting numbering isn't a bijection onto `0..k` (task `0` is
/// always reserved for main and is never parsed from an origin).
pub fn decompose(nts: &Nts, main_name: &str) -> Result<Tasks, TasksError> {
    if nts.basic_nts_by_name(main_name).is_none() {
        return Err(TasksError::NoSuchMain(main_name.to_string()));
    }

    let mut groups: AHashMap<String, Vec<BnStateKey>> = AHashMap::default();
    let mut main_states: Vec<BnStateKey> = Vec::new();

    for (bnts_index, bnts) in nts.basic_ntses().iter().enumerate() {
        if bnts.name == main_name {
            main_states.extend(bnts.states().iter().map(|s| (bnts_index, s.id)));
            continue;
        }
        for state in bnts.states() {
            let key = (bnts_index, state.id);
            match state.origin().and_then(|o| split_by_annot(o)) {
                Some(prefix) => groups.entry(prefix.to_string()).or_default().push(key),
                None => groups
                    .entry(IDLE_WORKER_NAME.to_string())
                    .or_default()
                    .push(key),
            }
        }
    }

    // Main is instantiated directly rather than handed off from the idle
    // worker, so its initial/final states come straight from its own
    // template rather than from the idle-worker edge walk below (mirrors
    // `find_tasks_initial_final_states`'s separate main-task pass).
    let main_bnts_index = nts
        .basic_ntses()
        .iter()
        .position(|b| b.name == main_name)
        .expect("checked above");
    let main_bnts = &nts.basic_ntses()[main_bnts_index];
    let main_initial_states = main_bnts
        .states()
        .iter()
        .filter(|s| s.is_initial)
        .map(|s| (main_bnts_index, s.id))
        .collect();
    let main_final_states = main_bnts
        .states()
        .iter()
        .filter(|s| s.is_final)
        .map(|s| (main_bnts_index, s.id))
        .collect();

    let mut tasks = vec![Task {
        id: TaskId(0),
        name: main_name.to_string(),
        globals: nts_footprint::Globals::new(),
        initial_states: main_initial_states,
        final_states: main_final_states,
    }];
    let mut state_task: AHashMap<BnStateKey, TaskId> = AHashMap::default();
    for key in &main_states {
        state_task.insert(*key, TaskId(0));
    }

    let mut idle_worker_task = None;
    let mut pending: Vec<(String, Vec<BnStateKey>)> = Vec::new();
    for (name, states) in groups {
        if name == IDLE_WORKER_NAME {
            let id = TaskId(tasks.len() as u32 + 1000); // provisional, renumbered below
            idle_worker_task = Some(id);
            tasks.push(Task {
                id,
                name: name.clone(),
                globals: nts_footprint::Globals::new(),
                initial_states: Vec::new(),
                final_states: Vec::new(),
            });
            for key in &states {
                state_task.insert(*key, id);
            }
        } else {
            pending.push((name, states));
        }
    }

    // Find each non-main task's entry/exit states and its number by walking
    // the idle worker's scheduling edges, grounded on
    // `find_tasks_initial_final_states`: for an edge idle -> task, the
    // *target* is the task's entry state and the task's number is carried on
    // the *idle* predecessor's own `s_running_{n}` origin (not on the
    // target, whose origin-prefix names the task instead); for an edge
    // task -> idle, the *source* is the task's exit state.
    let mut assigned: AHashMap<String, u32> = AHashMap::default();
    let mut initial_by_name: AHashMap<String, Vec<BnStateKey>> = AHashMap::default();
    let mut final_by_name: AHashMap<String, Vec<BnStateKey>> = AHashMap::default();
    if let Some(idle_id) = idle_worker_task {
        for (bnts_index, bnts) in nts.basic_ntses().iter().enumerate() {
            if bnts.name == main_name {
                continue;
            }
            for t in bnts.transitions() {
                let from_task = state_task.get(&(bnts_index, t.from)).copied();
                let to_task = state_task.get(&(bnts_index, t.to)).copied();

                if from_task == Some(idle_id) && to_task != Some(idle_id) {
                    let name = task_group_name(bnts.state(t.to));
                    if let Some(n) = running_number(bnts.state(t.from).origin()) {
                        note_assignment(&mut assigned, name.clone(), n)?;
                    }
                    initial_by_name.entry(name).or_default().push((bnts_index, t.to));
                }

                if to_task == Some(idle_id) && from_task != Some(idle_id) {
                    let name = task_group_name(bnts.state(t.from));
                    final_by_name.entry(name).or_default().push((bnts_index, t.from));
                }
            }
        }
    }

    for (name, states) in pending {
        let number = assigned.get(&name).copied();
        let id = match number {
            Some(n) => {
                if n == 0 {
                    return Err(TasksError::DuplicateTaskId(0));
                }
                TaskId(n)
            }
            None => {
                debug!(task = %name, "no s_running_ prefix observed for task; leaving unnumbered");
                continue;
            }
        };
        if tasks.iter().any(|t| t.id == id) {
            return Err(TasksError::DuplicateTaskId(id.0));
        }
        for key in &states {
            state_task.insert(*key, id);
        }
        tasks.push(Task {
            id,
            initial_states: initial_by_name.remove(&name).unwrap_or_default(),
            final_states: final_by_name.remove(&name).unwrap_or_default(),
            name,
            globals: nts_footprint::Globals::new(),
        });
    }

    // Renumber the idle worker task out of the provisional >=1000 range
    // into the next free slot after the highest numbered real task, so it
    // never collides with a real task id while still being distinct from
    // every one of them.
    if let Some(idle_id) = idle_worker_task {
        let next = tasks.iter().map(|t| t.id.0).filter(|n| *n < 1000).max().unwrap_or(0) + 1;
        let new_id = TaskId(next);
        for v in state_task.values_mut() {
            if *v == idle_id {
                *v = new_id;
            }
        }
        if let Some(t) = tasks.iter_mut().find(|t| t.id == idle_id) {
            t.id = new_id;
        }
        idle_worker_task = Some(new_id);
    }

    let numbered_task_count = tasks
        .iter()
        .filter(|t| Some(t.id) != idle_worker_task)
        .count();
    let mut seen: Vec<bool> = vec![false; numbered_task_count];
    for t in &tasks {
        if Some(t.id) == idle_worker_task {
            continue;
        }
        let idx = t.id.0 as usize;
        if idx >= numbered_task_count || seen[idx] {
            return Err(TasksError::TaskIdNotBijective {
                expected: numbered_task_count,
                missing: idx,
            });
        }
        seen[idx] = true;
    }
    if let Some(missing) = seen.iter().position(|seen| !seen) {
        return Err(TasksError::TaskIdNotBijective {
            expected: numbered_task_count,
            missing,
        });
    }

    // Footprint analysis, applied per-transition, then unioned per-task.
    let mut transition_globals: AHashMap<BnTransitionKey, nts_footprint::Globals> =
        AHashMap::default();
    for (bnts_index, bnts) in nts.basic_ntses().iter().enumerate() {
        for t in bnts.transitions() {
            transition_globals.insert((bnts_index, t.id), nts_footprint::footprint(nts, t));
        }
    }

    for (bnts_index, bnts) in nts.basic_ntses().iter().enumerate() {
        for t in bnts.transitions() {
            let Some(task_id) = state_task.get(&(bnts_index, t.from)).copied() else {
                continue;
            };
            let Some(g) = transition_globals.get(&(bnts_index, t.id)) else {
                continue;
            };
            if let Some(task) = tasks.iter_mut().find(|task| task.id == task_id) {
                task.globals.union_with(g);
            }
        }
    }

    Ok(Tasks {
        tasks,
        main_task: TaskId(0),
        idle_worker_task,
        state_task,
        transition_globals,
    })
}

fn note_assignment(
    assigned: &mut AHashMap<String, u32>,
    name: String,
    n: u32,
) -> Result<(), TasksError> {
    match assigned.get(&name) {
        Some(existing) if *existing != n => Err(TasksError::DuplicateTaskId(n)),
        _ => {
            assigned.insert(name, n);
            Ok(())
        }
    }
}

fn task_group_name(state: &nts_ir::State) -> String {
    state
        .origin()
        .and_then(split_by_annot)
        .map(|s| s.to_string())
        .unwrap_or_else(|| IDLE_WORKER_NAME.to_string())
}

/// The substring of `origin` before its first `:`, trimmed — `None` if
/// there is no colon (the idle-worker case).
fn split_by_annot(origin: &str) -> Option<&str> {
    origin.split_once(':').map(|(prefix, _)| prefix.trim())
}

/// Parses the `s_running_{n}` prefix of an origin, if present.
fn running_number(origin: Option<&str>) -> Option<u32> {
    let origin = origin?;
    let prefix = split_by_annot(origin).unwrap_or(origin.trim());
    prefix.strip_prefix(RUNNING_PREFIX)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nts_ir::{BasicNts, Formula, TransitionRule};

    fn havoc_rule() -> TransitionRule {
        TransitionRule::Formula(Formula::and([]))
    }

    #[test]
    fn rejects_unknown_main() {
        let nts = Nts::new("t");
        assert_eq!(
            decompose(&nts, "main"),
            Err(TasksError::NoSuchMain("main".into()))
        );
    }

    #[test]
    fn main_is_task_zero_and_unsplit() {
        let mut nts = Nts::new("t");
        let mut main = BasicNts::new("main");
        let s0 = main.add_state("s0", true, false);
        let s1 = main.add_state("s1", false, true);
        main.add_transition(s0, s1, havoc_rule());
        let main_idx = nts.add_basic_nts(main);
        nts.add_instance("main");

        let tasks = decompose(&nts, "main").expect("decompose");
        assert_eq!(tasks.main_task(), TaskId(0));
        assert_eq!(tasks.state_task(main_idx, s0), Some(TaskId(0)));
        assert_eq!(tasks.state_task(main_idx, s1), Some(TaskId(0)));
    }

    #[test]
    fn splits_worker_states_by_origin_prefix_and_numbers_via_idle_worker() {
        let mut nts = Nts::new("t");
        let main = BasicNts::new("main");
        nts.add_basic_nts(main);
        nts.add_instance("main");

        // The idle-worker state itself carries the `s_running_{n}` origin;
        // the task's own states are named by the task-name prefix (here
        // `worker`), not by the running number.
        let mut worker = BasicNts::new("worker");
        let idle = worker.add_state("idle", true, false);
        worker.state_mut(idle).set_origin("s_running_1");
        let run1_entry = worker.add_state("run1_entry", false, false);
        let run1_body = worker.add_state("run1_body", false, true);
        worker.state_mut(run1_entry).set_origin("worker: entry");
        worker.state_mut(run1_body).set_origin("worker: body");
        worker.add_transition(idle, run1_entry, havoc_rule());
        worker.add_transition(run1_entry, run1_body, havoc_rule());
        worker.add_transition(run1_body, idle, havoc_rule());
        let worker_idx = nts.add_basic_nts(worker);
        nts.add_instance("worker");

        let tasks = decompose(&nts, "main").expect("decompose");
        let idle_task = tasks.idle_worker_task().expect("idle worker task exists");
        assert_eq!(tasks.state_task(worker_idx, idle), Some(idle_task));

        let run1_task = tasks
            .state_task(worker_idx, run1_entry)
            .expect("run1 entry assigned a task");
        assert_eq!(run1_task, TaskId(1));
        assert_eq!(tasks.state_task(worker_idx, run1_body), Some(run1_task));
        assert_ne!(run1_task, idle_task);

        let task = tasks.task(run1_task);
        assert_eq!(task.initial_states, vec![(worker_idx, run1_entry)]);
        assert_eq!(task.final_states, vec![(worker_idx, run1_body)]);
    }
}
