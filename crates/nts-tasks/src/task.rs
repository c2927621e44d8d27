use nts_footprint::Globals;

/// A task's identity within the decomposition. `0` is always the main
/// thread's single task; every other task's number comes from parsing the
/// `s_running_{n}` prefix carried by the idle-worker state that schedules
/// the task (the source of the idle -> entry edge), not from the entry
/// state's own origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u32);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A group of a worker template's states that a single logical unit of work
/// runs through, plus the union of every outgoing transition's footprint
/// from those states.
///
/// Grounded on `tasks.hpp`'s `Task`/`Tasks::split_to_tasks`: a task is
/// nothing more than "these states, decomposed off one annotation prefix",
/// with its footprint computed once and cached rather than recomputed by
/// every later stage that asks for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub globals: Globals,
    /// States the idle worker hands control *to* (or, for the main task,
    /// the template's own initial states). Grounded on
    /// `tasks.cpp::find_tasks_initial_final_states`'s `initial_states.push_back`.
    pub initial_states: Vec<(usize, nts_ir::StateId)>,
    /// States that hand control back *to* the idle worker (or, for the main
    /// task, the template's own final states).
    pub final_states: Vec<(usize, nts_ir::StateId)>,
}
