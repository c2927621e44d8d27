use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TasksError {
    #[error("no basic nts named `{0}` (expected the main thread's template)")]
    NoSuchMain(String),
    #[error("task id {0} assigned to more than one task (0 is reserved for the main task)")]
    DuplicateTaskId(u32),
    #[error("task ids are not a bijection onto 0..{expected}: task {missing} never got an id")]
    TaskIdNotBijective { expected: usize, missing: usize },
}
