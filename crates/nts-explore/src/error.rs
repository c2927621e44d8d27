use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExploreError {
    #[error("basic nts `{0}` referenced by an instance has no initial state")]
    NoInitialState(String),
    #[error("instance references unknown basic nts `{0}`")]
    UnknownBasicNts(String),
}
