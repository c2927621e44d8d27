use thiserror::Error;

/// Structural problems with an [`crate::Nts`] value that every later stage
/// would otherwise have to rediscover on its own (an ambiguous or missing
/// initial state, a dangling variable reference). Detected once, up front,
/// by [`crate::Nts::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IrError {
    #[error("basic nts `{0}` has no initial state")]
    NoInitialState(String),
    #[error("basic nts `{0}` has more than one initial state")]
    AmbiguousInitialState(String),
    #[error("instance references unknown basic nts `{0}`")]
    UnknownBasicNts(String),
    #[error("basic nts `{0}` is not flat: it still contains a call transition")]
    NotFlat(String),
}
