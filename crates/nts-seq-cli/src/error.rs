//! Maps every failure this binary can produce onto three exit codes:
//! 0 (success, or `--help`/usage), 1 (input rejection), 2 (internal
//! failure — a bug reached `main`).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Load(#[from] nts_frontend::LoadError),

    #[error("{0}")]
    Seq(#[from] nts_seq::SeqError),

    #[error("could not write `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Every input-rejection case here is a conversion failure or a file
    /// the loader couldn't open, so they all share exit code 1. A write
    /// failure after sequentialization already succeeded is outside that
    /// taxonomy — treated as internal (exit 2).
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Load(_) | CliError::Seq(_) => 1,
            CliError::Write { .. } => 2,
        }
    }
}
