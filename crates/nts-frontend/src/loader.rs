//! The IR provider interface: a seam this repo defines and ships one
//! minimal implementation of, so its own CLI and tests have something to
//! load from. A real IR provider (parsing whatever format the upstream
//! toolchain actually produces) is an external collaborator.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;

use thiserror::Error;

use crate::format;

/// Options passed to [`IrLoader::load`]. Currently just the thread-pool
/// size hint the CLI's `--threads` flag carries; this crate's reference
/// loader doesn't use it for anything beyond recording it in its tracing
/// span, since it has no worker pool of its own to size.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub thread_pool_size: NonZeroUsize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            thread_pool_size: NonZeroUsize::new(1).expect("1 is non-zero"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: format::ParseError,
    },
}

/// The IR provider interface: loads a flat or non-flat `Nts` from a path.
/// Implementations are free to reject non-flat input, accept it and expect
/// the caller to run [`crate::inline`] first, or anything in between — this
/// crate's own [`TextLoader`] always returns whatever the text describes,
/// flat or not, and leaves flatness enforcement to [`nts_ir::Nts::validate`]
/// and [`crate::inline`].
pub trait IrLoader {
    fn load(&self, path: &Path, options: &LoadOptions) -> Result<nts_ir::Nts, LoadError>;
}

/// Reference [`IrLoader`] for the minimal textual format this crate ships
/// (see the `format` module). The `.ll` suffix the CLI's positional
/// argument is documented to accept is cosmetic — this loader parses
/// whatever text is at `path` regardless of extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLoader;

impl IrLoader for TextLoader {
    fn load(&self, path: &Path, options: &LoadOptions) -> Result<nts_ir::Nts, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            thread_pool_size = options.thread_pool_size.get(),
            "loading nts"
        );
        format::parse(&text).map_err(|source| LoadError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

impl fmt::Display for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thread_pool_size={}", self.thread_pool_size)
    }
}
