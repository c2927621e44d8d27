//! The external-collaborator seams this system is built around but out of
//! scope to implement for real: the IR provider, the call-inliner, and the
//! NTS printer. This crate defines the interfaces and ships one minimal
//! reference implementation of each, sufficient to exercise the core
//! pipeline (`nts-tasks` → `nts-explore` → `nts-codegen`, driven by
//! `nts-seq`) end to end from the CLI and from tests, without claiming
//! compatibility with any external tool's file format.

mod config;
mod format;
mod inline;
mod loader;

pub use config::{discover as discover_config, load_from as load_config, CliDefaults, SequentializeDefaults};
pub use format::{parse as parse_text, ParseError};
pub use inline::inline;
pub use loader::{IrLoader, LoadError, LoadOptions, TextLoader};

/// The reference textual printer used for `-o`/`--inliner-output`: just
/// `nts_ir::Nts`'s `Display` impl, re-exported here so the CLI doesn't need
/// to depend on `nts-ir` directly for this one thing.
pub fn write_nts(nts: &nts_ir::Nts) -> String {
    nts.to_string()
}
