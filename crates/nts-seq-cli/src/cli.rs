//! The `run` subcommand's argument surface, as a `clap` derive struct.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "nts-seq", version, about = "Sequentialize a concurrent NTS into a single-thread over-approximation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load, inline, and sequentialize an input NTS.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// The input NTS file.
    pub input: PathBuf,

    /// Write the sequentialized output NTS to this path; stdout if omitted.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Write the post-inlining intermediate NTS here, for diagnosing what
    /// the call-inliner actually produced.
    #[arg(long)]
    pub inliner_output: Option<PathBuf>,

    /// Thread-pool size hint passed through to the IR provider.
    #[arg(long)]
    pub threads: Option<NonZeroUsize>,

    /// Disable partial-order reduction; always use the full-interleaving
    /// visitor.
    #[arg(long)]
    pub no_por: bool,
}
