//! The sequentialization driver. Grounded on `nts-seq.cpp`'s `sequentialize`:
//! picks an edge-visitor strategy, runs the CFG builder with whichever
//! visitor the mode selects, then the target generator, and hands back the
//! owned result.

use nts_explore::{build, PorVisitor, SimpleVisitor};
use nts_ir::Nts;
use tracing::info;

use crate::error::SeqError;

/// Which edge-visitor strategy explores a newly-discovered control state:
/// full interleaving, or partial-order reduction with Simple as its
/// fallback. A tagged enum rather than a trait object, since the driver
/// only ever needs to pick one of exactly two up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqMode {
    Simple,
    Por,
}

/// The driver's free parameters: which visitor to use, and the name of the
/// thread template the task decomposer treats as "main" — a parameter of
/// `Tasks::compute_tasks` in the original rather than a hardcoded literal,
/// since nothing about task decomposition actually requires the main
/// thread's template to be named `"main"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqConfig {
    pub mode: SeqMode,
    pub main_name: String,
}

impl Default for SeqConfig {
    fn default() -> Self {
        SeqConfig {
            mode: SeqMode::Por,
            main_name: "main".to_string(),
        }
    }
}

/// Runs the full pipeline: validates `nts`, builds the CFG under `config`'s
/// chosen visitor (running the task decomposer first when POR is selected,
/// since [`PorVisitor`] needs its task data), and generates the
/// sequentialized target `Nts`.
pub fn sequentialize(nts: &Nts, config: &SeqConfig) -> Result<Nts, SeqError> {
    nts.validate()?;

    let graph = match config.mode {
        SeqMode::Simple => {
            info!(mode = "simple", "building cfg");
            build(nts, SimpleVisitor::new(nts))?
        }
        SeqMode::Por => {
            info!(mode = "por", main = %config.main_name, "building cfg");
            let tasks = nts_tasks::decompose(nts, &config.main_name)?;
            build(nts, PorVisitor::new(nts, &tasks))?
        }
    };

    let target = nts_codegen::generate(nts, &graph);
    info!(
        states = graph.nodes().len(),
        edges = graph.edges().len(),
        "sequentialization complete"
    );
    Ok(target)
}
