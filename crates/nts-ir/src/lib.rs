//! The data model shared by every stage of the sequentializer pipeline:
//! variables, control states, transitions, and the `BasicNts`/`Nts`
//! containers that hold them.
//!
//! # Core invariants
//!
//! - A [`VarId`], [`StateId`] and [`TransitionId`] are only meaningful
//!   relative to the arena that produced them (an [`Nts`]'s globals, a
//!   `BasicNts`'s locals/states/transitions). Nothing in this crate compares
//!   ids across arenas; [`var::VarUse::global`] is what tells a reader (and
//!   the footprint analyzer) which arena a use belongs to.
//! - [`Nts::validate`] is the single place structural preconditions
//!   (flatness, unique initial states, instances naming a real template) are
//!   checked. Later crates in this workspace assume a validated `Nts` and do
//!   not re-check these.
//!
//! # Non-goals
//!
//! This is not a general first-order logic representation: no typing beyond
//! int/array, no floating point, no symbolic simplification. It carries just
//! enough structure for footprint analysis, the `always_enabled` syntactic
//! check, and straightforward cloning — anything richer belongs to the real
//! IR provider this crate's `Nts` is a stand-in interchange format for.

mod basicnts;
mod display;
mod error;
mod formula;
mod ids;
mod instance;
mod nts;
mod state;
mod term;
mod transition;
mod var;

pub use basicnts::BasicNts;
pub use error::IrError;
pub use formula::{AtomicProposition, Formula, RelOp};
pub use ids::{InstanceId, StateId, TransitionId, VarId};
pub use instance::Instance;
pub use nts::Nts;
pub use state::{Annotation, State};
pub use term::{ArithOp, Term};
pub use transition::{Transition, TransitionRule};
pub use var::{VarKind, VarUse, Variable};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn validate_rejects_missing_initial_state() {
        let mut nts = Nts::new("t");
        let bnts = BasicNts::new("worker");
        nts.add_basic_nts(bnts);
        nts.add_instance("worker");
        assert_eq!(
            nts.validate(),
            Err(IrError::NoInitialState("worker".into()))
        );
    }

    #[test]
    fn validate_rejects_ambiguous_initial_state() {
        let mut nts = Nts::new("t");
        let mut bnts = BasicNts::new("worker");
        bnts.add_state("s0", true, false);
        bnts.add_state("s1", true, false);
        nts.add_basic_nts(bnts);
        nts.add_instance("worker");
        assert_eq!(
            nts.validate(),
            Err(IrError::AmbiguousInitialState("worker".into()))
        );
    }

    #[test]
    fn validate_accepts_well_formed_nts() {
        let mut nts = Nts::new("t");
        let mut bnts = BasicNts::new("worker");
        bnts.add_state("s0", true, true);
        nts.add_basic_nts(bnts);
        nts.add_instance("worker");
        assert_eq!(nts.validate(), Ok(()));
    }

    #[test]
    fn display_round_trips_names() {
        let mut nts = Nts::new("example");
        nts.add_global("g", VarKind::Int);
        let mut bnts = BasicNts::new("worker");
        bnts.add_state("s0", true, false);
        nts.add_basic_nts(bnts);
        nts.add_instance("worker");
        let text = nts.to_string();
        assert!(text.contains("nts example"));
        assert!(text.contains("global g : int;"));
        assert!(text.contains("basic_nts worker"));
        assert!(text.contains("instance worker;"));
    }
}
