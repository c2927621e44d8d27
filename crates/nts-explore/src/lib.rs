//! The product-state table, the CFG builder, and the
//! two edge-exploration strategies (full interleaving and partial-order
//! reduction) that decide what a state's outgoing edges are.
//!
//! # Core invariants
//!
//! - Every [`graph::CfgEdge`] is delivered to an [`visitor::EdgeVisitor`] at
//!   most once, the moment its target flips from `New` to `OnStack`.
//! - A [`graph::ControlStateNode`] is `Closed` (and has no `reached_from`)
//!   exactly when every one of its outgoing edges has been walked.
//! - [`builder::build`] never visits the same product state twice; the
//!   product-state table ([`graph::ControlFlowGraph::intern`]) guarantees
//!   that structurally equal states collapse to one node regardless of
//!   which thread's transition produced them.

mod builder;
mod control_state;
mod error;
mod graph;
mod ids;
mod visitor;

pub use builder::build;
pub use control_state::ControlState;
pub use error::ExploreError;
pub use graph::{CfgEdge, ControlFlowGraph, ControlStateNode, DfsStatus};
pub use ids::{CfgEdgeId, ControlStateId};
pub use visitor::{EdgeVisitor, PorVisitor, SimpleVisitor};
