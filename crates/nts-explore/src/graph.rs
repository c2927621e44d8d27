//! The hash-consed product-state table, and the CFG
//! arena the iterative DFS builder walks.

use ahash::AHashMap;
use nts_ir::{Nts, TransitionId};

use crate::control_state::ControlState;
use crate::error::ExploreError;
use crate::ids::{CfgEdgeId, ControlStateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsStatus {
    New,
    OnStack,
    Closed,
}

#[derive(Debug, Clone)]
pub struct ControlStateNode {
    pub state: ControlState,
    pub status: DfsStatus,
    pub reached_from: Option<ControlStateId>,
    /// Populated once, the first time this node is explored; see
    /// [`crate::visitor::EdgeVisitor`].
    pub outgoing: Vec<CfgEdgeId>,
    pub visited_next: usize,
}

/// One step a thread can take: `pid`'s `transition` in its own
/// `BasicNts` (`bnts_index` into [`Nts::basic_ntses`]), moving the product
/// state from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfgEdge {
    pub from: ControlStateId,
    pub to: ControlStateId,
    pub bnts_index: usize,
    pub transition: TransitionId,
    pub pid: usize,
}

/// The explored control-flow graph: a hash-consed set of product states
/// plus the edges discovered between them.
#[derive(Debug, Clone)]
pub struct ControlFlowGraph {
    pub(crate) nodes: Vec<ControlStateNode>,
    pub(crate) edges: Vec<CfgEdge>,
    table: AHashMap<Vec<nts_ir::StateId>, ControlStateId>,
    pub initial: ControlStateId,
}

impl ControlFlowGraph {
    pub(crate) fn new(nts: &Nts) -> Result<Self, ExploreError> {
        let mut states = Vec::with_capacity(nts.instances().len());
        for inst in nts.instances() {
            let bnts = nts
                .basic_nts_by_name(&inst.basic_nts_name)
                .ok_or_else(|| ExploreError::UnknownBasicNts(inst.basic_nts_name.clone()))?;
            let initial = bnts
                .initial_state()
                .ok_or_else(|| ExploreError::NoInitialState(bnts.name.clone()))?;
            states.push(initial);
        }
        let initial_state = ControlState::new(states);
        let mut graph = ControlFlowGraph {
            nodes: Vec::new(),
            edges: Vec::new(),
            table: AHashMap::default(),
            initial: ControlStateId(0),
        };
        let id = graph.intern(initial_state);
        graph.initial = id;
        Ok(graph)
    }

    /// The product-state table's query operation: does this exact product state already
    /// have an id, without creating one if not.
    pub fn lookup(&self, state: &ControlState) -> Option<ControlStateId> {
        self.table.get(&state.states).copied()
    }

    /// The product-state table's insert-or-get operation, the hash-consing step every
    /// successor computation goes through.
    pub fn intern(&mut self, state: ControlState) -> ControlStateId {
        if let Some(id) = self.table.get(&state.states) {
            return *id;
        }
        let id = ControlStateId(self.nodes.len() as u32);
        self.table.insert(state.states.clone(), id);
        self.nodes.push(ControlStateNode {
            state,
            status: DfsStatus::New,
            reached_from: None,
            outgoing: Vec::new(),
            visited_next: 0,
        });
        id
    }

    pub fn node(&self, id: ControlStateId) -> &ControlStateNode {
        &self.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[ControlStateNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[CfgEdge] {
        &self.edges
    }

    pub fn edge(&self, id: CfgEdgeId) -> &CfgEdge {
        &self.edges[id.index()]
    }

    /// Records a discovered edge `from -> to` and returns its id. Does not,
    /// by itself, attach the edge to `from`'s `outgoing` list — the visitor
    /// that calls this does that once it has decided it's keeping the whole
    /// batch of edges it's building (see the ample-set commit in
    /// [`crate::visitor::por::PorVisitor`]).
    pub fn push_edge(&mut self, edge: CfgEdge) -> CfgEdgeId {
        let id = CfgEdgeId(self.edges.len() as u32);
        self.edges.push(edge);
        id
    }

    pub fn attach_outgoing(&mut self, from: ControlStateId, edge: CfgEdgeId) {
        self.nodes[from.index()].outgoing.push(edge);
    }
}
