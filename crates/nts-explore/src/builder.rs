//! The iterative DFS driver. Grounded on
//! `control_flow_graph.cpp::{build, explore_next_edge}`; kept iterative
//! (rather than recursive) for the same reason the original is — thread
//! counts can make the product-state graph deep enough that a recursive
//! walk would blow the native stack.

use nts_ir::Nts;
use tracing::debug;

use crate::error::ExploreError;
use crate::graph::{ControlFlowGraph, DfsStatus};
use crate::visitor::EdgeVisitor;

/// Explores the full (or, under [`crate::visitor::PorVisitor`], reduced)
/// reachable product-state graph of `nts`, starting from the instances'
/// initial states.
pub fn build(nts: &Nts, mut visitor: impl EdgeVisitor) -> Result<ControlFlowGraph, ExploreError> {
    let mut graph = ControlFlowGraph::new(nts)?;
    let initial = graph.initial;
    graph.nodes[initial.index()].status = DfsStatus::OnStack;
    visitor.explore(&mut graph, initial);

    let mut current = initial;
    loop {
        while graph.nodes[current.index()].visited_next >= graph.nodes[current.index()].outgoing.len() {
            let parent = graph.nodes[current.index()].reached_from.take();
            graph.nodes[current.index()].status = DfsStatus::Closed;
            match parent {
                Some(p) => current = p,
                None => {
                    debug!(
                        states = graph.nodes.len(),
                        edges = graph.edges.len(),
                        "cfg build complete"
                    );
                    return Ok(graph);
                }
            }
        }

        let node = &mut graph.nodes[current.index()];
        let edge_id = node.outgoing[node.visited_next];
        node.visited_next += 1;
        let to = graph.edges[edge_id.index()].to;

        if graph.nodes[to.index()].status == DfsStatus::New {
            graph.nodes[to.index()].reached_from = Some(current);
            graph.nodes[to.index()].status = DfsStatus::OnStack;
            visitor.explore(&mut graph, to);
            current = to;
        }
    }
}
