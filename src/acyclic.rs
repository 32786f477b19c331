//! Cycle Remover: reverse a feedback arc set found by depth-first traversal.
//!
//! Seeding order is deterministic: source nodes (no incoming edges) in caller order first, then
//! every still-unvisited node in caller order, so unreachable and cyclic-only components are
//! always covered the same way. Reversal flips only the internal effective direction; the
//! caller-visible descriptors keep their original endpoints and the `reversed` flag tells the
//! materializer to read waypoints backwards.

use crate::error::{LayoutError, Result};
use crate::graph::{EdgeId, Model, NodeId};

/// Reverse every back edge, then re-verify that the connection graph is acyclic. The check is a
/// postcondition, not an assumption: a failure here is an engine bug surfaced as
/// `CycleRemovalInvariantViolation`.
pub fn run(model: &mut Model) -> Result<()> {
    for e in find_back_edges(model) {
        model.reverse_edge(e);
    }
    verify_acyclic(model)
}

/// Back edges reachable from the deterministic seed order: an out-edge whose target is still on
/// the current DFS stack closes a cycle.
pub fn find_back_edges(model: &Model) -> Vec<EdgeId> {
    let mut fas: Vec<EdgeId> = Vec::new();
    let mut visited = vec![false; model.nodes.len()];
    let mut on_stack = vec![false; model.nodes.len()];

    fn dfs(
        model: &Model,
        v: NodeId,
        visited: &mut [bool],
        on_stack: &mut [bool],
        fas: &mut Vec<EdgeId>,
    ) {
        if visited[v.0] {
            return;
        }
        visited[v.0] = true;
        on_stack[v.0] = true;
        for &e in &model.nodes[v.0].out_edges {
            let edge = model.edge(e);
            if edge.replaced {
                continue;
            }
            if on_stack[edge.target.0] {
                fas.push(e);
            } else {
                dfs(model, edge.target, visited, on_stack, fas);
            }
        }
        on_stack[v.0] = false;
    }

    let sources: Vec<NodeId> = model
        .node_ids()
        .filter(|v| model.nodes[v.0].in_edges.is_empty())
        .collect();
    for v in sources {
        dfs(model, v, &mut visited, &mut on_stack, &mut fas);
    }
    for v in model.node_ids() {
        dfs(model, v, &mut visited, &mut on_stack, &mut fas);
    }
    fas
}

/// Kahn's algorithm over the effective adjacency; any unprocessed remainder means a cycle
/// survived.
pub fn verify_acyclic(model: &Model) -> Result<()> {
    let mut in_degree = vec![0usize; model.nodes.len()];
    for e in model.active_edges() {
        in_degree[model.edge(e).target.0] += 1;
    }

    let mut queue: Vec<NodeId> = model.node_ids().filter(|v| in_degree[v.0] == 0).collect();
    let mut processed = 0usize;
    while let Some(v) = queue.pop() {
        processed += 1;
        for w in model.successors(v) {
            in_degree[w.0] -= 1;
            if in_degree[w.0] == 0 {
                queue.push(w);
            }
        }
    }

    if processed == model.nodes.len() {
        Ok(())
    } else {
        Err(LayoutError::CycleRemovalInvariantViolation)
    }
}
