//! Layering: longest-path rank assignment plus slack tightening.
//!
//! Runs on the acyclic effective graph. Every source starts at rank 0 and every other node sits
//! at max(predecessor rank) + 1, which already makes non-source nodes tight against their
//! predecessors; the tightening pass then pulls sources toward their successors until no move
//! changes any rank. Ranks are finally remapped to a dense 0..k so empty layers never reach the
//! ordering stage.

use crate::graph::{EdgeId, Model, NodeId};

pub fn rank(model: &mut Model) {
    longest_path(model);
    tighten(model);
    normalize_ranks(model);
}

/// max-over-predecessors longest path; guarantees rank(target) > rank(source) for every active
/// edge.
pub fn longest_path(model: &mut Model) {
    fn visit(model: &Model, v: usize, ranks: &mut [Option<i32>]) -> i32 {
        if let Some(r) = ranks[v] {
            return r;
        }
        let r = model
            .predecessors(NodeId(v))
            .map(|p| visit(model, p.0, ranks) + 1)
            .max()
            .unwrap_or(0);
        ranks[v] = Some(r);
        r
    }

    let mut ranks: Vec<Option<i32>> = vec![None; model.nodes.len()];
    for v in 0..model.nodes.len() {
        visit(model, v, &mut ranks);
    }
    for (v, r) in ranks.into_iter().enumerate() {
        model.nodes[v].rank = r.unwrap_or(0);
    }
}

/// Pull every source with all-slack outgoing edges down by its minimum slack, repeating until a
/// fixpoint. Interior nodes are already tight, so only in-degree-0 nodes can move; the loop is
/// bounded by the node count.
pub fn tighten(model: &mut Model) {
    for _ in 0..model.nodes.len() {
        let mut changed = false;
        for v in 0..model.nodes.len() {
            if model.predecessors(NodeId(v)).next().is_some() {
                continue;
            }
            let slack = model
                .successors(NodeId(v))
                .map(|w| model.nodes[w.0].rank - model.nodes[v].rank - 1)
                .min();
            if let Some(slack) = slack {
                if slack > 0 {
                    model.nodes[v].rank += slack;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
}

/// Remap ranks onto a dense 0..k index space, preserving relative order.
pub fn normalize_ranks(model: &mut Model) {
    let mut present: Vec<i32> = model.nodes.iter().map(|n| n.rank).collect();
    present.sort_unstable();
    present.dedup();
    for node in &mut model.nodes {
        // Dense index of the node's rank among all occupied ranks.
        node.rank = present.binary_search(&node.rank).expect("rank present") as i32;
    }
}

/// Rank gap beyond the single step an edge is expected to span.
pub fn slack(model: &Model, edge: EdgeId) -> i32 {
    let e = model.edge(edge);
    model.node(e.target).rank - model.node(e.source).rank - 1
}
