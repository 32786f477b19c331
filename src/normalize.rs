//! Dummy-chain expansion and collapse.
//!
//! After ranking, an edge spanning more than one rank is replaced by a chain of zero-extent dummy
//! nodes, one per intermediate rank, joined by single-step segments. The original edge record
//! stays in the arena (retired from the adjacency) and keeps the chain, so collapsing it back
//! into a waypoint list at the end is a straight read of the chain nodes' coordinates.

use crate::error::{LayoutError, Result};
use crate::graph::{EdgeId, Model};
use crate::model::{EdgeDescriptor, Point};

pub fn run(model: &mut Model) {
    model.dummy_chains.clear();
    for e in (0..model.edges.len()).map(EdgeId).collect::<Vec<_>>() {
        normalize_edge(model, e);
    }
}

fn normalize_edge(model: &mut Model, e: EdgeId) {
    let (source, target) = {
        let edge = model.edge(e);
        if edge.replaced {
            return;
        }
        (edge.source, edge.target)
    };
    let source_rank = model.node(source).rank;
    let target_rank = model.node(target).rank;
    if target_rank - source_rank <= 1 {
        return;
    }

    model.retire_edge(e);
    let mut prev = source;
    let mut chain = Vec::with_capacity((target_rank - source_rank - 1) as usize);
    for r in source_rank + 1..target_rank {
        let dummy = model.add_dummy(r);
        chain.push(dummy);
        model.add_edge(prev, dummy, None);
        prev = dummy;
    }
    model.add_edge(prev, target, None);
    model.edge_mut(e).chain = chain;
    model.dummy_chains.push(e);
}

/// Post-expansion invariant: every active edge spans exactly one rank. A violation is an engine
/// bug, reported with the nearest caller edge id for diagnosis.
pub fn verify_single_step(model: &Model, edges: &[EdgeDescriptor]) -> Result<()> {
    for e in model.active_edges() {
        let edge = model.edge(e);
        if model.node(edge.target).rank - model.node(edge.source).rank != 1 {
            let edge_id = edge
                .original
                .and_then(|i| edges.get(i))
                .map(|d| d.id.clone())
                .unwrap_or_else(|| "<segment>".to_string());
            return Err(LayoutError::RankInvariantViolation { edge_id });
        }
    }
    Ok(())
}

/// Ordered waypoints for an edge, read in the caller's original direction. Single-step edges
/// yield no waypoints; reversed edges have their chain read backwards so the list still runs from
/// the original source toward the original target.
pub fn waypoints(model: &Model, e: EdgeId, offset: Point) -> Vec<Point> {
    let edge = model.edge(e);
    let mut points: Vec<Point> = edge
        .chain
        .iter()
        .map(|&d| {
            let node = model.node(d);
            Point {
                x: node.x + offset.x,
                y: node.y + offset.y,
            }
        })
        .collect();
    if edge.reversed {
        points.reverse();
    }
    points
}
