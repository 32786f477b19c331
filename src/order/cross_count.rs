//! Crossing counter for adjacent-rank layer pairs.
//!
//! Accumulator-tree inversion counting: O(E log V) per layer pair. Parallel edges between one
//! node pair count once, and self-loops never reach the adjacency at all.

use std::collections::BTreeSet;

use crate::graph::{Model, NodeId};

pub fn cross_count(model: &Model, layering: &[Vec<NodeId>]) -> usize {
    let mut cc = 0usize;
    for i in 1..layering.len() {
        cc += two_layer_cross_count(model, &layering[i - 1], &layering[i]);
    }
    cc
}

pub fn two_layer_cross_count(model: &Model, north: &[NodeId], south: &[NodeId]) -> usize {
    if south.is_empty() {
        return 0;
    }

    let mut south_pos: Vec<Option<usize>> = vec![None; model.nodes.len()];
    for (i, v) in south.iter().enumerate() {
        south_pos[v.0] = Some(i);
    }

    let mut entries: Vec<usize> = Vec::new();
    for &v in north {
        // Dedupe by target so multi-edges contribute a single segment.
        let targets: BTreeSet<NodeId> = model.successors(v).collect();
        let mut positions: Vec<usize> = targets
            .into_iter()
            .filter_map(|w| south_pos[w.0])
            .collect();
        positions.sort_unstable();
        entries.extend(positions);
    }

    // Accumulator tree over south positions; each inserted entry adds the number of
    // already-inserted entries strictly to its right.
    let mut first_index = 1usize;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree = vec![0usize; tree_size];

    let mut cc = 0usize;
    for pos in entries {
        let mut index = pos + first_index;
        tree[index] += 1;
        let mut right_sum = 0usize;
        while index > 0 {
            if index % 2 == 1 {
                right_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += right_sum;
    }

    cc
}
