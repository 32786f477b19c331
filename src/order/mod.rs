//! Crossing Minimizer: median re-sorting sweeps plus a local transpose pass.
//!
//! Rank membership is fixed by the layering stage; this stage only permutes each rank. Sweeps
//! alternate top-down and bottom-up for a configured number of iterations; a sweep's end state is
//! kept only when it does not increase the best crossing count seen so far, so the accepted count
//! is monotonically non-increasing. Crossing minimization is NP-hard; this is the accepted
//! heuristic, a local optimum rather than a global minimum.

mod cross_count;
pub use cross_count::{cross_count, two_layer_cross_count};

use crate::graph::{Model, NodeId};

pub fn order(model: &mut Model, sweep_count: usize) {
    let mut best = model.rank_matrix();
    model.assign_orders(&best);
    if best.len() <= 1 {
        return;
    }

    let mut best_cc = cross_count(model, &best);
    let mut current = best.clone();
    for i in 0..sweep_count {
        if best_cc == 0 {
            break;
        }
        sweep(model, &mut current, i % 2 == 0);
        let cc = cross_count(model, &current);
        if cc <= best_cc {
            best_cc = cc;
            best = current.clone();
        } else {
            current = best.clone();
        }
    }

    transpose(model, &mut best);
    model.assign_orders(&best);
}

fn sweep(model: &Model, matrix: &mut [Vec<NodeId>], downward: bool) {
    let mut pos = vec![0usize; model.nodes.len()];
    for layer in matrix.iter() {
        for (i, &v) in layer.iter().enumerate() {
            pos[v.0] = i;
        }
    }

    if downward {
        for r in 1..matrix.len() {
            resort_by_median(model, matrix, r, &mut pos, true);
        }
    } else {
        for r in (0..matrix.len() - 1).rev() {
            resort_by_median(model, matrix, r, &mut pos, false);
        }
    }
}

fn resort_by_median(
    model: &Model,
    matrix: &mut [Vec<NodeId>],
    r: usize,
    pos: &mut [usize],
    use_predecessors: bool,
) {
    let layer = &matrix[r];
    let medians: Vec<Option<f64>> = layer
        .iter()
        .map(|&v| {
            let mut neighbor_pos: Vec<usize> = if use_predecessors {
                model.predecessors(v).map(|p| pos[p.0]).collect()
            } else {
                model.successors(v).map(|s| pos[s.0]).collect()
            };
            neighbor_pos.sort_unstable();
            neighbor_pos.dedup();
            median(&neighbor_pos)
        })
        .collect();

    let resorted = sort_with_fixed(layer, &medians);
    for (i, &v) in resorted.iter().enumerate() {
        pos[v.0] = i;
    }
    matrix[r] = resorted;
}

fn median(positions: &[usize]) -> Option<f64> {
    match positions.len() {
        0 => None,
        n if n % 2 == 1 => Some(positions[n / 2] as f64),
        n => Some((positions[n / 2 - 1] + positions[n / 2]) as f64 / 2.0),
    }
}

// Nodes without a median keep their exact slot; the rest are stable-sorted among themselves and
// poured back into the remaining slots.
fn sort_with_fixed(layer: &[NodeId], medians: &[Option<f64>]) -> Vec<NodeId> {
    let mut movable: Vec<(f64, usize, NodeId)> = medians
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.map(|m| (m, i, layer[i])))
        .collect();
    movable.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut refill = movable.into_iter();
    layer
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if medians[i].is_none() {
                v
            } else {
                refill.next().expect("one movable node per movable slot").2
            }
        })
        .collect()
}

// Adjacent swaps are kept only when they strictly reduce crossings, so this terminates.
fn transpose(model: &Model, matrix: &mut [Vec<NodeId>]) {
    let mut improved = true;
    while improved {
        improved = false;
        for r in 0..matrix.len() {
            for i in 0..matrix[r].len().saturating_sub(1) {
                let before = local_crossings(model, matrix, r);
                matrix[r].swap(i, i + 1);
                if local_crossings(model, matrix, r) < before {
                    improved = true;
                } else {
                    matrix[r].swap(i, i + 1);
                }
            }
        }
    }
}

fn local_crossings(model: &Model, matrix: &[Vec<NodeId>], r: usize) -> usize {
    let mut cc = 0usize;
    if r > 0 {
        cc += two_layer_cross_count(model, &matrix[r - 1], &matrix[r]);
    }
    if r + 1 < matrix.len() {
        cc += two_layer_cross_count(model, &matrix[r], &matrix[r + 1]);
    }
    cc
}
