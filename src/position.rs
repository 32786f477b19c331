//! Coordinate Assigner.
//!
//! y is a running offset per rank: every real node in a rank shares the rank's top baseline, and
//! zero-extent dummies sit at the band's vertical midpoint so chains read as mid-band waypoints.
//! x starts from the crossing-minimized order and is refined by a bounded relaxation: ranks are
//! swept top to bottom, each node drawn toward the aggregate of its neighbors' centers, then the
//! rank is re-packed to the closest positions that keep its order and minimum separations.

use crate::graph::{Model, NodeId};
use crate::model::{Alignment, LayoutConfig};

const RELAXATION_EPSILON: f64 = 1e-3;

pub fn position(model: &mut Model, config: &LayoutConfig) {
    let matrix = model.rank_matrix();
    if matrix.is_empty() {
        return;
    }

    assign_y(model, &matrix, config);
    assign_x(model, &matrix, config);
}

fn assign_y(model: &mut Model, matrix: &[Vec<NodeId>], config: &LayoutConfig) {
    let mut base = 0.0f64;
    for layer in matrix {
        let band = layer
            .iter()
            .map(|&v| model.node(v).height)
            .fold(0.0f64, f64::max);
        for &v in layer {
            let node = model.node_mut(v);
            node.y = if node.is_dummy() { base + band / 2.0 } else { base };
        }
        base += band + config.inter_rank_spacing;
    }
}

fn assign_x(model: &mut Model, matrix: &[Vec<NodeId>], config: &LayoutConfig) {
    // Initial placement: pack each rank left-to-right in crossing-minimized order.
    let mut centers = vec![0.0f64; model.nodes.len()];
    for layer in matrix {
        let mut cursor = 0.0f64;
        for (i, &v) in layer.iter().enumerate() {
            if i > 0 {
                cursor += separation(model, layer[i - 1], v, config);
            }
            centers[v.0] = cursor + model.node(v).width / 2.0;
            cursor += model.node(v).width;
        }
    }

    for _ in 0..config.coordinate_relaxation_iterations {
        let mut moved = 0.0f64;
        for layer in matrix {
            let desired: Vec<f64> = layer
                .iter()
                .map(|&v| {
                    let neighbor_centers: Vec<f64> = model
                        .predecessors(v)
                        .chain(model.successors(v))
                        .map(|n| centers[n.0])
                        .collect();
                    if neighbor_centers.is_empty() {
                        centers[v.0]
                    } else {
                        aggregate(neighbor_centers, config.alignment)
                    }
                })
                .collect();

            let packed = compact(model, layer, &desired, config);
            for (i, &v) in layer.iter().enumerate() {
                moved = moved.max((packed[i] - centers[v.0]).abs());
                centers[v.0] = packed[i];
            }
        }
        if moved < RELAXATION_EPSILON {
            break;
        }
    }

    // Shift the whole model so its leftmost extent sits at x = 0.
    let min_x = matrix
        .iter()
        .flatten()
        .map(|&v| centers[v.0] - model.node(v).width / 2.0)
        .fold(f64::INFINITY, f64::min);
    for layer in matrix {
        for &v in layer {
            let width = model.node(v).width;
            model.node_mut(v).x = centers[v.0] - width / 2.0 - min_x;
        }
    }
}

fn aggregate(mut neighbor_centers: Vec<f64>, alignment: Alignment) -> f64 {
    match alignment {
        Alignment::Average => {
            neighbor_centers.iter().sum::<f64>() / neighbor_centers.len() as f64
        }
        Alignment::Median => {
            neighbor_centers.sort_by(f64::total_cmp);
            let n = neighbor_centers.len();
            if n % 2 == 1 {
                neighbor_centers[n / 2]
            } else {
                (neighbor_centers[n / 2 - 1] + neighbor_centers[n / 2]) / 2.0
            }
        }
    }
}

// Least-squares re-pack of one rank: the centers closest to `desired` that keep the rank order
// and minimum separations. Pool-adjacent-violators over separation-adjusted targets, so crowded
// runs split their displacement both ways instead of spilling to the right.
fn compact(model: &Model, layer: &[NodeId], desired: &[f64], config: &LayoutConfig) -> Vec<f64> {
    let mut offset = vec![0.0f64; layer.len()];
    for i in 1..layer.len() {
        let gap = model.node(layer[i - 1]).width / 2.0
            + separation(model, layer[i - 1], layer[i], config)
            + model.node(layer[i]).width / 2.0;
        offset[i] = offset[i - 1] + gap;
    }

    // (sum, count) blocks of pooled nodes; a block's position is the mean of its targets.
    let mut blocks: Vec<(f64, usize)> = Vec::with_capacity(layer.len());
    for i in 0..layer.len() {
        let mut sum = desired[i] - offset[i];
        let mut count = 1usize;
        while let Some(&(prev_sum, prev_count)) = blocks.last() {
            if prev_sum / prev_count as f64 <= sum / count as f64 {
                break;
            }
            sum += prev_sum;
            count += prev_count;
            blocks.pop();
        }
        blocks.push((sum, count));
    }

    let mut packed = Vec::with_capacity(layer.len());
    for &(sum, count) in &blocks {
        let value = sum / count as f64;
        for _ in 0..count {
            let i = packed.len();
            packed.push(value + offset[i]);
        }
    }
    packed
}

fn separation(model: &Model, a: NodeId, b: NodeId, config: &LayoutConfig) -> f64 {
    if model.node(a).is_dummy() || model.node(b).is_dummy() {
        config.parallel_edge_spacing
    } else {
        config.intra_rank_spacing
    }
}
