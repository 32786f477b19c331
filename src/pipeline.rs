//! The layout pipeline: build, solve each model bottom-up, compose, and assemble the result.
//!
//! One invocation owns its whole model tree; nothing persists afterwards, so concurrent callers
//! with independent inputs need no coordination. Group sub-models are solved before their parent
//! so the owning node already has its grown extent when the parent's ranks are spaced.

use rustc_hash::FxHashMap;

use crate::builder::{self, ModelTree};
use crate::coordinate_system;
use crate::error::Result;
use crate::graph::{EdgeId, Model, NodeId};
use crate::model::{
    EdgeDescriptor, GraphDescription, LayoutConfig, LayoutResult, Point, PositionedVertex,
    RoutedEdge,
};
use crate::{acyclic, normalize, order, position, rank};

/// Compute a layered layout for `graph`. Pure and deterministic: identical input and
/// configuration produce identical geometry.
pub fn layout(graph: &GraphDescription, config: &LayoutConfig) -> Result<LayoutResult> {
    config.validate()?;
    let mut tree = builder::build(graph, config)?;
    solve(&mut tree, 0, config, &graph.edges)?;

    // Absolute origin of every model: children sit at the padding inset inside their group's
    // cell. Models are created parent-before-child, so one ascending pass settles all offsets.
    let mut offsets = vec![Point { x: 0.0, y: 0.0 }; tree.models.len()];
    for m in 0..tree.models.len() {
        for &(group_node, child) in &tree.subs[m] {
            let node = tree.models[m].node(group_node);
            offsets[child] = Point {
                x: offsets[m].x + node.x + config.group_padding,
                y: offsets[m].y + node.y + config.group_padding,
            };
        }
    }

    let mut result = LayoutResult::default();
    for v in 0..tree.vertices.len() {
        let m = tree.model_of_vertex[v];
        let node = tree.models[m].node(tree.node_of_vertex[v]);
        result.vertices.push(PositionedVertex {
            id: tree.vertices[v].id.clone(),
            x: offsets[m].x + node.x,
            y: offsets[m].y + node.y,
            width: node.width,
            height: node.height,
        });
    }

    result.edges = route_edges(&tree, &offsets, graph, config);

    for v in &result.vertices {
        result.width = result.width.max(v.x + v.width);
        result.height = result.height.max(v.y + v.height);
    }
    for e in &result.edges {
        for p in &e.waypoints {
            result.width = result.width.max(p.x);
            result.height = result.height.max(p.y);
        }
    }

    coordinate_system::undo(&mut result, config.orientation);
    Ok(result)
}

// Children first: a group node's extent is grown to contain its solved sub-model plus padding
// before the parent model is ranked and spaced.
fn solve(
    tree: &mut ModelTree,
    m: usize,
    config: &LayoutConfig,
    edges: &[EdgeDescriptor],
) -> Result<()> {
    let subs = tree.subs[m].clone();
    for (group_node, child) in subs {
        solve(tree, child, config, edges)?;
        let (w, h) = content_extent(&tree.models[child]);
        let node = tree.models[m].node_mut(group_node);
        node.width = node.width.max(w + 2.0 * config.group_padding);
        node.height = node.height.max(h + 2.0 * config.group_padding);
    }

    let model = &mut tree.models[m];
    if model.nodes.is_empty() {
        return Ok(());
    }
    acyclic::run(model)?;
    rank::rank(model);
    normalize::run(model);
    normalize::verify_single_step(model, edges)?;
    order::order(model, config.crossing_sweep_count);
    position::position(model, config);
    Ok(())
}

fn content_extent(model: &Model) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for node in &model.nodes {
        w = w.max(node.x + node.width);
        h = h.max(node.y + node.height);
    }
    (w, h)
}

fn route_edges(
    tree: &ModelTree,
    offsets: &[Point],
    graph: &GraphDescription,
    config: &LayoutConfig,
) -> Vec<RoutedEdge> {
    let mut routed: Vec<RoutedEdge> = graph
        .edges
        .iter()
        .map(|e| RoutedEdge {
            id: e.id.clone(),
            waypoints: Vec::new(),
        })
        .collect();

    for (m, model) in tree.models.iter().enumerate() {
        for e in 0..model.edges.len() {
            let edge = &model.edges[e];
            if let Some(idx) = edge.original {
                routed[idx].waypoints =
                    normalize::waypoints(model, EdgeId(e), offsets[m]);
            }
        }

        let mut loops_at: FxHashMap<NodeId, usize> = FxHashMap::default();
        for &(node, idx) in &model.self_loops {
            let lane = *loops_at
                .entry(node)
                .and_modify(|n| *n += 1)
                .or_insert(0);
            routed[idx].waypoints = self_loop_points(model, node, lane, offsets[m], config);
        }
    }

    routed
}

// Successive loops on the same node step outwards by the parallel edge spacing.
fn self_loop_points(
    model: &Model,
    v: NodeId,
    lane: usize,
    offset: Point,
    config: &LayoutConfig,
) -> Vec<Point> {
    let node = model.node(v);
    let x = offset.x + node.x + node.width + config.parallel_edge_spacing * (lane as f64 + 1.0);
    vec![
        Point {
            x,
            y: offset.y + node.y + node.height / 3.0,
        },
        Point {
            x,
            y: offset.y + node.y + node.height * 2.0 / 3.0,
        },
    ]
}
