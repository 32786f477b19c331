//! Model Builder: caller descriptors to internal arena models.
//!
//! Validation happens here, all of it before any pipeline stage touches the model: duplicate
//! vertex/edge ids, unknown edge endpoints. Each group level becomes its own `Model`; the builder
//! returns the whole tree plus the bookkeeping the pipeline needs to put results back together.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{LayoutError, Result};
use crate::graph::{Model, NodeId};
use crate::model::{GraphDescription, LayoutConfig, Orientation, VertexDescriptor};

/// One flattened caller vertex, in pre-order.
#[derive(Debug, Clone)]
pub struct VertexInfo {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub parent: Option<usize>,
    pub depth: usize,
    pub is_group: bool,
}

/// The internal model tree for one invocation. Model 0 holds the root vertices; every group
/// vertex owns exactly one further model.
#[derive(Debug, Clone)]
pub struct ModelTree {
    pub models: Vec<Model>,
    /// Per model: (group node within that model, index of the model it owns).
    pub subs: Vec<Vec<(NodeId, usize)>>,
    pub vertices: Vec<VertexInfo>,
    pub model_of_vertex: Vec<usize>,
    pub node_of_vertex: Vec<NodeId>,
}

pub fn build(graph: &GraphDescription, config: &LayoutConfig) -> Result<ModelTree> {
    let mut vertices: Vec<VertexInfo> = Vec::new();
    let mut index_of_id: FxHashMap<&str, usize> = FxHashMap::default();
    flatten(&graph.vertices, None, 0, &mut vertices, &mut index_of_id)?;

    // East/West layouts run in the south frame with swapped extents; the coordinate system
    // transform swaps them back at the end.
    let swap_extents = matches!(config.orientation, Orientation::East | Orientation::West);

    let mut models = vec![Model::new()];
    let mut subs: Vec<Vec<(NodeId, usize)>> = vec![Vec::new()];
    let mut model_of_vertex = vec![0usize; vertices.len()];
    let mut node_of_vertex = vec![NodeId(0); vertices.len()];
    let mut model_owned_by: Vec<Option<usize>> = vec![None; vertices.len()];

    for v in 0..vertices.len() {
        let m = match vertices[v].parent {
            None => 0,
            // Pre-order guarantees the parent group's model already exists.
            Some(p) => model_owned_by[p].expect("parent model created before child"),
        };
        let (w, h) = if swap_extents {
            (vertices[v].height, vertices[v].width)
        } else {
            (vertices[v].width, vertices[v].height)
        };
        let node = models[m].add_node(Some(v), w, h);
        model_of_vertex[v] = m;
        node_of_vertex[v] = node;

        if vertices[v].is_group {
            let owned = models.len();
            models.push(Model::new());
            subs.push(Vec::new());
            model_owned_by[v] = Some(owned);
            subs[m].push((node, owned));
        }
    }

    let mut seen_edge_ids: FxHashSet<&str> = FxHashSet::default();
    for (idx, edge) in graph.edges.iter().enumerate() {
        if !seen_edge_ids.insert(edge.id.as_str()) {
            return Err(LayoutError::DuplicateEdgeId(edge.id.clone()));
        }
        let resolve = |vertex_id: &str| {
            index_of_id
                .get(vertex_id)
                .copied()
                .ok_or_else(|| LayoutError::InvalidEdgeEndpoint {
                    edge_id: edge.id.clone(),
                    vertex_id: vertex_id.to_string(),
                })
        };
        let s = resolve(&edge.source)?;
        let t = resolve(&edge.target)?;

        // An edge between different group levels is routed where its endpoints' subtrees meet:
        // in the model of the lowest common ancestor, between the two ancestor-children of that
        // group. If the representatives coincide (self-loop, or one endpoint nested under the
        // other) the edge degenerates to a local loop there.
        let (rep_s, rep_t) = representatives(&vertices, s, t);
        let m = model_of_vertex[rep_s];
        if rep_s == rep_t {
            let node = node_of_vertex[rep_s];
            models[m].self_loops.push((node, idx));
        } else {
            models[m].add_edge(node_of_vertex[rep_s], node_of_vertex[rep_t], Some(idx));
        }
    }

    Ok(ModelTree {
        models,
        subs,
        vertices,
        model_of_vertex,
        node_of_vertex,
    })
}

fn flatten<'a>(
    descriptors: &'a [VertexDescriptor],
    parent: Option<usize>,
    depth: usize,
    out: &mut Vec<VertexInfo>,
    index_of_id: &mut FxHashMap<&'a str, usize>,
) -> Result<()> {
    for desc in descriptors {
        let index = out.len();
        if index_of_id.insert(desc.id.as_str(), index).is_some() {
            return Err(LayoutError::DuplicateVertexId(desc.id.clone()));
        }
        out.push(VertexInfo {
            id: desc.id.clone(),
            width: desc.width,
            height: desc.height,
            parent,
            depth,
            is_group: !desc.children.is_empty(),
        });
        flatten(&desc.children, Some(index), depth + 1, out, index_of_id)?;
    }
    Ok(())
}

// Lift `a` and `b` to the two children of their lowest common ancestor; equal pair when one
// vertex contains the other.
fn representatives(vertices: &[VertexInfo], mut a: usize, mut b: usize) -> (usize, usize) {
    while vertices[a].depth > vertices[b].depth {
        a = vertices[a].parent.expect("depth > 0 implies a parent");
    }
    while vertices[b].depth > vertices[a].depth {
        b = vertices[b].parent.expect("depth > 0 implies a parent");
    }
    if a == b {
        return (a, a);
    }
    while vertices[a].parent != vertices[b].parent {
        a = vertices[a].parent.expect("diverging chains share root level");
        b = vertices[b].parent.expect("diverging chains share root level");
    }
    (a, b)
}
