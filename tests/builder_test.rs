use sirenia::builder::build;
use sirenia::{
    EdgeDescriptor, GraphDescription, LayoutConfig, LayoutError, VertexDescriptor, layout,
};

fn vertex(id: &str) -> VertexDescriptor {
    VertexDescriptor::new(id, 40.0, 30.0)
}

fn edge(id: &str, source: &str, target: &str) -> EdgeDescriptor {
    EdgeDescriptor::new(id, source, target)
}

#[test]
fn build_rejects_duplicate_vertex_ids() {
    let graph = GraphDescription {
        vertices: vec![vertex("a"), vertex("a")],
        edges: vec![],
    };
    assert_eq!(
        build(&graph, &LayoutConfig::default()).unwrap_err(),
        LayoutError::DuplicateVertexId("a".to_string())
    );
}

#[test]
fn build_rejects_duplicate_vertex_ids_across_group_levels() {
    let mut group = vertex("g");
    group.children.push(vertex("a"));
    let graph = GraphDescription {
        vertices: vec![vertex("a"), group],
        edges: vec![],
    };
    assert_eq!(
        build(&graph, &LayoutConfig::default()).unwrap_err(),
        LayoutError::DuplicateVertexId("a".to_string())
    );
}

#[test]
fn build_rejects_duplicate_edge_ids() {
    let graph = GraphDescription {
        vertices: vec![vertex("a"), vertex("b")],
        edges: vec![edge("e", "a", "b"), edge("e", "b", "a")],
    };
    assert_eq!(
        build(&graph, &LayoutConfig::default()).unwrap_err(),
        LayoutError::DuplicateEdgeId("e".to_string())
    );
}

#[test]
fn build_rejects_unknown_edge_endpoints() {
    let graph = GraphDescription {
        vertices: vec![vertex("a")],
        edges: vec![edge("e", "a", "ghost")],
    };
    assert_eq!(
        build(&graph, &LayoutConfig::default()).unwrap_err(),
        LayoutError::InvalidEdgeEndpoint {
            edge_id: "e".to_string(),
            vertex_id: "ghost".to_string(),
        }
    );
}

#[test]
fn layout_rejects_negative_spacing_before_running_any_stage() {
    let graph = GraphDescription {
        vertices: vec![vertex("a")],
        edges: vec![],
    };
    let config = LayoutConfig {
        inter_rank_spacing: -1.0,
        ..Default::default()
    };
    assert_eq!(
        layout(&graph, &config).unwrap_err(),
        LayoutError::ConfigurationOutOfRange {
            option: "inter_rank_spacing",
            value: -1.0,
        }
    );
}

#[test]
fn layout_rejects_non_finite_spacing() {
    let graph = GraphDescription::default();
    let config = LayoutConfig {
        group_padding: f64::NAN,
        ..Default::default()
    };
    assert!(matches!(
        layout(&graph, &config).unwrap_err(),
        LayoutError::ConfigurationOutOfRange {
            option: "group_padding",
            ..
        }
    ));
}

#[test]
fn build_records_self_loops_outside_the_adjacency() {
    let graph = GraphDescription {
        vertices: vec![vertex("a")],
        edges: vec![edge("loop", "a", "a")],
    };
    let tree = build(&graph, &LayoutConfig::default()).unwrap();
    assert_eq!(tree.models[0].self_loops.len(), 1);
    assert!(tree.models[0].edges.is_empty());
}

#[test]
fn build_creates_one_model_per_group_level() {
    let mut inner = vertex("inner");
    inner.children.push(vertex("leaf"));
    let mut outer = vertex("outer");
    outer.children.push(inner);
    let graph = GraphDescription {
        vertices: vec![outer, vertex("sibling")],
        edges: vec![],
    };
    let tree = build(&graph, &LayoutConfig::default()).unwrap();
    assert_eq!(tree.models.len(), 3);
    assert_eq!(tree.models[0].nodes.len(), 2); // outer + sibling
    assert_eq!(tree.models[1].nodes.len(), 1); // inner
    assert_eq!(tree.models[2].nodes.len(), 1); // leaf
}

#[test]
fn build_routes_cross_group_edges_in_the_common_ancestor_model() {
    let mut g1 = vertex("g1");
    g1.children.push(vertex("x"));
    let mut g2 = vertex("g2");
    g2.children.push(vertex("y"));
    let graph = GraphDescription {
        vertices: vec![g1, g2],
        edges: vec![edge("e", "x", "y")],
    };
    let tree = build(&graph, &LayoutConfig::default()).unwrap();
    assert_eq!(tree.models[0].edges.len(), 1);
    assert!(tree.models[1].edges.is_empty());
    assert!(tree.models[2].edges.is_empty());
}

#[test]
fn build_degenerates_group_to_descendant_edges_into_local_loops() {
    let mut group = vertex("g");
    group.children.push(vertex("x"));
    let graph = GraphDescription {
        vertices: vec![group],
        edges: vec![edge("e", "g", "x")],
    };
    let tree = build(&graph, &LayoutConfig::default()).unwrap();
    assert!(tree.models[0].edges.is_empty());
    assert_eq!(tree.models[0].self_loops.len(), 1);
}
