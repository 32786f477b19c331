use sirenia::graph::{Model, NodeId};
use sirenia::model::{EdgeDescriptor, Point};
use sirenia::normalize::{run, verify_single_step, waypoints};
use sirenia::{LayoutError, acyclic, rank};

fn model_with_nodes(n: usize) -> (Model, Vec<NodeId>) {
    let mut model = Model::new();
    let nodes = (0..n).map(|v| model.add_node(Some(v), 40.0, 30.0)).collect();
    (model, nodes)
}

fn descriptors(n: usize) -> Vec<EdgeDescriptor> {
    (0..n)
        .map(|i| EdgeDescriptor::new(format!("e{i}"), "x", "y"))
        .collect()
}

#[test]
fn run_leaves_single_step_edges_alone() {
    let (mut model, n) = model_with_nodes(2);
    model.add_edge(n[0], n[1], Some(0));
    rank::rank(&mut model);

    run(&mut model);
    assert_eq!(model.edges.len(), 1);
    assert!(model.dummy_chains.is_empty());
}

#[test]
fn run_expands_a_two_rank_edge_into_one_dummy() {
    let (mut model, n) = model_with_nodes(3);
    model.add_edge(n[0], n[1], Some(0));
    model.add_edge(n[1], n[2], Some(1));
    let long = model.add_edge(n[0], n[2], Some(2));
    rank::rank(&mut model);

    run(&mut model);
    assert_eq!(model.dummy_chains, vec![long]);
    assert_eq!(model.edge(long).chain.len(), 1);
    assert!(model.edge(long).replaced);

    let dummy = model.edge(long).chain[0];
    assert!(model.node(dummy).is_dummy());
    assert_eq!(model.node(dummy).rank, 1);

    // The long edge is gone from the adjacency, replaced by two single-step segments.
    assert_eq!(model.active_edges().count(), 4);
    assert!(verify_single_step(&model, &descriptors(3)).is_ok());
}

#[test]
fn run_builds_one_dummy_per_intermediate_rank() {
    let (mut model, n) = model_with_nodes(4);
    model.add_edge(n[0], n[1], Some(0));
    model.add_edge(n[1], n[2], Some(1));
    model.add_edge(n[2], n[3], Some(2));
    let long = model.add_edge(n[0], n[3], Some(3));
    rank::rank(&mut model);

    run(&mut model);
    let chain = model.edge(long).chain.clone();
    assert_eq!(chain.len(), 2);
    assert_eq!(model.node(chain[0]).rank, 1);
    assert_eq!(model.node(chain[1]).rank, 2);
}

#[test]
fn waypoints_read_reversed_chains_backwards() {
    // a -> b -> c -> d -> a; the reversed closing edge spans three ranks.
    let (mut model, n) = model_with_nodes(4);
    model.add_edge(n[0], n[1], Some(0));
    model.add_edge(n[1], n[2], Some(1));
    model.add_edge(n[2], n[3], Some(2));
    let closing = model.add_edge(n[3], n[0], Some(3));

    acyclic::run(&mut model).unwrap();
    rank::rank(&mut model);
    run(&mut model);

    let chain = model.edge(closing).chain.clone();
    assert_eq!(chain.len(), 2);
    model.node_mut(chain[0]).x = 1.0;
    model.node_mut(chain[0]).y = 10.0;
    model.node_mut(chain[1]).x = 2.0;
    model.node_mut(chain[1]).y = 20.0;

    // Reversed: the list runs from the original source (deep rank) back up.
    let points = waypoints(&model, closing, Point { x: 0.5, y: 0.0 });
    assert_eq!(
        points,
        vec![Point { x: 2.5, y: 20.0 }, Point { x: 1.5, y: 10.0 }]
    );
}

#[test]
fn verify_single_step_reports_a_spanning_edge_with_its_caller_id() {
    let (mut model, n) = model_with_nodes(2);
    model.add_edge(n[0], n[1], Some(0));
    model.node_mut(n[1]).rank = 2;

    assert_eq!(
        verify_single_step(&model, &descriptors(1)).unwrap_err(),
        LayoutError::RankInvariantViolation {
            edge_id: "e0".to_string(),
        }
    );
}
