mod common;

use common::{colombo_graph, fixtures_dir};
use geowalk_lib::{
    load_network, plan_route, Coordinate, Graph, GraphConfig, ImportSummary, RouteRequest,
    SelectionStrategy, Termination,
};

#[test]
fn fixture_import_counts_edges_and_rejections() {
    let network = load_network(&fixtures_dir().join("colombo_network.json")).expect("fixture");
    let mut graph = Graph::new();
    let summary = graph.import(&network);

    assert_eq!(
        summary,
        ImportSummary {
            nodes_added: 7,
            ways: 5,
            walkable_ways: 4,
            edges_added: 7,
            duplicate_edges: 0,
            rejected_edges: 1,
        }
    );
    assert_eq!(graph.node_count(), 7);
    assert_eq!(graph.edge_count(), 7);
}

#[test]
fn footway_is_shorter_than_residential_loop() {
    let graph = colombo_graph();
    let request = RouteRequest::between(6.9271, 79.8612, 6.9320, 79.8680);
    let plan = plan_route(&graph, &request)
        .expect("search starts")
        .expect("route exists");

    assert_eq!(plan.node_ids(), vec![1, 2, 3, 4]);
    assert_eq!(plan.hop_count(), 3);
    assert_eq!(plan.termination, Termination::ReachedGoal);
    let last = plan.steps.last().expect("steps");
    assert!((last.cumulative_km - plan.total_distance_km).abs() < 1e-12);
    assert!(plan.total_distance_km > 0.9 && plan.total_distance_km < 1.0);
}

#[test]
fn hiking_connector_is_used_when_shorter() {
    let graph = colombo_graph();
    let request = RouteRequest::new(
        Coordinate::new(6.9271, 79.8612),
        Coordinate::new(6.9290, 79.8700),
    );
    let plan = plan_route(&graph, &request)
        .expect("search starts")
        .expect("route exists");
    assert_eq!(plan.node_ids(), vec![1, 6, 5]);
}

#[test]
fn motorway_only_vertex_is_unreachable() {
    let graph = colombo_graph();
    let request = RouteRequest::between(6.9271, 79.8612, 6.9400, 79.8800);
    let plan = plan_route(&graph, &request).expect("search starts");
    assert!(plan.is_none());
}

#[test]
fn frontier_strategy_plans_same_route() {
    let mut graph = colombo_graph();
    let request = RouteRequest::between(6.9271, 79.8612, 6.9320, 79.8680);
    let linear = plan_route(&graph, &request).unwrap().unwrap();

    graph.set_config(GraphConfig {
        strategy: SelectionStrategy::Frontier,
        ..*graph.config()
    });
    let frontier = plan_route(&graph, &request).unwrap().unwrap();

    assert_eq!(frontier.strategy, SelectionStrategy::Frontier);
    assert_eq!(linear.node_ids(), frontier.node_ids());
    assert_eq!(linear.iterations, frontier.iterations);
    assert_eq!(linear.total_distance_km, frontier.total_distance_km);
}

#[test]
fn off_network_coordinates_snap_to_nearest_vertex() {
    let graph = colombo_graph();
    // A few metres away from vertices 1 and 4.
    let request = RouteRequest::between(6.92712, 79.86118, 6.93198, 79.86803);
    let plan = plan_route(&graph, &request).unwrap().unwrap();
    assert_eq!(plan.start, 1);
    assert_eq!(plan.goal, 4);
}
