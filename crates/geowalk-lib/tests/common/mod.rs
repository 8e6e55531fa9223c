//! Shared fixtures for integration tests.

use std::path::PathBuf;

use geowalk_lib::{load_locations, load_network, Graph, GraphConfig, LocationList};

/// Path to the checked-in fixtures directory.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Graph built from the Colombo walking network fixture.
#[allow(dead_code)]
pub fn colombo_graph() -> Graph {
    let network =
        load_network(&fixtures_dir().join("colombo_network.json")).expect("load network fixture");
    Graph::from_network(&network)
}

#[allow(dead_code)]
pub fn saved_locations() -> LocationList {
    load_locations(&fixtures_dir().join("locations.json")).expect("load locations fixture")
}

/// Build a graph from `(id, lat, lon)` vertices and `(from, to)` edges.
#[allow(dead_code)]
pub fn graph_from(config: GraphConfig, vertices: &[(i64, f64, f64)], edges: &[(i64, i64)]) -> Graph {
    let mut graph = Graph::with_config(config);
    for &(id, lat, lon) in vertices {
        graph.add_vertex(id, lat, lon);
    }
    for &(from, to) in edges {
        graph.add_edge(from, to);
    }
    graph
}

/// Ids along a route, for compact assertions.
#[allow(dead_code)]
pub fn ids(route: &[&geowalk_lib::SpatialNode]) -> Vec<i64> {
    route.iter().map(|node| node.id()).collect()
}
