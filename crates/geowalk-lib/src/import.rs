//! Loading walking networks from exported map data.
//!
//! A network document is a JSON object with a `nodes` array of
//! `{ "id", "lat", "lon" }` records and a `ways` array whose entries list node
//! ids in travel order together with their map tags. Only ways that pass
//! [`is_walkable`] contribute edges.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::graph::{EdgeInsertion, Graph, NodeId};

static WALKABLE_HIGHWAYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "footway",
        "path",
        "pedestrian",
        "steps",
        "residential",
        "service",
        "track",
        "unclassified",
        "living_street",
        "primary",
        "secondary",
        "tertiary",
        "trunk",
        "trunk_link",
        "primary_link",
        "secondary_link",
        "tertiary_link",
        "road",
        "trail",
        "pathway",
        "cycleway",
        "bridleway",
        "corridor",
    ]
    .into_iter()
    .collect()
});

/// Whether a way with these tags can be walked.
///
/// A `highway` value must be in the walkable allow-list (compared
/// case-insensitively). Ways without a `highway` tag qualify when they are
/// hiking routes or carry any `footway` tag.
pub fn is_walkable(tags: &HashMap<String, String>) -> bool {
    match non_empty(tags, "highway") {
        Some(highway) => WALKABLE_HIGHWAYS.contains(highway.to_lowercase().as_str()),
        None => {
            non_empty(tags, "route") == Some("hiking") || non_empty(tags, "footway").is_some()
        }
    }
}

fn non_empty<'a>(tags: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    tags.get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkWay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl NetworkWay {
    pub fn is_walkable(&self) -> bool {
        is_walkable(&self.tags)
    }
}

/// Raw network document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    #[serde(default)]
    pub nodes: Vec<NetworkNode>,
    #[serde(default)]
    pub ways: Vec<NetworkWay>,
}

/// Counters reported by [`Graph::import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Vertices newly created (repeated ids are not counted).
    pub nodes_added: usize,
    pub ways: usize,
    pub walkable_ways: usize,
    pub edges_added: usize,
    pub duplicate_edges: usize,
    /// Edges skipped because an endpoint was never declared.
    pub rejected_edges: usize,
}

/// Read and decode a network document.
pub fn load_network(path: &Path) -> Result<Network> {
    let raw = fs::read_to_string(path)?;
    let network: Network = serde_json::from_str(&raw).map_err(|source| Error::NetworkParse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        nodes = network.nodes.len(),
        ways = network.ways.len(),
        "decoded network document"
    );
    Ok(network)
}

impl Graph {
    /// Add every node of `network`, then connect consecutive nodes of each
    /// walkable way.
    ///
    /// Edges whose endpoints were never declared are skipped and counted in
    /// [`ImportSummary::rejected_edges`].
    pub fn import(&mut self, network: &Network) -> ImportSummary {
        let mut summary = ImportSummary {
            ways: network.ways.len(),
            ..ImportSummary::default()
        };

        for node in &network.nodes {
            if self.add_vertex(node.id, node.lat, node.lon) {
                summary.nodes_added += 1;
            }
        }

        for way in network.ways.iter().filter(|way| way.is_walkable()) {
            summary.walkable_ways += 1;
            for pair in way.nodes.windows(2) {
                match self.add_edge(pair[0], pair[1]) {
                    EdgeInsertion::Added => summary.edges_added += 1,
                    EdgeInsertion::Duplicate => summary.duplicate_edges += 1,
                    EdgeInsertion::MissingEndpoint => summary.rejected_edges += 1,
                }
            }
        }

        info!(
            nodes = summary.nodes_added,
            ways = summary.ways,
            walkable_ways = summary.walkable_ways,
            edges = summary.edges_added,
            "imported walking network"
        );
        if summary.rejected_edges > 0 {
            warn!(
                rejected = summary.rejected_edges,
                "skipped edges with unknown endpoints"
            );
        }

        summary
    }

    /// Build a graph from a network document with default configuration.
    pub fn from_network(network: &Network) -> Self {
        let mut graph = Graph::new();
        graph.import(network);
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn highway_allow_list_is_case_insensitive() {
        assert!(is_walkable(&tags(&[("highway", "Footway")])));
        assert!(is_walkable(&tags(&[("highway", "trunk_link")])));
        assert!(!is_walkable(&tags(&[("highway", "motorway")])));
    }

    #[test]
    fn untagged_highway_falls_back_to_route_and_footway() {
        assert!(is_walkable(&tags(&[("route", "hiking")])));
        assert!(is_walkable(&tags(&[("footway", "sidewalk")])));
        assert!(is_walkable(&tags(&[("highway", ""), ("footway", "crossing")])));
        assert!(!is_walkable(&tags(&[("route", "bus")])));
        assert!(!is_walkable(&HashMap::new()));
    }

    #[test]
    fn motorway_with_footway_tag_is_rejected() {
        assert!(!is_walkable(&tags(&[
            ("highway", "motorway"),
            ("footway", "sidewalk")
        ])));
    }

    #[test]
    fn import_connects_consecutive_walkable_nodes() {
        let network = Network {
            nodes: vec![
                NetworkNode { id: 1, lat: 6.9271, lon: 79.8612 },
                NetworkNode { id: 2, lat: 6.9280, lon: 79.8620 },
                NetworkNode { id: 3, lat: 6.9300, lon: 79.8650 },
                NetworkNode { id: 1, lat: 0.0, lon: 0.0 },
            ],
            ways: vec![
                NetworkWay {
                    id: Some(100),
                    nodes: vec![1, 2, 3, 2],
                    tags: tags(&[("highway", "footway")]),
                },
                NetworkWay {
                    id: Some(101),
                    nodes: vec![1, 3],
                    tags: tags(&[("highway", "motorway")]),
                },
                NetworkWay {
                    id: None,
                    nodes: vec![3, 42],
                    tags: tags(&[("route", "hiking")]),
                },
            ],
        };

        let mut graph = Graph::new();
        let summary = graph.import(&network);

        assert_eq!(
            summary,
            ImportSummary {
                nodes_added: 3,
                ways: 3,
                walkable_ways: 2,
                edges_added: 2,
                duplicate_edges: 1,
                rejected_edges: 1,
            }
        );
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.node(1).and_then(|n| n.neighbour_distance(3)).is_none());
        assert_eq!(graph.node(1).map(|n| n.latitude()), Some(6.9271));
    }

    #[test]
    fn network_document_tolerates_missing_sections() {
        let network: Network = serde_json::from_str(r#"{"nodes":[{"id":7,"lat":1.0,"lon":2.0}]}"#)
            .expect("valid document");
        assert_eq!(network.nodes.len(), 1);
        assert!(network.ways.is_empty());
    }
}
