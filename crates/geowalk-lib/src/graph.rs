use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::{haversine_distance, Coordinate};
use crate::path::{find_route_dijkstra, SearchOutcome, SelectionStrategy};
use crate::spatial::SpatialIndex;

/// External identity of a graph vertex (OSM node id or similar).
pub type NodeId = i64;

/// Radius for the first nearest-vertex pass, in kilometres.
pub const DEFAULT_PRIMARY_RADIUS_KM: f64 = 5.0;

/// Multiplier applied to the primary radius to form the relevance band of a
/// path search.
///
/// Vertices farther than `primary_radius * factor` from both anchors are left
/// out of the search even when the true shortest path would pass through them.
/// This is a known incompleteness of the router: disconnected-looking results
/// for long detours are expected rather than a bug.
pub const RELEVANCE_RADIUS_FACTOR: f64 = 5.0;

/// Upper bound on vertex selections for one path search.
pub const MAX_SEARCH_ITERATIONS: usize = 10_000;

/// Tunables for nearest-vertex resolution and path search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphConfig {
    pub primary_radius_km: f64,
    pub relevance_factor: f64,
    pub max_iterations: usize,
    pub strategy: SelectionStrategy,
}

impl GraphConfig {
    /// Radius of the relevance band around each anchor.
    pub fn relevance_radius_km(&self) -> f64 {
        self.primary_radius_km * self.relevance_factor
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            primary_radius_km: DEFAULT_PRIMARY_RADIUS_KM,
            relevance_factor: RELEVANCE_RADIUS_FACTOR,
            max_iterations: MAX_SEARCH_ITERATIONS,
            strategy: SelectionStrategy::default(),
        }
    }
}

/// Undirected, weighted adjacency entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    /// Haversine distance between the endpoints in kilometres.
    pub distance: f64,
    pub(crate) slot: usize,
}

/// A graph vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialNode {
    id: NodeId,
    latitude: f64,
    longitude: f64,
    edges: Vec<Edge>,
}

impl SpatialNode {
    fn new(id: NodeId, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            latitude,
            longitude,
            edges: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Adjacent vertices in edge insertion order.
    pub fn neighbours(&self) -> &[Edge] {
        &self.edges
    }

    /// Weight of the edge to `target`, if one exists.
    pub fn neighbour_distance(&self, target: NodeId) -> Option<f64> {
        self.edges
            .iter()
            .find(|edge| edge.target == target)
            .map(|edge| edge.distance)
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Haversine distance from this vertex to a point.
    pub fn distance_to_point(&self, latitude: f64, longitude: f64) -> f64 {
        haversine_distance(self.latitude, self.longitude, latitude, longitude)
    }

    fn distance_to(&self, other: &SpatialNode) -> f64 {
        self.distance_to_point(other.latitude, other.longitude)
    }

    fn has_edge_to(&self, slot: usize) -> bool {
        self.edges.iter().any(|edge| edge.slot == slot)
    }
}

/// Outcome of an [`Graph::add_edge`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsertion {
    Added,
    /// The edge already existed; neighbour maps are unchanged.
    Duplicate,
    /// One or both endpoints are unknown; the request was ignored.
    MissingEndpoint,
}

/// Undirected routing graph over geographic points.
///
/// Vertices live in an insertion-ordered arena; adjacency refers to arena
/// slots, and an id index maps external identities to slots. Vertices are never
/// removed, so slots stay stable for the lifetime of the graph.
pub struct Graph {
    config: GraphConfig,
    nodes: Vec<SpatialNode>,
    index: HashMap<NodeId, usize>,
    spatial: SpatialIndex,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            index: HashMap::new(),
            spatial: SpatialIndex::new(),
            edge_count: 0,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Replace the search tunables. The graph structure is unaffected.
    pub fn set_config(&mut self, config: GraphConfig) {
        self.config = config;
    }

    /// Insert a vertex unless `id` is already present.
    ///
    /// The first insertion wins; coordinates cannot be updated through this
    /// path. Returns `true` when a new vertex was created.
    pub fn add_vertex(&mut self, id: NodeId, latitude: f64, longitude: f64) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }

        let slot = self.nodes.len();
        self.nodes.push(SpatialNode::new(id, latitude, longitude));
        self.index.insert(id, slot);
        self.spatial.insert(slot, latitude, longitude);
        true
    }

    /// Connect two existing vertices with an undirected edge weighted by their
    /// haversine distance.
    ///
    /// Missing endpoints are not an error: partial import data is expected, so
    /// the request is logged and skipped. Repeating an edge is a no-op.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> EdgeInsertion {
        let (Some(&from_slot), Some(&to_slot)) = (self.index.get(&from), self.index.get(&to))
        else {
            debug!(from, to, "cannot add edge: endpoint not found");
            return EdgeInsertion::MissingEndpoint;
        };

        if self.nodes[from_slot].has_edge_to(to_slot) {
            return EdgeInsertion::Duplicate;
        }

        let distance = self.nodes[from_slot].distance_to(&self.nodes[to_slot]);
        self.nodes[from_slot].edges.push(Edge {
            target: to,
            distance,
            slot: to_slot,
        });
        if from_slot != to_slot {
            self.nodes[to_slot].edges.push(Edge {
                target: from,
                distance,
                slot: from_slot,
            });
        }
        self.edge_count += 1;
        EdgeInsertion::Added
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&SpatialNode> {
        self.index.get(&id).map(|&slot| &self.nodes[slot])
    }

    /// All vertices in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &SpatialNode> + '_ {
        self.nodes.iter()
    }

    /// Resolve a coordinate to the closest vertex.
    ///
    /// Vertices within the primary radius are considered first; when none
    /// qualify, every vertex is scanned so a non-empty graph always yields a
    /// result. Ties go to the vertex inserted first.
    pub fn find_nearest(&self, latitude: f64, longitude: f64) -> Option<&SpatialNode> {
        self.nearest_slot(latitude, longitude)
            .map(|slot| &self.nodes[slot])
    }

    /// Shortest path between the vertices nearest to two coordinates.
    ///
    /// Returns `Ok(None)` when the search completes without a route of at least
    /// two vertices (unreachable goal, identical anchors, or a cap-truncated
    /// search). Errors are reserved for queries that cannot start.
    pub fn shortest_path(
        &self,
        start_lat: f64,
        start_lon: f64,
        end_lat: f64,
        end_lon: f64,
    ) -> Result<Option<Vec<&SpatialNode>>> {
        let outcome = self.search_path(start_lat, start_lon, end_lat, end_lon)?;
        Ok(outcome.steps.map(|steps| {
            steps
                .iter()
                .filter_map(|id| self.node(*id))
                .collect()
        }))
    }

    /// Run the path search and report statistics alongside the route.
    pub fn search_path(
        &self,
        start_lat: f64,
        start_lon: f64,
        end_lat: f64,
        end_lon: f64,
    ) -> Result<SearchOutcome> {
        if self.nodes.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let start = self
            .nearest_slot(start_lat, start_lon)
            .ok_or(Error::NoAnchor {
                latitude: start_lat,
                longitude: start_lon,
            })?;
        let goal = self
            .nearest_slot(end_lat, end_lon)
            .ok_or(Error::NoAnchor {
                latitude: end_lat,
                longitude: end_lon,
            })?;

        debug!(
            start = self.nodes[start].id,
            goal = self.nodes[goal].id,
            "resolved anchor nodes"
        );

        let relevant = self.relevant_slots(start, goal);
        let relevant_nodes = relevant.iter().filter(|flag| **flag).count();

        let run = find_route_dijkstra(
            &self.nodes,
            &relevant,
            start,
            goal,
            self.config.max_iterations,
            self.config.strategy,
        );

        Ok(SearchOutcome {
            start: self.nodes[start].id,
            goal: self.nodes[goal].id,
            steps: run
                .path
                .map(|slots| slots.into_iter().map(|slot| self.nodes[slot].id).collect()),
            distance_km: run.distance_km,
            iterations: run.iterations,
            relevant_nodes,
            termination: run.termination,
        })
    }

    fn nearest_slot(&self, latitude: f64, longitude: f64) -> Option<usize> {
        if self.nodes.is_empty() {
            return None;
        }

        let radius = self.config.primary_radius_km;
        let candidates = self
            .spatial
            .candidates_within(latitude, longitude, radius);
        if let Some(slot) = self.closest_slot(latitude, longitude, candidates, Some(radius)) {
            return Some(slot);
        }

        debug!(
            latitude,
            longitude, radius, "no vertex within primary radius; scanning all vertices"
        );
        self.closest_slot(latitude, longitude, 0..self.nodes.len(), None)
    }

    /// Closest slot among `slots`, optionally bounded by `limit` kilometres.
    /// Equal distances resolve to the lowest slot.
    fn closest_slot(
        &self,
        latitude: f64,
        longitude: f64,
        slots: impl IntoIterator<Item = usize>,
        limit: Option<f64>,
    ) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for slot in slots {
            let distance = self.nodes[slot].distance_to_point(latitude, longitude);
            if distance.is_nan() {
                continue;
            }
            if let Some(limit) = limit {
                if distance > limit {
                    continue;
                }
            }

            let better = match best {
                None => true,
                Some((best_slot, best_distance)) => {
                    distance < best_distance || (distance == best_distance && slot < best_slot)
                }
            };
            if better {
                best = Some((slot, distance));
            }
        }

        best.map(|(slot, _)| slot)
    }

    /// Flags for vertices within the relevance band of either anchor. Both
    /// anchors are always admitted.
    fn relevant_slots(&self, start: usize, goal: usize) -> Vec<bool> {
        let band = self.config.relevance_radius_km();
        let mut relevant = vec![false; self.nodes.len()];

        for anchor in [start, goal] {
            let anchor_node = &self.nodes[anchor];
            for slot in self.spatial.candidates_within(
                anchor_node.latitude,
                anchor_node.longitude,
                band,
            ) {
                if anchor_node.distance_to(&self.nodes[slot]) <= band {
                    relevant[slot] = true;
                }
            }
        }

        relevant[start] = true;
        relevant[goal] = true;
        relevant
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("config", &self.config)
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edge_count)
            .field("indexed", &self.spatial.len())
            .field("positions", &self.spatial.distinct_positions())
            .finish()
    }
}
