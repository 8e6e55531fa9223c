//! Coordinate-to-coordinate route planning.
//!
//! [`plan_route`] resolves both endpoints to anchor vertices, runs the path
//! search, and annotates each step with leg and cumulative distances so callers
//! can render the result without touching the graph again.

use serde::Serialize;

use crate::error::Result;
use crate::geo::Coordinate;
use crate::graph::{Graph, NodeId};
use crate::path::{SelectionStrategy, Termination};

/// High-level route planning request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub start: Coordinate,
    pub goal: Coordinate,
}

impl RouteRequest {
    pub fn new(start: Coordinate, goal: Coordinate) -> Self {
        Self { start, goal }
    }

    /// Convenience constructor from raw degree pairs.
    pub fn between(start_lat: f64, start_lon: f64, goal_lat: f64, goal_lon: f64) -> Self {
        Self {
            start: Coordinate::new(start_lat, start_lon),
            goal: Coordinate::new(goal_lat, goal_lon),
        }
    }
}

/// One vertex along a planned route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep {
    pub index: usize,
    pub id: NodeId,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the previous step in kilometres (0 for the first step).
    pub leg_km: f64,
    pub cumulative_km: f64,
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub strategy: SelectionStrategy,
    pub start: NodeId,
    pub goal: NodeId,
    pub steps: Vec<RouteStep>,
    pub total_distance_km: f64,
    pub iterations: usize,
    pub termination: Termination,
}

impl RoutePlan {
    /// Number of edges in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Vertex ids in route order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.steps.iter().map(|step| step.id).collect()
    }
}

/// Compute a route between two coordinates.
///
/// Errors mean the search could not start (empty graph, no anchor). `Ok(None)`
/// means the search ran and found no route of at least two vertices.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<Option<RoutePlan>> {
    let outcome = graph.search_path(
        request.start.latitude,
        request.start.longitude,
        request.goal.latitude,
        request.goal.longitude,
    )?;

    let Some(ids) = outcome.steps else {
        tracing::info!(
            start = outcome.start,
            goal = outcome.goal,
            termination = %outcome.termination,
            "no valid path found between points"
        );
        return Ok(None);
    };

    let mut steps = Vec::with_capacity(ids.len());
    let mut cumulative = 0.0;
    let mut previous: Option<NodeId> = None;

    for (index, id) in ids.iter().copied().enumerate() {
        let Some(node) = graph.node(id) else {
            continue;
        };
        let leg_km = previous
            .and_then(|prev| node.neighbour_distance(prev))
            .unwrap_or(0.0);
        cumulative += leg_km;
        steps.push(RouteStep {
            index,
            id,
            latitude: node.latitude(),
            longitude: node.longitude(),
            leg_km,
            cumulative_km: cumulative,
        });
        previous = Some(id);
    }

    tracing::info!(
        nodes = steps.len(),
        distance_km = cumulative,
        iterations = outcome.iterations,
        "path found"
    );

    Ok(Some(RoutePlan {
        strategy: graph.config().strategy,
        start: outcome.start,
        goal: outcome.goal,
        steps,
        total_distance_km: cumulative,
        iterations: outcome.iterations,
        termination: outcome.termination,
    }))
}
