//! Label-setting shortest-path search over the relevant subset of a graph.
//!
//! The search is a textbook Dijkstra with three twists:
//!
//! - only vertices flagged as *relevant* participate (see
//!   [`GraphConfig::relevance_radius_km`](crate::graph::GraphConfig::relevance_radius_km));
//! - it stops after a fixed number of vertex selections and reconstructs
//!   whatever predecessor chain exists at that point;
//! - ties between equally distant vertices go to the vertex inserted first.
//!
//! Two selection strategies are available. [`SelectionStrategy::LinearScan`]
//! scans every unvisited vertex on each iteration; [`SelectionStrategy::Frontier`]
//! uses a [`PriorityFrontier`]. Both make the same selections in the same order,
//! so results, iteration counts, and cap behaviour are identical.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::frontier::PriorityFrontier;
use crate::graph::{NodeId, SpatialNode};

/// How the next vertex to settle is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Linear scan over unvisited vertices (reference behaviour).
    #[default]
    LinearScan,
    /// Binary-heap frontier with lazy deletion.
    Frontier,
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SelectionStrategy::LinearScan => "linear",
            SelectionStrategy::Frontier => "frontier",
        };
        f.write_str(value)
    }
}

impl FromStr for SelectionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" | "linear-scan" | "linear_scan" => Ok(SelectionStrategy::LinearScan),
            "frontier" | "heap" => Ok(SelectionStrategy::Frontier),
            _ => Err(Error::UnsupportedAlgorithm {
                kind: "selection",
                name: s.to_string(),
            }),
        }
    }
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The goal vertex was selected.
    ReachedGoal,
    /// No reachable unvisited vertex remained.
    Exhausted,
    /// The selection cap was hit before the goal was settled.
    IterationCap,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Termination::ReachedGoal => "reached goal",
            Termination::Exhausted => "exhausted",
            Termination::IterationCap => "iteration cap",
        };
        f.write_str(value)
    }
}

/// Result of a shortest-path search together with search statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Anchor vertex resolved for the start coordinate.
    pub start: NodeId,
    /// Anchor vertex resolved for the end coordinate.
    pub goal: NodeId,
    /// Ordered vertex ids from start to goal, or `None` when fewer than two
    /// vertices could be reconstructed.
    pub steps: Option<Vec<NodeId>>,
    /// Accumulated edge distance along `steps` in kilometres.
    pub distance_km: Option<f64>,
    /// Number of vertex selections performed.
    pub iterations: usize,
    /// Number of vertices admitted to the search.
    pub relevant_nodes: usize,
    pub termination: Termination,
}

impl SearchOutcome {
    /// Number of edges in the route.
    pub fn hop_count(&self) -> usize {
        self.steps
            .as_ref()
            .map(|steps| steps.len().saturating_sub(1))
            .unwrap_or(0)
    }
}

/// Raw search result over arena slots.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchRun {
    pub(crate) path: Option<Vec<usize>>,
    pub(crate) distance_km: Option<f64>,
    pub(crate) iterations: usize,
    pub(crate) termination: Termination,
}

/// Run Dijkstra from `start` to `goal` over the vertices flagged in `relevant`.
pub(crate) fn find_route_dijkstra(
    nodes: &[SpatialNode],
    relevant: &[bool],
    start: usize,
    goal: usize,
    max_iterations: usize,
    strategy: SelectionStrategy,
) -> SearchRun {
    let mut state = SearchState::new(nodes.len(), start);

    let (iterations, termination) = match strategy {
        SelectionStrategy::LinearScan => {
            run_linear_scan(nodes, relevant, goal, max_iterations, &mut state)
        }
        SelectionStrategy::Frontier => {
            run_frontier(nodes, relevant, start, goal, max_iterations, &mut state)
        }
    };

    if termination == Termination::IterationCap {
        tracing::warn!(
            iterations,
            max_iterations,
            "maximum iterations reached in path search; using partial result"
        );
    }

    let path = reconstruct_path(&state.previous, goal);
    let distance_km = path.as_ref().map(|_| state.distances[goal]);

    tracing::debug!(
        iterations,
        %termination,
        found = path.is_some(),
        "path search finished"
    );

    SearchRun {
        path,
        distance_km,
        iterations,
        termination,
    }
}

struct SearchState {
    distances: Vec<f64>,
    previous: Vec<Option<usize>>,
    visited: Vec<bool>,
}

impl SearchState {
    fn new(len: usize, start: usize) -> Self {
        let mut distances = vec![f64::INFINITY; len];
        distances[start] = 0.0;
        Self {
            distances,
            previous: vec![None; len],
            visited: vec![false; len],
        }
    }

    /// Mark `current` visited and relax its edges, reporting each improvement.
    fn settle(
        &mut self,
        nodes: &[SpatialNode],
        relevant: &[bool],
        current: usize,
        mut on_improve: impl FnMut(usize, f64),
    ) {
        self.visited[current] = true;
        let base = self.distances[current];

        for edge in nodes[current].neighbours() {
            let next = edge.slot;
            if self.visited[next] || !relevant[next] {
                continue;
            }

            let candidate = base + edge.distance;
            if candidate < self.distances[next] {
                self.distances[next] = candidate;
                self.previous[next] = Some(current);
                on_improve(next, candidate);
            }
        }
    }
}

fn run_linear_scan(
    nodes: &[SpatialNode],
    relevant: &[bool],
    goal: usize,
    max_iterations: usize,
    state: &mut SearchState,
) -> (usize, Termination) {
    let mut iterations = 0usize;

    loop {
        if iterations >= max_iterations {
            return (iterations, Termination::IterationCap);
        }

        let Some(current) = select_linear(relevant, state) else {
            return (iterations, Termination::Exhausted);
        };
        iterations += 1;

        if current == goal {
            return (iterations, Termination::ReachedGoal);
        }

        state.settle(nodes, relevant, current, |_, _| {});
    }
}

/// First unvisited relevant vertex with the strictly smallest finite distance.
fn select_linear(relevant: &[bool], state: &SearchState) -> Option<usize> {
    let mut selected = None;
    let mut min_distance = f64::INFINITY;

    for (slot, &is_relevant) in relevant.iter().enumerate() {
        if !is_relevant || state.visited[slot] {
            continue;
        }
        if state.distances[slot] < min_distance {
            min_distance = state.distances[slot];
            selected = Some(slot);
        }
    }

    selected
}

fn run_frontier(
    nodes: &[SpatialNode],
    relevant: &[bool],
    start: usize,
    goal: usize,
    max_iterations: usize,
    state: &mut SearchState,
) -> (usize, Termination) {
    let mut frontier = PriorityFrontier::new();
    frontier.insert(start, 0.0);
    let mut iterations = 0usize;

    loop {
        if iterations >= max_iterations {
            return (iterations, Termination::IterationCap);
        }

        let Some(current) = pop_live(&mut frontier, state) else {
            return (iterations, Termination::Exhausted);
        };
        iterations += 1;

        if current == goal {
            return (iterations, Termination::ReachedGoal);
        }

        state.settle(nodes, relevant, current, |slot, distance| {
            frontier.insert(slot, distance)
        });
    }
}

/// Pop entries until one is neither visited nor superseded by a shorter distance.
fn pop_live(frontier: &mut PriorityFrontier<usize>, state: &SearchState) -> Option<usize> {
    while let Some((slot, cost)) = frontier.extract_min_with_priority() {
        if state.visited[slot] || cost > state.distances[slot] {
            continue;
        }
        return Some(slot);
    }
    None
}

fn reconstruct_path(previous: &[Option<usize>], goal: usize) -> Option<Vec<usize>> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = previous[current] {
        path.push(prev);
        current = prev;
    }

    if path.len() < 2 {
        return None;
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstruct_walks_predecessors_back_to_root() {
        let previous = vec![None, Some(0), Some(1), None];
        assert_eq!(reconstruct_path(&previous, 2), Some(vec![0, 1, 2]));
    }

    #[test]
    fn reconstruct_without_predecessor_is_none() {
        let previous = vec![None, Some(0), None];
        assert_eq!(reconstruct_path(&previous, 2), None);
        assert_eq!(reconstruct_path(&previous, 0), None);
    }

    #[test]
    fn strategy_parses_aliases() {
        assert_eq!(
            "linear".parse::<SelectionStrategy>().unwrap(),
            SelectionStrategy::LinearScan
        );
        assert_eq!(
            "HEAP".parse::<SelectionStrategy>().unwrap(),
            SelectionStrategy::Frontier
        );
        assert!("astar".parse::<SelectionStrategy>().is_err());
    }

    #[test]
    fn hop_count_handles_missing_route() {
        let outcome = SearchOutcome {
            start: 1,
            goal: 1,
            steps: None,
            distance_km: None,
            iterations: 1,
            relevant_nodes: 1,
            termination: Termination::ReachedGoal,
        };
        assert_eq!(outcome.hop_count(), 0);
    }
}
