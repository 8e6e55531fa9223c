use criterion::{criterion_group, criterion_main, Criterion};
use geowalk_lib::{plan_route, Graph, GraphConfig, RouteRequest, SelectionStrategy};
use once_cell::sync::Lazy;
use std::hint::black_box;

/// Side length of the benchmark lattice.
const GRID: i64 = 60;
/// Lattice spacing in degrees (~110 m).
const STEP: f64 = 0.001;

fn lattice(strategy: SelectionStrategy) -> Graph {
    let mut graph = Graph::with_config(GraphConfig {
        strategy,
        ..GraphConfig::default()
    });
    for row in 0..GRID {
        for col in 0..GRID {
            graph.add_vertex(row * GRID + col, 6.9 + row as f64 * STEP, 79.85 + col as f64 * STEP);
        }
    }
    for row in 0..GRID {
        for col in 0..GRID {
            let id = row * GRID + col;
            if col + 1 < GRID {
                graph.add_edge(id, id + 1);
            }
            if row + 1 < GRID {
                graph.add_edge(id, id + GRID);
            }
        }
    }
    graph
}

static LINEAR_GRAPH: Lazy<Graph> = Lazy::new(|| lattice(SelectionStrategy::LinearScan));
static FRONTIER_GRAPH: Lazy<Graph> = Lazy::new(|| lattice(SelectionStrategy::Frontier));
static CORNER_TO_CORNER: Lazy<RouteRequest> = Lazy::new(|| {
    let far = (GRID - 1) as f64 * STEP;
    RouteRequest::between(6.9, 79.85, 6.9 + far, 79.85 + far)
});

fn benchmark_pathfinding(c: &mut Criterion) {
    c.bench_function("linear_scan_corner_to_corner", |b| {
        let graph = &*LINEAR_GRAPH;
        let request = &*CORNER_TO_CORNER;
        b.iter(|| {
            let plan = plan_route(graph, request).expect("search starts");
            black_box(plan.map(|plan| plan.hop_count()))
        });
    });

    c.bench_function("frontier_corner_to_corner", |b| {
        let graph = &*FRONTIER_GRAPH;
        let request = &*CORNER_TO_CORNER;
        b.iter(|| {
            let plan = plan_route(graph, request).expect("search starts");
            black_box(plan.map(|plan| plan.hop_count()))
        });
    });

    c.bench_function("find_nearest_centre", |b| {
        let graph = &*FRONTIER_GRAPH;
        b.iter(|| black_box(graph.find_nearest(6.93, 79.88).map(|node| node.id())));
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
