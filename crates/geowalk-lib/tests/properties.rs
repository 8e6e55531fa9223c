use geowalk_lib::search::{boyer_moore_contains, kmp_contains};
use geowalk_lib::{haversine_distance, Graph, GraphConfig, SelectionStrategy};
use proptest::prelude::*;

fn latitude() -> impl Strategy<Value = f64> {
    -90.0f64..=90.0
}

fn longitude() -> impl Strategy<Value = f64> {
    -180.0f64..=180.0
}

proptest! {
    #[test]
    fn distance_is_symmetric(
        lat1 in latitude(),
        lon1 in longitude(),
        lat2 in latitude(),
        lon2 in longitude()
    ) {
        let ab = haversine_distance(lat1, lon1, lat2, lon2);
        let ba = haversine_distance(lat2, lon2, lat1, lon1);
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert!(ab >= 0.0);
    }

    #[test]
    fn distance_to_self_is_zero(lat in latitude(), lon in longitude()) {
        prop_assert_eq!(haversine_distance(lat, lon, lat, lon), 0.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn exact_matchers_agree(text in "[abcAB ]{0,24}", pattern in "[abAB]{1,4}") {
        let bm = boyer_moore_contains(&text, &pattern);
        let kmp = kmp_contains(&text, &pattern);
        prop_assert_eq!(bm, kmp);
        prop_assert_eq!(bm, text.to_lowercase().contains(&pattern.to_lowercase()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn selection_strategies_agree(
        offsets in prop::collection::vec((0.0f64..0.02, 0.0f64..0.02), 2..24),
        links in prop::collection::vec((0usize..24, 0usize..24), 0..60),
        goal in 0usize..24
    ) {
        let build = |strategy| {
            let mut graph = Graph::with_config(GraphConfig {
                strategy,
                ..GraphConfig::default()
            });
            for (id, (lat, lon)) in offsets.iter().enumerate() {
                graph.add_vertex(id as i64, 6.9 + lat, 79.85 + lon);
            }
            for (a, b) in &links {
                graph.add_edge(*a as i64, *b as i64);
            }
            graph
        };

        let (goal_lat, goal_lon) = offsets[goal % offsets.len()];
        let (start_lat, start_lon) = offsets[0];
        let query = |graph: &Graph| {
            graph
                .search_path(6.9 + start_lat, 79.85 + start_lon, 6.9 + goal_lat, 79.85 + goal_lon)
                .expect("non-empty graph")
        };

        let linear = query(&build(SelectionStrategy::LinearScan));
        let frontier = query(&build(SelectionStrategy::Frontier));
        prop_assert_eq!(linear.steps, frontier.steps);
        prop_assert_eq!(linear.iterations, frontier.iterations);
        prop_assert_eq!(linear.termination, frontier.termination);
    }
}
