//! geowalk library entry points.
//!
//! This crate builds an undirected walking graph over geographic points,
//! resolves coordinates to their nearest vertex, and runs a bounded shortest
//! path search between two coordinates. It also ships the record utilities the
//! CLI uses for saved locations: substring and fuzzy lookup, and a handful of
//! selectable comparison sorts. Consumers should depend on the items exported
//! here instead of reimplementing behavior.

pub mod error;
pub mod frontier;
pub mod geo;
pub mod graph;
pub mod import;
pub mod locations;
pub mod path;
pub mod paths;
pub mod routing;
pub mod search;
pub mod sort;
mod spatial;

pub use error::{Error, Result};
pub use frontier::PriorityFrontier;
pub use geo::{haversine_distance, Coordinate, EARTH_RADIUS_KM};
pub use graph::{
    Edge, EdgeInsertion, Graph, GraphConfig, NodeId, SpatialNode, DEFAULT_PRIMARY_RADIUS_KM,
    MAX_SEARCH_ITERATIONS, RELEVANCE_RADIUS_FACTOR,
};
pub use import::{is_walkable, load_network, ImportSummary, Network, NetworkNode, NetworkWay};
pub use locations::{load_locations, LocationList, Preference, SortKey, TravelLocation};
pub use path::{SearchOutcome, SelectionStrategy, Termination};
pub use paths::{default_data_dir, resolve_locations_path, resolve_network_path};
pub use routing::{plan_route, RoutePlan, RouteRequest, RouteStep};
pub use search::{
    boyer_moore_search, edit_distance, fuzzy_search, kmp_search, search, suggest, Named,
    PatternMatcher, SearchAlgorithm, DEFAULT_MAX_EDIT_DISTANCE,
};
pub use sort::{bubble_sort, heap_sort, merge_sort, quick_sort, sort_by, SortAlgorithm};
