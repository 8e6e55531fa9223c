//! KD-tree spatial index for radius queries over graph vertices.
//!
//! Vertices are projected onto the unit sphere (earth-centred, earth-fixed
//! coordinates) so that straight-line chord length grows monotonically with
//! great-circle distance. A radius expressed in kilometres converts to a chord
//! length, the KD-tree returns every vertex inside that chord, and callers then
//! filter candidates by exact haversine distance. Results therefore match a
//! full linear scan; the tree only prunes work.
//!
//! The tree holds each distinct position once. kiddo refuses more than a
//! bucket's worth of items at one exact point, so co-located vertices share a
//! single tree entry that expands to all of their slots.

use std::collections::HashMap;

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;

use crate::geo::EARTH_RADIUS_KM;

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Slack added to chord radii so float error never drops a boundary vertex.
/// Exact haversine filtering happens afterwards.
const CHORD_EPSILON: f64 = 1e-9;

/// Bit pattern of a projected point, used to detect exact duplicates.
type PointKey = [u64; 3];

/// Spatial index keyed by arena slot.
pub(crate) struct SpatialIndex {
    /// Items are indices into `positions`.
    tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32>,
    /// Slots at each distinct position, in insertion order.
    positions: Vec<Vec<usize>>,
    by_point: HashMap<PointKey, usize>,
    len: usize,
}

impl SpatialIndex {
    pub(crate) fn new() -> Self {
        Self {
            tree: KdTree::new(),
            positions: Vec::new(),
            by_point: HashMap::new(),
            len: 0,
        }
    }

    /// Number of distinct indexed positions.
    pub(crate) fn distinct_positions(&self) -> usize {
        self.positions.len()
    }

    /// Number of indexed vertices.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Index a vertex. Non-finite coordinates are skipped; such vertices can
    /// never satisfy a finite radius bound.
    pub(crate) fn insert(&mut self, slot: usize, latitude: f64, longitude: f64) {
        if !latitude.is_finite() || !longitude.is_finite() {
            return;
        }
        let point = unit_sphere(latitude, longitude);
        let key = point_key(&point);
        match self.by_point.get(&key) {
            Some(&position) => self.positions[position].push(slot),
            None => {
                let position = self.positions.len();
                self.positions.push(vec![slot]);
                self.by_point.insert(key, position);
                self.tree.add(&point, position);
            }
        }
        self.len += 1;
    }

    /// Arena slots of every vertex that may lie within `radius_km` of the
    /// query point. The set is a superset of the exact answer.
    pub(crate) fn candidates_within(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Vec<usize> {
        if self.len == 0 || !latitude.is_finite() || !longitude.is_finite() || radius_km.is_nan()
        {
            return Vec::new();
        }
        if radius_km < 0.0 {
            return Vec::new();
        }

        let chord = chord_length(radius_km) + CHORD_EPSILON;
        let query = unit_sphere(latitude, longitude);
        self.tree
            .within_unsorted::<SquaredEuclidean>(&query, chord * chord)
            .into_iter()
            .flat_map(|neighbour| self.positions[neighbour.item].iter().copied())
            .collect()
    }
}

fn point_key(point: &[f64; 3]) -> PointKey {
    // Adding zero folds -0.0 into 0.0 so both land on one key.
    point.map(|component| (component + 0.0).to_bits())
}

/// Unit-sphere chord length matching a great-circle distance in kilometres.
fn chord_length(distance_km: f64) -> f64 {
    let angle = (distance_km / EARTH_RADIUS_KM).min(std::f64::consts::PI);
    2.0 * (angle / 2.0).sin()
}

fn unit_sphere(latitude: f64, longitude: f64) -> [f64; 3] {
    let lat = latitude.to_radians();
    let lon = longitude.to_radians();
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::haversine_distance;

    #[test]
    fn chord_grows_with_distance() {
        assert!(chord_length(1.0) < chord_length(2.0));
        assert!((chord_length(0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn chord_saturates_at_antipode() {
        assert!((chord_length(1.0e9) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn candidates_cover_exact_radius() {
        let points = [
            (6.9271, 79.8612),
            (6.9280, 79.8620),
            (6.9300, 79.8650),
            (7.2906, 80.6337),
        ];
        let mut index = SpatialIndex::new();
        for (slot, (lat, lon)) in points.iter().enumerate() {
            index.insert(slot, *lat, *lon);
        }

        let mut found = index.candidates_within(6.9271, 79.8612, 5.0);
        found.sort_unstable();
        let expected: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, (lat, lon))| haversine_distance(6.9271, 79.8612, *lat, *lon) <= 5.0)
            .map(|(slot, _)| slot)
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn non_finite_points_are_not_indexed() {
        let mut index = SpatialIndex::new();
        index.insert(0, f64::NAN, 10.0);
        assert_eq!(index.len(), 0);
        assert!(index.candidates_within(0.0, 10.0, 1.0e6).is_empty());
    }

    #[test]
    fn co_located_points_share_one_tree_entry() {
        let mut index = SpatialIndex::new();
        for slot in 0..(BUCKET_SIZE * 3) {
            index.insert(slot, 6.9271, 79.8612);
        }
        index.insert(BUCKET_SIZE * 3, 6.9300, 79.8650);

        assert_eq!(index.len(), BUCKET_SIZE * 3 + 1);
        assert_eq!(index.distinct_positions(), 2);

        let mut found = index.candidates_within(6.9271, 79.8612, 0.1);
        found.sort_unstable();
        assert_eq!(found, (0..BUCKET_SIZE * 3).collect::<Vec<_>>());
    }

    #[test]
    fn signed_zero_coordinates_are_one_position() {
        let mut index = SpatialIndex::new();
        index.insert(0, 0.0, 0.0);
        index.insert(1, -0.0, -0.0);
        assert_eq!(index.distinct_positions(), 1);
    }
}
