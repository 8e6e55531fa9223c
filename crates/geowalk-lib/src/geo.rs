//! Great-circle distance helpers.
//!
//! All distances are in kilometres and all angles are accepted in degrees.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in degrees.
///
/// The function is symmetric and returns `0.0` for identical inputs. NaN inputs
/// propagate into a NaN result.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Haversine distance to another coordinate in kilometres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    /// Parse a `"lat,lon"` pair. Whitespace around either component is ignored.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::InvalidCoordinate {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (lat, lon) = input
            .split_once(',')
            .ok_or_else(|| invalid("expected 'lat,lon'"))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| invalid("latitude is not a number"))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| invalid("longitude is not a number"))?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self::new(latitude, longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_apart() {
        assert_eq!(haversine_distance(6.9271, 79.8612, 6.9271, 79.8612), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn colombo_to_kandy_is_plausible() {
        let d = haversine_distance(6.9271, 79.8612, 7.2906, 80.6337);
        assert!((d - 94.0).abs() < 2.0, "got {d}");
    }

    #[test]
    fn nan_propagates() {
        assert!(haversine_distance(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn parses_coordinate_pairs() {
        let c: Coordinate = " 6.9271 , 79.8612".parse().expect("valid pair");
        assert_eq!(c, Coordinate::new(6.9271, 79.8612));
    }

    #[test]
    fn rejects_malformed_coordinates() {
        assert!("6.9271".parse::<Coordinate>().is_err());
        assert!("north,79.8".parse::<Coordinate>().is_err());
        assert!("95.0,10.0".parse::<Coordinate>().is_err());
        assert!("10.0,200.0".parse::<Coordinate>().is_err());
    }
}
