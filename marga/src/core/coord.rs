//! Longitude/latitude coordinate in degree space.
//!
//! All distances in this crate are planar Euclidean distances computed
//! directly on degrees. This is only meaningful for short ranges (tens of
//! meters) inside a fixed latitude band, which is the regime the matching
//! thresholds are tuned for.

use serde::{Deserialize, Serialize};

/// A `(longitude, latitude)` pair in degrees.
///
/// Serialized as a two-element sequence `[lon, lat]`, the vertex order used
/// by line geometries.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coord {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl Coord {
    /// Create a new coordinate
    #[inline]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Planar Euclidean distance in degrees
    #[inline]
    pub fn distance(&self, other: &Coord) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared planar distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Coord) -> f64 {
        let dlon = self.lon - other.lon;
        let dlat = self.lat - other.lat;
        dlon * dlon + dlat * dlat
    }

    /// Both components are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl From<[f64; 2]> for Coord {
    #[inline]
    fn from(pair: [f64; 2]) -> Self {
        Coord::new(pair[0], pair[1])
    }
}

impl From<Coord> for [f64; 2] {
    #[inline]
    fn from(coord: Coord) -> Self {
        [coord.lon, coord.lat]
    }
}
