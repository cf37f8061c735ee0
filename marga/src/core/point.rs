//! Traffic counter records.

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// A traffic counter with its averaged volume.
///
/// Built once per run from upstream-aggregated measurements and read-only
/// inside the matching core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Counter identifier
    pub id: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Averaged volume (e.g. cyclists per hour)
    pub measurement: f64,
}

impl Point {
    /// Create a new counter point
    pub fn new(id: impl Into<String>, lat: f64, lon: f64, measurement: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
            measurement,
        }
    }

    /// Position as a `(lon, lat)` coordinate
    #[inline]
    pub fn coord(&self) -> Coord {
        Coord::new(self.lon, self.lat)
    }
}
