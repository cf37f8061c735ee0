//! Axis-aligned bounding box in longitude/latitude space.
//!
//! [`Bounds`] is the envelope of a polyline's vertices and the unit of the
//! cheap candidate pre-filter:
//!
//! ```text
//!              lon_scale × r          lon_scale × r
//!            |<----------->|         |<----------->|
//!      ──────┌─────────────────────────────────────┐ ─┬─
//!            │                                     │  r
//!            │      ┌─────────────────────┐        │ ─┴─
//!            │      │   feature bounds    │        │
//!            │      └─────────────────────┘        │ ─┬─
//!            │                                     │  r
//!      ──────└─────────────────────────────────────┘ ─┴─
//!                        search window
//! ```
//!
//! A point is a candidate for a feature when it lies inside the feature's
//! bounds expanded by `lon_scale × r` on the longitude axis and `r` on the
//! latitude axis. The longitude axis is widened because a degree of
//! longitude covers less ground than a degree of latitude away from the
//! equator.

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest longitude
    pub min_lon: f64,
    /// Smallest latitude
    pub min_lat: f64,
    /// Largest longitude
    pub max_lon: f64,
    /// Largest latitude
    pub max_lat: f64,
}

impl Bounds {
    /// Create bounds from explicit extremes.
    #[inline]
    pub const fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Exact min/max envelope of a vertex list.
    ///
    /// Returns `None` for an empty list: an empty polyline has no envelope.
    pub fn from_coords(coords: &[Coord]) -> Option<Self> {
        let (first, rest) = coords.split_first()?;

        let mut bounds = Self::new(first.lon, first.lat, first.lon, first.lat);
        for c in rest {
            bounds.min_lon = bounds.min_lon.min(c.lon);
            bounds.min_lat = bounds.min_lat.min(c.lat);
            bounds.max_lon = bounds.max_lon.max(c.lon);
            bounds.max_lat = bounds.max_lat.max(c.lat);
        }
        Some(bounds)
    }

    /// Grow the box by `radius × lon_scale` on longitude and `radius` on latitude.
    #[inline]
    pub fn expanded(&self, radius: f64, lon_scale: f64) -> Self {
        let dlon = radius * lon_scale;
        Self {
            min_lon: self.min_lon - dlon,
            min_lat: self.min_lat - radius,
            max_lon: self.max_lon + dlon,
            max_lat: self.max_lat + radius,
        }
    }

    /// Check if a coordinate lies inside (boundary inclusive).
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.lon >= self.min_lon
            && c.lon <= self.max_lon
            && c.lat >= self.min_lat
            && c.lat <= self.max_lat
    }

    /// Check if this box overlaps another (boundary inclusive).
    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_lon <= other.max_lon
            && self.max_lon >= other.min_lon
            && self.min_lat <= other.max_lat
            && self.max_lat >= other.min_lat
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> Coord {
        Coord::new(
            (self.min_lon + self.max_lon) * 0.5,
            (self.min_lat + self.max_lat) * 0.5,
        )
    }

    /// Longitude extent
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude extent
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coords_envelope() {
        let coords = [
            Coord::new(4.84, 45.77),
            Coord::new(4.83, 45.78),
            Coord::new(4.835, 45.765),
        ];
        let b = Bounds::from_coords(&coords).unwrap();
        assert_eq!(b, Bounds::new(4.83, 45.765, 4.84, 45.78));
    }

    #[test]
    fn test_from_coords_single_vertex() {
        let b = Bounds::from_coords(&[Coord::new(5.1, 45.1)]).unwrap();
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 0.0);
        assert!(b.contains(Coord::new(5.1, 45.1)));
    }

    #[test]
    fn test_from_coords_empty() {
        assert!(Bounds::from_coords(&[]).is_none());
    }

    #[test]
    fn test_expanded_scales_longitude() {
        let b = Bounds::new(0.0, 0.0, 1.0, 1.0).expanded(0.1, 1.5);
        assert!((b.min_lon + 0.15).abs() < 1e-12);
        assert!((b.max_lon - 1.15).abs() < 1e-12);
        assert!((b.min_lat + 0.1).abs() < 1e-12);
        assert!((b.max_lat - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_contains_boundary_inclusive() {
        let b = Bounds::new(0.0, 0.0, 1.0, 1.0);
        assert!(b.contains(Coord::new(0.0, 0.0)));
        assert!(b.contains(Coord::new(1.0, 1.0)));
        assert!(!b.contains(Coord::new(1.0001, 0.5)));
    }

    #[test]
    fn test_intersects() {
        let a = Bounds::new(0.0, 0.0, 1.0, 1.0);
        assert!(a.intersects(&Bounds::new(1.0, 1.0, 2.0, 2.0)));
        assert!(!a.intersects(&Bounds::new(1.5, 0.0, 2.0, 1.0)));
    }

    #[test]
    fn test_center() {
        let c = Bounds::new(4.83, 45.76, 4.85, 45.78).center();
        assert!((c.lon - 4.84).abs() < 1e-12);
        assert!((c.lat - 45.77).abs() < 1e-12);
    }
}
