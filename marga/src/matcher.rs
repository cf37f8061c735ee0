//! Nearest-feature matching for traffic counters.
//!
//! Two-pass search: the [`GeometryIndex`] supplies candidates whose boxes are
//! within reach, then each candidate is ranked by its nearest-vertex
//! distance to the counter.
//!
//! # Distance metric
//!
//! The distance from a point to a polyline is approximated by the distance
//! to its nearest *vertex*, not the perpendicular distance to its nearest
//! segment:
//!
//! ```text
//!              P
//!              ┆ true segment distance (not used)
//!   A──────────┴──────────B
//!   ↖ vertex distance PA is what counts
//! ```
//!
//! Long segments with sparse vertices therefore look farther away than they
//! are. Downstream thresholds are tuned against this metric.

use std::collections::HashMap;

use log::warn;

use crate::core::{Coord, LinearFeature, MatchResult, Point};
use crate::index::GeometryIndex;

/// Lookup from feature id to feature.
///
/// Built once per run over the same slice the index was built from.
pub struct FeatureTable<'a> {
    by_id: HashMap<&'a str, &'a LinearFeature>,
}

impl<'a> FeatureTable<'a> {
    /// Index `features` by id. On duplicate ids the first feature wins.
    pub fn new(features: &'a [LinearFeature]) -> Self {
        let mut by_id = HashMap::with_capacity(features.len());
        for feature in features {
            if by_id.contains_key(feature.id.as_str()) {
                warn!(
                    "[FeatureTable] Duplicate feature id {}, keeping first occurrence",
                    feature.id
                );
                continue;
            }
            by_id.insert(feature.id.as_str(), feature);
        }
        Self { by_id }
    }

    /// Feature by id
    #[inline]
    pub fn get(&self, id: &str) -> Option<&'a LinearFeature> {
        self.by_id.get(id).copied()
    }

    /// Number of distinct ids
    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Table holds no features.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Smallest planar distance from `coord` to any vertex.
///
/// Returns `None` for an empty vertex list.
pub fn min_vertex_distance(coord: Coord, vertices: &[Coord]) -> Option<f64> {
    vertices
        .iter()
        .map(|v| coord.distance_squared(v))
        .min_by(f64::total_cmp)
        .map(f64::sqrt)
}

/// Nearest feature to `point` within `max_radius_deg`.
///
/// Candidates come from `index`, geometry from `table`. On exactly equal
/// distances the feature earlier in the input sequence wins. Returns `None`
/// when there is no candidate or the nearest one is beyond the radius.
///
/// Pure function of its arguments; safe to call from many threads at once.
pub fn nearest(
    point: &Point,
    index: &GeometryIndex,
    table: &FeatureTable<'_>,
    max_radius_deg: f64,
) -> Option<MatchResult> {
    let coord = point.coord();
    let mut best: Option<(&str, f64)> = None;

    // Candidates arrive in input order, so strict `<` keeps the earliest on ties
    for candidate in index.candidates(coord, max_radius_deg) {
        let Some(feature) = table.get(candidate.id()) else {
            continue;
        };
        let Some(dist) = min_vertex_distance(coord, feature.vertices()) else {
            continue;
        };
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((candidate.id(), dist));
        }
    }

    let (feature_id, distance) = best?;
    if distance > max_radius_deg {
        return None;
    }

    Some(MatchResult {
        point_id: point.id.clone(),
        feature_id: feature_id.to_string(),
        distance,
    })
}

/// Nearest-feature matcher with its radius fixed at construction.
#[derive(Clone, Debug)]
pub struct ProximityMatcher {
    max_radius_deg: f64,
}

impl ProximityMatcher {
    /// Create a matcher accepting features within `max_radius_deg`.
    pub fn new(max_radius_deg: f64) -> Self {
        Self { max_radius_deg }
    }

    /// See [`nearest`].
    #[inline]
    pub fn nearest(
        &self,
        point: &Point,
        index: &GeometryIndex,
        table: &FeatureTable<'_>,
    ) -> Option<MatchResult> {
        nearest(point, index, table, self.max_radius_deg)
    }

    /// Configured radius
    #[inline]
    pub fn max_radius_deg(&self) -> f64 {
        self.max_radius_deg
    }
}
