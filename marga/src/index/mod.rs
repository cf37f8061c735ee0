//! Queryable spatial index over linear features.
//!
//! [`GeometryIndex`] answers the cheap half of the two-pass proximity
//! filter: which features have a bounding box within reach of a point.
//! Exact distances are computed later, by the matcher, on the candidates
//! only.
//!
//! # Candidate rule
//!
//! A feature is a candidate for `(lon, lat, r)` when its bounding box,
//! expanded by `r × lon_scale` on longitude and `r` on latitude, contains
//! the point. Any vertex within distance `r` of the point lies within `r`
//! on both axes, so the rule never misses a feature whose nearest vertex is
//! within `r`. It may over-select.
//!
//! # Backends
//!
//! | Backend | Build | Query |
//! |---------|-------|-------|
//! | [`IndexBackend::Linear`] | O(m) | O(m) |
//! | [`IndexBackend::Grid`] | O(m × overlap) | O(k) |
//! | [`IndexBackend::Rtree`] | O(m log m) | O(log m + k) |
//!
//! All backends return the same candidates in input order; the grid and the
//! tree only narrow the set the exact box test runs over.
//!
//! # Example
//!
//! ```rust
//! use marga::core::{Coord, LinearFeature};
//! use marga::index::{GeometryIndex, IndexConfig};
//!
//! let features = vec![LinearFeature::new(
//!     "B",
//!     "lane",
//!     0.2,
//!     vec![Coord::new(4.8348, 45.7712), Coord::new(4.8352, 45.7712)],
//! )];
//! let index = GeometryIndex::build(&features, &IndexConfig::default());
//!
//! assert_eq!(index.query_candidates(4.835, 45.771, 0.0005), vec!["B"]);
//! ```

mod grid;
mod rtree;

use std::cell::RefCell;

use log::{debug, warn};

use crate::Error;
use crate::config::IndexBackend;
use crate::core::{Bounds, Coord, LinearFeature};

use grid::GridCells;
use rtree::BoundsTree;

/// Runtime settings for [`GeometryIndex::build`].
#[derive(Clone, Debug)]
pub struct IndexConfig {
    /// Candidate lookup structure
    pub backend: IndexBackend,
    /// Grid cell edge in degrees (grid backend only)
    pub cell_size_deg: f64,
    /// Longitude widening factor of the search window
    pub lon_scale: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend: IndexBackend::Rtree,
            cell_size_deg: 0.001,
            lon_scale: 1.5,
        }
    }
}

impl IndexConfig {
    /// Builder-style setter for the backend.
    pub fn with_backend(mut self, backend: IndexBackend) -> Self {
        self.backend = backend;
        self
    }
}

/// One indexed feature.
#[derive(Clone, Debug)]
pub struct IndexedFeature {
    id: String,
    position: usize,
    bounds: Bounds,
}

impl IndexedFeature {
    /// Feature identifier
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position of the feature in the sequence the index was built from
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Precomputed bounding box
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

enum Backend {
    Linear,
    Grid(GridCells),
    Rtree(BoundsTree),
}

/// Windows touching at most this many cells always use the grid.
const MIN_GRID_SCAN_CELLS: usize = 32;

thread_local! {
    static SCRATCH: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Immutable spatial index, safe to share across matching threads.
pub struct GeometryIndex {
    /// Valid features in input order
    entries: Vec<IndexedFeature>,
    backend: Backend,
    lon_scale: f64,
    /// Ids of features skipped for having no vertices
    rejected: Vec<String>,
}

impl GeometryIndex {
    /// Build an index over `features`.
    ///
    /// Features without vertices are skipped with a warning and listed in
    /// [`rejected`](Self::rejected); the rest of the batch is indexed.
    pub fn build(features: &[LinearFeature], config: &IndexConfig) -> Self {
        let mut entries = Vec::with_capacity(features.len());
        let mut rejected = Vec::new();

        for (position, feature) in features.iter().enumerate() {
            match feature_bounds(feature) {
                Ok(bounds) => entries.push(IndexedFeature {
                    id: feature.id.clone(),
                    position,
                    bounds,
                }),
                Err(e) => {
                    warn!("[GeometryIndex] Skipping feature: {e}");
                    rejected.push(feature.id.clone());
                }
            }
        }

        let all_bounds: Vec<Bounds> = entries.iter().map(|e| e.bounds).collect();
        let backend = match config.backend {
            IndexBackend::Linear => Backend::Linear,
            IndexBackend::Grid => {
                Backend::Grid(GridCells::build(&all_bounds, config.cell_size_deg))
            }
            IndexBackend::Rtree => Backend::Rtree(BoundsTree::build(&all_bounds)),
        };

        debug!(
            "[GeometryIndex] Built {:?} index: {} features, {} rejected",
            config.backend,
            entries.len(),
            rejected.len()
        );

        Self {
            entries,
            backend,
            lon_scale: config.lon_scale,
            rejected,
        }
    }

    /// Ids of features whose expanded box contains `(lon, lat)`, in input order.
    pub fn query_candidates(&self, lon: f64, lat: f64, radius_deg: f64) -> Vec<&str> {
        self.candidates(Coord::new(lon, lat), radius_deg)
            .into_iter()
            .map(|e| e.id())
            .collect()
    }

    /// Indexed features whose expanded box contains `coord`, in input order.
    ///
    /// A negative or non-finite radius yields no candidates.
    pub fn candidates(&self, coord: Coord, radius_deg: f64) -> Vec<&IndexedFeature> {
        if !radius_deg.is_finite()
            || radius_deg < 0.0
            || !coord.is_finite()
            || self.entries.is_empty()
        {
            return Vec::new();
        }

        let is_candidate = |e: &IndexedFeature| {
            e.bounds
                .expanded(radius_deg, self.lon_scale)
                .contains(coord)
        };

        let window = Bounds::new(coord.lon, coord.lat, coord.lon, coord.lat)
            .expanded(radius_deg, self.lon_scale);

        match &self.backend {
            Backend::Linear => self.entries.iter().filter(|&e| is_candidate(e)).collect(),
            Backend::Grid(cells) => SCRATCH.with(|scratch| {
                let mut buffer = scratch.borrow_mut();
                let scan_limit = self.entries.len().max(MIN_GRID_SCAN_CELLS);
                if cells.query_into(&window, scan_limit, &mut buffer) {
                    self.filter_slots(&buffer, is_candidate)
                } else {
                    self.entries.iter().filter(|&e| is_candidate(e)).collect()
                }
            }),
            Backend::Rtree(tree) => SCRATCH.with(|scratch| {
                let mut buffer = scratch.borrow_mut();
                tree.query_into(&window, &mut buffer);
                self.filter_slots(&buffer, is_candidate)
            }),
        }
    }

    fn filter_slots<'a>(
        &'a self,
        slots: &[usize],
        is_candidate: impl Fn(&IndexedFeature) -> bool,
    ) -> Vec<&'a IndexedFeature> {
        slots
            .iter()
            .map(|&i| &self.entries[i])
            .filter(|&e| is_candidate(e))
            .collect()
    }

    /// Number of indexed features
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No feature was indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of features rejected for invalid geometry
    #[inline]
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Number of rejected features
    #[inline]
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Indexed features in input order
    #[inline]
    pub fn entries(&self) -> &[IndexedFeature] {
        &self.entries
    }

    /// Longitude widening factor in use
    #[inline]
    pub fn lon_scale(&self) -> f64 {
        self.lon_scale
    }
}

fn feature_bounds(feature: &LinearFeature) -> crate::Result<Bounds> {
    feature.bounds().ok_or_else(|| Error::InvalidGeometry {
        feature_id: feature.id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKENDS: [IndexBackend; 3] = [
        IndexBackend::Linear,
        IndexBackend::Grid,
        IndexBackend::Rtree,
    ];

    fn feature(id: &str, coords: &[(f64, f64)]) -> LinearFeature {
        LinearFeature::new(
            id,
            "lane",
            0.2,
            coords.iter().map(|&(lon, lat)| Coord::new(lon, lat)).collect(),
        )
    }

    fn sample_features() -> Vec<LinearFeature> {
        vec![
            feature("A", &[(4.83, 45.77), (4.84, 45.77)]),
            feature("B", &[(4.8348, 45.7712), (4.8352, 45.7712)]),
            feature("C", &[(5.1, 45.77), (5.101, 45.771)]),
        ]
    }

    fn build(features: &[LinearFeature], backend: IndexBackend) -> GeometryIndex {
        GeometryIndex::build(features, &IndexConfig::default().with_backend(backend))
    }

    #[test]
    fn test_build_empty() {
        for backend in BACKENDS {
            let index = build(&[], backend);
            assert!(index.is_empty());
            assert!(index.query_candidates(4.83, 45.77, 0.0005).is_empty());
        }
    }

    #[test]
    fn test_stores_exact_bounds() {
        let features = sample_features();
        let index = build(&features, IndexBackend::Linear);
        for (entry, f) in index.entries().iter().zip(&features) {
            assert_eq!(Some(entry.bounds()), f.bounds());
            assert_eq!(entry.id(), f.id);
        }
    }

    #[test]
    fn test_rejects_empty_geometry_and_continues() {
        let features = vec![
            feature("A", &[(4.83, 45.77)]),
            feature("EMPTY", &[]),
            feature("B", &[(4.835, 45.771)]),
        ];
        for backend in BACKENDS {
            let index = build(&features, backend);
            assert_eq!(index.len(), 2);
            assert_eq!(index.rejected(), ["EMPTY".to_string()]);
            assert_eq!(index.rejected_count(), 1);
            assert_eq!(index.entries()[1].position(), 2);
        }
    }

    #[test]
    fn test_query_near_point() {
        for backend in BACKENDS {
            let index = build(&sample_features(), backend);
            assert_eq!(index.query_candidates(4.835, 45.771, 0.0005), vec!["B"]);
        }
    }

    #[test]
    fn test_query_far_point() {
        for backend in BACKENDS {
            let index = build(&sample_features(), backend);
            assert!(index.query_candidates(5.1, 45.1, 0.0005).is_empty());
        }
    }

    #[test]
    fn test_longitude_axis_is_widened() {
        // 0.0007° east of the box: outside r on lon, inside 1.5 × r
        let features = vec![feature("E", &[(0.0, 0.0)])];
        for backend in BACKENDS {
            let index = build(&features, backend);
            assert_eq!(index.query_candidates(0.0007, 0.0, 0.0005), vec!["E"]);
            assert!(index.query_candidates(0.0, 0.0007, 0.0005).is_empty());
        }
    }

    #[test]
    fn test_large_radius_returns_all_in_order() {
        for backend in BACKENDS {
            let index = build(&sample_features(), backend);
            assert_eq!(index.query_candidates(4.9, 45.5, 1.0), vec!["A", "B", "C"]);
        }
    }

    #[test]
    fn test_invalid_radius_returns_nothing() {
        let index = build(&sample_features(), IndexBackend::Linear);
        assert!(index.query_candidates(4.835, 45.771, -1.0).is_empty());
        assert!(index.query_candidates(4.835, 45.771, f64::NAN).is_empty());
        assert!(index.query_candidates(f64::NAN, 45.771, 0.0005).is_empty());
    }
}
