//! Assignment of counter volumes to their nearest feature.

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{MatchResult, Point};
use crate::index::GeometryIndex;
use crate::matcher::{FeatureTable, ProximityMatcher};

/// Links each counter to at most one feature.
///
/// Counters without a feature within the radius are dropped from the
/// result: sparse infrastructure around a counter is expected, not an error.
/// A feature may receive any number of links.
#[derive(Clone, Debug)]
pub struct VolumeLinker {
    matcher: ProximityMatcher,
}

impl VolumeLinker {
    /// Create a linker accepting features within `radius_deg`.
    pub fn new(radius_deg: f64) -> Self {
        Self {
            matcher: ProximityMatcher::new(radius_deg),
        }
    }

    /// One [`MatchResult`] per linked counter, in counter order.
    pub fn link(
        &self,
        points: &[Point],
        index: &GeometryIndex,
        table: &FeatureTable<'_>,
    ) -> Vec<MatchResult> {
        #[cfg(feature = "parallel")]
        let links: Vec<MatchResult> = points
            .par_iter()
            .filter_map(|p| self.matcher.nearest(p, index, table))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let links: Vec<MatchResult> = points
            .iter()
            .filter_map(|p| self.matcher.nearest(p, index, table))
            .collect();

        debug!(
            "[VolumeLinker] Linked {}/{} counters",
            links.len(),
            points.len()
        );
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coord, LinearFeature};
    use crate::index::IndexConfig;

    fn feature(id: &str, coords: &[(f64, f64)]) -> LinearFeature {
        LinearFeature::new(
            id,
            "lane",
            0.5,
            coords.iter().map(|&(lon, lat)| Coord::new(lon, lat)).collect(),
        )
    }

    #[test]
    fn test_link_drops_unmatched_and_keeps_order() {
        let features = vec![feature("F1", &[(0.0, 0.0)]), feature("F2", &[(1.0, 1.0)])];
        let index = GeometryIndex::build(&features, &IndexConfig::default());
        let table = FeatureTable::new(&features);

        let points = vec![
            Point::new("NEAR_F2", 1.0001, 1.0, 20.0),
            Point::new("NOWHERE", 10.0, 10.0, 20.0),
            Point::new("NEAR_F1", 0.0, 0.0002, 30.0),
        ];

        let links = VolumeLinker::new(0.0005).link(&points, &index, &table);
        let pairs: Vec<(&str, &str)> = links
            .iter()
            .map(|m| (m.point_id.as_str(), m.feature_id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("NEAR_F2", "F2"), ("NEAR_F1", "F1")]);
        assert!(links.iter().all(|m| m.distance <= 0.0005));
    }

    #[test]
    fn test_feature_can_receive_many_links() {
        let features = vec![feature("HUB", &[(0.0, 0.0)])];
        let index = GeometryIndex::build(&features, &IndexConfig::default());
        let table = FeatureTable::new(&features);
        let points: Vec<Point> = (0..5)
            .map(|i| Point::new(format!("P{i}"), 0.0, i as f64 * 0.0001, 10.0))
            .collect();

        let links = VolumeLinker::new(0.0005).link(&points, &index, &table);
        assert_eq!(links.len(), 5);
        assert!(links.iter().all(|m| m.feature_id == "HUB"));
    }

    #[test]
    fn test_link_empty() {
        let index = GeometryIndex::build(&[], &IndexConfig::default());
        let table = FeatureTable::new(&[]);
        let linker = VolumeLinker::new(0.0005);
        assert!(linker.link(&[], &index, &table).is_empty());
        assert!(
            linker
                .link(&[Point::new("P", 0.0, 0.0, 1.0)], &index, &table)
                .is_empty()
        );
    }
}
