//! Per-category score and volume statistics.
//!
//! - `avg_score`: mean score over *every* feature of the category, linked or not
//! - `avg_volume`: mean measurement over the links into the category's
//!   features, `0.0` when there are none
//!
//! A category without links and a category whose linked counters all read
//! zero both report `avg_volume = 0.0`. `link_count` tells them apart.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

use crate::core::{CategoryStats, LinearFeature, MatchResult, Point};

/// Lookup from counter id to counter; the first occurrence of an id wins.
pub fn points_by_id(points: &[Point]) -> HashMap<&str, &Point> {
    let mut by_id = HashMap::with_capacity(points.len());
    for p in points {
        by_id.entry(p.id.as_str()).or_insert(p);
    }
    by_id
}

#[derive(Default)]
struct Accumulator {
    score_sum: f64,
    feature_count: usize,
    volume_sum: f64,
    link_count: usize,
}

/// Single-pass reduction of features and links into [`CategoryStats`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CategoryAggregator;

impl CategoryAggregator {
    /// Create an aggregator
    pub fn new() -> Self {
        Self
    }

    /// One row per category present in `features`.
    ///
    /// Sorted by `avg_score` descending, then category name ascending. Empty
    /// inputs give an empty result. Links to unknown features or from
    /// unknown counters are skipped with a warning.
    pub fn aggregate(
        &self,
        features: &[LinearFeature],
        links: &[MatchResult],
        points_by_id: &HashMap<&str, &Point>,
    ) -> Vec<CategoryStats> {
        let mut by_category: BTreeMap<&str, Accumulator> = BTreeMap::new();
        let mut category_of: HashMap<&str, &str> = HashMap::with_capacity(features.len());

        for f in features {
            let acc = by_category.entry(f.category.as_str()).or_default();
            acc.score_sum += f.score;
            acc.feature_count += 1;
            category_of
                .entry(f.id.as_str())
                .or_insert(f.category.as_str());
        }

        for link in links {
            let Some(&category) = category_of.get(link.feature_id.as_str()) else {
                warn!(
                    "[CategoryAggregator] Link {} -> {} targets an unknown feature",
                    link.point_id, link.feature_id
                );
                continue;
            };
            let Some(point) = points_by_id.get(link.point_id.as_str()) else {
                warn!(
                    "[CategoryAggregator] Link {} -> {} comes from an unknown counter",
                    link.point_id, link.feature_id
                );
                continue;
            };
            if let Some(acc) = by_category.get_mut(category) {
                acc.volume_sum += point.measurement;
                acc.link_count += 1;
            }
        }

        let mut stats: Vec<CategoryStats> = by_category
            .into_iter()
            .map(|(category, acc)| CategoryStats {
                category: category.to_string(),
                avg_score: acc.score_sum / acc.feature_count as f64,
                avg_volume: if acc.link_count == 0 {
                    0.0
                } else {
                    acc.volume_sum / acc.link_count as f64
                },
                feature_count: acc.feature_count,
                link_count: acc.link_count,
            })
            .collect();

        stats.sort_by(|a, b| {
            b.avg_score
                .total_cmp(&a.avg_score)
                .then_with(|| a.category.cmp(&b.category))
        });

        debug!(
            "[CategoryAggregator] {} categories from {} features and {} links",
            stats.len(),
            features.len(),
            links.len()
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coord;
    use approx::assert_relative_eq;

    fn feature(id: &str, category: &str, score: f64) -> LinearFeature {
        LinearFeature::new(id, category, score, vec![Coord::new(0.0, 0.0)])
    }

    fn link(point_id: &str, feature_id: &str) -> MatchResult {
        MatchResult {
            point_id: point_id.to_string(),
            feature_id: feature_id.to_string(),
            distance: 0.0,
        }
    }

    #[test]
    fn test_avg_score_counts_every_feature() {
        let features = vec![
            feature("A", "track", 0.9),
            feature("B", "lane", 0.2),
            feature("C", "track", 0.3),
        ];
        let stats = CategoryAggregator::new().aggregate(&features, &[], &HashMap::new());

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category, "track");
        assert_relative_eq!(stats[0].avg_score, 0.6, epsilon = 1e-12);
        assert_eq!(stats[0].feature_count, 2);
        assert_eq!(stats[0].avg_volume, 0.0);
        assert_eq!(stats[1].category, "lane");
        assert_relative_eq!(stats[1].avg_score, 0.2);
    }

    #[test]
    fn test_avg_volume_over_links() {
        let features = vec![
            feature("A", "track", 0.9),
            feature("A2", "track", 0.7),
            feature("B", "lane", 0.2),
        ];
        let points = vec![
            Point::new("P1", 0.0, 0.0, 150.0),
            Point::new("P2", 0.0, 0.0, 50.0),
            Point::new("P3", 0.0, 0.0, 10.0),
        ];
        let links = vec![link("P1", "A"), link("P2", "A2"), link("P3", "B")];
        let stats = CategoryAggregator::new().aggregate(&features, &links, &points_by_id(&points));

        let track = stats.iter().find(|s| s.category == "track").unwrap();
        assert_relative_eq!(track.avg_volume, 100.0);
        assert_eq!(track.link_count, 2);
        let lane = stats.iter().find(|s| s.category == "lane").unwrap();
        assert_relative_eq!(lane.avg_volume, 10.0);
    }

    #[test]
    fn test_ties_sorted_by_name() {
        let features = vec![
            feature("1", "zeta", 0.5),
            feature("2", "alpha", 0.5),
            feature("3", "mid", 0.8),
        ];
        let stats = CategoryAggregator::new().aggregate(&features, &[], &HashMap::new());
        let order: Vec<&str> = stats.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(order, vec!["mid", "alpha", "zeta"]);
    }

    #[test]
    fn test_empty_inputs() {
        let stats = CategoryAggregator::new().aggregate(&[], &[], &HashMap::new());
        assert!(stats.is_empty());
    }

    #[test]
    fn test_unknown_references_are_skipped() {
        let features = vec![feature("A", "track", 0.9)];
        let points = vec![Point::new("P1", 0.0, 0.0, 40.0)];
        let links = vec![link("P1", "GONE"), link("GHOST", "A"), link("P1", "A")];
        let stats = CategoryAggregator::new().aggregate(&features, &links, &points_by_id(&points));

        assert_eq!(stats[0].link_count, 1);
        assert_relative_eq!(stats[0].avg_volume, 40.0);
    }

    #[test]
    fn test_zero_volume_link_is_counted() {
        let features = vec![feature("A", "track", 0.9)];
        let points = vec![Point::new("P0", 0.0, 0.0, 0.0)];
        let stats = CategoryAggregator::new().aggregate(
            &features,
            &[link("P0", "A")],
            &points_by_id(&points),
        );
        assert_eq!(stats[0].avg_volume, 0.0);
        assert_eq!(stats[0].link_count, 1);
    }
}
