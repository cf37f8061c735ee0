//! End-to-end run: selection, indexing, tension zones, links and statistics.
//!
//! ```text
//!   counters ──┬── measurement > high_volume ──┐
//!              │                               ▼
//!              │        low-score index ──► TensionDetector ──► tension ids
//!              │              ▲
//!   features ──┼── score < low_score
//!              │
//!              └──────► full index ──► VolumeLinker ──► links
//!                                                        │
//!                          features + links ──► CategoryAggregator ──► stats
//! ```
//!
//! A run reads its inputs only and returns fresh collections, so running it
//! twice on the same inputs yields identical reports.

use std::collections::BTreeSet;

use log::{info, warn};

use crate::aggregate::{CategoryAggregator, points_by_id};
use crate::config::MargaConfig;
use crate::core::{Bounds, CategoryStats, LinearFeature, MatchResult, Point};
use crate::index::GeometryIndex;
use crate::linker::VolumeLinker;
use crate::matcher::FeatureTable;
use crate::tension::{TensionDetector, select_high_volume, select_low_score};

/// Everything a run produces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipelineReport {
    /// Low-score features near high-volume counters
    pub tension_zones: BTreeSet<String>,
    /// Counter-to-nearest-feature links, in counter order
    pub links: Vec<MatchResult>,
    /// Per-category statistics, ordered by score
    pub stats: Vec<CategoryStats>,
    /// Features skipped for having no vertices
    pub rejected_features: Vec<String>,
    /// Counters given to the run
    pub counters_total: usize,
    /// Counters classified as high volume
    pub counters_high_volume: usize,
    /// Features classified as low score
    pub features_low_score: usize,
    /// Features whose centroid lies outside the study area
    pub features_out_of_area: Vec<String>,
    /// Counters located outside the study area
    pub counters_out_of_area: Vec<String>,
}

impl PipelineReport {
    /// Counters that received a link
    pub fn counters_assigned(&self) -> usize {
        self.links.len()
    }
}

/// Configured pipeline; cheap to construct, reusable across runs.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: MargaConfig,
}

impl Pipeline {
    /// Create a pipeline from a configuration.
    pub fn new(config: MargaConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &MargaConfig {
        &self.config
    }

    /// Run every stage over `points` and `features`.
    pub fn run(&self, points: &[Point], features: &[LinearFeature]) -> PipelineReport {
        let radius = self.config.radius_deg();
        let index_config = self.config.index_config();
        let thresholds = &self.config.thresholds;

        let area = self.config.study_area.bounds();
        let features_out_of_area = features_outside(features, &area);
        let counters_out_of_area = counters_outside(points, &area);

        // Tension zones
        let high_volume = select_high_volume(points, thresholds.high_volume);
        let low_score = select_low_score(features, thresholds.low_score);
        let low_score_index = GeometryIndex::build(&low_score, &index_config);
        let tension_zones = TensionDetector::new(radius).detect(&high_volume, &low_score_index);
        info!("Found {} tension zones", tension_zones.len());

        // Volume links
        let index = GeometryIndex::build(features, &index_config);
        let table = FeatureTable::new(features);
        let links = VolumeLinker::new(radius).link(points, &index, &table);
        info!(
            "Assigned volume from {}/{} counters to features",
            links.len(),
            points.len()
        );

        // Statistics
        let stats = CategoryAggregator::new().aggregate(features, &links, &points_by_id(points));

        PipelineReport {
            tension_zones,
            links,
            stats,
            rejected_features: index.rejected().to_vec(),
            counters_total: points.len(),
            counters_high_volume: high_volume.len(),
            features_low_score: low_score.len(),
            features_out_of_area,
            counters_out_of_area,
        }
    }
}

fn features_outside(features: &[LinearFeature], area: &Bounds) -> Vec<String> {
    let outside: Vec<String> = features
        .iter()
        .filter(|f| f.centroid().is_some_and(|c| !area.contains(c)))
        .map(|f| f.id.clone())
        .collect();
    if !outside.is_empty() {
        warn!("{} feature centroids outside the study area", outside.len());
    }
    outside
}

fn counters_outside(points: &[Point], area: &Bounds) -> Vec<String> {
    let outside: Vec<String> = points
        .iter()
        .filter(|p| !area.contains(p.coord()))
        .map(|p| p.id.clone())
        .collect();
    if !outside.is_empty() {
        warn!("{} counters outside the study area", outside.len());
    }
    outside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coord;

    fn feature(id: &str, category: &str, score: f64, coords: &[(f64, f64)]) -> LinearFeature {
        LinearFeature::new(
            id,
            category,
            score,
            coords.iter().map(|&(lon, lat)| Coord::new(lon, lat)).collect(),
        )
    }

    #[test]
    fn test_run_counts() {
        let features = vec![
            feature("A", "track", 0.9, &[(4.83, 45.77), (4.84, 45.77)]),
            feature("B", "lane", 0.2, &[(4.8348, 45.7712), (4.8352, 45.7712)]),
            feature("EMPTY", "lane", 0.1, &[]),
        ];
        let points = vec![
            Point::new("P1", 45.771, 4.835, 150.0),
            Point::new("P2", 45.1, 5.1, 10.0),
        ];

        let report = Pipeline::new(MargaConfig::default()).run(&points, &features);
        assert_eq!(report.counters_total, 2);
        assert_eq!(report.counters_high_volume, 1);
        assert_eq!(report.features_low_score, 2);
        assert_eq!(report.counters_assigned(), 1);
        assert_eq!(report.rejected_features, vec!["EMPTY".to_string()]);
    }

    #[test]
    fn test_study_area_flags_but_keeps() {
        let features = vec![feature("PARIS", "lane", 0.9, &[(2.35, 48.85)])];
        let points = vec![Point::new("PX", 48.85, 2.3501, 200.0)];

        let report = Pipeline::new(MargaConfig::default()).run(&points, &features);
        assert_eq!(report.features_out_of_area, vec!["PARIS".to_string()]);
        assert_eq!(report.counters_out_of_area, vec!["PX".to_string()]);
        assert_eq!(report.counters_assigned(), 1);
    }

    #[test]
    fn test_thresholds_from_config() {
        let features = vec![feature("B", "lane", 0.6, &[(4.835, 45.771)])];
        let points = vec![Point::new("P", 45.771, 4.835, 80.0)];

        let default_report = Pipeline::new(MargaConfig::default()).run(&points, &features);
        assert!(default_report.tension_zones.is_empty());

        let mut config = MargaConfig::default();
        config.thresholds.high_volume = 50.0;
        config.thresholds.low_score = 0.7;
        let report = Pipeline::new(config).run(&points, &features);
        assert!(report.tension_zones.contains("B"));
    }

    #[test]
    fn test_empty_run() {
        let report = Pipeline::new(MargaConfig::default()).run(&[], &[]);
        assert_eq!(report, PipelineReport::default());
    }
}
