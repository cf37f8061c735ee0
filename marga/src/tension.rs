//! Tension-zone detection.
//!
//! A tension zone is a low-score feature close to at least one high-volume
//! counter. "Close" means the candidate box test only: any high-volume
//! counter inside a feature's widened search window is enough, with no
//! exact distance check.

use std::collections::BTreeSet;

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{LinearFeature, Point};
use crate::index::GeometryIndex;

/// Counters with a measurement strictly above `threshold`.
pub fn select_high_volume(points: &[Point], threshold: f64) -> Vec<Point> {
    points
        .iter()
        .filter(|p| p.measurement > threshold)
        .cloned()
        .collect()
}

/// Features with a score strictly below `threshold`.
pub fn select_low_score(features: &[LinearFeature], threshold: f64) -> Vec<LinearFeature> {
    features
        .iter()
        .filter(|f| f.score < threshold)
        .cloned()
        .collect()
}

/// Finds low-score features within reach of high-volume counters.
#[derive(Clone, Debug)]
pub struct TensionDetector {
    radius_deg: f64,
}

impl TensionDetector {
    /// Create a detector with the given search radius.
    pub fn new(radius_deg: f64) -> Self {
        Self { radius_deg }
    }

    /// Ids of features in `low_score_index` that are candidates for at least
    /// one of `high_volume_points`.
    ///
    /// The result is a set: a feature reached from several counters appears
    /// once.
    pub fn detect(
        &self,
        high_volume_points: &[Point],
        low_score_index: &GeometryIndex,
    ) -> BTreeSet<String> {
        #[cfg(feature = "parallel")]
        let per_point: Vec<Vec<&str>> = high_volume_points
            .par_iter()
            .map(|p| low_score_index.query_candidates(p.lon, p.lat, self.radius_deg))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let per_point: Vec<Vec<&str>> = high_volume_points
            .iter()
            .map(|p| low_score_index.query_candidates(p.lon, p.lat, self.radius_deg))
            .collect();

        let zones: BTreeSet<String> = per_point
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();

        debug!(
            "[TensionDetector] {} counters, {} features, {} tension zones",
            high_volume_points.len(),
            low_score_index.len(),
            zones.len()
        );
        zones
    }
}
