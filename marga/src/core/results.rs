//! Derived records produced by matching and aggregation.

use serde::{Deserialize, Serialize};

/// Outcome of a proximity query: a counter linked to one feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Counter identifier
    pub point_id: String,
    /// Matched feature identifier
    pub feature_id: String,
    /// Planar nearest-vertex distance in degrees
    pub distance: f64,
}

/// Score and volume summary for one infrastructure category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Category label
    pub category: String,
    /// Mean score over every feature of the category
    pub avg_score: f64,
    /// Mean measurement over links into the category, 0 when there are none
    pub avg_volume: f64,
    /// Number of features with this category
    pub feature_count: usize,
    /// Number of links into features of this category
    pub link_count: usize,
}
