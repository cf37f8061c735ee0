//! Proximity matching and threshold settings.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Search radius and window shape
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchingSection {
    /// Maximum counter-to-feature distance in degrees
    #[serde(default = "defaults::radius_deg")]
    pub radius_deg: f64,

    /// Multiplier applied to the radius on the longitude axis of the
    /// candidate window
    #[serde(default = "defaults::lon_scale")]
    pub lon_scale: f64,
}

impl Default for MatchingSection {
    fn default() -> Self {
        Self {
            radius_deg: defaults::radius_deg(),
            lon_scale: defaults::lon_scale(),
        }
    }
}

/// Selection thresholds for tension-zone detection
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThresholdsSection {
    /// Counters with a measurement strictly above this are high volume
    #[serde(default = "defaults::high_volume")]
    pub high_volume: f64,

    /// Features with a score strictly below this are low score
    #[serde(default = "defaults::low_score")]
    pub low_score: f64,
}

impl Default for ThresholdsSection {
    fn default() -> Self {
        Self {
            high_volume: defaults::high_volume(),
            low_score: defaults::low_score(),
        }
    }
}
