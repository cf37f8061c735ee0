//! Study area used to flag records outside the expected region.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::core::Bounds;

/// Expected geographic extent of the inputs (defaults to greater Lyon)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudyAreaSection {
    #[serde(default = "defaults::area_min_lon")]
    pub min_lon: f64,
    #[serde(default = "defaults::area_min_lat")]
    pub min_lat: f64,
    #[serde(default = "defaults::area_max_lon")]
    pub max_lon: f64,
    #[serde(default = "defaults::area_max_lat")]
    pub max_lat: f64,
}

impl StudyAreaSection {
    /// Area as a bounding box
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }
}

impl Default for StudyAreaSection {
    fn default() -> Self {
        Self {
            min_lon: defaults::area_min_lon(),
            min_lat: defaults::area_min_lat(),
            max_lon: defaults::area_max_lon(),
            max_lat: defaults::area_max_lat(),
        }
    }
}
