//! Main MargaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::index::IndexConfig;

use super::area::StudyAreaSection;
use super::error::ConfigLoadError;
use super::index::IndexSection;
use super::matching::{MatchingSection, ThresholdsSection};

/// Full Marga configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct MargaConfig {
    /// Search radius and window shape
    #[serde(default)]
    pub matching: MatchingSection,

    /// High-volume / low-score selection
    #[serde(default)]
    pub thresholds: ThresholdsSection,

    /// Geometry index settings
    #[serde(default)]
    pub index: IndexSection,

    /// Expected extent of the inputs
    #[serde(default)]
    pub study_area: StudyAreaSection,
}

impl MargaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the matching stages cannot work with.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let m = &self.matching;
        if !(m.radius_deg.is_finite() && m.radius_deg > 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "matching.radius_deg must be positive, got {}",
                m.radius_deg
            )));
        }
        // A scale below 1 would shrink the window under the radius and drop
        // true matches.
        if !(m.lon_scale.is_finite() && m.lon_scale >= 1.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "matching.lon_scale must be >= 1, got {}",
                m.lon_scale
            )));
        }
        if !(self.index.cell_size_deg.is_finite() && self.index.cell_size_deg > 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "index.cell_size_deg must be positive, got {}",
                self.index.cell_size_deg
            )));
        }
        let t = &self.thresholds;
        if !t.high_volume.is_finite() || !t.low_score.is_finite() {
            return Err(ConfigLoadError::Invalid(
                "thresholds must be finite".to_string(),
            ));
        }
        let a = &self.study_area;
        if a.min_lon > a.max_lon || a.min_lat > a.max_lat {
            return Err(ConfigLoadError::Invalid(
                "study_area min corner exceeds max corner".to_string(),
            ));
        }
        Ok(())
    }

    /// Convert to IndexConfig for GeometryIndex
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            backend: self.index.backend,
            cell_size_deg: self.index.cell_size_deg,
            lon_scale: self.matching.lon_scale,
        }
    }

    /// Matching radius in degrees
    pub fn radius_deg(&self) -> f64 {
        self.matching.radius_deg
    }
}
