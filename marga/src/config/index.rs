//! Geometry index settings.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Candidate lookup structure used by the geometry index
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBackend {
    /// Test every bounding box
    Linear,
    /// Fixed-cell spatial hash
    Grid,
    /// R-tree over bounding boxes
    #[default]
    Rtree,
}

/// Index section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexSection {
    /// Backend selection
    #[serde(default)]
    pub backend: IndexBackend,

    /// Grid cell edge in degrees (grid backend only)
    #[serde(default = "defaults::cell_size_deg")]
    pub cell_size_deg: f64,
}

impl Default for IndexSection {
    fn default() -> Self {
        Self {
            backend: IndexBackend::default(),
            cell_size_deg: defaults::cell_size_deg(),
        }
    }
}
