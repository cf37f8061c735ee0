//! Unified configuration loading for Marga.
//!
//! Loads all configuration from a single YAML file with defaults for every
//! field, so an empty file (or no file) is a valid configuration.
//!
//! ## Example YAML
//!
//! ```yaml
//! matching:
//!   radius_deg: 0.0005   # ~50 m
//!   lon_scale: 1.5
//!
//! thresholds:
//!   high_volume: 100     # counters strictly above
//!   low_score: 0.5       # features strictly below
//!
//! index:
//!   backend: rtree       # linear | grid | rtree
//!   cell_size_deg: 0.001
//!
//! study_area:
//!   min_lon: 4.5
//!   min_lat: 45.5
//!   max_lon: 5.2
//!   max_lat: 46.0
//! ```
//!
//! Each stage receives its own section when it is constructed; nothing is
//! read from process-wide state.

mod area;
mod defaults;
mod error;
mod index;
mod marga;
mod matching;

// Re-export main types
pub use error::ConfigLoadError;
pub use marga::MargaConfig;

// Re-export section types
pub use area::StudyAreaSection;
pub use index::{IndexBackend, IndexSection};
pub use matching::{MatchingSection, ThresholdsSection};
