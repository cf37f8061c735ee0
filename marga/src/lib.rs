//! # Marga: Spatial Linking of Counters to Road Infrastructure
//!
//! Joins point measurements (bicycle counters with an average daily volume)
//! to nearby linear features (road or track segments with a category and a
//! quality score), then derives two products:
//!
//! - **Tension zones**: low-score features lying near high-volume counters
//! - **Category statistics**: mean score and mean linked volume per category
//!
//! ## Quick Start
//!
//! ```rust
//! use marga::{MargaConfig, Pipeline};
//! use marga::core::{Coord, LinearFeature, Point};
//!
//! let features = vec![LinearFeature::new(
//!     "B",
//!     "lane",
//!     0.2,
//!     vec![Coord::new(4.8348, 45.7712), Coord::new(4.8352, 45.7712)],
//! )];
//! let points = vec![Point::new("P1", 45.771, 4.835, 150.0)];
//!
//! let report = Pipeline::new(MargaConfig::default()).run(&points, &features);
//! assert!(report.tension_zones.contains("B"));
//! assert_eq!(report.links[0].feature_id, "B");
//! ```
//!
//! ## Coordinates
//!
//! Longitude and latitude in decimal degrees (WGS84). Distances and radii
//! are planar Euclidean in degree space; no projection is applied.
//!
//! ## Architecture
//!
//! - [`core`]: Value types (Coord, Bounds, Point, LinearFeature, results)
//! - [`config`]: YAML configuration with defaults
//! - [`records`]: Validation of raw input rows
//! - [`index`]: Bounding-box candidate lookup (linear, grid, R-tree)
//! - [`matcher`]: Exact nearest-feature search over candidates
//! - [`tension`]: Threshold selection and tension zone detection
//! - [`linker`]: Counter-to-feature volume links
//! - [`aggregate`]: Per-category statistics
//! - [`pipeline`]: End-to-end orchestration
//! - [`harness`]: YAML scenarios with expectations
//!
//! ## Parallelism
//!
//! With the default `parallel` feature, the per-counter loops run on the
//! rayon thread pool. Output is identical either way.

pub mod aggregate;
pub mod config;
pub mod core;
pub mod error;
pub mod harness;
pub mod index;
pub mod linker;
pub mod matcher;
pub mod pipeline;
pub mod records;
pub mod tension;

// Re-export main types at crate root
pub use config::{ConfigLoadError, IndexBackend, MargaConfig};
pub use error::{Error, Result};
pub use index::{GeometryIndex, IndexConfig};
pub use pipeline::{Pipeline, PipelineReport};

// Re-export stage types
pub use aggregate::CategoryAggregator;
pub use linker::VolumeLinker;
pub use matcher::{FeatureTable, ProximityMatcher, nearest};
pub use tension::TensionDetector;
