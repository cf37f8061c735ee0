//! Core value types shared by every matching stage.
//!
//! All of these are immutable inputs or freshly derived outputs; no stage
//! mutates what it is given.

mod bounds;
mod coord;
mod feature;
mod point;
mod results;

pub use bounds::Bounds;
pub use coord::Coord;
pub use feature::LinearFeature;
pub use point::Point;
pub use results::{CategoryStats, MatchResult};
