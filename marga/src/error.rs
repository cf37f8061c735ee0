//! Error types for Marga

use crate::config::ConfigLoadError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Marga error types
///
/// None of these abort a run on their own: invalid geometries and malformed
/// records are skipped and reported, and "no nearby feature" is an ordinary
/// `None`, not an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Feature has no vertices and cannot be indexed
    #[error("Invalid geometry: feature {feature_id} has no vertices")]
    InvalidGeometry {
        /// Offending feature
        feature_id: String,
    },

    /// Input record lacks a required field
    #[error("Missing field '{field}' in record {record_id}")]
    MissingField {
        /// Offending record (or `<row N>` when the id itself is missing)
        record_id: String,
        /// Name of the missing field
        field: &'static str,
    },

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    /// Scenario file could not be parsed
    #[error("Scenario error: {0}")]
    Scenario(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
