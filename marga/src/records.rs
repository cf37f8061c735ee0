//! Validation of raw input records into core types.
//!
//! Ingestion collaborators hand over loosely typed rows. Each row missing a
//! required field is excluded from its collection and reported as a
//! [`RecordWarning`]; the rest of the batch goes through.
//!
//! | Record | Required fields |
//! |--------|-----------------|
//! | [`RawPoint`] | `id`, `lat`, `lon`, `measurement` |
//! | [`RawFeature`] | `id`, `category`, `score`, `vertices` or `parts` |
//!
//! Non-finite numbers count as missing. An empty vertex list is *not* a
//! missing field; it is an invalid geometry, rejected later by the index.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::core::{Coord, LinearFeature, Point};

/// Record identifier as found in the source (text or integer).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Counter row before validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default, alias = "avg_volume")]
    pub measurement: Option<f64>,
}

/// Infrastructure row before validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    /// Single-part line
    #[serde(default)]
    pub vertices: Option<Vec<Coord>>,
    /// Multi-part line, used when `vertices` is absent
    #[serde(default)]
    pub parts: Option<Vec<Vec<Coord>>>,
}

/// A record excluded for a missing field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordWarning {
    /// Record id, or `<row N>` when the id itself is missing
    pub record_id: String,
    /// Missing field
    pub field: &'static str,
}

impl RecordWarning {
    /// Equivalent error value
    pub fn to_error(&self) -> Error {
        Error::MissingField {
            record_id: self.record_id.clone(),
            field: self.field,
        }
    }
}

/// Validated records plus the warnings for excluded rows.
#[derive(Clone, Debug)]
pub struct Validated<T> {
    pub records: Vec<T>,
    pub warnings: Vec<RecordWarning>,
}

impl<T> Validated<T> {
    /// Number of excluded rows
    pub fn excluded(&self) -> usize {
        self.warnings.len()
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn has_finite_coords(coords: &[Coord]) -> bool {
    coords.iter().all(Coord::is_finite)
}

fn missing(record_id: String, field: &'static str) -> RecordWarning {
    let warning = RecordWarning { record_id, field };
    warn!("[records] Excluding record: {}", warning.to_error());
    warning
}

fn point_from_raw(row: usize, raw: RawPoint) -> Result<Point, RecordWarning> {
    let id = raw
        .id
        .map(RawId::into_string)
        .ok_or_else(|| missing(format!("<row {row}>"), "id"))?;
    let Some(lat) = finite(raw.lat) else {
        return Err(missing(id, "lat"));
    };
    let Some(lon) = finite(raw.lon) else {
        return Err(missing(id, "lon"));
    };
    let Some(measurement) = finite(raw.measurement) else {
        return Err(missing(id, "measurement"));
    };
    Ok(Point::new(id, lat, lon, measurement))
}

fn feature_from_raw(row: usize, raw: RawFeature) -> Result<LinearFeature, RecordWarning> {
    let id = raw
        .id
        .map(RawId::into_string)
        .ok_or_else(|| missing(format!("<row {row}>"), "id"))?;
    let Some(category) = raw.category else {
        return Err(missing(id, "category"));
    };
    let Some(score) = finite(raw.score) else {
        return Err(missing(id, "score"));
    };

    let feature = match (raw.vertices, raw.parts) {
        (Some(vertices), _) if has_finite_coords(&vertices) => {
            LinearFeature::new(id, category, score, vertices)
        }
        (None, Some(parts)) if parts.iter().all(|p| has_finite_coords(p)) => {
            LinearFeature::from_parts(id, category, score, parts)
        }
        _ => return Err(missing(id, "vertices")),
    };

    if !(0.0..=1.0).contains(&feature.score) {
        warn!(
            "[records] Feature {} has score {} outside [0, 1]",
            feature.id, feature.score
        );
    }
    Ok(feature)
}

fn validate<R, T>(
    rows: impl IntoIterator<Item = R>,
    convert: impl Fn(usize, R) -> Result<T, RecordWarning>,
) -> Validated<T> {
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    for (row, raw) in rows.into_iter().enumerate() {
        match convert(row, raw) {
            Ok(record) => records.push(record),
            Err(warning) => warnings.push(warning),
        }
    }
    Validated { records, warnings }
}

/// Convert counter rows, excluding those with missing fields.
pub fn validate_points(rows: impl IntoIterator<Item = RawPoint>) -> Validated<Point> {
    validate(rows, point_from_raw)
}

/// Convert infrastructure rows, excluding those with missing fields.
pub fn validate_features(rows: impl IntoIterator<Item = RawFeature>) -> Validated<LinearFeature> {
    validate(rows, feature_from_raw)
}
