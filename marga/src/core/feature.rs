//! Linear infrastructure features (cycle lanes, tracks, shared roads).
//!
//! A [`LinearFeature`] is a polyline with a category label and a quality
//! score. Its [`Bounds`] are derived from the vertices and recomputed on
//! every vertex change, so the stored envelope can never drift from the
//! geometry.

use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::coord::Coord;

/// Serialized form of a feature; bounds are never read from input.
#[derive(Deserialize)]
struct FeatureData {
    id: String,
    category: String,
    score: f64,
    vertices: Vec<Coord>,
}

impl From<FeatureData> for LinearFeature {
    fn from(data: FeatureData) -> Self {
        LinearFeature::new(data.id, data.category, data.score, data.vertices)
    }
}

/// Polyline infrastructure segment with category and score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "FeatureData")]
pub struct LinearFeature {
    /// Feature identifier
    pub id: String,
    /// Infrastructure type (e.g. "track", "lane")
    pub category: String,
    /// Quality/success score, nominally in `[0, 1]`
    pub score: f64,
    vertices: Vec<Coord>,
    bounds: Option<Bounds>,
}

impl LinearFeature {
    /// Create a feature from an ordered vertex list.
    ///
    /// An empty vertex list is accepted here; such features are rejected
    /// with [`Error::InvalidGeometry`](crate::Error::InvalidGeometry) when
    /// indexed.
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        score: f64,
        vertices: Vec<Coord>,
    ) -> Self {
        let bounds = Bounds::from_coords(&vertices);
        Self {
            id: id.into(),
            category: category.into(),
            score,
            vertices,
            bounds,
        }
    }

    /// Create a feature from a multi-part line.
    ///
    /// Parts are concatenated in order. The nearest-vertex distance metric
    /// does not depend on segment connectivity, so flattening loses nothing.
    pub fn from_parts(
        id: impl Into<String>,
        category: impl Into<String>,
        score: f64,
        parts: Vec<Vec<Coord>>,
    ) -> Self {
        let vertices = parts.into_iter().flatten().collect();
        Self::new(id, category, score, vertices)
    }

    /// Ordered vertices as `(lon, lat)` pairs.
    #[inline]
    pub fn vertices(&self) -> &[Coord] {
        &self.vertices
    }

    /// Replace the geometry, recomputing the bounds.
    pub fn set_vertices(&mut self, vertices: Vec<Coord>) {
        self.bounds = Bounds::from_coords(&vertices);
        self.vertices = vertices;
    }

    /// Envelope of the vertices, `None` when there are none.
    #[inline]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// At least one vertex.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty()
    }

    /// Vertex centroid (arithmetic mean of vertices).
    pub fn centroid(&self) -> Option<Coord> {
        if self.vertices.is_empty() {
            return None;
        }
        let n = self.vertices.len() as f64;
        let (sum_lon, sum_lat) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(lon, lat), c| (lon + c.lon, lat + c.lat));
        Some(Coord::new(sum_lon / n, sum_lat / n))
    }
}
