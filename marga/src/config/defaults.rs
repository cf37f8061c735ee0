//! Default value functions for serde deserialization.

/// Roughly 50 m at the latitude of Lyon.
pub fn radius_deg() -> f64 {
    0.0005
}

/// Longitude degrees are shorter than latitude degrees around 45°N.
pub fn lon_scale() -> f64 {
    1.5
}

pub fn high_volume() -> f64 {
    100.0
}

pub fn low_score() -> f64 {
    0.5
}

pub fn cell_size_deg() -> f64 {
    0.001
}

pub fn area_min_lon() -> f64 {
    4.5
}

pub fn area_min_lat() -> f64 {
    45.5
}

pub fn area_max_lon() -> f64 {
    5.2
}

pub fn area_max_lat() -> f64 {
    46.0
}
