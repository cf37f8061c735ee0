//! Shared fixtures for integration tests.

#![allow(dead_code)]

use marga::core::{Coord, LinearFeature, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default matching radius (~50 m)
pub const RADIUS: f64 = 0.0005;

/// Build a feature from `(lon, lat)` pairs.
pub fn feature(id: &str, category: &str, score: f64, coords: &[(f64, f64)]) -> LinearFeature {
    LinearFeature::new(
        id,
        category,
        score,
        coords
            .iter()
            .map(|&(lon, lat)| Coord::new(lon, lat))
            .collect(),
    )
}

/// Three features around Lyon: a good track, a poor lane and a far track.
pub fn lyon_features() -> Vec<LinearFeature> {
    vec![
        feature("A", "track", 0.9, &[(4.83, 45.77), (4.84, 45.77)]),
        feature("B", "lane", 0.2, &[(4.8348, 45.7712), (4.8352, 45.7712)]),
        feature("C", "track", 0.3, &[(5.1, 45.77), (5.101, 45.77)]),
    ]
}

/// One busy counter beside B, one quiet counter far from everything.
pub fn lyon_points() -> Vec<Point> {
    vec![
        Point::new("P1", 45.771, 4.835, 150.0),
        Point::new("P2", 45.1, 5.1, 10.0),
    ]
}

/// Random short polylines inside a small box around Lyon.
pub fn random_features(rng: &mut StdRng, count: usize) -> Vec<LinearFeature> {
    let categories = ["track", "lane", "shared", "path"];
    (0..count)
        .map(|i| {
            let n = rng.random_range(1..=5);
            let mut lon = rng.random_range(4.80..4.86);
            let mut lat = rng.random_range(45.74..45.78);
            let mut coords = Vec::with_capacity(n);
            for _ in 0..n {
                coords.push(Coord::new(lon, lat));
                lon += rng.random_range(-0.002..0.002);
                lat += rng.random_range(-0.002..0.002);
            }
            let category = categories[rng.random_range(0..categories.len())];
            // Coarse scores so equal averages between categories do occur
            let score = f64::from(rng.random_range(0..=10_u8)) / 10.0;
            LinearFeature::new(format!("F{i}"), category, score, coords)
        })
        .collect()
}

/// Random counters over the same box as [`random_features`].
pub fn random_points(rng: &mut StdRng, count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            Point::new(
                format!("P{i}"),
                rng.random_range(45.74..45.78),
                rng.random_range(4.80..4.86),
                rng.random_range(0.0..300.0),
            )
        })
        .collect()
}

/// Seeded generator for reproducible runs.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
