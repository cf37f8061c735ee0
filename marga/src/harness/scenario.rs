//! YAML scenario files: inline records, optional config, expectations.
//!
//! ```yaml
//! name: "lyon_sample"
//! config:
//!   matching: {radius_deg: 0.0005}
//! points:
//!   - {id: "P1", lat: 45.771, lon: 4.835, measurement: 150}
//! features:
//!   - {id: "B", category: "lane", score: 0.2, vertices: [[4.8348, 45.7712]]}
//! expect:
//!   tension_zones: ["B"]
//!   links: [{point: "P1", feature: "B"}]
//!   unlinked: []
//!   category_order: ["lane"]
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::config::MargaConfig;
use crate::pipeline::{Pipeline, PipelineReport};
use crate::records::{RawFeature, RawPoint, RecordWarning, validate_features, validate_points};
use crate::{Error, Result};

/// Expected link between a counter and a feature.
#[derive(Clone, Debug, Deserialize)]
pub struct ExpectedLink {
    pub point: String,
    pub feature: String,
}

/// Assertions checked after a run. Absent fields are not checked.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Expectations {
    /// Exact tension zone set
    #[serde(default)]
    pub tension_zones: Option<Vec<String>>,
    /// Links that must be present
    #[serde(default)]
    pub links: Vec<ExpectedLink>,
    /// Counters that must have no link
    #[serde(default)]
    pub unlinked: Vec<String>,
    /// Exact category order of the statistics
    #[serde(default)]
    pub category_order: Option<Vec<String>>,
}

/// Top-level scenario loaded from YAML.
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    /// Scenario name
    pub name: String,
    /// Configuration (defaults when absent)
    #[serde(default)]
    pub config: MargaConfig,
    #[serde(default)]
    pub points: Vec<RawPoint>,
    #[serde(default)]
    pub features: Vec<RawFeature>,
    #[serde(default)]
    pub expect: Expectations,
}

/// Result of running a scenario.
#[derive(Clone, Debug)]
pub struct ScenarioOutcome {
    pub report: PipelineReport,
    pub point_warnings: Vec<RecordWarning>,
    pub feature_warnings: Vec<RecordWarning>,
}

impl Scenario {
    /// Load a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse from YAML string; the embedded config is validated
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let scenario: Self =
            serde_yaml::from_str(yaml).map_err(|e| Error::Scenario(e.to_string()))?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    /// Replace the embedded configuration.
    pub fn with_config(mut self, config: MargaConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the records and run the pipeline.
    pub fn run(&self) -> ScenarioOutcome {
        let points = validate_points(self.points.iter().cloned());
        let features = validate_features(self.features.iter().cloned());
        let report = Pipeline::new(self.config.clone()).run(&points.records, &features.records);

        ScenarioOutcome {
            report,
            point_warnings: points.warnings,
            feature_warnings: features.warnings,
        }
    }

    /// Human-readable descriptions of unmet expectations (empty on success).
    pub fn check(&self, outcome: &ScenarioOutcome) -> Vec<String> {
        let report = &outcome.report;
        let expect = &self.expect;
        let mut failures = Vec::new();

        if let Some(expected) = &expect.tension_zones {
            let expected: BTreeSet<String> = expected.iter().cloned().collect();
            if expected != report.tension_zones {
                failures.push(format!(
                    "tension zones: expected {:?}, got {:?}",
                    expected, report.tension_zones
                ));
            }
        }

        for link in &expect.links {
            let found = report
                .links
                .iter()
                .any(|m| m.point_id == link.point && m.feature_id == link.feature);
            if !found {
                failures.push(format!("missing link {} -> {}", link.point, link.feature));
            }
        }

        for point in &expect.unlinked {
            if let Some(m) = report.links.iter().find(|m| &m.point_id == point) {
                failures.push(format!(
                    "counter {} should be unlinked, got {}",
                    point, m.feature_id
                ));
            }
        }

        if let Some(expected) = &expect.category_order {
            let got: Vec<&str> = report.stats.iter().map(|s| s.category.as_str()).collect();
            if got != expected.iter().map(String::as_str).collect::<Vec<_>>() {
                failures.push(format!("category order: expected {expected:?}, got {got:?}"));
            }
        }

        failures
    }
}
