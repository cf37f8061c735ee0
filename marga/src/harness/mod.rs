//! Scenario harness for integration testing and the command-line runner
//!
//! A scenario bundles raw counter and infrastructure records with an
//! optional configuration and a set of expectations, all in one YAML file.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use marga::harness::Scenario;
//!
//! let scenario = Scenario::load(Path::new("scenarios/lyon_sample.yaml"))?;
//! let outcome = scenario.run();
//! for failure in scenario.check(&outcome) {
//!     eprintln!("FAIL: {failure}");
//! }
//! # Ok::<(), marga::Error>(())
//! ```

mod scenario;

pub use scenario::{ExpectedLink, Expectations, Scenario, ScenarioOutcome};
