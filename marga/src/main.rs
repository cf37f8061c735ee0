//! Marga command-line runner
//!
//! Loads a configuration and a YAML scenario, runs the pipeline and prints
//! the tension zones, link summary and per-category table.
//!
//! ```bash
//! marga --scenario scenarios/lyon_sample.yaml
//! marga --config configs/config.yaml --scenario my_city.yaml --verbose
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use marga::MargaConfig;
use marga::harness::{Scenario, ScenarioOutcome};

/// Link counters to infrastructure and report tension zones
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "configs/config.yaml")]
    config: PathBuf,

    /// Scenario file to run
    #[arg(short, long)]
    scenario: PathBuf,

    /// Print every link instead of the summary only
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: &Path) -> MargaConfig {
    match MargaConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {}: {}, using defaults", path.display(), e);
            MargaConfig::default()
        }
    }
}

fn print_outcome(outcome: &ScenarioOutcome, verbose: bool) {
    let report = &outcome.report;

    println!("Tension zones ({}):", report.tension_zones.len());
    for id in &report.tension_zones {
        println!("  {id}");
    }

    println!(
        "Links: {}/{} counters assigned",
        report.counters_assigned(),
        report.counters_total
    );
    if verbose {
        for link in &report.links {
            println!(
                "  {:<12} -> {:<12} {:.6}",
                link.point_id, link.feature_id, link.distance
            );
        }
    }

    println!();
    println!(
        "{:<20} {:>9} {:>10} {:>8} {:>6}",
        "category", "avg_score", "avg_volume", "features", "links"
    );
    for s in &report.stats {
        println!(
            "{:<20} {:>9.3} {:>10.1} {:>8} {:>6}",
            s.category, s.avg_score, s.avg_volume, s.feature_count, s.link_count
        );
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();

    let scenario = match Scenario::load(&args.scenario) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load scenario {}: {}", args.scenario.display(), e);
            return ExitCode::FAILURE;
        }
    };

    // A config file on disk overrides the scenario's embedded settings
    let scenario = if args.config.exists() {
        scenario.with_config(load_config(&args.config))
    } else {
        info!(
            "Config {} not found, using scenario settings",
            args.config.display()
        );
        scenario
    };

    info!("marga starting");
    info!("  Scenario: {}", scenario.name);
    info!("  Backend: {:?}", scenario.config.index.backend);
    info!("  Radius: {}°", scenario.config.radius_deg());

    let outcome = scenario.run();
    let excluded = outcome.point_warnings.len() + outcome.feature_warnings.len();
    if excluded > 0 {
        warn!("{} records excluded during validation", excluded);
    }

    print_outcome(&outcome, args.verbose);

    let failures = scenario.check(&outcome);
    if failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        for f in &failures {
            error!("Expectation failed: {}", f);
        }
        ExitCode::FAILURE
    }
}
