use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use warren::{engine::SimulationEngine, scenario::ScenarioLoader};

#[derive(Debug, Parser)]
#[command(author, version, about = "Warren population simulator")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/meadow.yaml")]
    scenario: PathBuf,

    /// Override the number of simulated years (uses the scenario default when omitted)
    #[arg(long)]
    years: Option<u64>,

    /// Override the scenario's random seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let years = scenario.years(cli.years);

    let mut engine = SimulationEngine::new(scenario.settings(cli.seed))?;
    engine.run(years);

    println!(
        "Scenario '{}' completed after {} years. Final population: {}, resources: {:.1}",
        scenario.name,
        years,
        engine.population_size(),
        engine.environment().resource_availability()
    );
    Ok(())
}
