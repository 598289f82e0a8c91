//! Scenario files: the YAML surface that parameterizes a run.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::engine::{SimulationEngine, SimulationSettings};
use crate::error::SimulationError;

fn default_seed() -> u64 {
    42
}

const DEFAULT_YEARS: u64 = 20;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    pub initial_agents: usize,
    pub carrying_capacity: u32,
    #[serde(default)]
    pub years: Option<u64>,
}

impl Scenario {
    /// Build a validated engine from this scenario.
    pub fn build_engine(&self) -> Result<SimulationEngine, SimulationError> {
        SimulationEngine::new(self.settings(None))
    }

    /// Engine settings, with an optional seed override from the command line.
    pub fn settings(&self, seed_override: Option<u64>) -> SimulationSettings {
        SimulationSettings {
            initial_agents: self.initial_agents,
            carrying_capacity: self.carrying_capacity,
            seed: seed_override.unwrap_or(self.seed),
        }
    }

    /// Number of years to simulate (command-line override wins, then the
    /// scenario's own value, then the default).
    pub fn years(&self, override_years: Option<u64>) -> u64 {
        override_years.or(self.years).unwrap_or(DEFAULT_YEARS)
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}
