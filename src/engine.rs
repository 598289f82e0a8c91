//! The year loop: wires agents and environment together and owns the
//! population collection.

use rand::Rng;
use tracing::info;

use crate::agent::Agent;
use crate::environment::{Environment, EnvironmentEvent};
use crate::error::SimulationError;
use crate::rng::RngManager;

/// Agents at or past this age are removed from the population. Independent of
/// the in-agent death threshold: a deceased agent's age freezes where it
/// died, and the lingering body still counts toward resource pressure until
/// something pushes its age past this line.
pub const REMOVAL_AGE: u32 = 10;

/// Reproduction is suppressed while resources sit at or below this floor.
const REPRODUCTION_RESOURCE_FLOOR: f64 = 10.0;

/// Fitness a candidate must exceed under the natural-selection policy.
const FITNESS_THRESHOLD: f64 = 0.5;

/// Construction parameters for a simulation run.
#[derive(Clone, Debug)]
pub struct SimulationSettings {
    pub initial_agents: usize,
    pub carrying_capacity: u32,
    pub seed: u64,
}

/// The per-year observable facts: year index, the event that opened the year,
/// and the closing population and resource levels.
#[derive(Clone, Debug, PartialEq)]
pub struct YearReport {
    pub year: u64,
    pub event: Option<EnvironmentEvent>,
    pub population: usize,
    pub resource_level: f64,
}

#[derive(Debug)]
pub struct SimulationEngine {
    environment: Environment,
    agents: Vec<Agent>,
    rng: RngManager,
    years_elapsed: u64,
    last_event: Option<EnvironmentEvent>,
}

impl SimulationEngine {
    /// Build an engine, seeding the founder population at generation 0.
    ///
    /// Fails fast with [`SimulationError::InvalidConfiguration`] before any
    /// state is created when the settings are unusable.
    pub fn new(settings: SimulationSettings) -> Result<Self, SimulationError> {
        let mut environment = Environment::new(settings.carrying_capacity)?;
        let mut rng = RngManager::new(settings.seed);
        let mut agents = Vec::with_capacity(settings.initial_agents);
        {
            let mut founders = rng.stream("founders");
            for _ in 0..settings.initial_agents {
                agents.push(Agent::new(0, &mut founders));
                environment.increase_population();
            }
        }
        Ok(Self {
            environment,
            agents,
            rng,
            years_elapsed: 0,
            last_event: None,
        })
    }

    /// Run the simulation for `years`, logging each year's report.
    pub fn run(&mut self, years: u64) {
        self.run_with_hook(years, |report| {
            info!(
                year = report.year,
                population = report.population,
                resources = report.resource_level,
                "year complete"
            );
        });
    }

    /// Run the simulation for `years`, handing each year's report to `hook`.
    pub fn run_with_hook(&mut self, years: u64, mut hook: impl FnMut(&YearReport)) {
        for _ in 0..years {
            let report = self.step_year();
            hook(&report);
        }
    }

    /// Advance the simulation by one year.
    ///
    /// Phases run strictly in order: event, aging, reproduction, offspring
    /// merge, resource update, health adjustment, cull, report. Later phases
    /// depend on the exact population the earlier ones produced.
    pub fn step_year(&mut self) -> YearReport {
        let event = {
            let mut rng = self.rng.stream("event");
            self.environment.introduce_random_event(&mut rng)
        };
        info!(year = self.years_elapsed + 1, %event);
        self.last_event = Some(event);

        // Aging. Offspring are buffered until the merge below, so agents born
        // this year neither age nor breed before their first full year.
        for agent in &mut self.agents {
            agent.age_one_year();
            if agent.is_alive() {
                self.environment.increase_population();
            }
        }

        // Reproduction, gated by the resource floor sampled for the year.
        let mut newborns = Vec::new();
        if self.environment.resource_availability() > REPRODUCTION_RESOURCE_FLOOR {
            let mut rng = self.rng.stream("reproduction");
            for agent in &self.agents {
                if let Some(offspring) = agent.reproduce(&mut rng) {
                    newborns.push(offspring);
                }
            }
        }
        self.agents.append(&mut newborns);

        self.environment.update_resources(self.agents.len());
        self.environment.adjust_health(&mut self.agents);
        self.cull_aged();

        self.years_elapsed += 1;
        self.report()
    }

    /// Remove every agent at or past [`REMOVAL_AGE`].
    pub fn cull_aged(&mut self) {
        self.agents.retain(|agent| agent.age() < REMOVAL_AGE);
    }

    /// Alternative reproduction policy, not part of the year loop: agents
    /// whose fitness clears the threshold reproduce with probability equal to
    /// their fitness.
    pub fn natural_selection(&mut self) {
        let mut rng = self.rng.stream("selection");
        let mut newborns = Vec::new();
        for agent in &self.agents {
            let fitness = agent.fitness(&self.environment);
            if fitness > FITNESS_THRESHOLD && rng.gen::<f64>() < fitness {
                if let Some(offspring) = agent.reproduce(&mut rng) {
                    newborns.push(offspring);
                }
            }
        }
        self.agents.append(&mut newborns);
    }

    /// Observe the current state. Pure: repeated calls report identical facts
    /// and mutate nothing.
    pub fn report(&self) -> YearReport {
        YearReport {
            year: self.years_elapsed,
            event: self.last_event,
            population: self.agents.len(),
            resource_level: self.environment.resource_availability(),
        }
    }

    pub fn population_size(&self) -> usize {
        self.agents.len()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn years_elapsed(&self) -> u64 {
        self.years_elapsed
    }
}
