//! Environmental conditions: carrying capacity, resource stock, and the
//! stochastic events that perturb them.

use std::fmt;

use rand::Rng;

use crate::agent::Agent;
use crate::error::SimulationError;

const INITIAL_RESOURCES: f64 = 100.0;
/// Resource loss per individual over capacity.
const OVERSHOOT_DRAIN: f64 = 0.5;
/// Resource gain per unit of spare capacity.
const SPARE_REGEN: f64 = 0.2;
/// Health lost per year at the baseline decline rate.
const HEALTH_PRESSURE: f64 = 5.0;
/// Drought multiplier applied to the carrying capacity, rounded down.
const DROUGHT_FACTOR: f64 = 0.8;
/// Resource bonus granted by a year of abundance.
const ABUNDANCE_BONUS: f64 = 30.0;

/// Outcome of the yearly random event draw.
///
/// Drawn uniformly from [0, 100): [0, 5) drought, [5, 15) abundance, the rest
/// a disease outbreak. The outbreak is broadcast-only: it is reported and
/// logged but mutates no state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvironmentEvent {
    Drought,
    Abundance,
    DiseaseOutbreak,
}

impl fmt::Display for EnvironmentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentEvent::Drought => write!(f, "drought reduced the carrying capacity"),
            EnvironmentEvent::Abundance => write!(f, "a year of abundance raised resources"),
            EnvironmentEvent::DiseaseOutbreak => write!(f, "a disease outbreak swept the warren"),
        }
    }
}

#[derive(Debug)]
pub struct Environment {
    carrying_capacity: u32,
    current_population: u32,
    resource_availability: f64,
}

impl Environment {
    /// Create an environment with the given carrying capacity.
    ///
    /// A capacity of zero would divide every feedback formula by zero, so it
    /// is rejected before any state exists.
    pub fn new(carrying_capacity: u32) -> Result<Self, SimulationError> {
        if carrying_capacity == 0 {
            return Err(SimulationError::InvalidConfiguration {
                reason: "carrying capacity must be at least 1".to_string(),
            });
        }
        Ok(Self {
            carrying_capacity,
            current_population: 0,
            resource_availability: INITIAL_RESOURCES,
        })
    }

    /// Rebalance the resource stock against the population size.
    ///
    /// Over capacity the stock drains at 0.5 per extra individual; under
    /// capacity it regenerates at 0.2 per unit of headroom. The stock never
    /// goes negative.
    pub fn update_resources(&mut self, population_size: usize) {
        let population = population_size as f64;
        let capacity = f64::from(self.carrying_capacity);
        if population > capacity {
            self.resource_availability -= (population - capacity) * OVERSHOOT_DRAIN;
        } else {
            self.resource_availability += (capacity - population) * SPARE_REGEN;
        }
        self.resource_availability = self.resource_availability.max(0.0);
    }

    /// Apply crowding pressure to every living agent.
    ///
    /// The decline rate is the tracked population over capacity, floored at
    /// 1.0, so pressure mounts once the counter overshoots the capacity.
    /// Deceased agents are left untouched.
    pub fn adjust_health(&self, agents: &mut [Agent]) {
        let decline_rate = (f64::from(self.current_population)
            / f64::from(self.carrying_capacity))
        .max(1.0);
        for agent in agents.iter_mut().filter(|agent| agent.is_alive()) {
            agent.set_health(agent.health() - decline_rate * HEALTH_PRESSURE);
        }
    }

    /// Draw and apply this year's random event.
    pub fn introduce_random_event(&mut self, rng: &mut impl Rng) -> EnvironmentEvent {
        let draw = rng.gen_range(0..100);
        if draw < 5 {
            self.carrying_capacity = (f64::from(self.carrying_capacity) * DROUGHT_FACTOR) as u32;
            EnvironmentEvent::Drought
        } else if draw < 15 {
            self.resource_availability += ABUNDANCE_BONUS;
            EnvironmentEvent::Abundance
        } else {
            EnvironmentEvent::DiseaseOutbreak
        }
    }

    /// Bump the tracked population counter. Invoked explicitly by the engine;
    /// the counter is not reconciled against the agent collection.
    pub fn increase_population(&mut self) {
        self.current_population += 1;
    }

    pub fn decrease_population(&mut self) {
        self.current_population = self.current_population.saturating_sub(1);
    }

    pub fn carrying_capacity(&self) -> u32 {
        self.carrying_capacity
    }

    pub fn current_population(&self) -> u32 {
        self.current_population
    }

    pub fn resource_availability(&self) -> f64 {
        self.resource_availability
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        let err = Environment::new(0).expect_err("capacity 0 must fail");
        assert!(matches!(err, SimulationError::InvalidConfiguration { .. }));
    }

    #[test]
    fn resources_drain_when_population_overshoots() {
        let mut environment = Environment::new(100).expect("valid capacity");
        environment.update_resources(102);
        assert!((environment.resource_availability() - 99.0).abs() < 0.01);
    }

    #[test]
    fn resources_regenerate_under_capacity() {
        let mut environment = Environment::new(100).expect("valid capacity");
        environment.update_resources(80);
        assert!((environment.resource_availability() - 104.0).abs() < 0.01);
    }

    #[test]
    fn resources_never_go_negative() {
        let mut environment = Environment::new(10).expect("valid capacity");
        environment.update_resources(1_000_000);
        assert_eq!(environment.resource_availability(), 0.0);
    }

    #[test]
    fn health_pressure_only_touches_living_agents() {
        let environment = Environment::new(10).expect("valid capacity");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut agents = vec![Agent::new(0, &mut rng), Agent::new(0, &mut rng)];
        agents[1].set_health(0.0);
        agents[1].age_one_year();
        assert!(!agents[1].is_alive());

        environment.adjust_health(&mut agents);
        assert_eq!(agents[0].health(), 95.0);
        assert_eq!(agents[1].health(), 0.0, "dead agents keep their health");
    }

    #[test]
    fn health_pressure_scales_with_overcrowding() {
        let mut environment = Environment::new(10).expect("valid capacity");
        for _ in 0..20 {
            environment.increase_population();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut agents = vec![Agent::new(0, &mut rng)];
        environment.adjust_health(&mut agents);
        // Decline rate 20/10 = 2.0 doubles the baseline pressure.
        assert_eq!(agents[0].health(), 90.0);
    }

    #[test]
    fn population_counter_moves_only_on_explicit_calls() {
        let mut environment = Environment::new(10).expect("valid capacity");
        assert_eq!(environment.current_population(), 0);
        environment.increase_population();
        environment.increase_population();
        assert_eq!(environment.current_population(), 2);
        environment.decrease_population();
        assert_eq!(environment.current_population(), 1);
    }

    #[test]
    fn event_buckets_match_their_state_changes() {
        let mut environment = Environment::new(1_000).expect("valid capacity");
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut seen_drought = false;
        let mut seen_abundance = false;
        let mut seen_outbreak = false;

        for _ in 0..400 {
            let capacity_before = environment.carrying_capacity();
            let resources_before = environment.resource_availability();
            match environment.introduce_random_event(&mut rng) {
                EnvironmentEvent::Drought => {
                    seen_drought = true;
                    let expected = (f64::from(capacity_before) * 0.8) as u32;
                    assert_eq!(environment.carrying_capacity(), expected);
                    assert_eq!(environment.resource_availability(), resources_before);
                }
                EnvironmentEvent::Abundance => {
                    seen_abundance = true;
                    assert_eq!(environment.carrying_capacity(), capacity_before);
                    assert_eq!(
                        environment.resource_availability(),
                        resources_before + 30.0
                    );
                }
                EnvironmentEvent::DiseaseOutbreak => {
                    seen_outbreak = true;
                    assert_eq!(environment.carrying_capacity(), capacity_before);
                    assert_eq!(environment.resource_availability(), resources_before);
                }
            }
        }

        assert!(seen_drought, "no drought in 400 draws");
        assert!(seen_abundance, "no abundance in 400 draws");
        assert!(seen_outbreak, "no outbreak in 400 draws");
    }
}
