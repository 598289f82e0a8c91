//! One organism: age, health, heritable rates, and its alive/removed lifecycle.

use rand::Rng;

use crate::environment::Environment;

/// Youngest age at which an agent may reproduce.
pub const REPRODUCTION_AGE: u32 = 2;
/// Age at which aging marks an agent deceased.
pub const MAX_AGE: u32 = 7;
/// Aging marks an agent deceased once health drops below this level.
pub const HEALTH_THRESHOLD: f64 = 20.0;

const INITIAL_HEALTH: f64 = 100.0;
const BASE_MUTATION_RATE: f64 = 0.05;
const MUTATION_STEP: f64 = 0.1;

/// Floor for the trait gap in [`Agent::fitness`]. When reproduction and
/// mutation rates coincide the gap is treated as this epsilon, saturating
/// fitness at a large finite value instead of dividing by zero.
const TRAIT_EPSILON: f64 = 1e-9;

/// Whether an agent still participates in the simulation.
///
/// Death and removal are separate: a deceased agent stays in the population
/// until the engine's age-based cull takes it out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vitality {
    Alive,
    Deceased,
}

#[derive(Clone, Debug)]
pub struct Agent {
    age: u32,
    generation: u32,
    reproduction_rate: f64,
    mutation_rate: f64,
    health: f64,
    vitality: Vitality,
}

impl Agent {
    /// Create a newborn agent of the given generation.
    ///
    /// The reproduction rate is drawn uniformly from [0.5, 1.0) and is fixed
    /// for life; the mutation rate starts at the base value and only changes
    /// in descendants.
    pub fn new(generation: u32, rng: &mut impl Rng) -> Self {
        Self {
            age: 0,
            generation,
            reproduction_rate: rng.gen_range(0.5..1.0),
            mutation_rate: BASE_MUTATION_RATE,
            health: INITIAL_HEALTH,
            vitality: Vitality::Alive,
        }
    }

    /// Advance this agent by one simulated year.
    ///
    /// A no-op for deceased agents. A living agent's age increments; reaching
    /// [`MAX_AGE`] or having health below [`HEALTH_THRESHOLD`] marks it
    /// deceased, irreversibly.
    pub fn age_one_year(&mut self) {
        if self.vitality != Vitality::Alive {
            return;
        }
        self.age += 1;
        if self.age >= MAX_AGE || self.health < HEALTH_THRESHOLD {
            self.vitality = Vitality::Deceased;
        }
    }

    pub fn can_reproduce(&self) -> bool {
        self.is_alive() && self.age >= REPRODUCTION_AGE
    }

    /// Produce an offspring, or `None` when this agent is ineligible.
    ///
    /// The offspring starts a generation deeper with a fresh random
    /// reproduction rate, the base mutation rate, and full health. With
    /// probability equal to the parent's mutation rate, the offspring's
    /// mutation rate is perturbed by a uniform value in [-0.1, 0.1) and then
    /// clamped back into [0, 1].
    pub fn reproduce(&self, rng: &mut impl Rng) -> Option<Agent> {
        if !self.can_reproduce() {
            return None;
        }
        let mut offspring = Agent::new(self.generation + 1, rng);
        if rng.gen::<f64>() < self.mutation_rate {
            offspring.mutation_rate += rng.gen_range(-MUTATION_STEP..MUTATION_STEP);
            offspring.mutation_rate = offspring.mutation_rate.clamp(0.0, 1.0);
        }
        Some(offspring)
    }

    /// Score this agent against the environment.
    ///
    /// Fitness is the product of health, resource pressure (resource level
    /// over carrying capacity), and trait balance (the inverse gap between
    /// the reproduction and mutation rates). The gap is floored at
    /// [`TRAIT_EPSILON`], so coinciding rates yield a saturated finite score
    /// rather than a division by zero.
    pub fn fitness(&self, environment: &Environment) -> f64 {
        let resource_fitness =
            environment.resource_availability() / f64::from(environment.carrying_capacity());
        let trait_gap = (self.reproduction_rate - self.mutation_rate)
            .abs()
            .max(TRAIT_EPSILON);
        self.health * resource_fitness / trait_gap
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Overwrite the age directly. Scenario plumbing for forcing agents past
    /// the removal threshold; the year loop itself only ages through
    /// [`Agent::age_one_year`].
    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn reproduction_rate(&self) -> f64 {
        self.reproduction_rate
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn set_health(&mut self, health: f64) {
        self.health = health;
    }

    pub fn vitality(&self) -> Vitality {
        self.vitality
    }

    pub fn is_alive(&self) -> bool {
        self.vitality == Vitality::Alive
    }
}
