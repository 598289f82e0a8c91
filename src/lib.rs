pub mod agent;
pub mod engine;
pub mod environment;
pub mod error;
pub mod rng;
pub mod scenario;

pub use agent::{Agent, Vitality};
pub use engine::{SimulationEngine, SimulationSettings, YearReport};
pub use environment::{Environment, EnvironmentEvent};
pub use error::SimulationError;
pub use scenario::{Scenario, ScenarioLoader};
