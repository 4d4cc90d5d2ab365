//! Scenario setup: run configuration, synthetic event logs, and world construction.

mod build;
mod params;

pub use build::{build_simulation, generate_seed_events};
pub use params::{ScenarioParams, SimulationConfig, SimulationEndTime};
