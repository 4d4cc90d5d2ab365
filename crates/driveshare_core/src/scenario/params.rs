use std::path::Path;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::matching::MatchingAlgorithmType;

/// Default upper bound on processed events, well above what any realistic log needs.
const DEFAULT_MAX_STEPS: usize = 10_000_000;

/// Simulation end time. When set, the runner stops processing events once the next
/// event would be at or after this timestamp.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimulationEndTime(pub u64);

/// Run configuration, usually loaded from a TOML file.
///
/// ```toml
/// matching = "fastest_arrival"
/// max_steps = 100000
/// end_time = 480
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Policy for choosing among idle drivers.
    pub matching: MatchingAlgorithmType,
    /// Maximum number of events to process before giving up.
    pub max_steps: usize,
    /// Stop before the first event at or after this timestamp.
    pub end_time: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            matching: MatchingAlgorithmType::default(),
            max_steps: DEFAULT_MAX_STEPS,
            end_time: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 {
            return Err(ConfigError::Invalid("max_steps must be positive".into()));
        }
        Ok(())
    }

    pub fn with_matching(mut self, matching: MatchingAlgorithmType) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_end_time(mut self, end_time: u64) -> Self {
        self.end_time = Some(end_time);
        self
    }
}

/// Parameters for generating a synthetic event log.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub num_riders: usize,
    pub num_drivers: usize,
    pub seed: Option<u64>,
    /// Grid extent: rows and columns are drawn from `0..grid_size`.
    pub grid_size: i64,
    /// Riders request uniformly in `[0, request_window]`.
    pub request_window: u64,
    /// Drivers arrive uniformly in `[0, driver_spread]`.
    pub driver_spread: u64,
    pub min_speed: u32,
    pub max_speed: u32,
    pub min_patience: u64,
    pub max_patience: u64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            num_riders: 50,
            num_drivers: 10,
            seed: None,
            grid_size: 20,
            request_window: 120,
            driver_spread: 30,
            min_speed: 1,
            max_speed: 3,
            min_patience: 5,
            max_patience: 30,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_counts(mut self, num_drivers: usize, num_riders: usize) -> Self {
        self.num_drivers = num_drivers;
        self.num_riders = num_riders;
        self
    }

    pub fn with_grid_size(mut self, grid_size: i64) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_request_window(mut self, request_window: u64) -> Self {
        self.request_window = request_window;
        self
    }

    pub fn with_speed_range(mut self, min_speed: u32, max_speed: u32) -> Self {
        self.min_speed = min_speed;
        self.max_speed = max_speed;
        self
    }

    pub fn with_patience_range(mut self, min_patience: u64, max_patience: u64) -> Self {
        self.min_patience = min_patience;
        self.max_patience = max_patience;
        self
    }
}
