//! Test helpers for common test setup and utilities.
//!
//! This module provides shared test utilities to reduce duplication across test files.

use bevy_ecs::prelude::World;

use crate::ecs::{Driver, Rider};
use crate::event_log::SeedEvent;
use crate::location::Location;
use crate::scenario::{build_simulation, SimulationConfig};

/// Build a driver at `(row, column)`.
///
/// # Panics
///
/// Panics if `speed` is zero.
pub fn test_driver(id: &str, (row, column): (i64, i64), speed: u32) -> Driver {
    Driver::new(id, Location::new(row, column), speed).expect("test driver speed must be positive")
}

/// Build a waiting rider travelling from `origin` to `destination`.
pub fn test_rider(id: &str, origin: (i64, i64), destination: (i64, i64), patience: u64) -> Rider {
    Rider::new(
        id,
        Location::new(origin.0, origin.1),
        Location::new(destination.0, destination.1),
        patience,
    )
}

pub fn driver_seed(timestamp: u64, driver: Driver) -> SeedEvent {
    SeedEvent::DriverRequest { timestamp, driver }
}

pub fn rider_seed(timestamp: u64, rider: Rider) -> SeedEvent {
    SeedEvent::RiderRequest { timestamp, rider }
}

/// Create a world with every simulation resource installed and `seeds` scheduled.
///
/// # Panics
///
/// Panics if the seeds reuse an actor id.
pub fn create_test_world(seeds: Vec<SeedEvent>, config: &SimulationConfig) -> World {
    let mut world = World::new();
    build_simulation(&mut world, seeds, config).expect("test world should build");
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulationClock;
    use crate::ecs::Roster;

    #[test]
    fn test_world_schedules_every_seed() {
        let world = create_test_world(
            vec![
                driver_seed(0, test_driver("d", (0, 0), 1)),
                rider_seed(1, test_rider("r", (0, 0), (1, 1), 4)),
            ],
            &SimulationConfig::default(),
        );
        assert_eq!(world.resource::<SimulationClock>().len(), 2);
        assert_eq!(world.resource::<Roster>().drivers().count(), 1);
    }
}
