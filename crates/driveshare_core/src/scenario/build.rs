use bevy_ecs::prelude::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::{Event, SimulationClock};
use crate::ecs::{Driver, Rider, Roster};
use crate::error::SimError;
use crate::event_log::SeedEvent;
use crate::location::Location;
use crate::matching::{DispatcherResource, FleetDispatcher};
use crate::profiling::EventMetrics;
use crate::scenario::params::{ScenarioParams, SimulationConfig, SimulationEndTime};
use crate::systems::SimulationFault;
use crate::telemetry::MonitorResource;

fn random_location<R: Rng>(rng: &mut R, grid_size: i64) -> Location {
    let extent = grid_size.max(1);
    Location::new(rng.gen_range(0..extent), rng.gen_range(0..extent))
}

/// Generate a reproducible synthetic event log. Events come back sorted by timestamp;
/// same-timestamp events keep generation order (drivers before riders).
pub fn generate_seed_events(params: &ScenarioParams) -> Vec<SeedEvent> {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let min_speed = params.min_speed.max(1);
    let max_speed = params.max_speed.max(min_speed);
    let max_patience = params.max_patience.max(params.min_patience);

    let mut events = Vec::with_capacity(params.num_drivers + params.num_riders);
    for index in 0..params.num_drivers {
        let timestamp = rng.gen_range(0..=params.driver_spread);
        let location = random_location(&mut rng, params.grid_size);
        let speed = rng.gen_range(min_speed..=max_speed);
        // Speed is at least 1 here, so construction cannot fail.
        if let Ok(driver) = Driver::new(format!("driver-{index:04}"), location, speed) {
            events.push(SeedEvent::DriverRequest { timestamp, driver });
        }
    }
    for index in 0..params.num_riders {
        let timestamp = rng.gen_range(0..=params.request_window);
        let origin = random_location(&mut rng, params.grid_size);
        let destination = random_location(&mut rng, params.grid_size);
        let patience = rng.gen_range(params.min_patience..=max_patience);
        events.push(SeedEvent::RiderRequest {
            timestamp,
            rider: Rider::new(format!("rider-{index:04}"), origin, destination, patience),
        });
    }
    events.sort_by_key(SeedEvent::timestamp);
    events
}

/// Populate `world` with every simulation resource, register the seed actors in the
/// [Roster] and schedule their request events in log order.
pub fn build_simulation(
    world: &mut World,
    seeds: Vec<SeedEvent>,
    config: &SimulationConfig,
) -> Result<(), SimError> {
    config.validate()?;

    let mut roster = Roster::default();
    let mut clock = SimulationClock::default();
    for seed in seeds {
        match seed {
            SeedEvent::DriverRequest { timestamp, driver } => {
                let id = driver.id.clone();
                roster.insert_driver(driver)?;
                clock.schedule(Event::driver_request(timestamp, id))?;
            }
            SeedEvent::RiderRequest { timestamp, rider } => {
                let id = rider.id.clone();
                roster.insert_rider(rider)?;
                clock.schedule(Event::rider_request(timestamp, id))?;
            }
        }
    }
    tracing::info!(
        drivers = roster.drivers().count(),
        riders = roster.riders().count(),
        events = clock.len(),
        matching = ?config.matching,
        "simulation built"
    );

    world.insert_resource(roster);
    world.insert_resource(clock);
    world.insert_resource(DispatcherResource::new(Box::new(FleetDispatcher::new(
        config.matching.build(),
    ))));
    world.insert_resource(MonitorResource::default());
    world.insert_resource(SimulationFault::default());
    world.insert_resource(EventMetrics::default());
    match config.end_time {
        Some(end) => world.insert_resource(SimulationEndTime(end)),
        None => {
            world.remove_resource::<SimulationEndTime>();
        }
    }
    Ok(())
}
