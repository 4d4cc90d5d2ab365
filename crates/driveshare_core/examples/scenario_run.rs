//! Generate a seeded scenario, run it and print the report.
//!
//! Run with: cargo run -p driveshare_core --example scenario_run

use bevy_ecs::prelude::World;
use driveshare_core::profiling::EventMetrics;
use driveshare_core::runner::{run_until_empty, simulation_schedule};
use driveshare_core::scenario::{build_simulation, generate_seed_events, ScenarioParams, SimulationConfig};
use driveshare_core::telemetry::MonitorResource;

fn main() -> Result<(), driveshare_core::SimError> {
    const NUM_RIDERS: usize = 200;
    const NUM_DRIVERS: usize = 25;

    let params = ScenarioParams::default()
        .with_seed(123)
        .with_counts(NUM_DRIVERS, NUM_RIDERS)
        .with_request_window(480);
    let config = SimulationConfig::default();

    let mut world = World::new();
    build_simulation(&mut world, generate_seed_events(&params), &config)?;
    let mut schedule = simulation_schedule();
    let steps = run_until_empty(&mut world, &mut schedule, config.max_steps)?;

    let report = world.resource::<MonitorResource>().0.report();
    println!(
        "--- Scenario run ({} riders, {} drivers, seed 123) ---",
        NUM_RIDERS, NUM_DRIVERS
    );
    println!("Steps executed: {}", steps);
    println!("Riders picked up: {} of {}", report.riders_picked_up, report.riders_requested);
    println!("Riders cancelled: {}", report.riders_cancelled);
    println!("Average rider wait time: {:.2}", report.rider_wait_time);
    println!("Average driver total distance: {:.2}", report.driver_total_distance);
    println!("Average driver ride distance: {:.2}", report.driver_ride_distance);
    println!();
    print!("{}", world.resource::<EventMetrics>().summary());
    Ok(())
}
