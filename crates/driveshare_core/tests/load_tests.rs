//! Load tests for driveshare_core: validate performance under realistic load conditions.

use std::time::Instant;

use bevy_ecs::prelude::World;
use driveshare_core::runner::{run_until_empty, simulation_schedule};
use driveshare_core::scenario::{build_simulation, generate_seed_events, ScenarioParams, SimulationConfig};

#[test]
#[ignore] // Only run explicitly: cargo test --package driveshare_core --test load_tests -- --ignored
fn test_sustained_load() {
    let params = ScenarioParams::default()
        .with_seed(42)
        .with_counts(500, 5_000)
        .with_grid_size(100)
        .with_request_window(10_000);
    let mut world = World::new();
    build_simulation(&mut world, generate_seed_events(&params), &SimulationConfig::default())
        .expect("build");

    let start = Instant::now();
    let mut schedule = simulation_schedule();
    let events = run_until_empty(&mut world, &mut schedule, 10_000_000).expect("run");
    let duration = start.elapsed();

    let events_per_sec = events as f64 / duration.as_secs_f64();
    println!(
        "Sustained load test: {} events in {:.2}s ({:.0} events/sec)",
        events,
        duration.as_secs_f64(),
        events_per_sec
    );

    assert!(
        events_per_sec > 1000.0,
        "Performance below threshold: {:.0} events/sec",
        events_per_sec
    );
}
