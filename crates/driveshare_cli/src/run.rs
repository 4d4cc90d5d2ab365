use anyhow::Context;
use bevy_ecs::prelude::World;
use driveshare_core::clock::SimulationClock;
use driveshare_core::event_log::load_event_log;
use driveshare_core::profiling::EventMetrics;
use driveshare_core::runner::{run_until_empty, simulation_schedule};
use driveshare_core::scenario::{build_simulation, SimulationConfig};
use driveshare_core::telemetry::{MonitorResource, SimReport};

use crate::config::RunConfig;

fn resolve_config(run_config: &RunConfig) -> anyhow::Result<SimulationConfig> {
    let mut config = match &run_config.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(matching) = run_config.matching {
        config = config.with_matching(matching.into());
    }
    if let Some(max_steps) = run_config.max_steps {
        config = config.with_max_steps(max_steps);
    }
    if let Some(end_time) = run_config.end_time {
        config = config.with_end_time(end_time);
    }
    config.validate()?;
    Ok(config)
}

fn print_report(report: &SimReport) {
    println!("Average rider wait time: {:.2}", report.rider_wait_time);
    println!("Average driver total distance: {:.2}", report.driver_total_distance);
    println!("Average driver ride distance: {:.2}", report.driver_ride_distance);
    println!(
        "Riders: {} requested, {} picked up, {} dropped off, {} cancelled",
        report.riders_requested,
        report.riders_picked_up,
        report.riders_dropped_off,
        report.riders_cancelled
    );
    println!("Drivers seen: {}", report.drivers_seen);
}

pub fn run(run_config: RunConfig) -> anyhow::Result<()> {
    let config = resolve_config(&run_config)?;
    let seeds = load_event_log(&run_config.events)
        .with_context(|| format!("loading event log {}", run_config.events.display()))?;
    tracing::info!(seeds = seeds.len(), matching = ?config.matching, "starting run");

    let mut world = World::new();
    build_simulation(&mut world, seeds, &config)?;
    let mut schedule = simulation_schedule();
    let steps = run_until_empty(&mut world, &mut schedule, config.max_steps)?;
    let pending = world.resource::<SimulationClock>().len();
    if pending > 0 && config.end_time.is_none() {
        tracing::warn!(steps, pending, "stopped at max_steps with events still pending");
    }

    let monitor = &world.resource::<MonitorResource>().0;
    if run_config.trace {
        for activity in monitor.trace() {
            println!(
                "{:>6} {:?} {:?} {} @ {}",
                activity.timestamp,
                activity.category,
                activity.action,
                activity.id,
                activity.location
            );
        }
        println!();
    }

    let report = monitor.report();
    print_report(&report);
    tracing::debug!("\n{}", world.resource::<EventMetrics>().summary());

    if let Some(path) = &run_config.report_json {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing report {}", path.display()))?;
    }
    Ok(())
}
