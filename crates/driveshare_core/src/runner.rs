//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Clock progression happens here, outside systems. Each step pops the next event from
//! [SimulationClock], inserts it as [CurrentEvent], then runs the schedule. A fatal error
//! parked in [SimulationFault] by the schedule ends the run.

use bevy_ecs::prelude::{Schedule, World};

use crate::clock::{CurrentEvent, Event, SimulationClock};
use crate::error::SimError;
use crate::profiling::EventMetrics;
use crate::scenario::SimulationEndTime;
use crate::systems::{apply_event_system, SimulationFault};

fn pop_due_event(world: &mut World) -> Option<Event> {
    let stop_at = world.get_resource::<SimulationEndTime>().map(|end| end.0);
    let next_ts = world
        .get_resource::<SimulationClock>()
        .and_then(|clock| clock.next_event_time());
    if let (Some(end), Some(ts)) = (stop_at, next_ts) {
        if ts >= end {
            return None;
        }
    }
    world.get_resource_mut::<SimulationClock>()?.pop_next()
}

fn take_fault(world: &mut World) -> Result<(), SimError> {
    match world
        .get_resource_mut::<SimulationFault>()
        .and_then(|mut fault| fault.0.take())
    {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Runs one simulation step. Returns `Ok(true)` if an event was processed, `Ok(false)` if
/// the clock was empty or the next event is at or past [SimulationEndTime].
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> Result<bool, SimError> {
    run_next_event_with_hook(world, schedule, |_, _| {})
}

/// Runs one simulation step and invokes `hook` after the schedule completes.
pub fn run_next_event_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    mut hook: F,
) -> Result<bool, SimError>
where
    F: FnMut(&World, &Event),
{
    let Some(event) = pop_due_event(world) else {
        return Ok(false);
    };

    if let Some(mut metrics) = world.get_resource_mut::<EventMetrics>() {
        metrics.record_event(&event.kind);
    }
    world.insert_resource(CurrentEvent(event.clone()));

    schedule.run(world);
    take_fault(world)?;
    hook(world, &event);
    Ok(true)
}

/// Runs simulation steps until the event queue is empty or `max_steps` is reached.
/// Returns the number of steps executed.
pub fn run_until_empty(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
) -> Result<usize, SimError> {
    run_until_empty_with_hook(world, schedule, max_steps, |_, _| {})
}

/// Runs simulation steps until empty and invokes `hook` after each step.
pub fn run_until_empty_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
    mut hook: F,
) -> Result<usize, SimError>
where
    F: FnMut(&World, &Event),
{
    let mut steps = 0;
    while steps < max_steps && run_next_event_with_hook(world, schedule, &mut hook)? {
        steps += 1;
    }
    let now = world
        .get_resource::<SimulationClock>()
        .map(SimulationClock::now)
        .unwrap_or_default();
    tracing::info!(steps, now, "simulation finished");
    Ok(steps)
}

/// Builds the simulation schedule: a single system applying [CurrentEvent].
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(apply_event_system);
    schedule
}
