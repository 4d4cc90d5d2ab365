//! Event causal rules: one handler per event variant.
//!
//! Each handler applies its event's effect to the roster, dispatcher and monitor and
//! returns the successor events in the order they must be scheduled. Notifications and
//! dispatcher calls within a handler happen in a fixed order, so identical event logs
//! produce identical traces.

pub mod driver_request;
pub mod dropoff;
pub mod pickup;
pub mod rider_cancel;
pub mod rider_request;

use bevy_ecs::prelude::{Res, ResMut, Resource};

use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::ecs::Roster;
use crate::error::SimError;
use crate::matching::{Dispatcher, DispatcherResource};
use crate::telemetry::{Monitor, MonitorResource};

/// Apply one event and return its successors.
pub fn apply_event(
    event: &Event,
    roster: &mut Roster,
    dispatcher: &mut dyn Dispatcher,
    monitor: &mut dyn Monitor,
) -> Result<Vec<Event>, SimError> {
    let timestamp = event.timestamp;
    let successors = match &event.kind {
        EventKind::RiderRequest { rider } => {
            rider_request::rider_request(timestamp, rider, roster, dispatcher, monitor)
        }
        EventKind::DriverRequest { driver } => {
            driver_request::driver_request(timestamp, driver, roster, dispatcher, monitor)
        }
        EventKind::Cancellation { rider } => {
            rider_cancel::rider_cancel(timestamp, rider, roster, dispatcher, monitor)
        }
        EventKind::Pickup { rider, driver } => {
            pickup::pickup(timestamp, rider, driver, roster, dispatcher, monitor)
        }
        EventKind::Dropoff { rider, driver } => {
            dropoff::dropoff(timestamp, rider, driver, roster, monitor)
        }
    }?;

    tracing::debug!(
        timestamp,
        event = event.kind.name(),
        successors = successors.len(),
        "applied event"
    );
    Ok(successors)
}

/// `timestamp + delay`, or [SimError::TimeOverflow] when it does not fit the clock.
pub(crate) fn delayed(timestamp: u64, delay: u64) -> Result<u64, SimError> {
    timestamp
        .checked_add(delay)
        .ok_or(SimError::TimeOverflow { timestamp, delay })
}

/// Fatal error raised while applying the current event; the runner takes it after each step.
#[derive(Debug, Default, Resource)]
pub struct SimulationFault(pub Option<SimError>);

/// Applies [CurrentEvent] and schedules its successors in the order they were returned.
pub fn apply_event_system(
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut roster: ResMut<Roster>,
    mut dispatcher: ResMut<DispatcherResource>,
    mut monitor: ResMut<MonitorResource>,
    mut fault: ResMut<SimulationFault>,
) {
    let applied = apply_event(&event.0, &mut roster, &mut **dispatcher, &mut monitor.0)
        .and_then(|successors| clock.schedule_all(successors));
    if let Err(err) = applied {
        fault.0 = Some(err);
    }
}
