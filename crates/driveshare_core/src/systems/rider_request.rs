use crate::clock::Event;
use crate::ecs::{RiderId, Roster};
use crate::error::SimError;
use crate::matching::Dispatcher;
use crate::systems::delayed;
use crate::telemetry::{Action, Category, Monitor};

/// A rider arrives and asks for a driver.
///
/// Always schedules the rider's cancellation at `timestamp + patience`; if a driver was
/// available it also starts them towards the rider and schedules the pickup first.
pub fn rider_request(
    timestamp: u64,
    rider_id: &RiderId,
    roster: &mut Roster,
    dispatcher: &mut dyn Dispatcher,
    monitor: &mut dyn Monitor,
) -> Result<Vec<Event>, SimError> {
    let rider = roster.rider(rider_id)?;
    let (origin, patience) = (rider.origin, rider.patience);
    monitor.notify(timestamp, Category::Rider, Action::Request, rider_id.as_str(), origin);

    let mut events = Vec::with_capacity(2);
    if let Some(driver_id) = dispatcher.match_driver_for(rider, roster)? {
        let travel_time = roster.driver_mut(&driver_id)?.begin_travel(origin);
        events.push(Event::pickup(
            delayed(timestamp, travel_time)?,
            rider_id.clone(),
            driver_id,
        ));
    }
    events.push(Event::cancellation(delayed(timestamp, patience)?, rider_id.clone()));
    Ok(events)
}
