use crate::clock::Event;
use crate::ecs::{DriverId, Roster};
use crate::error::SimError;
use crate::matching::Dispatcher;
use crate::systems::delayed;
use crate::telemetry::{Action, Category, Monitor};

/// A driver arrives, or comes free, and asks for a rider.
///
/// On a match the driver heads for the rider's origin and a pickup is scheduled. The
/// driver's location jumps to the origin immediately; travel time is computed first, so
/// only later distance calculations see the jump. Without a match nothing is scheduled
/// and the driver waits in the dispatcher's idle pool.
pub fn driver_request(
    timestamp: u64,
    driver_id: &DriverId,
    roster: &mut Roster,
    dispatcher: &mut dyn Dispatcher,
    monitor: &mut dyn Monitor,
) -> Result<Vec<Event>, SimError> {
    if dispatcher.register_driver(driver_id) {
        tracing::debug!(driver = %driver_id, "driver joined the fleet");
    }

    let driver = roster.driver(driver_id)?;
    monitor.notify(
        timestamp,
        Category::Driver,
        Action::Request,
        driver_id.as_str(),
        driver.location,
    );

    let Some(rider_id) = dispatcher.match_rider_for(driver) else {
        return Ok(Vec::new());
    };

    let origin = roster.rider(&rider_id)?.origin;
    let driver = roster.driver_mut(driver_id)?;
    let travel_time = driver.begin_travel(origin);
    driver.location = origin;
    Ok(vec![Event::pickup(
        delayed(timestamp, travel_time)?,
        rider_id,
        driver_id.clone(),
    )])
}
