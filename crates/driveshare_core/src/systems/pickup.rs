use crate::clock::Event;
use crate::ecs::{DriverId, RiderId, RiderStatus, Roster};
use crate::error::SimError;
use crate::matching::Dispatcher;
use crate::systems::delayed;
use crate::telemetry::{Action, Category, Monitor};

/// The driver reaches the rider's origin.
///
/// If the rider is still there the ride starts and a dropoff is scheduled. If the rider
/// cancelled, the driver stands down and asks for a new rider at the same timestamp.
pub fn pickup(
    timestamp: u64,
    rider_id: &RiderId,
    driver_id: &DriverId,
    roster: &mut Roster,
    dispatcher: &mut dyn Dispatcher,
    monitor: &mut dyn Monitor,
) -> Result<Vec<Event>, SimError> {
    let (rider, driver) = roster.pair_mut(rider_id, driver_id)?;
    driver.complete_travel()?;
    monitor.notify(
        timestamp,
        Category::Driver,
        Action::Pickup,
        driver_id.as_str(),
        driver.location,
    );

    if rider.status() == RiderStatus::Cancelled {
        driver.release();
        return Ok(vec![Event::driver_request(timestamp, driver_id.clone())]);
    }

    let ride_time = driver.begin_ride(rider);
    rider.satisfy();
    if dispatcher.is_rider_waiting(rider_id) {
        dispatcher.cancel_ride(rider_id);
    }
    monitor.notify(
        timestamp,
        Category::Rider,
        Action::Pickup,
        rider_id.as_str(),
        driver.location,
    );
    Ok(vec![Event::dropoff(
        delayed(timestamp, ride_time)?,
        rider_id.clone(),
        driver_id.clone(),
    )])
}
