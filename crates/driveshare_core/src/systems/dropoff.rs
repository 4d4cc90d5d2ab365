use crate::clock::Event;
use crate::ecs::{DriverId, RiderId, Roster};
use crate::error::SimError;
use crate::telemetry::{Action, Category, Monitor};

/// The driver delivers the rider and immediately asks for the next one.
pub fn dropoff(
    timestamp: u64,
    rider_id: &RiderId,
    driver_id: &DriverId,
    roster: &mut Roster,
    monitor: &mut dyn Monitor,
) -> Result<Vec<Event>, SimError> {
    roster.rider(rider_id)?;
    let driver = roster.driver_mut(driver_id)?;
    driver.complete_ride()?;
    let location = driver.location;
    monitor.notify(
        timestamp,
        Category::Driver,
        Action::Dropoff,
        driver_id.as_str(),
        location,
    );
    monitor.notify(
        timestamp,
        Category::Rider,
        Action::Dropoff,
        rider_id.as_str(),
        location,
    );
    Ok(vec![Event::driver_request(timestamp, driver_id.clone())])
}
