use crate::clock::Event;
use crate::ecs::{RiderId, Roster};
use crate::error::SimError;
use crate::matching::Dispatcher;
use crate::telemetry::{Action, Category, Monitor};

/// The rider's patience ran out.
///
/// Only a waiting rider cancels. A satisfied rider (already picked up) or an already
/// cancelled one is left untouched and nothing is reported.
pub fn rider_cancel(
    timestamp: u64,
    rider_id: &RiderId,
    roster: &mut Roster,
    dispatcher: &mut dyn Dispatcher,
    monitor: &mut dyn Monitor,
) -> Result<Vec<Event>, SimError> {
    let rider = roster.rider_mut(rider_id)?;
    if !rider.cancel() {
        return Ok(Vec::new());
    }
    dispatcher.cancel_ride(rider_id);
    monitor.notify(
        timestamp,
        Category::Rider,
        Action::Cancel,
        rider_id.as_str(),
        rider.origin,
    );
    Ok(Vec::new())
}
