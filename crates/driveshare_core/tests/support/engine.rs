use driveshare_core::clock::Event;
use driveshare_core::ecs::{Driver, DriverId, Rider, RiderId, Roster};
use driveshare_core::matching::{Dispatcher, FleetDispatcher, MatchingAlgorithm};
use driveshare_core::systems::apply_event;
use driveshare_core::telemetry::{Activity, ActivityMonitor};
use driveshare_core::SimError;

/// Owns the roster, dispatcher and monitor so tests can apply events one at a time
/// without a world or schedule.
#[derive(Debug, Default)]
pub struct Engine {
    pub roster: Roster,
    pub dispatcher: FleetDispatcher,
    pub monitor: ActivityMonitor,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(algorithm: Box<dyn MatchingAlgorithm>) -> Self {
        Self {
            dispatcher: FleetDispatcher::new(algorithm),
            ..Self::default()
        }
    }

    pub fn with_driver(mut self, driver: Driver) -> Self {
        self.roster.insert_driver(driver).expect("insert driver");
        self
    }

    pub fn with_rider(mut self, rider: Rider) -> Self {
        self.roster.insert_rider(rider).expect("insert rider");
        self
    }

    /// Apply `event`, panicking on a fatal simulation error.
    pub fn apply(&mut self, event: &Event) -> Vec<Event> {
        self.try_apply(event).expect("event should apply")
    }

    pub fn try_apply(&mut self, event: &Event) -> Result<Vec<Event>, SimError> {
        apply_event(event, &mut self.roster, &mut self.dispatcher, &mut self.monitor)
    }

    pub fn driver(&self, id: &str) -> &Driver {
        self.roster.driver(&DriverId::from(id)).expect("driver")
    }

    pub fn rider(&self, id: &str) -> &Rider {
        self.roster.rider(&RiderId::from(id)).expect("rider")
    }

    pub fn activities(&self) -> &[Activity] {
        self.monitor.trace()
    }

    pub fn waiting_riders(&self) -> Vec<RiderId> {
        self.dispatcher.waiting_riders()
    }

    pub fn waiting_drivers(&self) -> Vec<DriverId> {
        self.dispatcher.waiting_drivers()
    }
}
