use std::collections::{BTreeSet, VecDeque};

use crate::ecs::{Driver, DriverId, Rider, RiderId, Roster};
use crate::error::SimError;

use super::algorithm::MatchingAlgorithm;
use super::fastest_arrival::FastestArrival;

/// The matching registry: holds the pools of unmatched drivers and riders and pairs them.
///
/// Every request event makes exactly one match attempt. A matched actor leaves its pool,
/// so no driver or rider is ever matched twice at once.
pub trait Dispatcher: Send + Sync {
    /// Add `driver` to the fleet if it is not already part of it. Returns `true` when newly added.
    fn register_driver(&mut self, driver: &DriverId) -> bool;

    /// Take the best idle driver for `rider`, or park the rider in the waiting queue.
    fn match_driver_for(
        &mut self,
        rider: &Rider,
        roster: &Roster,
    ) -> Result<Option<DriverId>, SimError>;

    /// Take the longest-waiting rider for `driver`, or park the driver in the idle pool.
    fn match_rider_for(&mut self, driver: &Driver) -> Option<RiderId>;

    /// Remove `rider` from the waiting queue. Returns `true` if it was waiting.
    fn cancel_ride(&mut self, rider: &RiderId) -> bool;

    fn is_rider_waiting(&self, rider: &RiderId) -> bool;

    fn is_driver_waiting(&self, driver: &DriverId) -> bool;

    fn fleet_size(&self) -> usize;

    /// Waiting riders, longest-waiting first.
    fn waiting_riders(&self) -> Vec<RiderId>;

    /// Idle drivers, in the order they became idle.
    fn waiting_drivers(&self) -> Vec<DriverId>;
}

/// Pool-based dispatcher with a pluggable policy for choosing drivers.
pub struct FleetDispatcher {
    algorithm: Box<dyn MatchingAlgorithm>,
    fleet: BTreeSet<DriverId>,
    idle_drivers: Vec<DriverId>,
    waiting_riders: VecDeque<RiderId>,
}

impl FleetDispatcher {
    pub fn new(algorithm: Box<dyn MatchingAlgorithm>) -> Self {
        Self {
            algorithm,
            fleet: BTreeSet::new(),
            idle_drivers: Vec::new(),
            waiting_riders: VecDeque::new(),
        }
    }
}

impl Default for FleetDispatcher {
    fn default() -> Self {
        Self::new(Box::new(FastestArrival))
    }
}

impl std::fmt::Debug for FleetDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FleetDispatcher")
            .field("fleet", &self.fleet)
            .field("idle_drivers", &self.idle_drivers)
            .field("waiting_riders", &self.waiting_riders)
            .finish_non_exhaustive()
    }
}

impl Dispatcher for FleetDispatcher {
    fn register_driver(&mut self, driver: &DriverId) -> bool {
        self.fleet.insert(driver.clone())
    }

    fn match_driver_for(
        &mut self,
        rider: &Rider,
        roster: &Roster,
    ) -> Result<Option<DriverId>, SimError> {
        let candidates = self
            .idle_drivers
            .iter()
            .map(|id| roster.driver(id))
            .collect::<Result<Vec<_>, _>>()?;

        let chosen = self.algorithm.find_match(rider, &candidates);
        if let Some(driver) = &chosen {
            self.idle_drivers.retain(|idle| idle != driver);
        } else if !self.is_rider_waiting(&rider.id) {
            self.waiting_riders.push_back(rider.id.clone());
        }
        Ok(chosen)
    }

    fn match_rider_for(&mut self, driver: &Driver) -> Option<RiderId> {
        match self.waiting_riders.pop_front() {
            Some(rider) => {
                self.idle_drivers.retain(|idle| *idle != driver.id);
                Some(rider)
            }
            None => {
                if !self.is_driver_waiting(&driver.id) {
                    self.idle_drivers.push(driver.id.clone());
                }
                None
            }
        }
    }

    fn cancel_ride(&mut self, rider: &RiderId) -> bool {
        let before = self.waiting_riders.len();
        self.waiting_riders.retain(|waiting| waiting != rider);
        self.waiting_riders.len() != before
    }

    fn is_rider_waiting(&self, rider: &RiderId) -> bool {
        self.waiting_riders.contains(rider)
    }

    fn is_driver_waiting(&self, driver: &DriverId) -> bool {
        self.idle_drivers.contains(driver)
    }

    fn fleet_size(&self) -> usize {
        self.fleet.len()
    }

    fn waiting_riders(&self) -> Vec<RiderId> {
        self.waiting_riders.iter().cloned().collect()
    }

    fn waiting_drivers(&self) -> Vec<DriverId> {
        self.idle_drivers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::matching::SimpleMatching;

    fn roster_with(drivers: &[(&str, (i64, i64), u32)]) -> Roster {
        let mut roster = Roster::default();
        for (id, (row, column), speed) in drivers {
            roster
                .insert_driver(Driver::new(*id, Location::new(*row, *column), *speed).expect("driver"))
                .expect("insert driver");
        }
        roster
    }

    #[test]
    fn register_driver_is_idempotent() {
        let mut dispatcher = FleetDispatcher::default();
        assert!(dispatcher.register_driver(&"d".into()));
        assert!(!dispatcher.register_driver(&"d".into()));
        assert!(dispatcher.register_driver(&"e".into()));
        assert_eq!(dispatcher.fleet_size(), 2);
    }

    #[test]
    fn unmatched_rider_waits_and_is_served_fifo() {
        let roster = roster_with(&[("d", (0, 0), 1)]);
        let mut dispatcher = FleetDispatcher::default();
        let first = Rider::new("r1", Location::new(0, 0), Location::new(1, 1), 5);
        let second = Rider::new("r2", Location::new(0, 0), Location::new(1, 1), 5);

        assert_eq!(dispatcher.match_driver_for(&first, &roster).expect("match"), None);
        assert_eq!(dispatcher.match_driver_for(&second, &roster).expect("match"), None);
        assert_eq!(
            dispatcher.waiting_riders(),
            vec![RiderId::from("r1"), RiderId::from("r2")]
        );

        let driver = roster.driver(&"d".into()).expect("driver");
        assert_eq!(dispatcher.match_rider_for(driver), Some(RiderId::from("r1")));
        assert!(!dispatcher.is_rider_waiting(&"r1".into()));
        assert!(!dispatcher.is_driver_waiting(&"d".into()));
    }

    #[test]
    fn unmatched_driver_joins_idle_pool_once() {
        let roster = roster_with(&[("d", (0, 0), 1)]);
        let mut dispatcher = FleetDispatcher::default();
        let driver = roster.driver(&"d".into()).expect("driver");

        assert_eq!(dispatcher.match_rider_for(driver), None);
        assert_eq!(dispatcher.match_rider_for(driver), None);
        assert_eq!(dispatcher.waiting_drivers(), vec![DriverId::from("d")]);
    }

    #[test]
    fn matched_driver_leaves_idle_pool() {
        let roster = roster_with(&[("far", (9, 9), 1), ("near", (0, 1), 1)]);
        let mut dispatcher = FleetDispatcher::default();
        for id in ["far", "near"] {
            let driver = roster.driver(&id.into()).expect("driver");
            dispatcher.match_rider_for(driver);
        }

        let rider = Rider::new("r", Location::new(0, 0), Location::new(2, 2), 5);
        let chosen = dispatcher.match_driver_for(&rider, &roster).expect("match");
        assert_eq!(chosen, Some(DriverId::from("near")));
        assert_eq!(dispatcher.waiting_drivers(), vec![DriverId::from("far")]);
        assert!(!dispatcher.is_rider_waiting(&"r".into()));
    }

    #[test]
    fn simple_policy_takes_longest_idle_driver() {
        let roster = roster_with(&[("far", (9, 9), 1), ("near", (0, 1), 1)]);
        let mut dispatcher = FleetDispatcher::new(Box::new(SimpleMatching));
        for id in ["far", "near"] {
            let driver = roster.driver(&id.into()).expect("driver");
            dispatcher.match_rider_for(driver);
        }

        let rider = Rider::new("r", Location::new(0, 0), Location::new(2, 2), 5);
        let chosen = dispatcher.match_driver_for(&rider, &roster).expect("match");
        assert_eq!(chosen, Some(DriverId::from("far")));
    }

    #[test]
    fn cancel_ride_reports_membership() {
        let roster = Roster::default();
        let mut dispatcher = FleetDispatcher::default();
        let rider = Rider::new("r", Location::new(0, 0), Location::new(2, 2), 5);
        dispatcher.match_driver_for(&rider, &roster).expect("match");

        assert!(dispatcher.cancel_ride(&"r".into()));
        assert!(!dispatcher.cancel_ride(&"r".into()));
        assert!(dispatcher.waiting_riders().is_empty());
    }
}
