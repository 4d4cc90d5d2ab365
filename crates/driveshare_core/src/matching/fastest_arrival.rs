use crate::ecs::{Driver, DriverId, Rider};

use super::algorithm::MatchingAlgorithm;

/// Picks the driver who would reach the rider's origin soonest.
/// Equal travel times go to the driver earliest in the pool.
#[derive(Debug, Default)]
pub struct FastestArrival;

impl MatchingAlgorithm for FastestArrival {
    fn find_match(&self, rider: &Rider, available_drivers: &[&Driver]) -> Option<DriverId> {
        let mut best_match: Option<(&Driver, u64)> = None;

        for driver in available_drivers {
            let eta = driver.travel_time_to(rider.origin);
            match best_match {
                Some((_, best_eta)) if best_eta <= eta => {}
                _ => best_match = Some((driver, eta)),
            }
        }

        best_match.map(|(driver, _)| driver.id.clone())
    }
}
