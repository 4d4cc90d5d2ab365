use crate::ecs::{Driver, DriverId, Rider};

use super::algorithm::MatchingAlgorithm;

/// First-come-first-served: the driver who has been idle longest gets the rider,
/// regardless of distance.
#[derive(Debug, Default)]
pub struct SimpleMatching;

impl MatchingAlgorithm for SimpleMatching {
    fn find_match(&self, _rider: &Rider, available_drivers: &[&Driver]) -> Option<DriverId> {
        available_drivers.first().map(|driver| driver.id.clone())
    }
}
