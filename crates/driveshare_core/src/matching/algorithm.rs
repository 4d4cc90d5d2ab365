use crate::ecs::{Driver, DriverId, Rider};

/// Trait for policies that pick which idle driver serves a rider.
///
/// Policies only choose; the dispatcher owns the pools and removes the chosen driver.
///
/// # Examples
///
/// ```rust
/// use driveshare_core::ecs::{Driver, Rider};
/// use driveshare_core::location::Location;
/// use driveshare_core::matching::{MatchingAlgorithm, SimpleMatching};
///
/// let rider = Rider::new("ada", Location::new(0, 0), Location::new(3, 0), 10);
/// let first = Driver::new("bo", Location::new(9, 9), 1).unwrap();
/// let second = Driver::new("cy", Location::new(0, 1), 1).unwrap();
/// let chosen = SimpleMatching.find_match(&rider, &[&first, &second]);
/// assert_eq!(chosen.map(|id| id.0), Some("bo".to_string()));
/// ```
pub trait MatchingAlgorithm: Send + Sync {
    /// Choose a driver for `rider` from `available_drivers` (given in pool order).
    ///
    /// Returns `None` only if no candidate is acceptable; with a non-empty pool both
    /// built-in policies always choose someone.
    fn find_match(&self, rider: &Rider, available_drivers: &[&Driver]) -> Option<DriverId>;
}
