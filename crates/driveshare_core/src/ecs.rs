//! Actor state machines (drivers and riders) and the [Roster] arena that owns them.
//!
//! Events never hold references to actors; they carry [DriverId] / [RiderId] keys and
//! resolve them against the roster when applied.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::location::{manhattan_distance, Location};

macro_rules! actor_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

actor_id!(DriverId);
actor_id!(RiderId);

/// Time to cover `distance` grid units at `speed` units per tick.
///
/// Rounds to the nearest integer with exact halves going to the even neighbour, so
/// `5 / 2` takes 2 ticks and `3 / 2` takes 2 ticks.
pub fn travel_time(distance: u64, speed: NonZeroU32) -> u64 {
    let speed = u64::from(speed.get());
    let quotient = distance / speed;
    let twice_remainder = (distance % speed) * 2;
    match twice_remainder.cmp(&speed) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient & 1),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    EnRoute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub id: DriverId,
    pub location: Location,
    speed: NonZeroU32,
    pub is_idle: bool,
    pub destination: Option<Location>,
}

impl Driver {
    pub fn new(id: impl Into<DriverId>, location: Location, speed: u32) -> Result<Self, SimError> {
        let id = id.into();
        let Some(speed) = NonZeroU32::new(speed) else {
            return Err(SimError::ZeroSpeed(id));
        };
        Ok(Self {
            id,
            location,
            speed,
            is_idle: true,
            destination: None,
        })
    }

    pub fn speed(&self) -> NonZeroU32 {
        self.speed
    }

    pub fn state(&self) -> DriverState {
        if self.is_idle {
            DriverState::Idle
        } else {
            DriverState::EnRoute
        }
    }

    /// Ticks needed to reach `target` from the current location.
    pub fn travel_time_to(&self, target: Location) -> u64 {
        travel_time(manhattan_distance(self.location, target), self.speed)
    }

    /// Start driving towards `target` and return the travel time.
    ///
    /// A driver that is already busy simply has its destination overwritten.
    pub fn begin_travel(&mut self, target: Location) -> u64 {
        self.is_idle = false;
        self.destination = Some(target);
        self.travel_time_to(target)
    }

    /// Arrive at the destination. Does not make the driver idle.
    pub fn complete_travel(&mut self) -> Result<(), SimError> {
        let destination = self
            .destination
            .ok_or_else(|| SimError::NoDestination(self.id.clone()))?;
        self.location = destination;
        Ok(())
    }

    /// Start carrying `rider` to their destination and return the ride duration.
    pub fn begin_ride(&mut self, rider: &Rider) -> u64 {
        self.begin_travel(rider.destination)
    }

    /// Arrive at the rider's destination and become available again.
    pub fn complete_ride(&mut self) -> Result<(), SimError> {
        let destination = self
            .destination
            .take()
            .ok_or_else(|| SimError::NoDestination(self.id.clone()))?;
        self.location = destination;
        self.is_idle = true;
        Ok(())
    }

    /// Abandon the current assignment in place (the rider cancelled before pickup).
    pub fn release(&mut self) {
        self.destination = None;
        self.is_idle = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderStatus {
    Waiting,
    Cancelled,
    Satisfied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rider {
    pub id: RiderId,
    pub origin: Location,
    pub destination: Location,
    /// Ticks the rider waits after requesting before cancelling.
    pub patience: u64,
    status: RiderStatus,
}

impl Rider {
    pub fn new(
        id: impl Into<RiderId>,
        origin: Location,
        destination: Location,
        patience: u64,
    ) -> Self {
        Self {
            id: id.into(),
            origin,
            destination,
            patience,
            status: RiderStatus::Waiting,
        }
    }

    pub fn status(&self) -> RiderStatus {
        self.status
    }

    /// Waiting -> Cancelled. Returns `false` (and changes nothing) for any other state.
    pub fn cancel(&mut self) -> bool {
        if self.status != RiderStatus::Waiting {
            return false;
        }
        self.status = RiderStatus::Cancelled;
        true
    }

    /// Waiting -> Satisfied. Returns `false` (and changes nothing) for any other state.
    pub fn satisfy(&mut self) -> bool {
        if self.status != RiderStatus::Waiting {
            return false;
        }
        self.status = RiderStatus::Satisfied;
        true
    }
}

/// Arena owning every actor for the lifetime of the simulation.
#[derive(Debug, Default, Resource)]
pub struct Roster {
    drivers: BTreeMap<DriverId, Driver>,
    riders: BTreeMap<RiderId, Rider>,
}

impl Roster {
    pub fn insert_driver(&mut self, driver: Driver) -> Result<(), SimError> {
        if self.drivers.contains_key(&driver.id) {
            return Err(SimError::DuplicateDriver(driver.id));
        }
        self.drivers.insert(driver.id.clone(), driver);
        Ok(())
    }

    pub fn insert_rider(&mut self, rider: Rider) -> Result<(), SimError> {
        if self.riders.contains_key(&rider.id) {
            return Err(SimError::DuplicateRider(rider.id));
        }
        self.riders.insert(rider.id.clone(), rider);
        Ok(())
    }

    pub fn driver(&self, id: &DriverId) -> Result<&Driver, SimError> {
        self.drivers
            .get(id)
            .ok_or_else(|| SimError::UnknownDriver(id.clone()))
    }

    pub fn driver_mut(&mut self, id: &DriverId) -> Result<&mut Driver, SimError> {
        self.drivers
            .get_mut(id)
            .ok_or_else(|| SimError::UnknownDriver(id.clone()))
    }

    pub fn rider(&self, id: &RiderId) -> Result<&Rider, SimError> {
        self.riders
            .get(id)
            .ok_or_else(|| SimError::UnknownRider(id.clone()))
    }

    pub fn rider_mut(&mut self, id: &RiderId) -> Result<&mut Rider, SimError> {
        self.riders
            .get_mut(id)
            .ok_or_else(|| SimError::UnknownRider(id.clone()))
    }

    /// Borrow a rider and a driver mutably at the same time.
    pub fn pair_mut(
        &mut self,
        rider: &RiderId,
        driver: &DriverId,
    ) -> Result<(&mut Rider, &mut Driver), SimError> {
        let rider = self
            .riders
            .get_mut(rider)
            .ok_or_else(|| SimError::UnknownRider(rider.clone()))?;
        let driver = self
            .drivers
            .get_mut(driver)
            .ok_or_else(|| SimError::UnknownDriver(driver.clone()))?;
        Ok((rider, driver))
    }

    pub fn drivers(&self) -> impl Iterator<Item = &Driver> {
        self.drivers.values()
    }

    pub fn riders(&self) -> impl Iterator<Item = &Rider> {
        self.riders.values()
    }
}
