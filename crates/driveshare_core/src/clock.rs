use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::Resource;

use crate::ecs::{DriverId, RiderId};
use crate::error::SimError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    RiderRequest { rider: RiderId },
    DriverRequest { driver: DriverId },
    Cancellation { rider: RiderId },
    Pickup { rider: RiderId, driver: DriverId },
    Dropoff { rider: RiderId, driver: DriverId },
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::RiderRequest { .. } => "RiderRequest",
            EventKind::DriverRequest { .. } => "DriverRequest",
            EventKind::Cancellation { .. } => "Cancellation",
            EventKind::Pickup { .. } => "Pickup",
            EventKind::Dropoff { .. } => "Dropoff",
        }
    }
}

/// A timestamped state transition. Events are ordered chronologically by the
/// [SimulationClock]; equal timestamps keep their scheduling order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub timestamp: u64,
    pub kind: EventKind,
}

impl Event {
    pub fn rider_request(timestamp: u64, rider: RiderId) -> Self {
        Self {
            timestamp,
            kind: EventKind::RiderRequest { rider },
        }
    }

    pub fn driver_request(timestamp: u64, driver: DriverId) -> Self {
        Self {
            timestamp,
            kind: EventKind::DriverRequest { driver },
        }
    }

    pub fn cancellation(timestamp: u64, rider: RiderId) -> Self {
        Self {
            timestamp,
            kind: EventKind::Cancellation { rider },
        }
    }

    pub fn pickup(timestamp: u64, rider: RiderId, driver: DriverId) -> Self {
        Self {
            timestamp,
            kind: EventKind::Pickup { rider, driver },
        }
    }

    pub fn dropoff(timestamp: u64, rider: RiderId, driver: DriverId) -> Self {
        Self {
            timestamp,
            kind: EventKind::Dropoff { rider, driver },
        }
    }
}

/// The event currently being applied; inserted by the runner before each step.
#[derive(Debug, Clone, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug)]
struct Scheduled {
    sequence: u64,
    event: Event,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (timestamp, insertion order).
        other
            .event
            .timestamp
            .cmp(&self.event.timestamp)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
    next_sequence: u64,
    events: BinaryHeap<Scheduled>,
}

impl SimulationClock {
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Events before [SimulationClock::now] are rejected so time never runs backwards.
    pub fn schedule(&mut self, event: Event) -> Result<(), SimError> {
        if event.timestamp < self.now {
            return Err(SimError::EventInPast {
                timestamp: event.timestamp,
                now: self.now,
            });
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.events.push(Scheduled { sequence, event });
        Ok(())
    }

    /// Schedule events in order, so same-timestamp events pop in the order given.
    pub fn schedule_all(
        &mut self,
        events: impl IntoIterator<Item = Event>,
    ) -> Result<(), SimError> {
        for event in events {
            self.schedule(event)?;
        }
        Ok(())
    }

    pub fn pop_next(&mut self) -> Option<Event> {
        let Scheduled { event, .. } = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek().map(|scheduled| scheduled.event.timestamp)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pops_events_in_time_order() {
        let mut clock = SimulationClock::default();
        clock.schedule(Event::cancellation(10, "a".into())).expect("schedule");
        clock.schedule(Event::cancellation(5, "b".into())).expect("schedule");
        clock.schedule(Event::cancellation(20, "c".into())).expect("schedule");

        let first = clock.pop_next().expect("first event");
        assert_eq!(first.timestamp, 5);
        assert_eq!(clock.now(), 5);

        let second = clock.pop_next().expect("second event");
        assert_eq!(second.timestamp, 10);
        assert_eq!(clock.now(), 10);

        let third = clock.pop_next().expect("third event");
        assert_eq!(third.timestamp, 20);
        assert_eq!(clock.now(), 20);

        assert!(clock.pop_next().is_none());
        assert!(clock.is_empty());
    }

    #[test]
    fn equal_timestamps_pop_in_insertion_order() {
        let mut clock = SimulationClock::default();
        clock
            .schedule_all([
                Event::driver_request(3, "d2".into()),
                Event::rider_request(1, "r1".into()),
                Event::driver_request(3, "d1".into()),
                Event::cancellation(3, "r1".into()),
            ])
            .expect("schedule");
        assert_eq!(clock.len(), 4);
        assert_eq!(clock.next_event_time(), Some(1));

        let order: Vec<_> = std::iter::from_fn(|| clock.pop_next()).collect();
        assert_eq!(
            order,
            vec![
                Event::rider_request(1, "r1".into()),
                Event::driver_request(3, "d2".into()),
                Event::driver_request(3, "d1".into()),
                Event::cancellation(3, "r1".into()),
            ]
        );
    }

    #[test]
    fn events_in_the_past_are_rejected() {
        let mut clock = SimulationClock::default();
        clock.schedule(Event::cancellation(10, "a".into())).expect("schedule");
        clock.pop_next().expect("event");

        let err = clock
            .schedule(Event::cancellation(4, "b".into()))
            .expect_err("past event");
        assert!(matches!(err, SimError::EventInPast { timestamp: 4, now: 10 }));
        assert!(clock.is_empty());
        assert_eq!(clock.now(), 10);

        clock.schedule(Event::cancellation(10, "c".into())).expect("same instant");
    }
}
