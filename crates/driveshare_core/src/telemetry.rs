//! Activity recording and the end-of-run report.
//!
//! The monitor is a passive observer: events notify it of what happened, and nothing it
//! does feeds back into the simulation.

use std::collections::BTreeMap;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::location::{manhattan_distance, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Rider,
    Driver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Request,
    Cancel,
    Pickup,
    Dropoff,
}

/// One notable occurrence, as reported by an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub timestamp: u64,
    pub category: Category,
    pub action: Action,
    pub id: String,
    pub location: Location,
}

pub trait Monitor: Send + Sync {
    fn notify(
        &mut self,
        timestamp: u64,
        category: Category,
        action: Action,
        id: &str,
        location: Location,
    );
}

/// Records every activity in arrival order, plus a per-actor history for reporting.
#[derive(Debug, Default)]
pub struct ActivityMonitor {
    trace: Vec<Activity>,
    histories: BTreeMap<(Category, String), Vec<usize>>,
}

impl ActivityMonitor {
    pub fn trace(&self) -> &[Activity] {
        &self.trace
    }

    fn history(&self, category: Category) -> impl Iterator<Item = Vec<&Activity>> + '_ {
        let trace = &self.trace;
        self.histories
            .iter()
            .filter(move |((c, _), _)| *c == category)
            .map(move |(_, indices)| indices.iter().map(move |&i| &trace[i]).collect())
    }

    fn count(&self, category: Category, action: Action) -> usize {
        self.trace
            .iter()
            .filter(|a| a.category == category && a.action == action)
            .count()
    }

    /// Average time from a rider's request to their pickup, over riders who were picked up.
    fn average_wait_time(&self) -> f64 {
        let waits: Vec<u64> = self
            .history(Category::Rider)
            .filter_map(|activities| {
                let requested = activities.iter().find(|a| a.action == Action::Request)?;
                let picked_up = activities.iter().find(|a| a.action == Action::Pickup)?;
                Some(picked_up.timestamp.saturating_sub(requested.timestamp))
            })
            .collect();
        mean(waits.iter().copied(), waits.len())
    }

    /// Average distance each driver covered between consecutive recorded locations.
    fn average_total_distance(&self) -> f64 {
        let totals: Vec<u64> = self
            .history(Category::Driver)
            .map(|activities| {
                activities
                    .windows(2)
                    .map(|pair| manhattan_distance(pair[0].location, pair[1].location))
                    .fold(0, u64::saturating_add)
            })
            .collect();
        mean(totals.iter().copied(), totals.len())
    }

    /// Average distance each driver covered with a passenger on board.
    fn average_ride_distance(&self) -> f64 {
        let totals: Vec<u64> = self
            .history(Category::Driver)
            .map(|activities| {
                activities
                    .windows(2)
                    .filter(|pair| {
                        pair[0].action == Action::Pickup && pair[1].action == Action::Dropoff
                    })
                    .map(|pair| manhattan_distance(pair[0].location, pair[1].location))
                    .fold(0, u64::saturating_add)
            })
            .collect();
        mean(totals.iter().copied(), totals.len())
    }

    pub fn report(&self) -> SimReport {
        SimReport {
            rider_wait_time: self.average_wait_time(),
            driver_total_distance: self.average_total_distance(),
            driver_ride_distance: self.average_ride_distance(),
            riders_requested: self.count(Category::Rider, Action::Request),
            riders_cancelled: self.count(Category::Rider, Action::Cancel),
            riders_picked_up: self.count(Category::Rider, Action::Pickup),
            riders_dropped_off: self.count(Category::Rider, Action::Dropoff),
            drivers_seen: self.history(Category::Driver).count(),
        }
    }
}

fn mean(values: impl Iterator<Item = u64>, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    values.map(|value| value as f64).sum::<f64>() / len as f64
}

impl Monitor for ActivityMonitor {
    fn notify(
        &mut self,
        timestamp: u64,
        category: Category,
        action: Action,
        id: &str,
        location: Location,
    ) {
        tracing::trace!(timestamp, ?category, ?action, id, %location, "activity");
        let index = self.trace.len();
        self.trace.push(Activity {
            timestamp,
            category,
            action,
            id: id.to_string(),
            location,
        });
        self.histories
            .entry((category, id.to_string()))
            .or_default()
            .push(index);
    }
}

/// Summary statistics for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    pub rider_wait_time: f64,
    pub driver_total_distance: f64,
    pub driver_ride_distance: f64,
    pub riders_requested: usize,
    pub riders_cancelled: usize,
    pub riders_picked_up: usize,
    pub riders_dropped_off: usize,
    pub drivers_seen: usize,
}

/// Resource wrapper holding the activity monitor.
#[derive(Debug, Default, Resource)]
pub struct MonitorResource(pub ActivityMonitor);
