//! Event processing rate metrics.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use bevy_ecs::prelude::Resource;

use crate::clock::EventKind;

#[derive(Debug, Default, Resource)]
pub struct EventMetrics {
    /// Total events processed.
    pub events_processed: u64,
    /// Start time for rate calculation.
    pub start_time: Option<Instant>,
    /// Events per event kind, keyed by kind name.
    pub events_by_kind: BTreeMap<&'static str, u64>,
}

impl EventMetrics {
    /// Record an event being processed.
    pub fn record_event(&mut self, kind: &EventKind) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
        self.events_processed += 1;
        *self.events_by_kind.entry(kind.name()).or_insert(0) += 1;
    }

    pub fn count(&self, kind: &str) -> u64 {
        self.events_by_kind.get(kind).copied().unwrap_or(0)
    }

    /// Current processing rate (events per wall-clock second).
    pub fn events_per_second(&self) -> f64 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        let elapsed = start.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.events_processed as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Human-readable summary, busiest event kind first.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EventMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Event Processing Summary ===")?;
        writeln!(f, "Total events processed: {}", self.events_processed)?;
        if let Some(start) = self.start_time {
            writeln!(f, "Total time: {:.2}s", start.elapsed().as_secs_f64())?;
            writeln!(f, "Events per second: {:.0}", self.events_per_second())?;
        }

        writeln!(f, "Events by kind:")?;
        let mut entries: Vec<_> = self.events_by_kind.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1));
        for (kind, count) in entries {
            writeln!(f, "  {:15} : {}", kind, count)?;
        }
        Ok(())
    }
}
