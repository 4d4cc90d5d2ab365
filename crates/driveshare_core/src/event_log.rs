//! Textual event logs: one seed event per line.
//!
//! ```text
//! # timestamp kind args...
//! 0 DriverRequest Amaranth 1,1 1
//! 2 RiderRequest Cerise 4,2 1,5 15
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::ecs::{Driver, Rider};
use crate::error::SimError;
use crate::location::{Location, LocationParseError};

/// A seed event from the log, carrying the actor it introduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedEvent {
    DriverRequest { timestamp: u64, driver: Driver },
    RiderRequest { timestamp: u64, rider: Rider },
}

impl SeedEvent {
    pub fn timestamp(&self) -> u64 {
        match self {
            SeedEvent::DriverRequest { timestamp, .. } | SeedEvent::RiderRequest { timestamp, .. } => {
                *timestamp
            }
        }
    }
}

impl fmt::Display for SeedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedEvent::DriverRequest { timestamp, driver } => write!(
                f,
                "{} DriverRequest {} {} {}",
                timestamp,
                driver.id,
                driver.location,
                driver.speed()
            ),
            SeedEvent::RiderRequest { timestamp, rider } => write!(
                f,
                "{} RiderRequest {} {} {} {}",
                timestamp, rider.id, rider.origin, rider.destination, rider.patience
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("failed to read event log: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid {field} `{value}`")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: {source}")]
    InvalidLocation {
        line: usize,
        source: LocationParseError,
    },
    #[error("line {line}: unknown event kind `{kind}`")]
    UnknownKind { line: usize, kind: String },
    #[error("line {line}: driver `{id}` must have a positive speed")]
    ZeroSpeed { line: usize, id: String },
}

fn number<T: std::str::FromStr>(
    line: usize,
    field: &'static str,
    value: &str,
) -> Result<T, EventLogError> {
    value.parse().map_err(|_| EventLogError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

fn location(line: usize, value: &str) -> Result<Location, EventLogError> {
    value
        .parse()
        .map_err(|source| EventLogError::InvalidLocation { line, source })
}

fn expect_fields(line: usize, tokens: &[&str], expected: usize) -> Result<(), EventLogError> {
    if tokens.len() != expected {
        return Err(EventLogError::FieldCount {
            line,
            expected,
            found: tokens.len(),
        });
    }
    Ok(())
}

fn parse_line(line: usize, tokens: &[&str]) -> Result<SeedEvent, EventLogError> {
    if tokens.len() < 2 {
        return Err(EventLogError::FieldCount {
            line,
            expected: 2,
            found: tokens.len(),
        });
    }
    let timestamp = number::<u64>(line, "timestamp", tokens[0])?;

    match tokens[1] {
        "DriverRequest" => {
            expect_fields(line, tokens, 5)?;
            let speed = number::<u32>(line, "speed", tokens[4])?;
            let driver = Driver::new(tokens[2], location(line, tokens[3])?, speed).map_err(
                |_| EventLogError::ZeroSpeed {
                    line,
                    id: tokens[2].to_string(),
                },
            )?;
            Ok(SeedEvent::DriverRequest { timestamp, driver })
        }
        "RiderRequest" => {
            expect_fields(line, tokens, 6)?;
            let rider = Rider::new(
                tokens[2],
                location(line, tokens[3])?,
                location(line, tokens[4])?,
                number::<u64>(line, "patience", tokens[5])?,
            );
            Ok(SeedEvent::RiderRequest { timestamp, rider })
        }
        kind => Err(EventLogError::UnknownKind {
            line,
            kind: kind.to_string(),
        }),
    }
}

/// Parse an event log, keeping the events in file order.
pub fn parse_event_log(input: &str) -> Result<Vec<SeedEvent>, EventLogError> {
    let mut events = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        events.push(parse_line(index + 1, &tokens)?);
    }
    Ok(events)
}

pub fn load_event_log(path: impl AsRef<Path>) -> Result<Vec<SeedEvent>, SimError> {
    let input = std::fs::read_to_string(path).map_err(EventLogError::from)?;
    Ok(parse_event_log(&input)?)
}

/// Render seed events back into the log format.
pub fn write_event_log(events: &[SeedEvent]) -> String {
    let mut output = String::new();
    for event in events {
        output.push_str(&event.to_string());
        output.push('\n');
    }
    output
}
