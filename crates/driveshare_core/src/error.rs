use thiserror::Error;

use crate::ecs::{DriverId, RiderId};
use crate::event_log::EventLogError;

/// Fatal simulation errors. Any of these aborts the run; expected outcomes such as
/// "no driver available" are modelled as data, never as errors.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown driver `{0}`")]
    UnknownDriver(DriverId),
    #[error("unknown rider `{0}`")]
    UnknownRider(RiderId),
    #[error("driver `{0}` is already registered")]
    DuplicateDriver(DriverId),
    #[error("rider `{0}` is already registered")]
    DuplicateRider(RiderId),
    #[error("driver `{0}` has no destination")]
    NoDestination(DriverId),
    #[error("driver `{0}` has zero speed")]
    ZeroSpeed(DriverId),
    #[error("timestamp {timestamp} plus delay {delay} overflows the clock")]
    TimeOverflow { timestamp: u64, delay: u64 },
    #[error("event at {timestamp} scheduled before current time {now}")]
    EventInPast { timestamp: u64, now: u64 },
    #[error(transparent)]
    EventLog(#[from] EventLogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
