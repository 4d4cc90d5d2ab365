pub mod clock;
pub mod ecs;
pub mod error;
pub mod event_log;
pub mod location;
pub mod matching;
pub mod profiling;
pub mod runner;
pub mod scenario;
pub mod systems;
pub mod telemetry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use error::SimError;
