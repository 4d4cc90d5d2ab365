pub mod algorithm;
pub mod dispatcher;
pub mod fastest_arrival;
pub mod simple;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

pub use algorithm::MatchingAlgorithm;
pub use dispatcher::{Dispatcher, FleetDispatcher};
pub use fastest_arrival::FastestArrival;
pub use simple::SimpleMatching;

/// Policy used by the [FleetDispatcher] to choose among idle drivers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingAlgorithmType {
    Simple,
    #[default]
    FastestArrival,
}

impl MatchingAlgorithmType {
    pub fn build(self) -> Box<dyn MatchingAlgorithm> {
        match self {
            MatchingAlgorithmType::Simple => Box::new(SimpleMatching),
            MatchingAlgorithmType::FastestArrival => Box::new(FastestArrival),
        }
    }
}

/// Resource wrapper for the dispatcher trait object.
#[derive(Resource)]
pub struct DispatcherResource(pub Box<dyn Dispatcher>);

impl DispatcherResource {
    pub fn new(dispatcher: Box<dyn Dispatcher>) -> Self {
        Self(dispatcher)
    }
}

impl std::ops::Deref for DispatcherResource {
    type Target = dyn Dispatcher;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl std::ops::DerefMut for DispatcherResource {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}
