//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod journey_command;
mod journey_query;
mod journey_repository;
mod motivation_query;
mod motivation_source;

pub use journey_command::JourneyCommand;
#[cfg(test)]
pub use journey_command::MockJourneyCommand;
pub use journey_query::JourneyQuery;
#[cfg(test)]
pub use journey_query::MockJourneyQuery;
#[cfg(test)]
pub use journey_repository::MockJourneyRepository;
pub use journey_repository::{
    JourneyRepository, JourneyRepositoryError, SeedingResult, UnconfiguredJourneyRepository,
};
#[cfg(test)]
pub use motivation_query::MockMotivationQuery;
pub use motivation_query::MotivationQuery;
#[cfg(test)]
pub use motivation_source::MockMotivationSource;
pub use motivation_source::{MotivationSource, MotivationSourceError};
