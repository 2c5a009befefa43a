//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{JourneyCommand, JourneyQuery, MotivationQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Dashboard, history and chart reads.
    pub journey: Arc<dyn JourneyQuery>,
    /// Add, goal and delete intents.
    pub commands: Arc<dyn JourneyCommand>,
    /// Motivational message lookup.
    pub motivation: Arc<dyn MotivationQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// One `JourneyService` usually backs both `journey` and `commands`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use weight_journey::domain::ports::UnconfiguredJourneyRepository;
    /// use weight_journey::domain::{JourneyService, MotivationService, SeedData};
    /// use weight_journey::inbound::http::state::HttpState;
    ///
    /// let service = Arc::new(JourneyService::new(
    ///     Arc::new(UnconfiguredJourneyRepository),
    ///     SeedData::default(),
    /// ));
    /// let state = HttpState::new(
    ///     service.clone(),
    ///     service,
    ///     Arc::new(MotivationService::disabled()),
    /// );
    /// let _journey = state.journey.clone();
    /// ```
    pub fn new(
        journey: Arc<dyn JourneyQuery>,
        commands: Arc<dyn JourneyCommand>,
        motivation: Arc<dyn MotivationQuery>,
    ) -> Self {
        Self {
            journey,
            commands,
            motivation,
        }
    }
}
