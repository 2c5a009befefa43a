//! Builders for the shared HTTP state and the initial journey load.

use actix_web::web;
use tracing::{error, info};

use weight_journey::domain::JourneyService;
use weight_journey::domain::ports::JourneyRepository;
use weight_journey::inbound::http::health::HealthState;
use weight_journey::inbound::http::state::HttpState;
use weight_journey::startup::Application;

/// Wrap the prepared port bundle for actix.
pub fn build_http_state(application: &Application) -> web::Data<HttpState> {
    web::Data::new(application.http_state.clone())
}

/// Seed and load the first snapshot, then report readiness.
///
/// Readiness flips once the attempt finishes, whether or not it succeeded;
/// a failed load stays visible through the journey endpoints until a reload.
pub async fn load_initial_state(
    journey: &JourneyService<dyn JourneyRepository>,
    health_state: &HealthState,
) {
    match journey.initialise().await {
        Ok(dashboard) => info!(cards = dashboard.cards.len(), "initial journey load complete"),
        Err(err) => error!(code = ?err.code(), error = %err, "initial journey load failed"),
    }
    health_state.mark_ready();
}
