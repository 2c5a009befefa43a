//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, TimeZone, Utc};
use mockable::MockClock;

use crate::Trace;
use crate::domain::ports::{JourneyRepository, MotivationQuery};
use crate::domain::{JourneyService, MotivationService, SeedData};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryJourneyRepository;

/// Instant stamped on entries appended during handler tests.
pub(crate) fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// In-memory store whose clock always reads [`test_now`].
pub(crate) fn memory_repository() -> Arc<InMemoryJourneyRepository> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(test_now());
    Arc::new(InMemoryJourneyRepository::new(Arc::new(clock)))
}

/// State backed by one journey service over `repository`.
pub(crate) fn state_with<R>(repository: Arc<R>, motivation: Arc<dyn MotivationQuery>) -> HttpState
where
    R: JourneyRepository + 'static,
{
    let service = Arc::new(JourneyService::new(repository, SeedData::default()));
    HttpState::new(service.clone(), service, motivation)
}

/// State over a fresh in-memory store with generation disabled.
pub(crate) fn memory_state() -> HttpState {
    state_with(
        memory_repository(),
        Arc::new(MotivationService::disabled()),
    )
}

/// App mounting the API the way the server does.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .app_data(web::Data::new(state))
        .service(web::scope("/api/v1").configure(configure))
}
