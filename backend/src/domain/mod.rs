//! Domain primitives, derived views and the journey reconciler.
//!
//! Purpose: Define strongly typed entities for the two tracked users and the
//! pure functions that turn a snapshot of them into presentation values.
//! Adapters talk to the domain only through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - User, UserId, Weight, WeightEntry: tracked users and their entries.
//! - Progress, Dashboard, HistoryView, ChartMapping: derived views.
//! - JourneyService: reconciler implementing the journey driving ports.
//! - MotivationService: catalog-backed motivation use case.

pub mod chart;
pub mod dashboard;
pub mod error;
pub mod history;
pub mod journey_service;
pub mod motivation;
pub mod ports;
pub mod progress;
pub mod seed;
pub mod submission;
pub mod trace_id;
pub mod user;

pub use self::chart::{
    CHART_HEADROOM_KG, ChartGeometry, ChartMapping, ChartPlot, ChartPoint, ChartView, map_chart,
};
pub use self::dashboard::{CardLabels, Dashboard, JourneySnapshot, PartnerSummary, UserCard};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::history::{EMPTY_HISTORY_MESSAGE, HistoryRow, HistoryView};
pub use self::journey_service::{JourneyService, ViewState};
pub use self::motivation::{
    MOTIVATION_CATALOG, Motivation, MotivationOrigin, MotivationService, catalog_message,
    motivation_prompt, welcome_message,
};
pub use self::progress::{
    ABSENT_WEIGHT_LABEL, Progress, ProgressStatus, format_one_decimal, weight_label,
};
pub use self::seed::{SeedData, SeedDataError, SeedEntry, SeedUser};
pub use self::submission::{MutationKind, Submission, WeightInput};
pub use self::trace_id::TraceId;
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, User, UserId, UserValidationError, Weight, WeightEntry,
    WeightEntryId, order_for_display,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use weight_journey::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
