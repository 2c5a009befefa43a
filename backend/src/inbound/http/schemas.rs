//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and register under the domain
//! type's name through utoipa's `as` attribute.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa during OpenAPI generation"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body or path is malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The user or weight entry does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The same submission is already in progress.
    #[schema(rename = "conflict")]
    Conflict,
    /// The record store is unreachable or refused access.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// The record store has not been configured.
    #[schema(rename = "misconfigured")]
    Misconfigured,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "service_unavailable")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "record store unavailable: connection refused")]
    message: String,
    /// Request correlation identifier.
    #[schema(example = "6f1c3a9e-24d3-4c55-9d38-6f0e7f5e8a10")]
    trace_id: Option<String>,
    /// Remediation steps or field-level context.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ProgressStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ProgressStatus)]
pub enum ProgressStatusSchema {
    /// No entries logged yet.
    #[schema(rename = "not_started")]
    NotStarted,
    /// Current weight is above the goal.
    #[schema(rename = "to_go")]
    ToGo,
    /// Current weight is at or below the goal.
    #[schema(rename = "goal_reached")]
    GoalReached,
}

/// OpenAPI schema for [`crate::domain::CardLabels`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CardLabels)]
pub struct CardLabelsSchema {
    /// Start weight, or `N/A`.
    #[schema(example = "98")]
    start: String,
    /// Current weight, or `N/A`.
    #[schema(example = "97.5")]
    current: String,
    /// Goal weight.
    #[schema(example = "85")]
    goal: String,
}

/// OpenAPI schema for [`crate::domain::PartnerSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PartnerSummary)]
#[schema(rename_all = "camelCase")]
pub struct PartnerSummarySchema {
    #[schema(example = "hussein")]
    user_id: String,
    name: String,
    current_weight: f64,
    /// Ready-made summary line.
    #[schema(example = "Hussein's current weight: 97.5kg")]
    line: String,
}

/// OpenAPI schema for [`crate::domain::UserCard`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserCard)]
#[schema(rename_all = "camelCase")]
pub struct UserCardSchema {
    #[schema(example = "rola")]
    user_id: String,
    #[schema(example = "Rola")]
    name: String,
    goal_weight: f64,
    start_weight: Option<f64>,
    current_weight: Option<f64>,
    /// Remaining kilograms to one decimal place, absent without entries.
    #[schema(example = "9.8")]
    weight_to_go: Option<String>,
    status: ProgressStatusSchema,
    #[schema(example = "9.8 kg to go!")]
    headline: String,
    /// Deterministic motivational message.
    message: String,
    labels: CardLabelsSchema,
    entry_count: usize,
    /// Present when the other user has logged a weight.
    partner: Option<PartnerSummarySchema>,
}

/// OpenAPI schema for [`crate::domain::Dashboard`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Dashboard)]
pub struct DashboardSchema {
    /// Both cards, `rola` first.
    cards: Vec<UserCardSchema>,
}

/// OpenAPI schema for [`crate::domain::HistoryRow`].
#[derive(ToSchema)]
#[schema(as = crate::domain::HistoryRow)]
#[schema(rename_all = "camelCase")]
pub struct HistoryRowSchema {
    entry_id: String,
    date: chrono::DateTime<chrono::Utc>,
    weight: f64,
    #[schema(example = "97.5")]
    weight_label: String,
}

/// OpenAPI schema for [`crate::domain::HistoryView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::HistoryView)]
#[schema(rename_all = "camelCase")]
pub struct HistoryViewSchema {
    user_id: String,
    name: String,
    /// Newest entry first.
    rows: Vec<HistoryRowSchema>,
    #[schema(example = "No weight entries yet.")]
    empty_message: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ChartGeometry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ChartGeometry)]
pub struct ChartGeometrySchema {
    width: f64,
    height: f64,
    padding: f64,
}

/// OpenAPI schema for [`crate::domain::ChartView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ChartView)]
#[schema(rename_all = "camelCase")]
pub struct ChartViewSchema {
    user_id: String,
    goal_weight: f64,
    geometry: ChartGeometrySchema,
    /// `{"kind": "insufficient_data"}` or `{"kind": "plotted", points, goalY,
    /// minWeight, maxWeight}`.
    mapping: serde_json::Value,
}

/// OpenAPI schema for [`crate::domain::MotivationOrigin`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MotivationOrigin)]
pub enum MotivationOriginSchema {
    /// Produced by the text-generation service.
    #[schema(rename = "generated")]
    Generated,
    /// Taken from the built-in catalog.
    #[schema(rename = "catalog")]
    Catalog,
}

/// OpenAPI schema for [`crate::domain::Motivation`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Motivation)]
#[schema(rename_all = "camelCase")]
pub struct MotivationSchema {
    user_id: String,
    text: String,
    origin: MotivationOriginSchema,
}
