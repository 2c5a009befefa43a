//! Mutating HTTP handlers.
//!
//! ```text
//! POST   /api/v1/users/{userId}/weights
//! DELETE /api/v1/users/{userId}/weights/{entryId}
//! PUT    /api/v1/users/{userId}/goal
//! ```
//!
//! Every success response carries the dashboard reloaded from the store.
//! Unusable weight values are declined with `applied: false` and the
//! unchanged dashboard rather than an error.

use actix_web::{delete, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Dashboard, Submission, WeightInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DashboardSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_entry_id, parse_user_id};

/// Request payload for logging a weight.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWeightRequest {
    /// Kilograms as a number or as entered text, e.g. `"97.4"`.
    #[schema(value_type = Option<String>, example = "97.4")]
    pub weight: Option<WeightInput>,
}

/// Request payload for changing the goal weight.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    /// Kilograms as a number or as entered text, e.g. `"80"`.
    #[schema(value_type = Option<String>, example = "80")]
    pub goal_weight: Option<WeightInput>,
}

/// Outcome of a mutating request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    /// Whether the store was changed.
    pub applied: bool,
    /// Why the input was declined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Dashboard after the request.
    #[schema(value_type = DashboardSchema)]
    pub dashboard: Dashboard,
}

fn missing_value() -> WeightInput {
    WeightInput::Text(String::new())
}

async fn respond(
    state: &HttpState,
    submission: Submission,
) -> ApiResult<web::Json<SubmissionResponse>> {
    let response = match submission {
        Submission::Applied(dashboard) => SubmissionResponse {
            applied: true,
            reason: None,
            dashboard,
        },
        Submission::Declined { reason } => SubmissionResponse {
            applied: false,
            reason: Some(reason),
            dashboard: state.journey.dashboard().await?,
        },
    };
    Ok(web::Json(response))
}

/// Append a weight entry dated now.
#[utoipa::path(
    post,
    path = "/api/v1/users/{userId}/weights",
    params(("userId" = String, Path, description = "`rola` or `hussein`")),
    request_body = AddWeightRequest,
    responses(
        (status = 200, description = "Applied or declined submission", body = SubmissionResponse),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 409, description = "Same submission already in progress", body = ErrorSchema),
        (status = 503, description = "Record store unavailable or not configured", body = ErrorSchema)
    ),
    tags = ["weights"],
    operation_id = "addWeight"
)]
#[post("/users/{user_id}/weights")]
pub async fn add_weight(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AddWeightRequest>,
) -> ApiResult<web::Json<SubmissionResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let weight = payload.into_inner().weight.unwrap_or_else(missing_value);
    let submission = state.commands.add_weight(user_id, weight).await?;
    respond(&state, submission).await
}

/// Delete one of the user's entries.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{userId}/weights/{entryId}",
    params(
        ("userId" = String, Path, description = "`rola` or `hussein`"),
        ("entryId" = String, Path, description = "Entry identifier from the history")
    ),
    responses(
        (status = 200, description = "Entry deleted", body = SubmissionResponse),
        (status = 404, description = "Unknown user or entry", body = ErrorSchema),
        (status = 409, description = "Same submission already in progress", body = ErrorSchema),
        (status = 503, description = "Record store unavailable or not configured", body = ErrorSchema)
    ),
    tags = ["weights"],
    operation_id = "deleteWeight"
)]
#[delete("/users/{user_id}/weights/{entry_id}")]
pub async fn delete_weight(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<SubmissionResponse>> {
    let (raw_user_id, raw_entry_id) = path.into_inner();
    let user_id = parse_user_id(&raw_user_id)?;
    let entry_id = parse_entry_id(&raw_entry_id)?;
    let submission = state.commands.delete_weight(user_id, entry_id).await?;
    respond(&state, submission).await
}

/// Replace the user's goal weight.
#[utoipa::path(
    put,
    path = "/api/v1/users/{userId}/goal",
    params(("userId" = String, Path, description = "`rola` or `hussein`")),
    request_body = UpdateGoalRequest,
    responses(
        (status = 200, description = "Applied or declined submission", body = SubmissionResponse),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 409, description = "Same submission already in progress", body = ErrorSchema),
        (status = 503, description = "Record store unavailable or not configured", body = ErrorSchema)
    ),
    tags = ["weights"],
    operation_id = "updateGoal"
)]
#[put("/users/{user_id}/goal")]
pub async fn update_goal(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateGoalRequest>,
) -> ApiResult<web::Json<SubmissionResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let goal_weight = payload
        .into_inner()
        .goal_weight
        .unwrap_or_else(missing_value);
    let submission = state.commands.update_goal(user_id, goal_weight).await?;
    respond(&state, submission).await
}

#[cfg(test)]
#[path = "weights_tests.rs"]
mod tests;
