//! Per-user read handlers.
//!
//! ```text
//! GET /api/v1/users/{userId}/history
//! GET /api/v1/users/{userId}/motivation
//! ```

use actix_web::{get, web};

use crate::domain::{HistoryView, Motivation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, HistoryViewSchema, MotivationSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// History table with the newest entry first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/history",
    params(("userId" = String, Path, description = "`rola` or `hussein`")),
    responses(
        (status = 200, description = "History table", body = HistoryViewSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Record store unavailable or not configured", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getHistory"
)]
#[get("/users/{user_id}/history")]
pub async fn get_history(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<HistoryView>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let history = state.journey.history(user_id).await?;
    Ok(web::Json(history))
}

/// Motivational message, generated when available and from the catalog
/// otherwise.
///
/// The text-generation service never causes this endpoint to fail.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/motivation",
    params(("userId" = String, Path, description = "`rola` or `hussein`")),
    responses(
        (status = 200, description = "Motivational message", body = MotivationSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Record store unavailable or not configured", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getMotivation"
)]
#[get("/users/{user_id}/motivation")]
pub async fn get_motivation(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Motivation>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let user = state.journey.user(user_id).await?;
    Ok(web::Json(state.motivation.motivation_for(&user).await))
}
