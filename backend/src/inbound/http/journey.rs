//! Dashboard HTTP handlers.
//!
//! ```text
//! GET  /api/v1/journey
//! POST /api/v1/journey/reload
//! ```

use actix_web::{get, post, web};

use crate::domain::Dashboard;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DashboardSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Both users' cards, `rola` first, from the current snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/journey",
    responses(
        (status = 200, description = "Dashboard", body = DashboardSchema),
        (status = 503, description = "Record store unavailable or not configured", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["journey"],
    operation_id = "getJourney"
)]
#[get("/journey")]
pub async fn get_journey(state: web::Data<HttpState>) -> ApiResult<web::Json<Dashboard>> {
    let dashboard = state.journey.dashboard().await?;
    Ok(web::Json(dashboard))
}

/// Refetch both users from the store, clearing a failed initial load.
#[utoipa::path(
    post,
    path = "/api/v1/journey/reload",
    responses(
        (status = 200, description = "Freshly loaded dashboard", body = DashboardSchema),
        (status = 503, description = "Record store unavailable or not configured", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["journey"],
    operation_id = "reloadJourney"
)]
#[post("/journey/reload")]
pub async fn reload_journey(state: web::Data<HttpState>) -> ApiResult<web::Json<Dashboard>> {
    let dashboard = state.journey.reload().await?;
    Ok(web::Json(dashboard))
}
