//! HTTP inbound adapter exposing REST endpoints.

pub mod chart;
pub mod chart_svg;
pub mod error;
pub mod health;
pub mod journey;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;
pub mod weights;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// The caller mounts this under `web::scope("/api/v1")` and provides
/// [`state::HttpState`] as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .service(journey::get_journey)
        .service(journey::reload_journey)
        .service(users::get_history)
        .service(users::get_motivation)
        .service(chart::get_chart)
        .service(chart::get_chart_svg)
        .service(weights::add_weight)
        .service(weights::delete_weight)
        .service(weights::update_goal);
}
