//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (journey, users,
//!   weights, health)
//! - **Schemas**: Domain type wrappers ([`ErrorSchema`], [`DashboardSchema`],
//!   [`HistoryViewSchema`], [`ChartViewSchema`], [`MotivationSchema`]) that
//!   provide OpenAPI definitions without coupling domain types to the utoipa
//!   framework
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    CardLabelsSchema, ChartGeometrySchema, ChartViewSchema, DashboardSchema, ErrorCodeSchema,
    ErrorSchema, HistoryRowSchema, HistoryViewSchema, MotivationOriginSchema, MotivationSchema,
    PartnerSummarySchema, ProgressStatusSchema, UserCardSchema,
};
use crate::inbound::http::weights::{AddWeightRequest, SubmissionResponse, UpdateGoalRequest};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weight journey API",
        description = "Shared weight tracking for Rola and Hussein: dashboard, history, charts and motivation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::journey::get_journey,
        crate::inbound::http::journey::reload_journey,
        crate::inbound::http::users::get_history,
        crate::inbound::http::users::get_motivation,
        crate::inbound::http::chart::get_chart,
        crate::inbound::http::chart::get_chart_svg,
        crate::inbound::http::weights::add_weight,
        crate::inbound::http::weights::delete_weight,
        crate::inbound::http::weights::update_goal,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        DashboardSchema,
        UserCardSchema,
        CardLabelsSchema,
        PartnerSummarySchema,
        ProgressStatusSchema,
        HistoryViewSchema,
        HistoryRowSchema,
        ChartViewSchema,
        ChartGeometrySchema,
        MotivationSchema,
        MotivationOriginSchema,
        AddWeightRequest,
        UpdateGoalRequest,
        SubmissionResponse,
    )),
    tags(
        (name = "journey", description = "Both users' dashboard cards"),
        (name = "users", description = "Per-user history, chart and motivation"),
        (name = "weights", description = "Logging weights and editing goals"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI registration and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const DASHBOARD_SCHEMA_NAME: &str = "crate.domain.Dashboard";
    const CARD_SCHEMA_NAME: &str = "crate.domain.UserCard";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case(DASHBOARD_SCHEMA_NAME, "cards")]
    #[case(CARD_SCHEMA_NAME, "weightToGo")]
    #[case(CARD_SCHEMA_NAME, "headline")]
    fn registered_schemas_expose_fields(#[case] schema_name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(schema_name).expect("schema registered");
        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/v1/journey")]
    #[case("/api/v1/journey/reload")]
    #[case("/api/v1/users/{userId}/history")]
    #[case("/api/v1/users/{userId}/chart")]
    #[case("/api/v1/users/{userId}/chart.svg")]
    #[case("/api/v1/users/{userId}/motivation")]
    #[case("/api/v1/users/{userId}/weights")]
    #[case("/api/v1/users/{userId}/weights/{entryId}")]
    #[case("/api/v1/users/{userId}/goal")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_endpoint_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
