//! Chart HTTP handlers.
//!
//! ```text
//! GET /api/v1/users/{userId}/chart
//! GET /api/v1/users/{userId}/chart.svg
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};

use crate::domain::ChartView;
use crate::inbound::http::ApiResult;
use crate::inbound::http::chart_svg::render_chart_svg;
use crate::inbound::http::schemas::{ChartViewSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ChartGeometryQuery, parse_user_id};

async fn load_chart(
    state: &HttpState,
    raw_user_id: &str,
    query: ChartGeometryQuery,
) -> ApiResult<ChartView> {
    let user_id = parse_user_id(raw_user_id)?;
    let geometry = query.into_geometry()?;
    state.journey.chart(user_id, geometry).await
}

/// Plot coordinates for the user's history and goal line.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/chart",
    params(("userId" = String, Path, description = "`rola` or `hussein`"), ChartGeometryQuery),
    responses(
        (status = 200, description = "Chart mapping", body = ChartViewSchema),
        (status = 400, description = "Unusable geometry", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Record store unavailable or not configured", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getChart"
)]
#[get("/users/{user_id}/chart")]
pub async fn get_chart(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ChartGeometryQuery>,
) -> ApiResult<web::Json<ChartView>> {
    let view = load_chart(&state, &path.into_inner(), query.into_inner()).await?;
    Ok(web::Json(view))
}

/// The same chart rendered as SVG.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/chart.svg",
    params(("userId" = String, Path, description = "`rola` or `hussein`"), ChartGeometryQuery),
    responses(
        (status = 200, description = "SVG document", content_type = "image/svg+xml", body = String),
        (status = 400, description = "Unusable geometry", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Record store unavailable or not configured", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getChartSvg"
)]
#[get("/users/{user_id}/chart.svg")]
pub async fn get_chart_svg(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ChartGeometryQuery>,
) -> ApiResult<HttpResponse> {
    let view = load_chart(&state, &path.into_inner(), query.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "image/svg+xml"))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(render_chart_svg(&view)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{memory_state, test_app};

    #[rstest]
    #[actix_web::test]
    async fn chart_json_uses_default_geometry() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let body: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/hussein/chart")
                .to_request(),
        )
        .await;

        assert_eq!(body["geometry"], json!({"width": 300.0, "height": 150.0, "padding": 20.0}));
        assert_eq!(body["mapping"]["kind"], json!("plotted"));
        assert_eq!(body["mapping"]["points"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["mapping"]["minWeight"], json!(83.0));
    }

    #[rstest]
    #[actix_web::test]
    async fn chart_svg_has_svg_content_type() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/rola/chart.svg?width=600&height=300")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("image/svg+xml")
        );
        let body = actix_test::read_body(response).await;
        let svg = std::str::from_utf8(&body).expect("utf8 svg");
        assert!(svg.contains(r#"viewBox="0 0 600 300""#));
        assert!(svg.contains("Goal: 65kg"));
    }

    #[rstest]
    #[case("/api/v1/users/rola/chart?padding=200")]
    #[case("/api/v1/users/rola/chart?width=wide")]
    #[actix_web::test]
    async fn unusable_geometry_is_rejected(#[case] uri: &str) {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], json!("invalid_request"));
    }
}
