//! Tests for the mutating handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{
    MockJourneyCommand, MockJourneyQuery, UnconfiguredJourneyRepository,
};
use crate::domain::{Error, MotivationService};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::test_utils::{memory_state, state_with, test_app};

fn card<'a>(body: &'a Value, user_id: &str) -> &'a Value {
    body["dashboard"]["cards"]
        .as_array()
        .and_then(|cards| cards.iter().find(|card| card["userId"] == user_id))
        .expect("card for user")
}

async fn send(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(state)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value)
}

#[rstest]
#[case::text(json!({"weight": "97.4"}))]
#[case::number(json!({"weight": 97.4}))]
#[actix_web::test]
async fn logged_weight_becomes_current(#[case] payload: Value) {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users/hussein/weights")
        .set_json(payload);
    let (status, body) = send(memory_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], json!(true));
    let hussein = card(&body, "hussein");
    assert_eq!(hussein["currentWeight"], json!(97.4));
    assert_eq!(hussein["entryCount"], json!(3));
    assert_eq!(hussein["weightToGo"], json!("12.4"));
    assert_eq!(card(&body, "rola")["entryCount"], json!(2));
}

#[rstest]
#[case::unparsable(json!({"weight": "heavy"}))]
#[case::zero(json!({"weight": "0"}))]
#[case::negative(json!({"weight": -3}))]
#[case::empty(json!({"weight": ""}))]
#[case::missing(json!({}))]
#[actix_web::test]
async fn unusable_weights_are_declined(#[case] payload: Value) {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users/rola/weights")
        .set_json(payload);
    let (status, body) = send(memory_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], json!(false));
    assert!(body["reason"].is_string());
    assert_eq!(card(&body, "rola")["entryCount"], json!(2));
    assert_eq!(card(&body, "rola")["currentWeight"], json!(74.8));
}

#[rstest]
#[actix_web::test]
async fn malformed_body_is_invalid_request() {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users/rola/weights")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"weight\":");
    let (status, body) = send(memory_state(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["code"], json!("malformed_body"));
    assert!(body["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn unknown_user_is_not_found() {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users/sam/weights")
        .set_json(json!({"weight": "70"}));
    let (status, body) = send(memory_state(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"]["code"], json!("unknown_user"));
}

#[rstest]
#[case::reached("74.8", "0.0", "goal_reached")]
#[case::lower("70", "4.8", "to_go")]
#[actix_web::test]
async fn goal_update_recomputes_progress(
    #[case] goal: &str,
    #[case] to_go: &str,
    #[case] status_label: &str,
) {
    let request = actix_test::TestRequest::put()
        .uri("/api/v1/users/rola/goal")
        .set_json(json!({"goalWeight": goal}));
    let (status, body) = send(memory_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], json!(true));
    let rola = card(&body, "rola");
    assert_eq!(rola["weightToGo"], json!(to_go));
    assert_eq!(rola["status"], json!(status_label));
}

#[rstest]
#[actix_web::test]
async fn deleting_an_entry_reloads_the_dashboard() {
    let state = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let history: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/hussein/history")
            .to_request(),
    )
    .await;
    let newest = history["rows"][0]["entryId"]
        .as_str()
        .expect("entry id")
        .to_owned();

    let uri = format!("/api/v1/users/hussein/weights/{newest}");
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let hussein = card(&body, "hussein");
    assert_eq!(hussein["entryCount"], json!(1));
    assert_eq!(hussein["currentWeight"], json!(98.0));

    let again = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn entries_of_the_other_user_cannot_be_deleted() {
    let state = memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    let history: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/rola/history")
            .to_request(),
    )
    .await;
    let rola_entry = history["rows"][0]["entryId"].as_str().expect("entry id");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/users/hussein/weights/{rola_entry}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn unconfigured_store_reports_remediation() {
    let state = state_with(
        Arc::new(UnconfiguredJourneyRepository),
        Arc::new(MotivationService::disabled()),
    );
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users/rola/weights")
        .set_json(json!({"weight": "70"}));
    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], json!("misconfigured"));
    assert_eq!(body["details"]["code"], json!("store_not_configured"));
    assert!(body["details"]["remediation"].is_array());
}

#[rstest]
#[actix_web::test]
async fn in_flight_duplicate_is_conflict() {
    let mut commands = MockJourneyCommand::new();
    commands.expect_add_weight().times(1).returning(|_, _| {
        Err(Error::conflict("a add_weight submission for rola is already in progress"))
    });
    let state = HttpState::new(
        Arc::new(MockJourneyQuery::new()),
        Arc::new(commands),
        Arc::new(MotivationService::disabled()),
    );
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users/rola/weights")
        .set_json(json!({"weight": "70"}));
    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!("conflict"));
}
