//! Tests for the HTTP mapping of domain errors.

use actix_web::{body::to_bytes, http::StatusCode, http::header};
use rstest::rstest;
use serde_json::json;

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn read_error_payload(response: HttpResponse) -> Error {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(err.status_code(), status);
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("boom")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}));
    let response = error.error_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header_value = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header present")
        .to_str()
        .expect("trace id is ascii");
    assert_eq!(header_value, TRACE_ID);

    let payload = read_error_payload(response).await;
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[actix_web::test]
async fn invalid_requests_expose_their_details() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "amount"}));
    let response = error.error_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_error_payload(response).await;
    assert_eq!(payload.message(), "bad");
    assert_eq!(payload.details(), Some(&json!({"field": "amount"})));
}

#[actix_web::test]
async fn unauthorized_responses_carry_a_basic_challenge() {
    let response = Error::unauthorized("invalid credentials").error_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .expect("challenge header present")
        .to_str()
        .expect("challenge is ascii");
    assert!(challenge.starts_with("Basic"));
}

#[actix_web::test]
async fn other_statuses_do_not_challenge() {
    let response = Error::not_found("missing").error_response();
    assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
}
