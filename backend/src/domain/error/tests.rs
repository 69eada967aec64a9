//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture holds a valid UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest, "BAD_USER_INPUT")]
#[case(Error::not_found("gone"), ErrorCode::NotFound, "NOT_FOUND")]
#[case(Error::conflict("dup"), ErrorCode::Conflict, "CONFLICT")]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable, "SERVICE_UNAVAILABLE")]
#[case(Error::internal("boom"), ErrorCode::InternalError, "INTERNAL_ERROR")]
fn constructors_set_code(
    #[case] error: Error,
    #[case] expected: ErrorCode,
    #[case] graphql_code: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().graphql_code(), graphql_code);
}

#[rstest]
fn trace_id_absent_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn trace_id_captured_in_scope(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::conflict("taken") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serialise");
    assert_eq!(value, json!({ "code": "not_found", "message": "missing" }));
}

#[rstest]
fn serialises_details_and_trace_id() {
    let error = Error::invalid_request("bad body")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "field": "query" }));
    let value = serde_json::to_value(&error).expect("serialise");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad body",
            "traceId": TRACE_ID,
            "details": { "field": "query" },
        })
    );
}
