//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture trace id is a UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("no"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("denied"), ErrorCode::Forbidden)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::internal("boom").try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
#[tokio::test]
async fn constructors_capture_scoped_trace_id(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::not_found("missing") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_without_empty_fields() {
    let value = serde_json::to_value(Error::not_found("document not found"))
        .expect("error serialises");
    assert_eq!(
        value,
        json!({ "code": "not_found", "message": "document not found" })
    );
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace_id(trace_id: TraceId) {
    let payload = json!({ "code": "conflict", "message": "taken", "details": { "field": "email" } });
    let error: Error = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("payload deserialises")
    })
    .await;
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert!(error.trace_id().is_none());
    assert_eq!(error.details(), Some(&json!({ "field": "email" })));
}

#[rstest]
fn deserialising_rejects_blank_message() {
    let payload = json!({ "code": "internal_error", "message": "" });
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
