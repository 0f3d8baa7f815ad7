use super::*;

fn response(status: u16, body: &str) -> ApiResponse {
    ApiResponse { status, body: body.to_owned() }
}

#[test]
fn headers_are_replaced_case_insensitively() {
    let mut req = ApiRequest::get("https://api.test/properties");
    req.set_header("authorization", "Bearer old");
    req.set_bearer("new");
    assert_eq!(req.headers.len(), 1);
    assert_eq!(req.header("AUTHORIZATION"), Some("Bearer new"));
}

#[test]
fn post_json_carries_body() {
    let req = ApiRequest::post_json("https://api.test/auth/refresh", serde_json::json!({"refreshToken": "r"}));
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.body, Some(serde_json::json!({"refreshToken": "r"})));
}

#[test]
fn success_range_is_2xx() {
    assert!(response(200, "").is_success());
    assert!(response(204, "").is_success());
    assert!(!response(301, "").is_success());
    assert!(!response(401, "").is_success());
}

#[test]
fn error_for_status_extracts_message() {
    let err = response(500, r#"{"message":"database offline"}"#).error_for_status().unwrap_err();
    assert_eq!(err, ApiError::Status { status: 500, message: Some("database offline".to_owned()) });
    assert_eq!(err.user_message(), "database offline");
}

#[test]
fn missing_or_blank_message_uses_default() {
    for body in ["", "not json", r#"{"error":"x"}"#, r#"{"message":"  "}"#] {
        let err = response(502, body).error_for_status().unwrap_err();
        assert_eq!(err.user_message(), DEFAULT_ERROR_MESSAGE);
    }
}

#[test]
fn non_status_errors_use_default_message() {
    assert_eq!(ApiError::Timeout.user_message(), DEFAULT_ERROR_MESSAGE);
    assert_eq!(ApiError::Network("offline".to_owned()).user_message(), DEFAULT_ERROR_MESSAGE);
}

#[test]
fn only_401_is_unauthorized() {
    assert!(ApiError::Status { status: 401, message: None }.is_unauthorized());
    assert!(!ApiError::Status { status: 403, message: None }.is_unauthorized());
    assert!(!ApiError::Timeout.is_unauthorized());
}

#[test]
fn json_decode_failure_is_decode_error() {
    let err = response(200, "[1,2").json::<Vec<u32>>().unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(response(200, "[1,2]").json::<Vec<u32>>().unwrap(), vec![1, 2]);
}

#[cfg(not(feature = "csr"))]
#[test]
fn gloo_transport_is_unavailable_off_browser() {
    let err = futures::executor::block_on(GlooTransport.send(&ApiRequest::get("https://api.test/x"))).unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[test]
fn expired_deadline_aborts_and_times_out() {
    let mut aborted = false;
    let result = futures::executor::block_on(with_deadline(
        futures::future::pending(),
        futures::future::ready(()),
        || aborted = true,
    ));
    assert_eq!(result, Err(ApiError::Timeout));
    assert!(aborted);
}

#[test]
fn answer_before_deadline_is_returned_without_abort() {
    let mut aborted = false;
    let result = futures::executor::block_on(with_deadline(
        futures::future::ready(Ok(response(200, "[]"))),
        futures::future::pending(),
        || aborted = true,
    ));
    assert_eq!(result, Ok(response(200, "[]")));
    assert!(!aborted);
}
