//! Scenario tests for building `RequestError` from a failed request.

use http_request_error::{
    ErrorContext, Method, RequestDescriptor, RequestError, ResponseDescriptor, StatusClass,
};
use serde_json::json;
use std::time::SystemTime;

fn mock_context() -> ErrorContext {
    ErrorContext::without_response(RequestDescriptor::new(Method::Get, "https://api.github.com/"))
}

// ============================================================================
// IDENTITY & MESSAGE
// ============================================================================

#[test]
fn sets_name() {
    let err = RequestError::new("test", 123, &mock_context());
    assert_eq!(err.name(), "HttpError");
}

#[test]
fn sets_message() {
    assert_eq!(RequestError::new("test", 123, &mock_context()).message(), "test");
    assert_eq!(RequestError::new("foo", 123, &mock_context()).message(), "foo");
}

// ============================================================================
// STATUS
// ============================================================================

#[test]
fn sets_status() {
    assert_eq!(RequestError::new("test", 123, &mock_context()).status(), 123);
    assert_eq!(RequestError::new("test", 404, &mock_context()).status(), 404);
}

#[test]
fn sets_status_from_string() {
    assert_eq!(RequestError::new("test", "404", &mock_context()).status(), 404);
}

#[test]
fn sets_status_to_zero_for_non_numbers() {
    assert_eq!(RequestError::new("test", f64::NAN, &mock_context()).status(), 0);
    assert_eq!(RequestError::new("test", json!([]), &mock_context()).status(), 0);
    assert_eq!(RequestError::new("test", SystemTime::now(), &mock_context()).status(), 0);
}

#[test]
fn zero_status_means_no_response_class() {
    let err = RequestError::new("socket hang up", "ECONNRESET", &mock_context());
    assert_eq!(err.status(), 0);
    assert_eq!(err.class(), StatusClass::NoResponse);
}

// ============================================================================
// REQUEST REDACTION
// ============================================================================

#[test]
fn sets_request_with_redacted_authorization() {
    let request = RequestDescriptor::new(Method::Post, "https://api.github.com/authorizations")
        .with_header("authorization", "token secret123")
        .with_body(json!({ "note": "test" }));
    let context = ErrorContext::without_response(request);

    let err = RequestError::new("test", 123, &context);

    let expected = RequestDescriptor::new(Method::Post, "https://api.github.com/authorizations")
        .with_header("authorization", "token [REDACTED]")
        .with_body(json!({ "note": "test" }));
    assert_eq!(err.request(), &expected);
}

#[test]
fn does_not_mutate_original_request() {
    let request = RequestDescriptor::new(Method::Post, "https://api.github.com/authorizations")
        .with_header("authorization", "token secret123");
    let context = ErrorContext::without_response(request);

    let _err = RequestError::new("test", 123, &context);

    assert_eq!(
        context.request().headers.get("authorization"),
        Some("token secret123")
    );
}

#[test]
fn redacts_client_secret_in_url() {
    let context = ErrorContext::without_response(RequestDescriptor::new(
        Method::Get,
        "https://api.github.com/?client_id=123&client_secret=secret123",
    ));
    let err = RequestError::new("test", 123, &context);

    assert_eq!(
        err.request().url,
        "https://api.github.com/?client_id=123&client_secret=[REDACTED]"
    );
    assert_eq!(
        context.request().url,
        "https://api.github.com/?client_id=123&client_secret=secret123"
    );
}

#[test]
fn redacts_access_token_in_url() {
    let context = ErrorContext::without_response(RequestDescriptor::new(
        Method::Get,
        "https://api.github.com/?access_token=secret123",
    ));
    let err = RequestError::new("test", 123, &context);

    assert_eq!(err.request().url, "https://api.github.com/?access_token=[REDACTED]");
}

#[test]
fn redacts_token_after_non_ascii_letter() {
    let context = ErrorContext::without_response(RequestDescriptor::new(
        Method::Get,
        "https://api.github.com/x?q=caféaccess_token=secret123",
    ));
    let err = RequestError::new("test", 123, &context);

    assert_eq!(
        err.request().url,
        "https://api.github.com/x?q=caféaccess_token=[REDACTED]"
    );
    assert!(!err.log_record().to_string().contains("secret123"));
}

#[test]
fn redacts_bare_authorization_token_entirely() {
    let context = ErrorContext::without_response(
        RequestDescriptor::new(Method::Get, "/user").with_header("Authorization", "secret123"),
    );
    let err = RequestError::new("test", 401, &context);

    assert_eq!(err.request().headers.get("authorization"), Some("[REDACTED]"));
}

// ============================================================================
// RESPONSE
// ============================================================================

#[test]
fn sets_response() {
    let response = ResponseDescriptor::new(
        "https://api.github.com/",
        404,
        json!({ "error": "Not Found" }),
    )
    .with_header("x-github-request-id", "1");
    let context = ErrorContext::with_response(
        RequestDescriptor::new(Method::Get, "https://api.github.com/"),
        response.clone(),
    );

    let err = RequestError::new("test", 404, &context);

    assert_eq!(err.response(), Some(&response));
}

#[test]
fn does_not_set_response_if_not_provided() {
    let err = RequestError::new("test", 123, &mock_context());

    assert!(!err.has_response());
    assert!(err.response().is_none());
    let value = serde_json::to_value(&err).unwrap();
    assert!(value.as_object().is_some_and(|o| !o.contains_key("response")));
}

// ============================================================================
// LOGGING SURFACE
// ============================================================================

#[test]
fn log_record_never_contains_credentials() {
    let context = ErrorContext::without_response(
        RequestDescriptor::new(Method::Get, "/user?access_token=s3cr3t&client_secret=t0p")
            .with_header("authorization", "token s3cr3t"),
    );
    let err = RequestError::new("Bad credentials", 401, &context);

    let line = err.log_record().to_string();
    let debug = format!("{:?}", err);
    let json = serde_json::to_string(&err).unwrap();

    for rendered in [&line, &debug, &json] {
        assert!(!rendered.contains("s3cr3t"), "leaked in {}", rendered);
        assert!(!rendered.contains("t0p"), "leaked in {}", rendered);
    }
}
